mod hydrate;
mod mirror;
mod session;
