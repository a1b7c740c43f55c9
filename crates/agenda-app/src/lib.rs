pub mod app;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod middleware;
pub mod service_handler;

#[cfg(test)]
mod test_support;
