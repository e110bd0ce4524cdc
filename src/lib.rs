pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod metrics;
pub mod utils;
pub mod web;

#[cfg(test)]
mod test_support;
