pub mod account;
pub mod config;
pub mod logging;

pub mod aggregate;
pub mod error;
pub mod resolver;
pub mod router;
pub mod upstream;
pub mod views;
