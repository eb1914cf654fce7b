pub mod config;
pub mod error;
pub mod ids;
pub mod locale;
pub mod models;
pub mod rng;
pub mod synthetic;
