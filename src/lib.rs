pub mod amqp;
pub mod config;
pub mod dump;
pub mod errors;
pub mod models;
