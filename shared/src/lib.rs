pub mod engine;
pub mod models;
