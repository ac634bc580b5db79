pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod schemas;
pub mod store;
pub mod utils;

pub mod app;

pub use app::create_app;
