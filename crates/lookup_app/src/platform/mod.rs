mod app;
mod bridge;
mod config;
mod logging;
mod protocol;

pub use app::{run_app, serve};
