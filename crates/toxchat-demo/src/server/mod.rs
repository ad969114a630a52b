mod app;
mod routes;
mod static_files;
mod websocket;

pub use app::{build_app, run_server};
