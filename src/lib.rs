pub mod backend;
pub mod cli;
pub mod core;
pub mod dashboard;
pub mod models;
pub mod render;
pub mod session;
pub mod state;
