pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod project_store;
pub mod service;
pub mod state;
