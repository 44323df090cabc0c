pub mod app;
pub mod dashboard;
pub mod guest;
pub mod modules;
pub mod types;
pub mod utils;
