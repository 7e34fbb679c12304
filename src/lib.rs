pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod profile;
pub mod store;
pub mod workbook;
