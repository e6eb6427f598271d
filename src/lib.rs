pub mod error;
pub mod config;
pub mod model;
pub mod source;
pub mod templates;
pub mod db;
pub mod migrate;
