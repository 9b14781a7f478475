pub mod config;
pub mod db;
pub mod error;
pub mod intent;
pub mod ledger;
pub mod model;
pub mod payments;
pub mod speech;
pub mod tools;
pub mod wallet;
pub mod web;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
