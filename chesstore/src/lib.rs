pub mod config;
pub mod errors;
pub mod models;
pub mod postgrest;
pub mod store;

pub use crate::config::StoreConfig;
pub use crate::errors::{Result, StoreError};
pub use crate::models::{Game, User};
pub use crate::postgrest::PostgrestStore;
pub use crate::store::GameStore;
