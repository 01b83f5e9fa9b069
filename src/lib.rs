pub mod config;
pub mod config_validator;
pub mod database;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod response;
pub mod server;
pub mod validation;

pub use config::Config;
pub use database::{Chirp, Database};
pub use error::{ApiError, Result, StoreError};
pub use handlers::AppState;
pub use response::ApiResponse;
pub use server::{create_app, Server};
pub use validation::{ChirpValidator, Validation};
