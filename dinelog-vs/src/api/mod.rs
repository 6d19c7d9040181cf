//! HTTP API handlers for dinelog-vs

pub mod error;
pub mod health;
pub mod visits;

pub use error::ApiError;
pub use health::health_routes;
pub use visits::{list_visits, submit_visit};
