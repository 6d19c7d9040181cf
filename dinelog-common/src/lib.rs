//! # dinelog Common Library
//!
//! Shared code for the dinelog service and client:
//! - Visit models and their wire format
//! - SQLite-backed visit store
//! - Recommendation engine
//! - Bootstrap configuration loading
//! - Utility functions

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod recommend;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
pub use models::{VisitDraft, VisitRecord};
pub use recommend::{recommend, Pick, Recommendation, ScoringParams};
