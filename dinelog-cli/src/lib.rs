//! dinelog-cli library - command-line client for the visit service
//!
//! The client fetches and submits visits over HTTP and runs the
//! recommendation engine in-process on the fetched list.

pub mod client;
pub mod render;
pub mod tracker;

pub use client::{ClientError, VisitClient};
pub use tracker::TrackerState;
