//! Headless view-model for the upload and dashboard pages.
//!
//! Each region a workflow is allowed to touch is an explicit value here, so
//! controllers can be driven without a document and the binary can print the
//! resulting state.

pub mod alerts;
pub mod chart;
pub mod details;
pub mod map;
pub mod pages;
pub mod table;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViewError {
    #[error("invalid map coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}
