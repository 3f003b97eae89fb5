//! # API Route Handlers
//!
//! This module organizes the Axum route handlers for `licensescan-server`.

pub mod extract;
pub mod general;

pub use extract::*;
pub use general::*;

use super::{errors::AppError, state::AppState, types::ExtractResponse};
