//! # Prompt Template Modules
//!
//! This module organizes all prompt templates used by the `licensescan` library.

pub mod license;
