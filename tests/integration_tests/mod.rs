//! Integration tests module
//!
//! This module provides end-to-end integration tests for stratum, including:
//! - Archive + live loading into a snapshot and dashboard
//! - Snapshot cache behavior
//! - Error handling at the loading boundary

pub mod error_scenarios;
pub mod fixtures;
pub mod pipeline_test;
