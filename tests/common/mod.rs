//! Common test utilities and helpers.
//!
//! This module provides shared functionality for all tests, including:
//! - Document builders and fixtures
//! - Scripted detectors with call accounting
//! - Structural and content assertions

#![allow(dead_code)]

pub mod assertions;
pub mod detectors;
pub mod fixtures;

pub use assertions::*;
pub use detectors::*;
pub use fixtures::*;
