//! # Constants and type definitions for rategrid
//!
//! This module centralizes the **numeric tolerances** and **common type
//! definitions** used throughout the `rategrid` library.
//!
//! ## Overview
//!
//! - Core type aliases used across the crate
//! - Tolerances for floating-point comparisons
//!
//! These definitions are used by all main modules, including the grid geometry,
//! the table loaders, and the interpolation hot path.

// -------------------------------------------------------------------------------------------------
// Numeric tolerances
// -------------------------------------------------------------------------------------------------

/// Numerical epsilon used for floating-point comparisons in tests and validation
pub const EPS: f64 = 1e-12;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Continuous physical coordinate along one grid axis
pub type Coordinate = f64;

/// Name under which a table is registered in a [`RateGrid`](crate::rategrid::RateGrid) context
pub type TableName = String;
