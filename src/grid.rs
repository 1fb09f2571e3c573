//! # Grid geometry and bounded indexing
//!
//! This module defines the **static geometry** of a rate table and the pure
//! mapping from a continuous physical coordinate to a validated discrete cell
//! index.
//!
//! ## Overview
//!
//! - [`AxisSpec`] – one axis of the grid: origin, step and point count,
//!   validated eagerly at construction.
//! - [`GridSpec`] – the three axes of a table, in `(i, j, k)` order with `i`
//!   slowest-varying in storage.
//! - [`IndexTriple`] – a clamped `(i, j, k)` cell index whose `+1` neighbor is
//!   always in-bounds.
//! - [`CellCoordinate`] – a cell index together with the fractional offset of
//!   the query point inside the cell.
//!
//! ## Saturation policy
//!
//! Continuous coordinates are floored onto the grid and the resulting index is
//! clamped to `[0, len - 2]` on each axis, reserving the top row/column/plane
//! for the `+1` corner used by the interpolation stencil. The in-cell fraction
//! is clamped to `[0, 1]` together with the index, so out-of-domain queries
//! saturate at the boundary cell's values instead of extrapolating or reading
//! out of bounds. This is a deliberate, documented policy, not an error path:
//! a wildly out-of-range coordinate yields the nearest valid cell.
//!
//! ## See also
//!
//! - [`TableGrid`](crate::table::TableGrid) – Storage indexed by [`IndexTriple`].
//! - [`interpolate`](crate::interpolation) – The trilinear stencil built on
//!   [`CellCoordinate`].
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::Coordinate;
use crate::rategrid_errors::ConfigError;

/// One axis of a regular grid: `len` points starting at `min`, spaced by `step`.
///
/// Construction is the single validation point for the grid geometry: a
/// non-positive or non-finite step, a non-finite origin, or fewer than two
/// points are configuration errors and are rejected before any table I/O can
/// happen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    min: Coordinate,
    step: Coordinate,
    len: usize,
}

impl AxisSpec {
    /// Build a validated axis.
    ///
    /// Arguments
    /// -----------------
    /// * `min`: Physical coordinate of the first grid point.
    /// * `step`: Spacing between consecutive grid points. Must be finite and `> 0`.
    /// * `len`: Number of grid points on this axis. Must be `>= 2` so that at
    ///   least one interpolation cell exists.
    ///
    /// Return
    /// ----------
    /// * A new [`AxisSpec`], or [`ConfigError::InvalidGridSpec`] describing the
    ///   offending parameter.
    pub fn new(min: Coordinate, step: Coordinate, len: usize) -> Result<Self, ConfigError> {
        if !min.is_finite() {
            return Err(ConfigError::InvalidGridSpec(format!(
                "axis origin must be finite, got {min}"
            )));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::InvalidGridSpec(format!(
                "axis step must be finite and strictly positive, got {step}"
            )));
        }
        if len < 2 {
            return Err(ConfigError::InvalidGridSpec(format!(
                "axis needs at least 2 points to form an interpolation cell, got {len}"
            )));
        }
        Ok(AxisSpec { min, step, len })
    }

    /// Physical coordinate of the first grid point.
    pub fn min(&self) -> Coordinate {
        self.min
    }

    /// Spacing between consecutive grid points.
    pub fn step(&self) -> Coordinate {
        self.step
    }

    /// Number of grid points on this axis.
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        // `len >= 2` is enforced at construction
        false
    }

    /// Physical coordinate of the last grid point.
    pub fn max(&self) -> Coordinate {
        self.min + self.step * (self.len - 1) as f64
    }

    /// Map a continuous coordinate onto this axis.
    ///
    /// The coordinate is floored to a cell index which is then clamped to
    /// `[0, len - 2]`; the fractional offset inside the cell is clamped to
    /// `[0, 1]`. See the module-level saturation policy.
    ///
    /// Arguments
    /// -----------------
    /// * `coordinate`: The continuous physical coordinate to locate.
    ///
    /// Return
    /// ----------
    /// * The [`CellCoordinate`] of the interpolation cell containing (or
    ///   saturating) the coordinate.
    pub fn nearest_cell(&self, coordinate: Coordinate) -> CellCoordinate {
        let raw = (coordinate - self.min) / self.step;
        // NaN falls through the saturating cast to cell 0; the fraction then
        // carries the NaN to the caller.
        let floored = raw.floor().clamp(0.0, (self.len - 2) as f64);
        let index = floored as usize;
        let fraction = (raw - index as f64).clamp(0.0, 1.0);
        CellCoordinate { index, fraction }
    }
}

/// The three axes of a table, in `(i, j, k)` storage order with `i`
/// slowest-varying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    axes: [AxisSpec; 3],
}

impl GridSpec {
    pub fn new(axis_i: AxisSpec, axis_j: AxisSpec, axis_k: AxisSpec) -> Self {
        GridSpec {
            axes: [axis_i, axis_j, axis_k],
        }
    }

    /// The axes in `(i, j, k)` order.
    pub fn axes(&self) -> &[AxisSpec; 3] {
        &self.axes
    }

    /// Grid point counts `(D1, D2, D3)`.
    pub fn dims(&self) -> [usize; 3] {
        [self.axes[0].len(), self.axes[1].len(), self.axes[2].len()]
    }

    /// Total number of grid points, `D1 * D2 * D3`.
    pub fn point_count(&self) -> usize {
        self.dims().iter().product()
    }

    /// Locate the interpolation cell for a continuous query point.
    ///
    /// Arguments
    /// -----------------
    /// * `point`: The continuous coordinates along the `(i, j, k)` axes.
    ///
    /// Return
    /// ----------
    /// * One clamped [`CellCoordinate`] per axis.
    ///
    /// See also
    /// ------------
    /// * [`AxisSpec::nearest_cell`] – The per-axis mapping and its saturation policy.
    pub fn nearest_cell(&self, point: &Vector3<Coordinate>) -> [CellCoordinate; 3] {
        [
            self.axes[0].nearest_cell(point.x),
            self.axes[1].nearest_cell(point.y),
            self.axes[2].nearest_cell(point.z),
        ]
    }

    /// Locate the cell index triple for a continuous query point, discarding
    /// the in-cell fractions.
    pub fn nearest_index(&self, point: &Vector3<Coordinate>) -> IndexTriple {
        let [ci, cj, ck] = self.nearest_cell(point);
        IndexTriple {
            i: ci.index,
            j: cj.index,
            k: ck.index,
        }
    }
}

/// A clamped cell index `(i, j, k)` with `i <= D1 - 2`, `j <= D2 - 2`,
/// `k <= D3 - 2`.
///
/// The invariant guaranteed by [`GridSpec::nearest_index`] is that the `+1`
/// neighbor `(i + 1, j + 1, k + 1)` is always a valid grid point of the table
/// the triple was derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexTriple {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

/// A clamped cell index along one axis together with the fractional offset of
/// the query point inside that cell, in `[0, 1]`.
///
/// A NaN query coordinate saturates to cell `0` and carries NaN in `fraction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellCoordinate {
    pub index: usize,
    pub fraction: f64,
}
