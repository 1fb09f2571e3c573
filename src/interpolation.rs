//! # Trilinear interpolation over a published table
//!
//! This module implements the read hot path: evaluating a fully published
//! [`TableGrid`] at a continuous query point by blending the 8 corners of the
//! enclosing cell with the fractional in-cell offsets.
//!
//! ## Properties
//!
//! - **No locking, no allocation**: the table is immutable once published, so
//!   concurrent evaluation needs no synchronization and the stencil lives
//!   entirely on the stack.
//! - **Bounds safety by construction**: the corner indices come from
//!   [`GridSpec::nearest_cell`](crate::grid::GridSpec::nearest_cell), whose
//!   clamp guarantees the `+1` corners are in-bounds.
//! - **Saturation**: out-of-domain query points reduce to the boundary cell
//!   with clamped fractions; see the policy in [`crate::grid`].
//!
//! ## See also
//!
//! - [`Lerp`] – The payload blend implemented by `f64` and [`RatePair`].
use nalgebra::Vector3;

use crate::constants::Coordinate;
use crate::table::{RatePair, TableGrid};

/// Linear blend between two payload values.
///
/// `lerp(a, b, 0.0) == a`, `lerp(a, b, 1.0) == b`; the trilinear stencil only
/// ever calls this with `t` in `[0, 1]` (or NaN propagated from a NaN query).
pub trait Lerp: Copy {
    fn lerp(a: Self, b: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for RatePair {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        RatePair {
            heating: f64::lerp(a.heating, b.heating, t),
            cooling: f64::lerp(a.cooling, b.cooling, t),
        }
    }
}

impl<P: Lerp> TableGrid<P> {
    /// Evaluate the table at a continuous query point.
    ///
    /// Gathers the 8 corners of the cell located by the clamped index mapping
    /// and blends them axis by axis with the in-cell fractions. Pure function
    /// of the published table; any number of threads may call it concurrently.
    ///
    /// Arguments
    /// -----------------
    /// * `point`: Continuous coordinates along the `(i, j, k)` axes.
    ///
    /// Return
    /// ----------
    /// * The trilinearly blended payload. Out-of-domain points saturate at the
    ///   boundary cell's values.
    ///
    /// See also
    /// ------------
    /// * [`GridSpec::nearest_cell`](crate::grid::GridSpec::nearest_cell) – Index clamp and fraction policy.
    pub fn interpolate(&self, point: &Vector3<Coordinate>) -> P {
        let [ci, cj, ck] = self.spec().nearest_cell(point);
        let (i, j, k) = (ci.index, cj.index, ck.index);

        // blend along i first, then j, then k
        let c00 = P::lerp(*self.corner(i, j, k), *self.corner(i + 1, j, k), ci.fraction);
        let c01 = P::lerp(
            *self.corner(i, j, k + 1),
            *self.corner(i + 1, j, k + 1),
            ci.fraction,
        );
        let c10 = P::lerp(
            *self.corner(i, j + 1, k),
            *self.corner(i + 1, j + 1, k),
            ci.fraction,
        );
        let c11 = P::lerp(
            *self.corner(i, j + 1, k + 1),
            *self.corner(i + 1, j + 1, k + 1),
            ci.fraction,
        );

        let c0 = P::lerp(c00, c10, cj.fraction);
        let c1 = P::lerp(c01, c11, cj.fraction);
        P::lerp(c0, c1, ck.fraction)
    }
}
