//! # Immutable rate tables
//!
//! This module defines [`TableGrid`], the **published form** of a loaded
//! lookup table: a contiguous three-dimensional grid of payload values, in
//! row-major `(i, j, k)` order with `i` slowest-varying, tied to the
//! [`GridSpec`] it was loaded against.
//!
//! ## Invariants
//!
//! - A `TableGrid` is never mutated after construction: all fields are private
//!   and only shared references are handed out.
//! - The value count always equals `D1 * D2 * D3` of its [`GridSpec`], so every
//!   [`IndexTriple`] produced by [`GridSpec::nearest_index`] and its `+1`
//!   neighbor resolve to valid storage offsets.
//!
//! ## See also
//!
//! - [`LazyTable`](crate::lazy_table::LazyTable) – The once-only publisher of a `TableGrid`.
//! - [`interpolate`](crate::interpolation) – The read-only hot path over the grid.
use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::grid::{GridSpec, IndexTriple};
use crate::rategrid_errors::InitError;

/// One table entry: the pair of doubles stored per grid point.
///
/// The external table format is a stream of `(heating, cooling)` rate pairs;
/// callers with a different payload shape use [`TableGrid`] with their own type
/// implementing [`Lerp`](crate::interpolation::Lerp).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatePair {
    pub heating: f64,
    pub cooling: f64,
}

/// An immutable three-dimensional grid of payload values.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGrid<P> {
    spec: GridSpec,
    values: Vec<P>,
}

impl<P> TableGrid<P> {
    /// Assemble a table from a fully populated value vector.
    ///
    /// Arguments
    /// -----------------
    /// * `spec`: The validated grid geometry the values were produced for.
    /// * `values`: Exactly `D1 * D2 * D3` payload values in row-major
    ///   `(i, j, k)` order, `i` slowest-varying.
    ///
    /// Return
    /// ----------
    /// * The published [`TableGrid`], or [`InitError::MalformedData`] if the
    ///   value count does not match the grid. No partially filled table is ever
    ///   constructed.
    pub fn new(spec: GridSpec, values: Vec<P>) -> Result<Self, InitError> {
        let expected = spec.point_count();
        if values.len() != expected {
            return Err(InitError::MalformedData(format!(
                "table holds {} values but the grid declares {} points",
                values.len(),
                expected
            )));
        }
        Ok(TableGrid { spec, values })
    }

    /// The grid geometry this table was loaded against.
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Grid point counts `(D1, D2, D3)`.
    pub fn dims(&self) -> [usize; 3] {
        self.spec.dims()
    }

    /// Read-only view of the raw storage, row-major with `i` slowest-varying.
    pub fn values(&self) -> &[P] {
        &self.values
    }

    /// Checked lookup of one grid point.
    ///
    /// Arguments
    /// -----------------
    /// * `triple`: The grid point to read. Unlike the interpolation stencil,
    ///   this accessor accepts the full index range `[0, D - 1]` per axis.
    ///
    /// Return
    /// ----------
    /// * `Some(&P)` for an in-bounds point, `None` otherwise.
    pub fn get(&self, triple: IndexTriple) -> Option<&P> {
        let [d1, d2, d3] = self.dims();
        if triple.i >= d1 || triple.j >= d2 || triple.k >= d3 {
            return None;
        }
        Some(&self.values[self.offset(triple.i, triple.j, triple.k)])
    }

    /// Storage offset of grid point `(i, j, k)`.
    ///
    /// Callers guarantee in-bounds indices; [`GridSpec::nearest_index`] does so
    /// by construction for the stencil corners.
    pub(crate) fn offset(&self, i: usize, j: usize, k: usize) -> usize {
        let [_, d2, d3] = self.dims();
        (i * d2 + j) * d3 + k
    }

    pub(crate) fn corner(&self, i: usize, j: usize, k: usize) -> &P {
        &self.values[self.offset(i, j, k)]
    }
}

impl TableGrid<RatePair> {
    /// Hash of the full table content, bit-exact over the stored pairs.
    ///
    /// Used to check that every thread observing a published table sees
    /// identical contents.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for pair in &self.values {
            pair.heating.to_bits().hash(&mut hasher);
            pair.cooling.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod test_table {
    use nalgebra::Vector3;

    use crate::grid::{AxisSpec, GridSpec, IndexTriple};
    use crate::rategrid_errors::InitError;

    use super::{RatePair, TableGrid};

    fn spec_3x3x2() -> GridSpec {
        GridSpec::new(
            AxisSpec::new(0.0, 1.0, 3).unwrap(),
            AxisSpec::new(0.0, 1.0, 3).unwrap(),
            AxisSpec::new(0.0, 1.0, 2).unwrap(),
        )
    }

    #[test]
    fn test_value_count_is_enforced() {
        let spec = spec_3x3x2();
        assert!(TableGrid::new(spec, vec![0.0_f64; 18]).is_ok());
        assert!(matches!(
            TableGrid::new(spec, vec![0.0_f64; 17]),
            Err(InitError::MalformedData(_))
        ));
        assert!(matches!(
            TableGrid::new(spec, Vec::<f64>::new()),
            Err(InitError::MalformedData(_))
        ));
    }

    #[test]
    fn test_row_major_layout() {
        let spec = spec_3x3x2();
        // value encodes its own (i, j, k) as i*100 + j*10 + k
        let values: Vec<f64> = (0..3)
            .flat_map(|i| (0..3).flat_map(move |j| (0..2).map(move |k| (i * 100 + j * 10 + k) as f64)))
            .collect();
        let table = TableGrid::new(spec, values).unwrap();

        assert_eq!(table.get(IndexTriple { i: 2, j: 1, k: 1 }), Some(&211.0));
        assert_eq!(table.get(IndexTriple { i: 0, j: 2, k: 0 }), Some(&20.0));
        assert_eq!(table.get(IndexTriple { i: 3, j: 0, k: 0 }), None);
        assert_eq!(table.get(IndexTriple { i: 0, j: 0, k: 2 }), None);
    }

    #[test]
    fn test_nearest_index_neighbors_are_always_readable() {
        let spec = spec_3x3x2();
        let table = TableGrid::new(spec, vec![RatePair::default(); 18]).unwrap();

        for point in [
            Vector3::new(-5.0, -5.0, -5.0),
            Vector3::new(500.0, 500.0, 500.0),
            Vector3::new(1.0, 2.0, 1.0),
        ] {
            let t = table.spec().nearest_index(&point);
            assert!(table
                .get(IndexTriple {
                    i: t.i + 1,
                    j: t.j + 1,
                    k: t.k + 1
                })
                .is_some());
        }
    }

    #[test]
    fn test_content_hash_is_content_sensitive() {
        let spec = spec_3x3x2();
        let zeros = TableGrid::new(spec, vec![RatePair::default(); 18]).unwrap();
        let mut values = vec![RatePair::default(); 18];
        values[7].heating = 1.0e-300;
        let perturbed = TableGrid::new(spec, values).unwrap();

        assert_eq!(zeros.content_hash(), zeros.clone().content_hash());
        assert_ne!(zeros.content_hash(), perturbed.content_hash());
    }
}
