//! # Table loaders
//!
//! This module defines the [`TableLoader`] collaborator contract and the
//! reference implementation for the external text format: a stream of
//! whitespace-separated numeric pairs, exactly `D1 * D2 * D3` of them, in
//! row-major `(i, j, k)` order with `i` slowest-varying. No header, no
//! delimiter markers.
//!
//! ## Contract
//!
//! - **Deterministic**: the same source yields a bit-identical table across
//!   calls and processes.
//! - **All-or-nothing**: the loader returns a fully populated
//!   [`TableGrid`] or a typed [`InitError`]; no partially filled grid is ever
//!   observable.
//! - A deficit, a surplus, or a non-numeric token in the stream is
//!   [`InitError::MalformedData`]; an unreadable source is
//!   [`InitError::NotFound`]; a refused bulk allocation is
//!   [`InitError::AllocationFailure`].
//!
//! ## See also
//!
//! - [`LazyTable::get_or_load`](crate::lazy_table::LazyTable::get_or_load) – Where a loader is run at most once.
use std::fs;

use camino::Utf8PathBuf;
use itertools::Itertools;

use crate::grid::GridSpec;
use crate::rategrid_errors::InitError;
use crate::table::{RatePair, TableGrid};

/// Producer of one fully populated table.
///
/// Injected into [`LazyTable`](crate::lazy_table::LazyTable), which guarantees
/// the single `load` execution per instance; the loader itself holds the
/// source identifier and target geometry and stays oblivious to caching.
pub trait TableLoader<P> {
    fn load(&self) -> Result<TableGrid<P>, InitError>;
}

/// Loader for the whitespace-separated pair text format.
#[derive(Debug, Clone, PartialEq)]
pub struct TextTableLoader {
    path: Utf8PathBuf,
    spec: GridSpec,
}

impl TextTableLoader {
    /// Bind a source file to a target grid geometry.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: The table source. Resolution and validation of the path are
    ///   the caller's responsibility; existence is only checked at load time.
    /// * `spec`: The validated geometry the stream must populate exactly.
    pub fn new(path: impl Into<Utf8PathBuf>, spec: GridSpec) -> Self {
        TextTableLoader {
            path: path.into(),
            spec,
        }
    }

    pub fn path(&self) -> &Utf8PathBuf {
        &self.path
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }
}

impl TableLoader<RatePair> for TextTableLoader {
    /// Read and parse the source into a published table.
    ///
    /// Return
    /// ----------
    /// * `Ok(TableGrid<RatePair>)` – exactly `D1 * D2 * D3` pairs, row-major.
    /// * `Err(InitError::NotFound)` – the source could not be read.
    /// * `Err(InitError::MalformedData)` – non-numeric token, pair deficit or
    ///   surplus, or a dangling half pair.
    /// * `Err(InitError::AllocationFailure)` – the bulk reservation for the
    ///   grid was refused.
    fn load(&self) -> Result<TableGrid<RatePair>, InitError> {
        let source = fs::read_to_string(&self.path)
            .map_err(|error| InitError::NotFound(format!("{}: {error}", self.path)))?;

        let expected_pairs = self.spec.point_count();
        let expected_tokens = 2 * expected_pairs;

        // cheap shape check first: catches deficit, surplus and dangling half
        // pairs before anything is allocated or parsed
        let token_count = source.split_whitespace().count();
        if token_count != expected_tokens {
            return Err(InitError::MalformedData(format!(
                "{}: expected {expected_pairs} pairs ({expected_tokens} values), found {token_count} values",
                self.path
            )));
        }

        // the one bulk allocation of the initialization path
        let mut values: Vec<RatePair> = Vec::new();
        values.try_reserve_exact(expected_pairs).map_err(|error| {
            InitError::AllocationFailure(format!(
                "{}: reserving {expected_pairs} entries: {error}",
                self.path
            ))
        })?;

        for (heating, cooling) in source.split_whitespace().tuples() {
            let heating: f64 = heating.parse().map_err(|_| {
                InitError::MalformedData(format!("{}: non-numeric token '{heating}'", self.path))
            })?;
            let cooling: f64 = cooling.parse().map_err(|_| {
                InitError::MalformedData(format!("{}: non-numeric token '{cooling}'", self.path))
            })?;
            values.push(RatePair { heating, cooling });
        }

        TableGrid::new(self.spec, values)
    }
}

#[cfg(test)]
mod test_loader {
    use std::io::Write;

    use camino::Utf8PathBuf;

    use crate::grid::{AxisSpec, GridSpec, IndexTriple};
    use crate::rategrid_errors::InitError;

    use super::{TableLoader, TextTableLoader};

    fn spec_2x2x2() -> GridSpec {
        let axis = AxisSpec::new(0.0, 1.0, 2).unwrap();
        GridSpec::new(axis, axis, axis)
    }

    fn write_source(content: &str) -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("table.tab")).unwrap();
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_exact_grid() {
        let pairs: String = (0..8).map(|n| format!("{n}.5 -{n}.25\n")).collect();
        let (_dir, path) = write_source(&pairs);

        let table = TextTableLoader::new(path, spec_2x2x2()).load().unwrap();
        assert_eq!(table.values().len(), 8);

        let last = table.get(IndexTriple { i: 1, j: 1, k: 1 }).unwrap();
        assert_eq!(last.heating, 7.5);
        assert_eq!(last.cooling, -7.25);
    }

    #[test]
    fn test_load_is_deterministic() {
        let pairs: String = (0..8).map(|n| format!("{} {}\n", n as f64 * 0.1, -n)).collect();
        let (_dir, path) = write_source(&pairs);
        let loader = TextTableLoader::new(path, spec_2x2x2());

        let first = loader.load().unwrap();
        let second = loader.load().unwrap();
        assert_eq!(first.content_hash(), second.content_hash());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let loader = TextTableLoader::new("/nonexistent/heating.tab", spec_2x2x2());
        assert!(matches!(loader.load(), Err(InitError::NotFound(_))));
    }

    #[test]
    fn test_truncated_stream_is_malformed() {
        let (_dir, path) = write_source("1.0 2.0 3.0 4.0\n");
        let loader = TextTableLoader::new(path, spec_2x2x2());
        assert!(matches!(loader.load(), Err(InitError::MalformedData(_))));
    }

    #[test]
    fn test_dangling_half_pair_is_malformed() {
        let fifteen: String = (0..15).map(|n| format!("{n} ")).collect();
        let (_dir, path) = write_source(&fifteen);
        let loader = TextTableLoader::new(path, spec_2x2x2());
        assert!(matches!(loader.load(), Err(InitError::MalformedData(_))));
    }

    #[test]
    fn test_surplus_is_malformed() {
        let eighteen: String = (0..18).map(|n| format!("{n} ")).collect();
        let (_dir, path) = write_source(&eighteen);
        let loader = TextTableLoader::new(path, spec_2x2x2());
        assert!(matches!(loader.load(), Err(InitError::MalformedData(_))));
    }

    #[test]
    fn test_non_numeric_token_is_malformed() {
        let (_dir, path) = write_source("1.0 2.0 three 4.0 5 6 7 8 9 10 11 12 13 14 15 16");
        let loader = TextTableLoader::new(path, spec_2x2x2());
        let error = loader.load().unwrap_err();
        match error {
            InitError::MalformedData(message) => assert!(message.contains("three")),
            other => panic!("expected MalformedData, got {other:?}"),
        }
    }

    #[test]
    fn test_fortran_style_exponents_are_rejected() {
        // the format is plain Rust-parseable floats; no D-exponent rewriting
        let (_dir, path) = write_source("1.0D0 2.0 3 4 5 6 7 8 9 10 11 12 13 14 15 16");
        let loader = TextTableLoader::new(path, spec_2x2x2());
        assert!(matches!(loader.load(), Err(InitError::MalformedData(_))));
    }
}
