//! # RateGrid: table registry and evaluation façade
//!
//! This module defines the [`RateGrid`] struct, the central façade that wires
//! together:
//!
//! 1. **Source configuration** — a base directory combined with per-table file
//!    names to form source identifiers.
//! 2. **Lazy table access** — one [`LazyTable`] slot per registered name,
//!    initialized on first use and reused by every consumer.
//! 3. **Evaluation** — trilinear lookups against whichever tables are already
//!    published.
//!
//! The design replaces the process-wide mutable arrays of the original
//! pipeline with an explicit owned context passed by reference to all
//! consumers: *compute once, reuse everywhere*, without hidden global state.
//! Distinct slots initialize fully independently, so two tables loading from
//! two files proceed in parallel without blocking each other.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use nalgebra::Vector3;
//! use rategrid::grid::{AxisSpec, GridSpec};
//! use rategrid::rategrid::RateGrid;
//!
//! let axis = AxisSpec::new(0.0, 1.0, 101).unwrap();
//! let spec = GridSpec::new(axis, axis, axis);
//!
//! let mut grid = RateGrid::new("/var/sim/tables");
//! grid.register("heating", "heating_efficiencies.tab", spec);
//!
//! // First call loads and publishes; later calls are lock-free reads.
//! let rate = grid.evaluate("heating", &Vector3::new(12.5, 3.0, 0.25)).unwrap();
//! println!("heating rate: {}", rate.heating);
//! ```
//!
//! ## Panics & errors
//!
//! - Looking up a name that was never registered is a wiring bug and panics.
//! - I/O and parse failures surface as [`InitError`] and are sticky per slot:
//!   the first failure is replayed to every later caller without another load
//!   attempt.
use std::collections::HashMap;

use camino::Utf8PathBuf;
use nalgebra::Vector3;

use crate::constants::{Coordinate, TableName};
use crate::grid::GridSpec;
use crate::lazy_table::{LazyTable, TableState};
use crate::loader::TextTableLoader;
use crate::rategrid_errors::InitError;
use crate::table::{RatePair, TableGrid};

#[derive(Debug)]
struct TableSlot {
    loader: TextTableLoader,
    cell: LazyTable<RatePair>,
}

/// Owned registry of lazily loaded rate tables.
#[derive(Debug, Default)]
pub struct RateGrid {
    base_dir: Utf8PathBuf,
    tables: HashMap<TableName, TableSlot>,
}

impl RateGrid {
    /// Construct a context rooted at a table base directory.
    ///
    /// The directory is not touched here: resolution and validation of the
    /// path are the caller's responsibility, and each table file is only read
    /// on its first use.
    ///
    /// Arguments
    /// -----------------
    /// * `base_dir`: Directory the registered file names are joined onto.
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Self {
        RateGrid {
            base_dir: base_dir.into(),
            tables: HashMap::new(),
        }
    }

    pub fn base_dir(&self) -> &Utf8PathBuf {
        &self.base_dir
    }

    /// Register a table slot under a name.
    ///
    /// Registration is cheap and performs no I/O; the grid geometry was
    /// already validated when the [`GridSpec`] axes were built. Re-registering
    /// a name replaces the slot, dropping any table the old slot had published.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: Key later passed to [`get_or_load`](Self::get_or_load) and
    ///   [`evaluate`](Self::evaluate).
    /// * `file_name`: Source file, joined onto the base directory.
    /// * `spec`: The geometry the source must populate exactly.
    pub fn register(&mut self, name: impl Into<TableName>, file_name: &str, spec: GridSpec) {
        let source = self.base_dir.join(file_name);
        self.tables.insert(
            name.into(),
            TableSlot {
                loader: TextTableLoader::new(source, spec),
                cell: LazyTable::new(),
            },
        );
    }

    /// Get the lazily-initialized handle for a registered table.
    ///
    /// If this is the first call for the slot, the source file is read,
    /// parsed, and published; concurrent callers of the same slot block until
    /// that single load resolves. Subsequent calls return the same handle (or
    /// replay the same error) without touching the file.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: A name previously passed to [`register`](Self::register).
    ///
    /// Return
    /// ----------
    /// * `&TableGrid<RatePair>` on success, or the slot's cached [`InitError`].
    ///
    /// Panics
    /// ----------
    /// * If `name` was never registered.
    ///
    /// See also
    /// ------------
    /// * [`LazyTable::get_or_load`] – The initialization guard underneath.
    pub fn get_or_load(&self, name: &str) -> Result<&TableGrid<RatePair>, InitError> {
        let slot = self.slot(name);
        slot.cell.get_or_load(&slot.loader)
    }

    /// Evaluate a registered table at a continuous query point, loading it
    /// first if necessary.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: A registered table name.
    /// * `point`: Continuous coordinates along the table's `(i, j, k)` axes.
    ///
    /// Return
    /// ----------
    /// * The trilinearly interpolated [`RatePair`], or the slot's cached
    ///   [`InitError`].
    pub fn evaluate(
        &self,
        name: &str,
        point: &Vector3<Coordinate>,
    ) -> Result<RatePair, InitError> {
        Ok(self.get_or_load(name)?.interpolate(point))
    }

    /// Lifecycle state of a registered slot; never blocks and never loads.
    pub fn table_state(&self, name: &str) -> TableState {
        self.slot(name).cell.state()
    }

    fn slot(&self, name: &str) -> &TableSlot {
        self.tables
            .get(name)
            .unwrap_or_else(|| panic!("table not registered: {name}"))
    }
}
