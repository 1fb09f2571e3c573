//! # Once-only, thread-safe table publication
//!
//! This module defines [`LazyTable`], the **single reusable initialization
//! guard** shared by every table-backed subsystem. It replaces the repeated
//! flag-plus-critical-section pattern with one abstraction parameterized by a
//! loader, injected explicitly instead of living in process-wide state.
//!
//! ## State machine
//!
//! ```text
//! Empty ──(first get_or_init)──▶ Initializing ──▶ Ready
//!                                      └────────▶ Failed
//! ```
//!
//! `Ready` and `Failed` are terminal for the lifetime of the instance: there is
//! no invalidation and no retry. Racing callers that arrive while another
//! thread is initializing block until that run resolves, then all observe the
//! same outcome. The publication is release/acquire ordered through the
//! underlying cell, so a thread that obtains a handle always sees the fully
//! populated table, never a torn view.
//!
//! ## Handles
//!
//! A handle is a plain `&TableGrid<P>` borrowed from the `LazyTable`, issued
//! **only** on success. Evaluating a table that was never initialized is
//! therefore unrepresentable: there is no handle to call
//! [`interpolate`](crate::table::TableGrid::interpolate) on.
//!
//! ## See also
//!
//! - [`TableLoader`](crate::loader::TableLoader) – The injected producer run at most once.
//! - [`RateGrid`](crate::rategrid::RateGrid) – A registry of named `LazyTable` slots.
use once_cell::sync::OnceCell;

use crate::loader::TableLoader;
use crate::rategrid_errors::InitError;
use crate::table::TableGrid;

/// Externally observable lifecycle of a [`LazyTable`].
///
/// The transient `Initializing` phase is not listed: from the outside it is
/// only observable as `get_or_init` blocking, and it resolves to one of the
/// two terminal states below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Empty,
    Ready,
    Failed,
}

/// A once-initialized, thread-safely published cache of one immutable table.
///
/// The cell stores the complete `Result` of the single loader run, so a failed
/// initialization is cached exactly like a successful one and replayed to all
/// subsequent callers without touching the source again.
#[derive(Debug)]
pub struct LazyTable<P> {
    cell: OnceCell<Result<TableGrid<P>, InitError>>,
}

impl<P> Default for LazyTable<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> LazyTable<P> {
    pub fn new() -> Self {
        LazyTable {
            cell: OnceCell::new(),
        }
    }

    /// Get the published table, running `loader` if this is the first call.
    ///
    /// Exactly one caller across all racing threads executes the loader; every
    /// other concurrent caller blocks until that execution completes and then
    /// receives the same outcome. On an instance that already resolved, the
    /// loader is not invoked at all.
    ///
    /// Arguments
    /// -----------------
    /// * `loader`: The one-shot producer of the table. Runs at most once per
    ///   `LazyTable` instance, regardless of call or thread count.
    ///
    /// Return
    /// ----------
    /// * `Ok(&TableGrid<P>)` – handle to the published table, valid for as long
    ///   as this `LazyTable` is borrowed.
    /// * `Err(InitError)` – the cached first failure, replayed verbatim.
    pub fn get_or_init<F>(&self, loader: F) -> Result<&TableGrid<P>, InitError>
    where
        F: FnOnce() -> Result<TableGrid<P>, InitError>,
    {
        self.cell.get_or_init(loader).as_ref().map_err(Clone::clone)
    }

    /// [`get_or_init`](Self::get_or_init) with an injected [`TableLoader`]
    /// collaborator instead of a closure.
    pub fn get_or_load<L>(&self, loader: &L) -> Result<&TableGrid<P>, InitError>
    where
        L: TableLoader<P> + ?Sized,
    {
        self.get_or_init(|| loader.load())
    }

    /// Handle to the table if (and only if) this instance is `Ready`.
    pub fn get(&self) -> Option<&TableGrid<P>> {
        self.cell.get().and_then(|outcome| outcome.as_ref().ok())
    }

    /// Current terminal-or-empty state; never blocks.
    pub fn state(&self) -> TableState {
        match self.cell.get() {
            None => TableState::Empty,
            Some(Ok(_)) => TableState::Ready,
            Some(Err(_)) => TableState::Failed,
        }
    }
}
