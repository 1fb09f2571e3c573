pub mod constants;
pub mod grid;
pub mod interpolation;
pub mod lazy_table;
pub mod loader;
pub mod rategrid;
pub mod rategrid_errors;
pub mod table;

pub use grid::{AxisSpec, GridSpec, IndexTriple};
pub use lazy_table::{LazyTable, TableState};
pub use loader::{TableLoader, TextTableLoader};
pub use rategrid::RateGrid;
pub use rategrid_errors::{ConfigError, InitError};
pub use table::{RatePair, TableGrid};
