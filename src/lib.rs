pub mod config;
pub mod datetime;
pub mod error;
pub mod export;
pub mod grid;
pub mod view;

pub use error::{Error, ErrorKind, Result};
pub use export::{to_csv, write_csv};
pub use grid::{compute_grid, compute_grid_with, CalendarDay, Grid, WeekRow, YearMonth};
