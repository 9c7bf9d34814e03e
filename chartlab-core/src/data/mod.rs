//! Data loading for delimited price files.

pub mod loader;

pub use loader::{load_series, LoadError, LoadedSeries};
