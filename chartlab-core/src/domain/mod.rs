//! Domain types for the price series.

pub mod bar;

pub use bar::Bar;
