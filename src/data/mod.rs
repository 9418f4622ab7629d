//! Data module - Dataset loading and cleaning

mod cleaner;
mod dataset;
mod loader;

pub use cleaner::{CleanError, CleanReport, DataCleaner};
pub use dataset::Dataset;
pub use loader::{DataLoader, LoadError, WINE_LABEL};
