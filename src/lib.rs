//! Integrity check of satellite swath files (NetCDF/HDF5) ahead of mapping.
//!
//! [`checker::check`] opens each candidate once, reads the field matching the
//! instrument and deletes files that are unreadable or fully masked, so that
//! a later batch only sees usable swaths.

pub mod checker;
pub mod config;
pub mod instrument;
pub mod logger;
pub mod readers;
pub mod utils;

pub use checker::{CheckReport, Outcome, check, check_files};
pub use instrument::Instrument;
pub use readers::{FieldExtractor, GdalExtractor, MaskedArray, ReadError};
