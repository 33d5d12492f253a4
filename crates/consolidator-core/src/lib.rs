//! Core types for the RFQ consolidator: the cell/table model, the fixed
//! RFQ schema knowledge, the normalization policy, runtime settings, and the
//! shared error type.

pub mod error;
pub mod normalize;
pub mod schema;
pub mod settings;
pub mod table;

pub use error::{ConsolidateError, Result};
pub use settings::{ManufacturerSource, Settings};
pub use table::{Cell, Table};
