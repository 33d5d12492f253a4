//! Workbook ingestion and aggregation for the RFQ consolidator.
//!
//! This crate owns everything between a folder of vendor `.xlsx` files and
//! the finished output workbook: discovery, header location, per-file
//! loading, manufacturer tagging, aggregation, and the pipeline that ties
//! them together.

pub mod aggregate;
pub mod discovery;
pub mod header;
pub mod loader;
pub mod manufacturer;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod fixtures;

pub use consolidator_core as core;
