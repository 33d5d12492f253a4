//! Workbook output for the RFQ consolidator: data serialization plus the
//! post-format header painting pass.

pub mod paint;
pub mod writer;

pub use paint::paint_headers;
pub use writer::write_workbook;
