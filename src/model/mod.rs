/// Board-level models: layers, footprints and reference labels.
pub mod board;
/// Document and version models shared across editors.
pub mod common;
/// Length units and conversions.
pub mod units;
