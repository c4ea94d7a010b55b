//! # Records Text
//!
//! Text-based record codecs. Each collection lives in its own file at
//! `<directory>/<name>.<extension>`:
//!
//! - [`DelimitedTextCodec`]: a header row with the field names, then one row
//!   of tokens per record
//! - [`StructuredTextCodec`]: a JSON array with one object per record, keyed
//!   by field name
//!
//! ## Example
//!
//! ```no_run
//! use records_core::Codec;
//! use records_delivery::DeliveryDataset;
//! use records_text::{CsvOptions, DelimitedTextCodec};
//! use std::path::Path;
//!
//! let codec = DelimitedTextCodec::new(CsvOptions::default().delimiter(','));
//! let dataset: DeliveryDataset = codec.read_dataset(Path::new("exports")).unwrap();
//! println!("Loaded {} orders", dataset.orders.len());
//! ```

mod delimited;
mod structured;

pub use delimited::{CsvOptions, DelimitedTextCodec};
pub use structured::{JsonOptions, StructuredTextCodec};
