//! # Records SDK
//!
//! Entry point for applications that move datasets between storage formats.
//!
//! [`DatasetOrchestrator`] picks the codec for a [`Format`], configures it
//! from a [`HandlerConfig`] and runs the dataset-level read or write against
//! a [`Location`]. The codecs themselves are re-exported for callers that
//! need collection-level access.
//!
//! ## Quick Start
//!
//! ```no_run
//! use records_delivery::DeliveryDataset;
//! use records_sdk::{DatasetOrchestrator, HandlerConfig};
//! use std::path::Path;
//!
//! let config = HandlerConfig::from_file(Path::new("handlers.toml"))?;
//! let orchestrator = DatasetOrchestrator::new(config);
//!
//! // Convert a CSV export into a spreadsheet
//! let dataset: DeliveryDataset = orchestrator.load_path("csv", Path::new("exports"))?;
//! orchestrator.save_path("xlsx", &dataset, Path::new("reports"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod format;
pub mod logging;
mod orchestrator;

pub use config::{ConfigError, ConfigFormat, HandlerConfig, detect_format};
pub use format::Format;
pub use orchestrator::{DatasetOrchestrator, Location};

pub use records_core::{Codec, Dataset, Entity, RecordError, Result};
pub use records_sql::{RelationalCodec, SqlOptions};
pub use records_text::{CsvOptions, DelimitedTextCodec, JsonOptions, StructuredTextCodec};
pub use records_xlsx::{SpreadsheetCodec, XlsxOptions};
