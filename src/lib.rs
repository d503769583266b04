// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Harvest
//!
//! An email extraction service: pull addresses out of uploaded documents or
//! pasted text, infer a company per address, and keep a filesystem-backed
//! history of past jobs with JSON and CSV artifacts.
//!
//! # Example
//!
//! ```rust
//! use email_harvest::ExtractionReport;
//!
//! let report = ExtractionReport::extract("contact a@x.com or b@y.com");
//!
//! assert_eq!(report.emails, vec!["a@x.com", "b@y.com"]);
//! assert_eq!(report.total(), 2);
//! assert_eq!(report.data[0].company, "X");
//! ```

mod config;
mod csv;
mod decode;
mod error;
mod extractor;
pub mod server;
mod store;
mod types;

pub use config::Config;
pub use csv::csv_document;
pub use decode::{decode_bytes, is_allowed_filename, text_from_upload};
pub use error::{ExtractError, Result};
pub use extractor::{company_for, extract_emails, EmailRecord, ExtractionReport};
pub use store::HistoryStore;
pub use types::*;
