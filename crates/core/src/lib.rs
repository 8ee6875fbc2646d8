//! MathSoc Core - Shared types library.
//!
//! This crate provides the types and pure logic used across all MathSoc
//! components:
//! - `site` - The single-page club website (port 3000)
//! - `cli` - Command-line access to stored contact responses
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions - no I/O,
//! no storage access, no HTTP. Persistence lives in the `site` crate behind
//! its `KeyValueStorage` trait.
//!
//! # Modules
//!
//! - [`types`] - Response records, record IDs and club events
//! - [`codec`] - Building records from form fields and (de)serializing the
//!   persisted collection
//! - [`export`] - CSV export of stored responses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod codec;
pub mod export;
pub mod types;

pub use codec::{CodecError, build_record, deserialize_collection, serialize_collection};
pub use export::{CSV_CONTENT_TYPE, CSV_HEADER, ExportError, export_csv, export_filename};
pub use types::*;
