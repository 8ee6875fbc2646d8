//! Core types for MathSoc.
//!
//! This module provides the data model shared by the site and the CLI.

pub mod event;
pub mod id;
pub mod response;

pub use event::{Event, upcoming};
pub use id::ResponseId;
pub use response::{FormField, ResponseRecord, ValidationError};
