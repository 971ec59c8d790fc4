//! Quasar template to visual node conversion.
//!
//! The orchestrator walks a parsed template depth first. Framework elements
//! (`q-*`) are dispatched through a [`ProcessorRegistry`] to a processor that
//! builds their nodes; plain markup becomes auto-layout frames. Parsed class
//! and inline styles are applied afterwards, followed by the palette colour
//! pass and, optionally, hover/active/disabled copies of interactive
//! components.
//!
//! ```
//! use quasar_convert::{convert_source, Settings};
//!
//! let tree = convert_source(
//!     r#"<template><q-btn color="negative" label="Delete" flat /></template>"#,
//!     &Settings::default(),
//! )
//! .unwrap();
//! assert_eq!(tree.name(), quasar_convert::ROOT_NAME);
//! ```

pub mod colors;
pub mod context;
pub mod error;
pub mod orchestrator;
pub mod processors;
pub mod registry;
pub mod settings;
pub mod variants;

pub use context::{Component, Converter, SourceEntry, SourceIndex, TextStyle, COLORS_APPLIED};
pub use error::{ConvertError, ConvertResult, ProcessResult, ProcessorError};
pub use orchestrator::{convert, convert_source, ROOT_NAME};
pub use registry::{Processor, ProcessorRegistry, Resolution};
pub use settings::{ComponentGroups, Density, Settings};
