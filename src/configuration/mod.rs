//! This module contains all configuration-relevant code: loading the
//! configuration document, reading typed sections out of it, and the
//! errors that can occur while doing so.
//!
//! Your starting point should probably be [`Configuration::load_from_path`]
//! or [`Configuration::load_from_default_path`].
//!
//! # Internals
//! Loading a configuration file only parses it into an untyped JSON document.
//! Nothing is validated at that point.
//!
//! Each pipeline stage then reads the section it needs through a section loader,
//! e.g. [`SlicerConfig::load_from`][traits::LoadableSection::load_from]
//! or [`GCoderConfig::load_from`][traits::LoadableSectionWithContext::load_from].
//! Loaders are independent of each other and only read the shared document.
//! They are written in terms of [`ConfigNode`] lookups and its typed
//! `required` / `optional` reads, which produce a [`ConfigurationError`]
//! naming the fully qualified path of the first missing or malformed field.
//!
//! Values using the `default://` scheme (see [`ResourceResolver`]) are
//! resolved against the platform data directory.

#![allow(rustdoc::private_intra_doc_links)]

mod document;
mod errors;
mod extract;
mod resources;
mod structure;
mod traits;
mod utilities;

pub use document::ConfigNode;
pub use errors::{ConfigurationError, ErrorKind};
pub use extract::FieldValue;
pub use resources::{ResourceResolver, DEFAULT_RESOURCE_SCHEME};
pub use structure::*;
pub use traits::{LoadableSection, LoadableSectionWithContext, OverlayableSection};
pub use utilities::{get_default_configuration_file_path, DEFAULT_CONFIGURATION_FILE_NAME};
