//! Configuration engine for the toolpath pipeline.
//!
//! A single JSON document (`miracle.config`) configures every stage of the
//! pipeline, from mesh ingestion to machine-code emission. This crate loads
//! that document ([`configuration::Configuration`]), validates and reads the
//! typed sections each stage needs out of it, and defines the boundary the
//! stages themselves implement ([`pipeline::Operation`]).

pub mod configuration;
pub mod logging;
pub mod pipeline;
pub mod platform;
