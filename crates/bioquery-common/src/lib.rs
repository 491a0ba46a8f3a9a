//! bioquery-common — Shared types, errors, and record classification used
//! across the Bioquery crates.

pub mod classify;
pub mod error;
pub mod models;
pub mod noise;

pub use classify::{classify, LiteratureRecord, MoleculeRecord, ProteinRecord, RecordKind};
pub use error::{BioqueryError, Result};
pub use models::{ProcessingMode, QueryRequest, QueryResult, SourceDescriptor, SourceResult};
pub use noise::NoiseFilter;
