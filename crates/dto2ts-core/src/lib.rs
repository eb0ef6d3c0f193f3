//! dto2ts-core - Class-graph traversal and TypeScript declaration rendering
//!
//! This crate turns host-supplied class declarations into TypeScript:
//! - [`TypescriptGenerator`] walks a root class and assembles the document
//! - [`ClassResolver`] is the seam through which the host supplies classes
//! - [`TraversalState`] memoizes declarations for a single walk
//! - [`GeneratorConfig`] carries the rendering options
//! - [`DtoClassifier`] lets hosts pick data-transfer classes as roots

pub mod assembler;
pub mod classifier;
pub mod comment;
mod config;
pub mod dto;
mod error;
pub mod expander;
mod generator;
pub mod model;
pub mod naming;
mod resolver;
pub mod shape;
mod state;
pub mod transaction;

pub use assembler::{DeclarationGroup, DocumentAssembler};
pub use config::GeneratorConfig;
pub use dto::{DtoClassifier, SuffixDtoClassifier, collect_dto_classes};
pub use error::{GenerateError, GenerateResult};
pub use expander::Traversal;
pub use generator::{GeneratedDocument, TypescriptGenerator, merge_documents, merged_file_name};
pub use model::{
    Annotation, ClassDecl, DeclarationKind, EmittedDeclaration, FieldDecl, MethodDecl, TypeRef,
};
pub use resolver::{ClassGraph, ClassGraphDocument, ClassResolver, LibraryTypes, SearchScope};
pub use shape::ShapeCategory;
pub use state::TraversalState;
pub use transaction::{Role, TransactionNaming};

/// Log verbosity shared by the CLI, the logging setup and configuration files
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            other => Err(GenerateError::ConfigError(format!(
                "unknown log level: {other}"
            ))),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ClassDecl, ClassGraph, ClassResolver, FieldDecl, GenerateError, GenerateResult,
        GeneratedDocument, GeneratorConfig, LogLevel, TypeRef, TypescriptGenerator,
    };
}
