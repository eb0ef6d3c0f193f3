//! # dto2ts
//!
//! Generate TypeScript declarations from Java data classes.
//!
//! A host (IDE plugin, build step, CLI) hands over a class graph describing
//! declarations, fields and annotations. dto2ts walks it from a root class and
//! produces:
//! - one `interface` per class, with inherited fields flattened in
//! - one string-literal union `type` per enum
//! - `?:` markers, `@JsonProperty` renames and doc comments carried over
//!
//! ## Quick Start
//!
//! ```
//! use dto2ts::prelude::*;
//! use std::sync::Arc;
//!
//! let graph = ClassGraph::new().with_project(
//!     ClassDecl::class("com.acme.PingReq")
//!         .with_field(FieldDecl::new("at", TypeRef::primitive("long"))),
//! );
//!
//! let generator = TypescriptGenerator::new(Arc::new(graph), GeneratorConfig::default());
//! let doc = generator.generate("com.acme.PingReq")?;
//!
//! assert_eq!(doc.content, "export interface PingReq {\n  at: number;\n}\n");
//! assert_eq!(doc.file_name(), "PingReq.ts");
//! # Ok::<(), GenerateError>(())
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`dto2ts_core`] - Class model, traversal and document assembly
//! - [`dto2ts_runtime`] - Bounded generation pool
//! - [`dto2ts_logging`] - Logging setup and diagnostics

// Re-export core types
pub use dto2ts_core::{
    ClassDecl, ClassGraph, ClassGraphDocument, ClassResolver, DeclarationKind, DtoClassifier,
    EmittedDeclaration, FieldDecl, GenerateError, GenerateResult, GeneratedDocument,
    GeneratorConfig, LibraryTypes, LogLevel, MethodDecl, Role, SearchScope, SuffixDtoClassifier,
    TransactionNaming, TraversalState, TypeRef, TypescriptGenerator, collect_dto_classes,
    merge_documents, merged_file_name,
};

// Lower-level building blocks
pub use dto2ts_core::{assembler, naming, shape, transaction};

// Re-export runtime and logging
pub use dto2ts_logging::{Diagnostics, ReloadHandle, init_logging};
pub use dto2ts_runtime::{GenerationPool, JobHandle, PoolConfig};

// Re-export common dependencies that hosts need
pub use serde;
pub use serde_json;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use dto2ts::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        ClassDecl, ClassGraph, ClassResolver, DeclarationKind, FieldDecl, GenerateError,
        GenerateResult, GeneratedDocument, GenerationPool, GeneratorConfig, LogLevel, MethodDecl,
        PoolConfig, TypeRef, TypescriptGenerator,
    };
}
