//! Entry points that turn a root class into a finished document

use crate::assembler::DocumentAssembler;
use crate::config::GeneratorConfig;
use crate::error::{GenerateError, GenerateResult};
use crate::expander::Traversal;
use crate::model::{ClassDecl, EmittedDeclaration};
use crate::naming::{ensure_ts_extension, suggest_file_name};
use crate::resolver::{ClassResolver, LibraryTypes};
use crate::state::TraversalState;
use crate::transaction::TransactionNaming;
use std::sync::Arc;
use tracing::{debug, info};

/// Output of one root-class traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// Qualified name of the root class
    pub root: String,

    /// Name the root class is declared under
    pub root_name: String,

    /// Merged declarations, ready to be written as-is
    pub content: String,

    /// Declarations in document order
    pub declarations: Vec<EmittedDeclaration>,

    /// File stem suggested for the document
    pub suggested_file_name: String,
}

impl GeneratedDocument {
    /// Suggested file name with a `.ts` extension
    pub fn file_name(&self) -> String {
        ensure_ts_extension(&self.suggested_file_name)
    }
}

/// Generates TypeScript declarations for root classes.
///
/// Cheap to share behind an `Arc`; every call owns a fresh [`TraversalState`],
/// so concurrent calls never observe each other's declarations.
pub struct TypescriptGenerator {
    resolver: Arc<dyn ClassResolver>,
    config: GeneratorConfig,
    library: LibraryTypes,
    naming: Option<TransactionNaming>,
}

impl TypescriptGenerator {
    pub fn new(resolver: Arc<dyn ClassResolver>, config: GeneratorConfig) -> Self {
        Self {
            resolver,
            config,
            library: LibraryTypes::with_builtins(),
            naming: None,
        }
    }

    /// Name classes after the transaction code of the endpoint they serve.
    ///
    /// Has no effect unless `use_transaction_code_prefix` is set.
    pub fn with_transaction_naming(mut self, naming: TransactionNaming) -> Self {
        self.naming = Some(naming);
        self
    }

    pub fn transaction_naming(&self) -> Option<&TransactionNaming> {
        self.naming.as_ref()
    }

    /// Replace the library supertype table
    pub fn with_library_types(mut self, library: LibraryTypes) -> Self {
        self.library = library;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Arc<dyn ClassResolver> {
        &self.resolver
    }

    /// Resolve `qualified_name` (project scope first) and generate for it
    pub fn generate(&self, qualified_name: &str) -> GenerateResult<GeneratedDocument> {
        let root = self
            .resolver
            .resolve(
                qualified_name,
                self.config.allow_resolution_outside_project_scope,
            )
            .ok_or_else(|| GenerateError::RootNotFound(qualified_name.to_string()))?;
        self.generate_for_class(&root)
    }

    /// Generate for an already resolved root class
    pub fn generate_for_class(&self, root: &ClassDecl) -> GenerateResult<GeneratedDocument> {
        let mut state = TraversalState::new();
        self.generate_with_state(root, &mut state)
    }

    /// Generate using caller-owned state.
    ///
    /// The state is cleared before the walk and again once the document is
    /// assembled, so it can be reused for the next root.
    pub fn generate_with_state(
        &self,
        root: &ClassDecl,
        state: &mut TraversalState,
    ) -> GenerateResult<GeneratedDocument> {
        state.clear();
        debug!(root = %root.qualified_name, "traversal started");
        Traversal::new(self.resolver.as_ref(), &self.config, &self.library, state)
            .with_naming(self.naming.as_ref())
            .expand(root);

        let assembler = DocumentAssembler::new(&self.config);
        let arranged = assembler.arrange(state.declarations());
        let content = DocumentAssembler::render(&arranged);
        let declarations: Vec<EmittedDeclaration> =
            arranged.into_iter().map(|(_, decl)| decl.clone()).collect();
        state.clear();

        if declarations.is_empty() {
            return Err(GenerateError::NothingToGenerate(
                root.qualified_name.clone(),
            ));
        }

        let root_name = declarations
            .iter()
            .find(|decl| decl.qualified_name == root.qualified_name)
            .map(|decl| decl.simple_name.clone())
            .unwrap_or_else(|| root.simple_name().to_string());
        info!(
            root = %root.qualified_name,
            declarations = declarations.len(),
            "document generated"
        );
        Ok(GeneratedDocument {
            root: root.qualified_name.clone(),
            suggested_file_name: root_name.clone(),
            root_name,
            content,
            declarations,
        })
    }

    /// Generate each root in turn, one result per name
    pub fn generate_many<S: AsRef<str>>(
        &self,
        qualified_names: &[S],
    ) -> Vec<GenerateResult<GeneratedDocument>> {
        let mut state = TraversalState::new();
        qualified_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let root = self
                    .resolver
                    .resolve(name, self.config.allow_resolution_outside_project_scope)
                    .ok_or_else(|| GenerateError::RootNotFound(name.to_string()))?;
                self.generate_with_state(&root, &mut state)
            })
            .collect()
    }
}

/// Join several documents with a blank line between them
pub fn merge_documents(documents: &[GeneratedDocument]) -> String {
    documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// File stem for a merged document
pub fn merged_file_name(documents: &[GeneratedDocument], config: &GeneratorConfig) -> Option<String> {
    let names: Vec<&str> = documents.iter().map(|doc| doc.root_name.as_str()).collect();
    suggest_file_name(&names, config)
}
