//! Check command implementation

use anyhow::{Context, Result};
use dto2ts_core::{ClassDecl, ClassGraph, ClassGraphDocument, DeclarationKind};
use std::path::Path;

/// What `check` found in a class graph
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GraphReport {
    pub project: usize,
    pub library: usize,
    pub enums: usize,
    pub skipped: usize,
    pub problems: Vec<String>,
}

impl GraphReport {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Inspect every class for structural problems the loader does not reject
pub fn inspect(document: &ClassGraphDocument) -> GraphReport {
    let mut report = GraphReport {
        project: document.classes.len(),
        library: document.library.len(),
        ..GraphReport::default()
    };

    for class in document.classes.iter().chain(&document.library) {
        match class.kind {
            DeclarationKind::Enum => report.enums += 1,
            DeclarationKind::Interface | DeclarationKind::Annotation => report.skipped += 1,
            DeclarationKind::Class => {}
        }
        report.problems.extend(class_problems(class));
    }

    report
}

fn class_problems(class: &ClassDecl) -> Vec<String> {
    let mut problems = Vec::new();
    let name = &class.qualified_name;

    for field in &class.fields {
        if field.name.trim().is_empty() {
            problems.push(format!("{name}: field with a blank name"));
        }
        if field.enum_constant && !class.is_enum() {
            problems.push(format!(
                "{name}: enum constant {} declared on a non-enum class",
                field.name
            ));
        }
    }

    if class.super_class.as_deref() == Some(name.as_str()) {
        problems.push(format!("{name}: class extends itself"));
    }

    problems
}

/// check command implementation
pub fn run(graph_path: &Path) -> Result<()> {
    println!("Checking class graph: {}", graph_path.display());

    let graph = ClassGraph::from_file(graph_path)
        .with_context(|| format!("Failed to load class graph: {:?}", graph_path))?;
    let report = inspect(&graph.to_document());

    for problem in &report.problems {
        println!("✗ {problem}");
    }
    if !report.is_valid() {
        anyhow::bail!("Class graph has {} problem(s)", report.problems.len());
    }

    println!("✓ Project classes: {}", report.project);
    println!("✓ Library classes: {}", report.library);
    println!("✓ Enums: {}", report.enums);
    println!("✓ Interfaces/annotations (not emitted): {}", report.skipped);
    println!("\nClass graph is valid!");

    Ok(())
}
