//! list-dtos command implementation

use crate::settings::Settings;
use anyhow::{Context, Result};
use dto2ts_core::{ClassGraph, DtoClassifier, SuffixDtoClassifier};
use std::path::Path;

/// Qualified names of project classes the classifier accepts, in graph order
pub fn dto_names(graph: &ClassGraph, classifier: &dyn DtoClassifier) -> Vec<String> {
    graph
        .project_classes()
        .filter(|class| classifier.is_dto(class))
        .map(|class| class.qualified_name.clone())
        .collect()
}

pub fn run(graph_path: &Path, settings: &Settings) -> Result<()> {
    let graph = ClassGraph::from_file(graph_path)
        .with_context(|| format!("Failed to load class graph: {:?}", graph_path))?;
    let classifier = SuffixDtoClassifier::from_config(&settings.generator);

    let names = dto_names(&graph, &classifier);
    for name in &names {
        println!("{name}");
    }
    tracing::info!(count = names.len(), "data classes listed");

    Ok(())
}
