//! Generate command implementation

use crate::settings::Settings;
use anyhow::{Context, Result};
use dto2ts_core::naming::ensure_ts_extension;
use dto2ts_core::{
    ClassGraph, ClassResolver, GeneratedDocument, GeneratorConfig, MethodDecl,
    SuffixDtoClassifier, TransactionNaming, TypescriptGenerator, collect_dto_classes,
    merge_documents, merged_file_name,
};
use dto2ts_logging::Diagnostics;
use dto2ts_runtime::GenerationPool;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
const FALLBACK_MERGED_NAME: &str = "types";

/// Arguments of `dto2ts generate`
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub graph: PathBuf,
    pub classes: Vec<String>,
    pub method: Option<String>,
    pub output: Option<PathBuf>,
    pub stdout: bool,
    pub merge: bool,
}

pub fn run(args: &GenerateArgs, settings: &Settings) -> Result<()> {
    let graph = ClassGraph::from_file(&args.graph)
        .with_context(|| format!("Failed to load class graph: {:?}", args.graph))?;
    let roots = resolve_roots(args, &graph, &settings.generator)?;
    let naming = transaction_naming(args, &graph, &settings.generator)?;

    let mut generator = TypescriptGenerator::new(Arc::new(graph), settings.generator.clone());
    if let Some(naming) = naming {
        generator = generator.with_transaction_naming(naming);
    }
    let generator = Arc::new(generator);
    let pool = GenerationPool::new(settings.pool.clone())?;
    let results = pool.generate_all(&generator, &roots);
    pool.shutdown(SHUTDOWN_TIMEOUT)?;

    let mut documents = Vec::with_capacity(results.len());
    for (root, result) in roots.iter().zip(results) {
        match result {
            Ok(document) => documents.push(document),
            Err(e) if e.is_nothing_to_generate() => {
                tracing::warn!(root = %root, "skipped: {e}");
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to generate {root}")),
        }
    }

    if documents.is_empty() {
        anyhow::bail!("Nothing was generated");
    }

    if args.stdout {
        print!("{}", stdout_text(&documents, args.merge));
    } else {
        let base = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
        for (path, content) in plan_files(&documents, &base, args.merge, &settings.generator) {
            write_file(&path, &content)?;
            println!("✓ Wrote {}", path.display());
        }
    }

    report_diagnostics(Diagnostics::global());
    Ok(())
}

/// Qualified names of the classes to generate for
pub fn resolve_roots(
    args: &GenerateArgs,
    resolver: &dyn ClassResolver,
    config: &GeneratorConfig,
) -> Result<Vec<String>> {
    let Some(target) = &args.method else {
        if args.classes.is_empty() {
            anyhow::bail!("Provide at least one --class or a --method");
        }
        return Ok(args.classes.clone());
    };

    let allow_all = config.allow_resolution_outside_project_scope;
    let method = find_target_method(target, resolver, allow_all)?;

    let classifier = SuffixDtoClassifier::from_config(config);
    let roots: Vec<String> = collect_dto_classes(&method, resolver, &classifier, allow_all)
        .iter()
        .map(|class| class.qualified_name.clone())
        .collect();

    if roots.is_empty() {
        anyhow::bail!("No data classes found in the signature of {target}");
    }
    Ok(roots)
}

/// Transaction-code naming for the `--method` target, when enabled and the
/// method carries a code
pub fn transaction_naming(
    args: &GenerateArgs,
    resolver: &dyn ClassResolver,
    config: &GeneratorConfig,
) -> Result<Option<TransactionNaming>> {
    let Some(target) = args.method.as_deref() else {
        return Ok(None);
    };
    if !config.use_transaction_code_prefix {
        return Ok(None);
    }

    let allow_all = config.allow_resolution_outside_project_scope;
    let method = find_target_method(target, resolver, allow_all)?;
    let naming = TransactionNaming::for_method(&method);
    match &naming {
        Some(naming) => tracing::info!(method = target, code = naming.code(), "using transaction code"),
        None => tracing::info!(method = target, "no transaction code found; keeping class names"),
    }
    Ok(naming)
}

fn find_target_method(
    target: &str,
    resolver: &dyn ClassResolver,
    allow_all: bool,
) -> Result<MethodDecl> {
    let (class_name, method_name) = parse_method_target(target)?;
    let owner = resolver
        .resolve(class_name, allow_all)
        .with_context(|| format!("Class not found: {class_name}"))?;
    owner
        .find_method(method_name)
        .cloned()
        .with_context(|| format!("Method {method_name} not found on {class_name}"))
}

/// Split `com.acme.Api#create` into class and method names
pub fn parse_method_target(target: &str) -> Result<(&str, &str)> {
    match target.split_once('#') {
        Some((class, method)) if !class.trim().is_empty() && !method.trim().is_empty() => {
            Ok((class.trim(), method.trim()))
        }
        _ => anyhow::bail!("Expected <qualified class>#<method>, got {target:?}"),
    }
}

fn stdout_text(documents: &[GeneratedDocument], merge: bool) -> String {
    if merge {
        return merge_documents(documents);
    }
    documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Destination path and content for every file to write.
///
/// `base` names a file when it ends in `.ts` and only one file is produced;
/// otherwise it is a directory.
pub fn plan_files(
    documents: &[GeneratedDocument],
    base: &Path,
    merge: bool,
    config: &GeneratorConfig,
) -> Vec<(PathBuf, String)> {
    let names_file = base.extension().is_some_and(|ext| ext == "ts");

    if merge || (documents.len() == 1 && names_file) {
        let content = if merge {
            merge_documents(documents)
        } else {
            documents[0].content.clone()
        };
        let path = if names_file {
            base.to_path_buf()
        } else {
            let stem = merged_file_name(documents, config)
                .unwrap_or_else(|| FALLBACK_MERGED_NAME.to_string());
            base.join(ensure_ts_extension(&stem))
        };
        return vec![(path, content)];
    }

    let dir = if names_file {
        base.parent().unwrap_or(Path::new(".")).to_path_buf()
    } else {
        base.to_path_buf()
    };

    let mut planned: Vec<(PathBuf, String)> = Vec::with_capacity(documents.len());
    for doc in documents {
        let mut path = dir.join(doc.file_name());
        let mut suffix = 2;
        while planned.iter().any(|(taken, _)| *taken == path) {
            path = dir.join(format!("{}-{suffix}.ts", doc.suggested_file_name));
            suffix += 1;
        }
        planned.push((path, doc.content.clone()));
    }
    planned
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}

fn report_diagnostics(diagnostics: &Diagnostics) {
    if diagnostics.is_clean() {
        return;
    }
    eprintln!(
        "{} warning(s), {} error(s) while generating; unresolved types were rendered as `any`",
        diagnostics.warnings(),
        diagnostics.errors()
    );
}
