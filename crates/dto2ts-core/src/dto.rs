//! Data-transfer class detection
//!
//! The traversal never asks whether a class "is a DTO"; hosts use these
//! predicates to pick roots, e.g. from an endpoint method's signature.

use crate::config::GeneratorConfig;
use crate::model::{ClassDecl, MethodDecl, TypeRef};
use crate::resolver::ClassResolver;
use crate::shape::class_reference;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::trace;

/// Decides whether a class should be offered as a generation root
pub trait DtoClassifier: Send + Sync {
    fn is_dto(&self, class: &ClassDecl) -> bool;
}

impl<F> DtoClassifier for F
where
    F: Fn(&ClassDecl) -> bool + Send + Sync,
{
    fn is_dto(&self, class: &ClassDecl) -> bool {
        self(class)
    }
}

const QUERY_MARKERS: [&str; 3] = ["qrystatement", "qry", "query"];
const NAME_KEYWORDS: [&str; 8] = [
    "dto", "model", "bean", "vo", "entity", "request", "response", "result",
];
const MIN_PUBLIC_FIELDS: usize = 3;
const MIN_ACCESSORS: usize = 4;

/// Name and shape heuristic driven by the configured suffix lists
#[derive(Debug, Clone)]
pub struct SuffixDtoClassifier {
    request_suffixes: Vec<String>,
    response_suffixes: Vec<String>,
}

impl SuffixDtoClassifier {
    pub fn new(request_suffixes: Vec<String>, response_suffixes: Vec<String>) -> Self {
        Self {
            request_suffixes,
            response_suffixes,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(
            config.request_dto_suffixes.clone(),
            config.response_dto_suffixes.clone(),
        )
    }

    fn has_suffix(&self, name: &str) -> bool {
        self.request_suffixes
            .iter()
            .chain(self.response_suffixes.iter())
            .any(|suffix| !suffix.is_empty() && name.ends_with(suffix.as_str()))
    }
}

impl Default for SuffixDtoClassifier {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::default())
    }
}

impl DtoClassifier for SuffixDtoClassifier {
    fn is_dto(&self, class: &ClassDecl) -> bool {
        if class.is_interface() || class.is_enum() || class.is_annotation() {
            return false;
        }
        let name = class.simple_name();
        let lower = name.to_lowercase();
        if QUERY_MARKERS.iter().any(|marker| lower.contains(marker)) {
            return true;
        }
        if self.has_suffix(name) {
            return true;
        }
        if NAME_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
            return true;
        }

        let public_fields = class.fields.iter().filter(|f| f.public).count();
        let accessors = class.methods.iter().filter(|m| m.is_accessor()).count();
        public_fields >= MIN_PUBLIC_FIELDS || accessors >= MIN_ACCESSORS
    }
}

/// DTO classes named by a method's parameters and return type.
///
/// Generic arguments and array components are searched too; `java.*` and
/// `javax.*` types are never candidates. Result order is first appearance.
pub fn collect_dto_classes(
    method: &MethodDecl,
    resolver: &dyn ClassResolver,
    classifier: &dyn DtoClassifier,
    allow_all_scope: bool,
) -> Vec<Arc<ClassDecl>> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();
    let signature = method.parameters.iter().chain(method.return_type.as_ref());
    for ty in signature {
        visit(ty, resolver, classifier, allow_all_scope, &mut seen, &mut found);
    }
    found
}

fn visit(
    ty: &TypeRef,
    resolver: &dyn ClassResolver,
    classifier: &dyn DtoClassifier,
    allow_all_scope: bool,
    seen: &mut HashSet<String>,
    found: &mut Vec<Arc<ClassDecl>>,
) {
    if let Some(component) = &ty.component {
        visit(component, resolver, classifier, allow_all_scope, seen, found);
    }
    for arg in &ty.args {
        visit(arg, resolver, classifier, allow_all_scope, seen, found);
    }

    let Some(name) = class_reference(ty) else {
        return;
    };
    if is_platform_type(name) || !seen.insert(name.to_string()) {
        return;
    }
    match resolver.resolve(name, allow_all_scope) {
        Some(class) if classifier.is_dto(&class) => found.push(class),
        Some(_) => trace!(class = name, "not a DTO"),
        None => trace!(class = name, "signature type not resolvable"),
    }
}

pub(crate) fn is_platform_type(qualified_name: &str) -> bool {
    qualified_name.starts_with("java.") || qualified_name.starts_with("javax.")
}
