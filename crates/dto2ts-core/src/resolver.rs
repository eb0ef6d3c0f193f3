//! Class resolution seam between the traversal and its host

use crate::error::{GenerateError, GenerateResult};
use crate::model::ClassDecl;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// Where a class lookup is allowed to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchScope {
    /// Classes declared by the project being processed
    Project,
    /// Project classes plus every library on the class path
    All,
}

/// Finds class declarations by qualified name.
///
/// Implemented by the host (IDE index, compiler, JSON dump). Implementations
/// must be cheap to query repeatedly; the traversal calls `find_class` once per
/// referenced type.
pub trait ClassResolver: Send + Sync {
    /// Look up a class in the given scope
    fn find_class(&self, qualified_name: &str, scope: SearchScope) -> Option<Arc<ClassDecl>>;

    /// Project scope first, then all scope when `allow_all_scope` is set
    fn resolve(&self, qualified_name: &str, allow_all_scope: bool) -> Option<Arc<ClassDecl>> {
        self.find_class(qualified_name, SearchScope::Project)
            .or_else(|| {
                if allow_all_scope {
                    self.find_class(qualified_name, SearchScope::All)
                } else {
                    None
                }
            })
    }
}

impl<T: ClassResolver + ?Sized> ClassResolver for Arc<T> {
    fn find_class(&self, qualified_name: &str, scope: SearchScope) -> Option<Arc<ClassDecl>> {
        (**self).find_class(qualified_name, scope)
    }
}

/// Serialized form of a [`ClassGraph`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassGraphDocument {
    /// Project classes
    #[serde(default)]
    pub classes: Vec<ClassDecl>,

    /// Library classes, only visible in [`SearchScope::All`]
    #[serde(default)]
    pub library: Vec<ClassDecl>,
}

/// In-memory class graph split into project and library scope
#[derive(Debug, Clone, Default)]
pub struct ClassGraph {
    project: HashMap<String, Arc<ClassDecl>>,
    library: HashMap<String, Arc<ClassDecl>>,
    order: Vec<String>,
}

impl ClassGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from JSON bytes
    pub fn from_json(bytes: &[u8]) -> GenerateResult<Self> {
        let document: ClassGraphDocument = serde_json::from_slice(bytes)?;
        Self::from_document(document)
    }

    /// Read and parse a JSON graph file
    pub fn from_file(path: impl AsRef<Path>) -> GenerateResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_json(&bytes)
    }

    /// Build a graph, rejecting blank or duplicate qualified names
    pub fn from_document(document: ClassGraphDocument) -> GenerateResult<Self> {
        let mut graph = Self::new();
        let mut seen = HashSet::new();
        for class in document.classes {
            validate_name(&class, &mut seen)?;
            graph.insert_project(class);
        }
        for class in document.library {
            validate_name(&class, &mut seen)?;
            graph.insert_library(class);
        }
        Ok(graph)
    }

    /// Add or replace a project class
    pub fn insert_project(&mut self, class: ClassDecl) {
        let name = class.qualified_name.clone();
        if self.project.insert(name.clone(), Arc::new(class)).is_none() {
            self.order.push(name);
        }
    }

    /// Add or replace a library class
    pub fn insert_library(&mut self, class: ClassDecl) {
        self.library
            .insert(class.qualified_name.clone(), Arc::new(class));
    }

    pub fn with_project(mut self, class: ClassDecl) -> Self {
        self.insert_project(class);
        self
    }

    pub fn with_library(mut self, class: ClassDecl) -> Self {
        self.insert_library(class);
        self
    }

    /// Project classes in insertion order
    pub fn project_classes(&self) -> impl Iterator<Item = &Arc<ClassDecl>> {
        self.order.iter().filter_map(|name| self.project.get(name))
    }

    pub fn project_len(&self) -> usize {
        self.project.len()
    }

    pub fn library_len(&self) -> usize {
        self.library.len()
    }

    /// Serializable snapshot of the graph
    pub fn to_document(&self) -> ClassGraphDocument {
        let mut library: Vec<ClassDecl> =
            self.library.values().map(|c| (**c).clone()).collect();
        library.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
        ClassGraphDocument {
            classes: self.project_classes().map(|c| (**c).clone()).collect(),
            library,
        }
    }
}

impl ClassResolver for ClassGraph {
    fn find_class(&self, qualified_name: &str, scope: SearchScope) -> Option<Arc<ClassDecl>> {
        let found = self.project.get(qualified_name);
        match scope {
            SearchScope::Project => found.cloned(),
            SearchScope::All => found.or_else(|| self.library.get(qualified_name)).cloned(),
        }
    }
}

fn validate_name(class: &ClassDecl, seen: &mut HashSet<String>) -> GenerateResult<()> {
    let name = class.qualified_name.trim();
    if name.is_empty() {
        return Err(GenerateError::InvalidClassGraph(
            "class with an empty qualified name".to_string(),
        ));
    }
    if !seen.insert(name.to_string()) {
        return Err(GenerateError::InvalidClassGraph(format!(
            "duplicate class {name}"
        )));
    }
    Ok(())
}

/// Supertype table for well-known library types.
///
/// Hosts often report no supertypes for JDK classes; the classifier unions
/// this table with whatever the host did report.
#[derive(Debug, Clone, Default)]
pub struct LibraryTypes {
    supertypes: HashMap<String, Vec<String>>,
}

const NUMBER: &str = "java.lang.Number";
const CHAR_SEQUENCE: &str = "java.lang.CharSequence";
const COLLECTION: &str = "java.util.Collection";
const MAP: &str = "java.util.Map";

const BUILTINS: &[(&str, &str)] = &[
    ("java.lang.Byte", NUMBER),
    ("java.lang.Short", NUMBER),
    ("java.lang.Integer", NUMBER),
    ("java.lang.Long", NUMBER),
    ("java.lang.Float", NUMBER),
    ("java.lang.Double", NUMBER),
    ("java.math.BigDecimal", NUMBER),
    ("java.math.BigInteger", NUMBER),
    ("java.util.concurrent.atomic.AtomicInteger", NUMBER),
    ("java.util.concurrent.atomic.AtomicLong", NUMBER),
    ("java.lang.String", CHAR_SEQUENCE),
    ("java.lang.StringBuilder", CHAR_SEQUENCE),
    ("java.lang.StringBuffer", CHAR_SEQUENCE),
    ("java.lang.Character", CHAR_SEQUENCE),
    ("java.util.List", COLLECTION),
    ("java.util.Set", COLLECTION),
    ("java.util.SortedSet", COLLECTION),
    ("java.util.NavigableSet", COLLECTION),
    ("java.util.Queue", COLLECTION),
    ("java.util.Deque", COLLECTION),
    ("java.util.ArrayList", COLLECTION),
    ("java.util.LinkedList", COLLECTION),
    ("java.util.Vector", COLLECTION),
    ("java.util.Stack", COLLECTION),
    ("java.util.HashSet", COLLECTION),
    ("java.util.LinkedHashSet", COLLECTION),
    ("java.util.TreeSet", COLLECTION),
    ("java.util.ArrayDeque", COLLECTION),
    ("java.util.concurrent.CopyOnWriteArrayList", COLLECTION),
    ("java.util.HashMap", MAP),
    ("java.util.LinkedHashMap", MAP),
    ("java.util.TreeMap", MAP),
    ("java.util.SortedMap", MAP),
    ("java.util.NavigableMap", MAP),
    ("java.util.Hashtable", MAP),
    ("java.util.EnumMap", MAP),
    ("java.util.concurrent.ConcurrentMap", MAP),
    ("java.util.concurrent.ConcurrentHashMap", MAP),
];

impl LibraryTypes {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// A table pre-populated with JDK numeric, text, collection and map types
    pub fn with_builtins() -> Self {
        let mut types = Self::new();
        for (name, supertype) in BUILTINS {
            types.register(*name, [*supertype]);
        }
        types
    }

    /// Add supertypes for `qualified_name`
    pub fn register<I, S>(&mut self, qualified_name: impl Into<String>, supertypes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supertypes
            .entry(qualified_name.into())
            .or_default()
            .extend(supertypes.into_iter().map(Into::into));
    }

    /// Known supertypes of `qualified_name`
    pub fn supertypes(&self, qualified_name: &str) -> &[String] {
        self.supertypes
            .get(qualified_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.supertypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supertypes.is_empty()
    }
}
