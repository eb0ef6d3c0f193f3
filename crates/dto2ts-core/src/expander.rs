//! Class expansion: one class in, one emitted declaration out

use crate::comment::{class_comment_block, field_comment_block, normalize_doc};
use crate::config::GeneratorConfig;
use crate::model::{ClassDecl, DeclarationKind, EmittedDeclaration, FieldDecl};
use crate::naming::accessor_suffix;
use crate::resolver::{ClassResolver, LibraryTypes};
use crate::state::TraversalState;
use crate::transaction::{self, Role, TransactionNaming};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Returned for declaration kinds that cannot become an interface or union
pub const UNKNOWN: &str = "unknown";

const SERIAL_VERSION_UID: &str = "serialVersionUID";
const OBJECT_ROOT: &str = "java.lang.Object";

/// A single root-class traversal.
///
/// Borrows the resolver, configuration and memoization store for the
/// duration of one walk. Classification lives in `classifier.rs`; the two
/// halves recurse into each other.
pub struct Traversal<'a> {
    pub(crate) resolver: &'a dyn ClassResolver,
    pub(crate) config: &'a GeneratorConfig,
    pub(crate) library: &'a LibraryTypes,
    pub(crate) state: &'a mut TraversalState,
    pub(crate) naming: Option<&'a TransactionNaming>,
}

impl<'a> Traversal<'a> {
    pub fn new(
        resolver: &'a dyn ClassResolver,
        config: &'a GeneratorConfig,
        library: &'a LibraryTypes,
        state: &'a mut TraversalState,
    ) -> Self {
        Self {
            resolver,
            config,
            library,
            state,
            naming: None,
        }
    }

    /// Declare classes used by a coded endpoint method under its transaction
    /// code (only when the configuration enables it)
    pub fn with_naming(mut self, naming: Option<&'a TransactionNaming>) -> Self {
        self.naming = naming;
        self
    }

    /// Ensure `class` has exactly one declaration in the store.
    ///
    /// Returns the name callers should use to refer to the class, or
    /// [`UNKNOWN`] when its kind is unsupported.
    pub fn expand(&mut self, class: &ClassDecl) -> String {
        let name = class.qualified_name.as_str();
        if self.state.is_known(name) {
            return self.declared_display_name(class);
        }
        self.state.mark_in_progress(name);
        let declared = self.declared_name(class);

        let text = match class.kind {
            DeclarationKind::Class => {
                debug!(class = name, "expanding class");
                self.render_interface(class)
            }
            DeclarationKind::Enum => {
                debug!(class = name, "expanding enum");
                render_enum(class, &self.declared_display_name(class))
            }
            DeclarationKind::Interface | DeclarationKind::Annotation => {
                debug!(class = name, kind = ?class.kind, "unsupported declaration kind");
                self.state.abandon(name);
                return UNKNOWN.to_string();
            }
        };

        let comment = class
            .doc
            .as_deref()
            .and_then(normalize_doc)
            .map(|doc| class_comment_block(&doc));
        self.state.store(EmittedDeclaration {
            qualified_name: name.to_string(),
            simple_name: declared,
            text,
            comment,
        });
        self.declared_display_name(class)
    }

    /// Name `class` is declared under, without type parameters
    pub fn declared_name(&mut self, class: &ClassDecl) -> String {
        let qualified = class.qualified_name.as_str();
        if let Some(name) = self.state.assigned_name(qualified) {
            return name.to_string();
        }
        let Some(name) = self.transaction_name(class) else {
            return class.simple_name().to_string();
        };
        if self.state.assign_name(qualified, &name) {
            debug!(class = qualified, name = %name, "declared under transaction code");
            name
        } else {
            debug!(class = qualified, name = %name, "transaction name already taken");
            class.simple_name().to_string()
        }
    }

    /// [`Traversal::declared_name`] plus declared type parameters
    pub fn declared_display_name(&mut self, class: &ClassDecl) -> String {
        let name = self.declared_name(class);
        if class.type_parameters.is_empty() {
            name
        } else {
            format!("{}<{}>", name, class.type_parameters.join(", "))
        }
    }

    fn transaction_name(&mut self, class: &ClassDecl) -> Option<String> {
        let naming = self.naming?;
        if !self.config.use_transaction_code_prefix {
            return None;
        }
        if self.config.only_process_generic_dto && transaction::is_container(class) {
            return None;
        }

        let qualified = class.qualified_name.as_str();
        if let Some((outer_name, _)) = qualified.split_once('$') {
            let outer = self.resolve(outer_name)?;
            let outer_declared = self.declared_name(&outer);
            let nested = class.simple_name().rsplit('$').next().unwrap_or_default();
            let role = naming
                .role(qualified)
                .or_else(|| naming.role(outer_name))
                .unwrap_or_else(|| Role::from_name(class.simple_name(), self.config));
            return transaction::nested_interface_name(&outer_declared, nested, role, self.config);
        }

        let role = naming.role(qualified)?;
        Some(transaction::interface_name(
            class.simple_name(),
            naming.code(),
            role,
            self.config,
        ))
    }

    pub(crate) fn resolve(&self, qualified_name: &str) -> Option<Arc<ClassDecl>> {
        self.resolver.resolve(
            qualified_name,
            self.config.allow_resolution_outside_project_scope,
        )
    }

    fn render_interface(&mut self, class: &ClassDecl) -> String {
        let ancestors = if self.config.ignore_parent_fields {
            Vec::new()
        } else {
            self.ancestors(class)
        };

        let mut seen = HashSet::new();
        let mut clauses = Vec::new();
        let declaring = std::iter::once(class).chain(ancestors.iter().map(Arc::as_ref));
        for owner in declaring {
            for field in &owner.fields {
                if self.is_skipped(field) || !seen.insert(field.name.as_str()) {
                    continue;
                }
                clauses.push(self.render_field(owner, field));
            }
        }

        let mut out = format!("interface {} {{\n", self.declared_display_name(class));
        out.push_str(&clauses.join("\n"));
        out.push_str("}\n");
        out
    }

    fn render_field(&mut self, owner: &ClassDecl, field: &FieldDecl) -> String {
        let mut clause = String::new();
        if let Some(doc) = field.doc.as_deref().and_then(normalize_doc) {
            clause.push_str(&field_comment_block(&doc));
        }
        let name = self.field_display_name(owner, field);
        let separator = if self.config.add_optional_mark_to_all_fields && !field.is_required() {
            "?: "
        } else {
            ": "
        };
        let token = self.classify(&field.ty);
        clause.push_str(&format!("  {name}{separator}{token};\n"));
        clause
    }

    fn is_skipped(&self, field: &FieldDecl) -> bool {
        self.config.ignore_serial_version_uid_field && field.name == SERIAL_VERSION_UID
    }

    fn field_display_name(&self, owner: &ClassDecl, field: &FieldDecl) -> String {
        if !self.config.prefer_json_property_annotation_name {
            return field.name.clone();
        }
        if let Some(value) = field.json_property() {
            return value.to_string();
        }
        let suffix = accessor_suffix(&field.name);
        let getter = if field.is_boolean() {
            format!("is{suffix}")
        } else {
            format!("get{suffix}")
        };
        let setter = format!("set{suffix}");
        [getter, setter]
            .iter()
            .find_map(|accessor| owner.find_method(accessor)?.json_property())
            .map(str::to_string)
            .unwrap_or_else(|| field.name.clone())
    }

    /// Resolvable superclasses, nearest first
    fn ancestors(&self, class: &ClassDecl) -> Vec<Arc<ClassDecl>> {
        let mut chain = Vec::new();
        let mut visited = HashSet::from([class.qualified_name.clone()]);
        let mut next = class.super_class.clone();
        while let Some(parent) = next {
            if parent == OBJECT_ROOT || !visited.insert(parent.clone()) {
                break;
            }
            match self.resolve(&parent) {
                Some(decl) => {
                    next = decl.super_class.clone();
                    chain.push(decl);
                }
                None => {
                    debug!(class = %class.qualified_name, parent = %parent, "superclass not resolvable");
                    break;
                }
            }
        }
        chain
    }
}

fn render_enum(class: &ClassDecl, declared: &str) -> String {
    let constants: Vec<String> = class
        .enum_constants()
        .map(|constant| format!("'{}'", constant.name))
        .collect();
    format!("type {} = {};\n", declared, constants.join(" | "))
}

#[cfg(test)]
#[path = "expander/expander_tests.rs"]
mod expander_tests;
