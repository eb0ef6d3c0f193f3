//! Type classification: one field type in, one type token out

use crate::expander::Traversal;
use crate::model::{ClassDecl, TypeRef};
use crate::shape::{ShapeCategory, class_reference};
use std::sync::Arc;
use tracing::{trace, warn};

/// Token for anything that cannot be described more precisely
pub const ANY: &str = "any";

impl Traversal<'_> {
    /// Render `ty` as a type token, expanding referenced classes on the way
    pub fn classify(&mut self, ty: &TypeRef) -> String {
        let resolved = class_reference(ty).and_then(|name| self.resolve(name));
        let category = {
            let mut supertypes: Vec<&str> = ty.supertypes.iter().map(String::as_str).collect();
            supertypes.extend(
                self.library
                    .supertypes(ty.erased_name())
                    .iter()
                    .map(String::as_str),
            );
            if let Some(class) = &resolved {
                supertypes.extend(class.supertypes.iter().map(String::as_str));
            }
            ShapeCategory::of(ty, &supertypes)
        };

        let token = match category {
            ShapeCategory::Numeric => "number".to_string(),
            ShapeCategory::Text => "string".to_string(),
            ShapeCategory::Boolean => "boolean".to_string(),
            ShapeCategory::Datelike if self.config.coerce_date_to_string => "string".to_string(),
            ShapeCategory::Datelike => ANY.to_string(),
            ShapeCategory::MapLike => format!("{{[x:string]: {}}}", self.map_value(ty)),
            ShapeCategory::CollectionLike => format!("{}[]", self.element(ty)),
            ShapeCategory::LibraryTemporal | ShapeCategory::Unresolved => ANY.to_string(),
            ShapeCategory::ClassLike => match resolved {
                Some(class) => self.reference(ty, &class),
                None => {
                    warn!(ty = %ty.name, "referenced class not found");
                    ANY.to_string()
                }
            },
        };
        trace!(ty = %ty.name, ?category, token = %token, "classified");
        token
    }

    fn map_value(&mut self, ty: &TypeRef) -> String {
        match ty.args.as_slice() {
            [_, value] => self.classify(value),
            _ => ANY.to_string(),
        }
    }

    fn element(&mut self, ty: &TypeRef) -> String {
        if let Some(component) = &ty.component {
            return self.classify(component);
        }
        if let Some(inner) = ty.name.strip_suffix("[]") {
            return self.classify(&TypeRef::primitive(inner));
        }
        match ty.args.first() {
            Some(element) => self.classify(element),
            None => ANY.to_string(),
        }
    }

    fn reference(&mut self, ty: &TypeRef, class: &Arc<ClassDecl>) -> String {
        if ty.args.is_empty() {
            self.expand(class);
            return self.declared_name(class);
        }

        let args: Vec<String> = ty.args.iter().map(|arg| self.classify(arg)).collect();
        self.expand(class);
        if self.config.render_generic_arguments {
            format!("{}<{}>", self.declared_name(class), args.join(", "))
        } else {
            self.declared_display_name(class)
        }
    }
}
