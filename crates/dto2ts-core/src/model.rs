//! Host-supplied class graph model
//!
//! The types here mirror what an IDE or compiler front end already knows about
//! a class: its fields, their declared types, annotations and accessor methods.
//! They are read-only inputs to the traversal and derive serde so a host can
//! hand over a whole graph as JSON.

use crate::naming;
use serde::{Deserialize, Serialize};

/// Qualified name of the Jackson naming annotation
pub const JSON_PROPERTY_ANNOTATION: &str = "com.fasterxml.jackson.annotation.JsonProperty";

/// Annotation short names that force a field to render as required
const REQUIRED_MARKERS: [&str; 3] = ["NotNull", "NotEmpty", "NotBlank"];

/// A field's declared type as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Canonical text, e.g. `java.util.List<com.acme.Item>` or `int[]`
    pub name: String,

    /// Erased qualified class name when the type names a class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Generic arguments in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeRef>,

    /// Component type of an array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Box<TypeRef>>,

    /// Erased qualified names of every supertype the host knows about
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<String>,

    /// Bare generic placeholder such as `T`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub type_parameter: bool,
}

impl TypeRef {
    /// A primitive such as `int` or `boolean`
    pub fn primitive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_name: None,
            args: Vec::new(),
            component: None,
            supertypes: Vec::new(),
            type_parameter: false,
        }
    }

    /// A reference to a class by qualified name
    pub fn class(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            name: qualified_name.clone(),
            class_name: Some(qualified_name),
            ..Self::primitive(String::new())
        }
    }

    /// An array of `component`
    pub fn array(component: TypeRef) -> Self {
        Self {
            name: format!("{}[]", component.name),
            component: Some(Box::new(component)),
            ..Self::primitive(String::new())
        }
    }

    /// An unresolved generic placeholder
    pub fn type_parameter(name: impl Into<String>) -> Self {
        Self {
            type_parameter: true,
            ..Self::primitive(name)
        }
    }

    /// Attach generic arguments, rewriting the canonical text to match
    pub fn with_args(mut self, args: Vec<TypeRef>) -> Self {
        let base = self.erased_name().to_string();
        if args.is_empty() {
            self.name = base;
        } else {
            let rendered: Vec<&str> = args.iter().map(|a| a.name.as_str()).collect();
            self.name = format!("{}<{}>", base, rendered.join(","));
        }
        self.args = args;
        self
    }

    /// Attach supertype names
    pub fn with_supertypes<I, S>(mut self, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supertypes = supertypes.into_iter().map(Into::into).collect();
        self
    }

    /// Qualified name without generic arguments
    pub fn erased_name(&self) -> &str {
        match &self.class_name {
            Some(name) => name,
            None => self.name.split('<').next().unwrap_or(&self.name),
        }
    }

    /// Simple name without package or generic arguments
    pub fn presentable_name(&self) -> &str {
        naming::simple_name(self.erased_name())
    }

    /// True for arrays, including canonical text ending in `[]`
    pub fn is_array(&self) -> bool {
        self.component.is_some() || self.name.ends_with("[]")
    }
}

/// Declaration kinds a host can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    #[default]
    Class,
    Enum,
    Interface,
    Annotation,
}

/// An annotation applied to a field or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Qualified or short annotation name
    pub name: String,

    /// Literal `value` attribute, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn short_name(&self) -> &str {
        naming::simple_name(&self.name)
    }
}

/// A field declared on a class or an enum constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,

    /// True for the constants of an enum
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub enum_constant: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub public: bool,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            doc: None,
            annotations: Vec::new(),
            enum_constant: false,
            public: false,
        }
    }

    /// An enum constant; its type is the enum itself
    pub fn enum_constant(name: impl Into<String>, enum_name: impl Into<String>) -> Self {
        Self {
            enum_constant: true,
            public: true,
            ..Self::new(name, TypeRef::class(enum_name))
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// True when a not-null, not-empty or not-blank marker is present
    pub fn is_required(&self) -> bool {
        self.annotations.iter().any(|a| {
            REQUIRED_MARKERS
                .iter()
                .any(|marker| a.short_name().eq_ignore_ascii_case(marker))
        })
    }

    /// Non-blank `@JsonProperty` value on the field itself
    pub fn json_property(&self) -> Option<&str> {
        json_property_value(&self.annotations)
    }

    pub fn is_boolean(&self) -> bool {
        self.ty.name == "boolean"
    }
}

/// A method declared on a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<TypeRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,

    /// Raw doc comment text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            doc: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_parameter(mut self, ty: TypeRef) -> Self {
        self.parameters.push(ty);
        self
    }

    pub fn with_return_type(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn json_property(&self) -> Option<&str> {
        json_property_value(&self.annotations)
    }

    /// `getX`, `setX` or `isX` where `X` is uppercase
    pub fn is_accessor(&self) -> bool {
        ["get", "set", "is"].iter().any(|prefix| {
            self.name
                .strip_prefix(prefix)
                .and_then(|rest| rest.chars().next())
                .is_some_and(|c| c.is_ascii_uppercase())
        })
    }
}

/// A class or enum declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Identity key
    pub qualified_name: String,

    /// Explicit simple name; derived from the qualified name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub kind: DeclarationKind,

    /// Declared type parameter names, e.g. `["T"]` for `Page<T>`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,

    #[serde(default)]
    pub fields: Vec<FieldDecl>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodDecl>,

    /// Qualified name of the direct superclass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_class: Option<String>,

    /// Erased names of every supertype, including interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<String>,

    /// Raw documentation comment text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl ClassDecl {
    pub fn new(qualified_name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            name: None,
            kind,
            type_parameters: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            super_class: None,
            supertypes: Vec::new(),
            doc: None,
        }
    }

    /// An ordinary class
    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, DeclarationKind::Class)
    }

    /// An enum with the given constants in declared order
    pub fn enumeration<I, S>(qualified_name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut decl = Self::new(qualified_name, DeclarationKind::Enum);
        let owner = decl.qualified_name.clone();
        decl.fields = constants
            .into_iter()
            .map(|c| FieldDecl::enum_constant(c, owner.clone()))
            .collect();
        decl
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_type_parameters<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_parameters = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_super_class(mut self, super_class: impl Into<String>) -> Self {
        let super_class = super_class.into();
        if !self.supertypes.contains(&super_class) {
            self.supertypes.push(super_class.clone());
        }
        self.super_class = Some(super_class);
        self
    }

    pub fn with_supertypes<I, S>(mut self, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supertypes.extend(supertypes.into_iter().map(Into::into));
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn simple_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ => naming::simple_name(&self.qualified_name),
        }
    }

    /// Simple name plus declared type parameters, e.g. `Page<T, U>`
    pub fn display_name(&self) -> String {
        if self.type_parameters.is_empty() {
            self.simple_name().to_string()
        } else {
            format!(
                "{}<{}>",
                self.simple_name(),
                self.type_parameters.join(", ")
            )
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == DeclarationKind::Interface
    }

    pub fn is_enum(&self) -> bool {
        self.kind == DeclarationKind::Enum
    }

    pub fn is_annotation(&self) -> bool {
        self.kind == DeclarationKind::Annotation
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn enum_constants(&self) -> impl Iterator<Item = &FieldDecl> {
        self.fields.iter().filter(|f| f.enum_constant)
    }
}

/// One rendered declaration produced by a traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedDeclaration {
    pub qualified_name: String,
    pub simple_name: String,

    /// `interface X {...}` or `type X = ...;`, without the `export ` keyword
    pub text: String,

    /// Normalized `/** ... */` block placed before the declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl EmittedDeclaration {
    /// Comment block, `export ` keyword and declaration text
    pub fn exported(&self) -> String {
        let mut out = String::new();
        if let Some(comment) = &self.comment {
            out.push_str(comment);
        }
        out.push_str("export ");
        out.push_str(&self.text);
        out
    }
}

fn json_property_value(annotations: &[Annotation]) -> Option<&str> {
    annotations
        .iter()
        .filter(|a| a.name == JSON_PROPERTY_ANNOTATION || a.name == "JsonProperty")
        .find_map(|a| a.value.as_deref().filter(|v| !v.trim().is_empty()))
}
