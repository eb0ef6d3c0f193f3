//! Transaction-code interface naming
//!
//! Endpoint methods in some code bases carry a transaction code such as
//! `RET-B-QRYSTATEMENTS` in their doc comment or mapping annotation. When
//! [`GeneratorConfig::use_transaction_code_prefix`] is set, the data classes
//! such a method takes or returns are declared under the last segment of the
//! code instead of their Java names:
//!
//! ```text
//! QryStatementsTranrq        -> QRYSTATEMENTSReq
//! QryStatementsTranrs        -> QRYSTATEMENTSResp
//! QryStatementsTranrsDetail  -> QRYSTATEMENTSRespDetail
//! ```

use crate::config::GeneratorConfig;
use crate::dto::is_platform_type;
use crate::model::{ClassDecl, MethodDecl, TypeRef};
use crate::shape::class_reference;
use std::collections::HashMap;

/// Endings carried over from the Java name onto the renamed interface
const KEPT_ENDINGS: [&str; 6] = ["Address", "Building", "Detail", "Info", "Data", "Item"];

/// Words carried over when they appear anywhere in the Java name
const KEPT_INFIXES: [&str; 2] = ["Address", "Building"];

/// Markers that split an outer interface name into code and role
const ROLE_MARKERS: [&str; 4] = ["Req", "Resp", "Rq", "Rs"];

/// Name parts of generic wrapper classes
const CONTAINER_MARKERS: [&str; 4] = ["Template", "Wrapper", "Response", "Request"];

/// Which side of an endpoint signature a class sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Request,
    Response,
}

impl Role {
    /// Guess from the class name alone; anything not response-like is a request
    pub fn from_name(simple_name: &str, config: &GeneratorConfig) -> Self {
        if config.is_response_name(simple_name) && !config.is_request_name(simple_name) {
            Role::Response
        } else {
            Role::Request
        }
    }

    fn suffix(self, config: &GeneratorConfig) -> &str {
        match self {
            Role::Request => &config.transaction_request_suffix,
            Role::Response => &config.transaction_response_suffix,
        }
    }
}

/// Transaction code of one endpoint method plus the role of every class its
/// signature names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionNaming {
    code: String,
    roles: HashMap<String, Role>,
}

impl TransactionNaming {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            roles: HashMap::new(),
        }
    }

    /// Naming for `method`, or `None` when it carries no transaction code.
    ///
    /// Classes named by parameters are requests; classes only named by the
    /// return type are responses. Generic arguments and array components
    /// count as well.
    pub fn for_method(method: &MethodDecl) -> Option<Self> {
        let mut naming = Self::new(method_code(method)?);
        for parameter in &method.parameters {
            naming.assign(parameter, Role::Request);
        }
        if let Some(returned) = &method.return_type {
            naming.assign(returned, Role::Response);
        }
        Some(naming)
    }

    /// Record `role` for `qualified_name`, replacing any earlier one
    pub fn with_role(mut self, qualified_name: impl Into<String>, role: Role) -> Self {
        self.roles.insert(qualified_name.into(), role);
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn role(&self, qualified_name: &str) -> Option<Role> {
        self.roles.get(qualified_name).copied()
    }

    fn assign(&mut self, ty: &TypeRef, role: Role) {
        if let Some(component) = &ty.component {
            self.assign(component, role);
        }
        for arg in &ty.args {
            self.assign(arg, role);
        }
        if let Some(name) = class_reference(ty).filter(|name| !is_platform_type(name)) {
            self.roles.entry(name.to_string()).or_insert(role);
        }
    }
}

/// Transaction code of an endpoint method: doc comment first, then each
/// annotation's value and name
pub fn method_code(method: &MethodDecl) -> Option<String> {
    let doc = method.doc.as_deref().into_iter();
    let annotations = method
        .annotations
        .iter()
        .flat_map(|a| a.value.as_deref().into_iter().chain(std::iter::once(a.name.as_str())));
    doc.chain(annotations)
        .find_map(extract_code)
        .map(str::to_string)
}

/// Last segment of the first hyphenated upper-case code in `text`.
///
/// # Examples
///
/// ```
/// use dto2ts_core::transaction::extract_code;
///
/// assert_eq!(extract_code("/api/RET-B-QRYSTATEMENTS"), Some("QRYSTATEMENTS"));
/// assert_eq!(extract_code("no code here"), None);
/// ```
pub fn extract_code(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !is_code_byte(bytes[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && is_code_byte(bytes[i]) {
            i += 1;
        }
        let preceded_by_word = start > 0 && is_word_byte(bytes[start - 1]);
        let followed_by_word = i < bytes.len() && is_word_byte(bytes[i]);
        if let Some(code) = code_in_run(&text[start..i], preceded_by_word, followed_by_word) {
            return Some(code);
        }
    }
    None
}

fn code_in_run(run: &str, preceded_by_word: bool, followed_by_word: bool) -> Option<&str> {
    // a code must start and end on a word boundary
    let run = if preceded_by_word {
        &run[run.find('-')?..]
    } else {
        run
    };
    let run = run.trim_start_matches('-');
    let end = if followed_by_word {
        run.rfind('-')?
    } else {
        run.len()
    };
    let (head, code) = run[..end].trim_end_matches('-').rsplit_once('-')?;
    (!head.is_empty() && !code.is_empty()).then_some(code)
}

fn is_code_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-'
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Interface name for a class used directly by a coded method
pub fn interface_name(original: &str, code: &str, role: Role, config: &GeneratorConfig) -> String {
    if code.is_empty() {
        return original.to_string();
    }
    let base = format!("{code}{}", role.suffix(config));
    let kept = KEPT_ENDINGS
        .iter()
        .find(|ending| original.ends_with(*ending))
        .or_else(|| KEPT_INFIXES.iter().find(|word| original.contains(*word)));
    match kept {
        Some(word) => format!("{base}{word}"),
        None => base,
    }
}

/// Interface name for a nested class whose outer class is declared as
/// `outer_name`, or `None` when the outer name has no code prefix
pub fn nested_interface_name(
    outer_name: &str,
    nested_name: &str,
    role: Role,
    config: &GeneratorConfig,
) -> Option<String> {
    let prefix = code_prefix(outer_name)?;
    Some(format!("{prefix}{}{nested_name}", role.suffix(config)))
}

/// Text before the first role marker that is not at the very start
fn code_prefix(interface_name: &str) -> Option<&str> {
    ROLE_MARKERS
        .iter()
        .find_map(|marker| interface_name.find(*marker).filter(|&idx| idx > 0))
        .map(|idx| &interface_name[..idx])
}

/// Generic wrappers and header classes that keep their own names when
/// [`GeneratorConfig::only_process_generic_dto`] is set
pub fn is_container(class: &ClassDecl) -> bool {
    let name = class.simple_name();
    if name.contains("Header") {
        return true;
    }
    if class.type_parameters.is_empty() {
        return false;
    }
    CONTAINER_MARKERS.iter().any(|marker| name.contains(*marker))
}
