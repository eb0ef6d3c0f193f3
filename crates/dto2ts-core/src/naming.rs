//! Naming helpers for class names, accessors and output files.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `com.acme.Item` | [`simple_name`] | `Item` |
//! | `word` | [`capitalize`] | `Word` |
//! | `orderId` | [`accessor_suffix`] | `OrderId` |
//! | `["CreateOrderReq", "CreateOrderResp"]` | [`suggest_file_name`] | `CreateOrder` |
//! | `types.d.ts` | [`ensure_ts_extension`] | `types.ts` |

use crate::config::GeneratorConfig;

/// Substring after the last `.` of a qualified name.
///
/// # Examples
///
/// ```
/// use dto2ts_core::naming::simple_name;
///
/// assert_eq!(simple_name("com.acme.Item"), "Item");
/// assert_eq!(simple_name("Item"), "Item");
/// ```
pub fn simple_name(qualified_name: &str) -> &str {
    match qualified_name.rfind('.') {
        Some(idx) => &qualified_name[idx + 1..],
        None => qualified_name,
    }
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use dto2ts_core::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Property part of an accessor name for a field.
///
/// Bean naming keeps names like `xCoord` as is when their second letter is
/// already uppercase.
///
/// # Examples
///
/// ```
/// use dto2ts_core::naming::accessor_suffix;
///
/// assert_eq!(accessor_suffix("orderId"), "OrderId");
/// assert_eq!(accessor_suffix("xCoord"), "xCoord");
/// ```
pub fn accessor_suffix(field_name: &str) -> String {
    let second_upper = field_name
        .chars()
        .nth(1)
        .is_some_and(|c| c.is_uppercase());
    if second_upper {
        field_name.to_string()
    } else {
        capitalize(field_name)
    }
}

/// Suggest a file stem for a document generated from `simple_names`.
///
/// A single class keeps its name. Several classes collapse to their shared
/// base name once a configured request/response suffix is removed from each,
/// otherwise the names are joined with `-`.
///
/// # Examples
///
/// ```
/// use dto2ts_core::GeneratorConfig;
/// use dto2ts_core::naming::suggest_file_name;
///
/// let config = GeneratorConfig::default();
/// assert_eq!(
///     suggest_file_name(&["CreateOrderReq", "CreateOrderResp"], &config).as_deref(),
///     Some("CreateOrder")
/// );
/// assert_eq!(suggest_file_name(&["Item"], &config).as_deref(), Some("Item"));
/// assert_eq!(suggest_file_name::<&str>(&[], &config), None);
/// ```
pub fn suggest_file_name<S: AsRef<str>>(
    simple_names: &[S],
    config: &GeneratorConfig,
) -> Option<String> {
    match simple_names {
        [] => None,
        [single] => Some(single.as_ref().to_string()),
        names => {
            let bases: Vec<&str> = names
                .iter()
                .map(|n| strip_dto_suffix(n.as_ref(), config))
                .collect();
            let first = bases[0];
            if !first.is_empty() && bases.iter().all(|b| *b == first) {
                Some(first.to_string())
            } else {
                let joined: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
                Some(joined.join("-"))
            }
        }
    }
}

/// Remove the longest configured request or response suffix from `name`.
pub fn strip_dto_suffix<'a>(name: &'a str, config: &GeneratorConfig) -> &'a str {
    config
        .request_dto_suffixes
        .iter()
        .chain(config.response_dto_suffixes.iter())
        .filter(|suffix| !suffix.is_empty() && name.len() > suffix.len())
        .filter_map(|suffix| name.strip_suffix(suffix.as_str()))
        .min_by_key(|base| base.len())
        .unwrap_or(name)
}

/// Normalize a file name to a `.ts` extension.
///
/// # Examples
///
/// ```
/// use dto2ts_core::naming::ensure_ts_extension;
///
/// assert_eq!(ensure_ts_extension("types.d.ts"), "types.ts");
/// assert_eq!(ensure_ts_extension("types.ts"), "types.ts");
/// assert_eq!(ensure_ts_extension("types"), "types.ts");
/// ```
pub fn ensure_ts_extension(file_name: &str) -> String {
    if let Some(stem) = file_name.strip_suffix(".d.ts") {
        format!("{stem}.ts")
    } else if file_name.ends_with(".ts") {
        file_name.to_string()
    } else {
        format!("{file_name}.ts")
    }
}

/// Names declared as `interface X` in a generated document, in order.
///
/// # Examples
///
/// ```
/// use dto2ts_core::naming::interface_names;
///
/// let doc = "export interface OrderReq {\n}\n\nexport interface Item {\n}\n";
/// assert_eq!(interface_names(doc), vec!["OrderReq", "Item"]);
/// ```
pub fn interface_names(content: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = content;
    while let Some(idx) = rest.find("interface") {
        let after = &rest[idx + "interface".len()..];
        let preceded_ok = rest[..idx]
            .chars()
            .last()
            .is_none_or(|c| !is_identifier_char(c));
        let trimmed = after.trim_start();
        if preceded_ok && trimmed.len() < after.len() {
            let end = trimmed
                .find(|c: char| !is_identifier_char(c))
                .unwrap_or(trimmed.len());
            if end > 0 {
                names.push(&trimmed[..end]);
            }
        }
        rest = after;
    }
    names
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
