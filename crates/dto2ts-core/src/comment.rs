//! Documentation comment normalization

/// Fold a raw doc comment into one line of plain text.
///
/// Block markers and leading `*` gutters are removed, lines are joined with a
/// single space and everything from the first tag marker (`@`) on is dropped.
/// Returns `None` when nothing remains.
///
/// # Examples
///
/// ```
/// use dto2ts_core::comment::normalize_doc;
///
/// let raw = "/**\n * Order total.\n * In cents.\n * @since 2.0\n */";
/// assert_eq!(normalize_doc(raw).as_deref(), Some("Order total. In cents."));
/// assert_eq!(normalize_doc("/** */"), None);
/// ```
pub fn normalize_doc(raw: &str) -> Option<String> {
    let stripped = raw.trim().replace("/**", "").replace("*/", "");
    let folded = stripped
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('*').unwrap_or(line).trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let text = match folded.find('@') {
        Some(idx) => &folded[..idx],
        None => folded.as_str(),
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Doc block placed above an exported declaration
pub fn class_comment_block(text: &str) -> String {
    format!("/**\n * {text}\n */\n")
}

/// Doc block placed above a field inside an interface body
pub fn field_comment_block(text: &str) -> String {
    format!("  /**\n   * {text}\n   */\n")
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn normalize_doc___single_line_block___returns_text() {
        assert_eq!(normalize_doc("/** Item SKU */").as_deref(), Some("Item SKU"));
    }

    #[test]
    fn normalize_doc___multi_line___folds_to_one_line() {
        let raw = "/**\n     * First line\n     *   second line\n     */";

        assert_eq!(
            normalize_doc(raw).as_deref(),
            Some("First line second line")
        );
    }

    #[test]
    fn normalize_doc___tag_on_first_line___leaves_nothing() {
        assert_eq!(normalize_doc("/** @deprecated */"), None);
    }

    #[test]
    fn normalize_doc___plain_text___is_trimmed() {
        assert_eq!(normalize_doc("  already clean  ").as_deref(), Some("already clean"));
    }

    #[test]
    fn normalize_doc___tag_mid_sentence___truncates() {
        assert_eq!(
            normalize_doc("Contact ops@acme for access").as_deref(),
            Some("Contact ops")
        );
    }

    #[test]
    fn class_comment_block___wraps_text() {
        assert_eq!(class_comment_block("Order"), "/**\n * Order\n */\n");
    }

    #[test]
    fn field_comment_block___indents_two_spaces() {
        assert_eq!(field_comment_block("SKU"), "  /**\n   * SKU\n   */\n");
    }
}
