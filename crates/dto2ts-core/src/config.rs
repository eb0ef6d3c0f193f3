//! Generator configuration snapshot

use serde::{Deserialize, Serialize};

/// Options consulted while expanding classes and assembling the document.
///
/// Every field has a serde default, so a partial JSON or TOML document (or an
/// empty one) yields a usable configuration. The camelCase spellings used by
/// IDE settings files are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Only emit fields declared on the class itself
    #[serde(default, alias = "ignoreParentFields")]
    pub ignore_parent_fields: bool,

    /// Skip a field literally named `serialVersionUID`
    #[serde(default = "default_true", alias = "ignoreSerialVersionUidField")]
    pub ignore_serial_version_uid_field: bool,

    /// Render `java.util.Date` as `string` instead of `any`
    #[serde(default, alias = "coerceDateToString")]
    pub coerce_date_to_string: bool,

    /// Prefer the `@JsonProperty` value over the raw field name
    #[serde(default = "default_true", alias = "preferJsonPropertyAnnotationName")]
    pub prefer_json_property_annotation_name: bool,

    /// Use `?: ` for every field that carries no not-null marker
    #[serde(default, alias = "addOptionalMarkToAllFields")]
    pub add_optional_mark_to_all_fields: bool,

    /// Retry class lookups in library scope after project scope fails
    #[serde(default = "default_true", alias = "allowResolutionOutsideProjectScope")]
    pub allow_resolution_outside_project_scope: bool,

    /// Simple-name suffixes marking request-side data classes
    #[serde(default = "default_request_suffixes", alias = "requestDtoSuffixes")]
    pub request_dto_suffixes: Vec<String>,

    /// Simple-name suffixes marking response-side data classes
    #[serde(default = "default_response_suffixes", alias = "responseDtoSuffixes")]
    pub response_dto_suffixes: Vec<String>,

    /// Render generic references with their actual arguments (`Page<Item>`)
    /// rather than the declared type parameters (`Page<T>`)
    #[serde(default, alias = "renderGenericArguments")]
    pub render_generic_arguments: bool,

    /// Rename classes used by a coded endpoint method after its transaction
    /// code, e.g. `QRYSTATEMENTSReq`
    #[serde(default, alias = "useTransactionCodePrefix")]
    pub use_transaction_code_prefix: bool,

    /// Leave generic containers and header classes out of the renaming
    #[serde(default, alias = "onlyProcessGenericDto")]
    pub only_process_generic_dto: bool,

    /// Appended to the transaction code for request-side classes
    #[serde(default = "default_transaction_request_suffix", alias = "requestSuffix")]
    pub transaction_request_suffix: String,

    /// Appended to the transaction code for response-side classes
    #[serde(default = "default_transaction_response_suffix", alias = "responseSuffix")]
    pub transaction_response_suffix: String,
}

fn default_true() -> bool {
    true
}

fn default_transaction_request_suffix() -> String {
    "Req".to_string()
}

fn default_transaction_response_suffix() -> String {
    "Resp".to_string()
}

fn default_request_suffixes() -> Vec<String> {
    [
        "DTO", "Dto", "Request", "Req", "Rq", "Tranrq", "Qry", "Query", "Model", "Entity", "Data",
        "Bean", "VO", "Vo",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_response_suffixes() -> Vec<String> {
    [
        "Response", "Resp", "Rs", "Tranrs", "Result", "Results", "Detail", "Info",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            ignore_parent_fields: false,
            ignore_serial_version_uid_field: true,
            coerce_date_to_string: false,
            prefer_json_property_annotation_name: true,
            add_optional_mark_to_all_fields: false,
            allow_resolution_outside_project_scope: true,
            request_dto_suffixes: default_request_suffixes(),
            response_dto_suffixes: default_response_suffixes(),
            render_generic_arguments: false,
            use_transaction_code_prefix: false,
            only_process_generic_dto: false,
            transaction_request_suffix: default_transaction_request_suffix(),
            transaction_response_suffix: default_transaction_response_suffix(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Create configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Set whether inherited fields are skipped
    pub fn with_ignore_parent_fields(mut self, ignore: bool) -> Self {
        self.ignore_parent_fields = ignore;
        self
    }

    /// Set whether `serialVersionUID` is skipped
    pub fn with_ignore_serial_version_uid_field(mut self, ignore: bool) -> Self {
        self.ignore_serial_version_uid_field = ignore;
        self
    }

    /// Set whether `java.util.Date` renders as `string`
    pub fn with_coerce_date_to_string(mut self, coerce: bool) -> Self {
        self.coerce_date_to_string = coerce;
        self
    }

    /// Set whether `@JsonProperty` names win over field names
    pub fn with_prefer_json_property_annotation_name(mut self, prefer: bool) -> Self {
        self.prefer_json_property_annotation_name = prefer;
        self
    }

    /// Set whether every unmarked field renders as optional
    pub fn with_add_optional_mark_to_all_fields(mut self, optional: bool) -> Self {
        self.add_optional_mark_to_all_fields = optional;
        self
    }

    /// Set whether resolution may fall back to library scope
    pub fn with_allow_resolution_outside_project_scope(mut self, allow: bool) -> Self {
        self.allow_resolution_outside_project_scope = allow;
        self
    }

    /// Replace the request suffix list
    pub fn with_request_dto_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request_dto_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the response suffix list
    pub fn with_response_dto_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.response_dto_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether generic references render their actual arguments
    pub fn with_render_generic_arguments(mut self, render: bool) -> Self {
        self.render_generic_arguments = render;
        self
    }

    /// Set whether coded endpoint methods rename the classes they use
    pub fn with_use_transaction_code_prefix(mut self, enabled: bool) -> Self {
        self.use_transaction_code_prefix = enabled;
        self
    }

    /// Set whether generic containers keep their own names
    pub fn with_only_process_generic_dto(mut self, only: bool) -> Self {
        self.only_process_generic_dto = only;
        self
    }

    /// Set the request and response suffixes used with a transaction code
    pub fn with_transaction_suffixes(
        mut self,
        request: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.transaction_request_suffix = request.into();
        self.transaction_response_suffix = response.into();
        self
    }

    /// True when `simple_name` ends with a configured request suffix
    pub fn is_request_name(&self, simple_name: &str) -> bool {
        ends_with_any(simple_name, &self.request_dto_suffixes)
    }

    /// True when `simple_name` ends with a configured response suffix
    pub fn is_response_name(&self, simple_name: &str) -> bool {
        ends_with_any(simple_name, &self.response_dto_suffixes)
    }
}

fn ends_with_any(name: &str, suffixes: &[String]) -> bool {
    suffixes
        .iter()
        .any(|suffix| !suffix.is_empty() && name.ends_with(suffix.as_str()))
}
