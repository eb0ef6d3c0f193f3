//! dto2ts.toml settings file

use anyhow::{Context, Result};
use dto2ts_core::{GeneratorConfig, LogLevel};
use dto2ts_runtime::PoolConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_NAME: &str = "dto2ts.toml";

const HEADER: &str = "\
# dto2ts settings
#
# Every key is optional; removed keys fall back to the values shown here.
# log_level: error, warn, info, debug or trace (a valid RUST_LOG overrides it)
";

const SECTION_NOTES: &[(&str, &str)] = &[
    (
        "[generator]",
        "# How classes are walked and rendered.\n\
         # camelCase keys from the IDE plugin settings are accepted as aliases.\n\
         # use_transaction_code_prefix renames the data classes of a coded\n\
         # `generate --method` target, e.g. RET-B-QRYSTATEMENTS -> QRYSTATEMENTSReq.\n",
    ),
    (
        "[pool]",
        "# Worker pool for multi-root generation.\n\
         # worker_threads defaults to the available parallelism (at least 4).\n\
         # Jobs beyond workers + queue_capacity run on the submitting thread.\n",
    ),
];

/// Settings file structure; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    pub generator: GeneratorConfig,

    pub pool: PoolConfig,
}

impl Settings {
    /// Load settings from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse settings from string
    pub fn from_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).context("Failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `path` when given, otherwise fall back to the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.log_level()?;

        if self.pool.worker_threads == Some(0) {
            anyhow::bail!("pool.worker_threads must be at least 1");
        }

        if self.pool.queue_capacity > PoolConfig::MAX_QUEUE_CAPACITY {
            anyhow::bail!(
                "pool.queue_capacity must be at most {}",
                PoolConfig::MAX_QUEUE_CAPACITY
            );
        }

        let suffixes = self
            .generator
            .request_dto_suffixes
            .iter()
            .chain(&self.generator.response_dto_suffixes);
        for suffix in suffixes {
            if suffix.trim().is_empty() {
                anyhow::bail!("DTO suffixes cannot be blank");
            }
        }

        let generator = &self.generator;
        if generator.use_transaction_code_prefix
            && (generator.transaction_request_suffix.trim().is_empty()
                || generator.transaction_response_suffix.trim().is_empty())
        {
            anyhow::bail!("transaction suffixes cannot be blank");
        }

        Ok(())
    }

    /// Parsed `log_level`, if set
    pub fn log_level(&self) -> Result<Option<LogLevel>> {
        self.log_level
            .as_deref()
            .map(|level| level.parse::<LogLevel>())
            .transpose()
            .context("Invalid log_level")
    }

    /// Defaults as written by `init-config`
    pub fn template() -> Self {
        Self {
            log_level: Some("warn".to_string()),
            ..Self::default()
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings")
    }

    /// [`Settings::to_toml`] with a file header and a note above each section
    pub fn to_commented_toml(&self) -> Result<String> {
        let body = self.to_toml()?;
        let mut text = String::with_capacity(body.len() + 512);
        text.push_str(HEADER);
        text.push('\n');

        for line in body.lines() {
            if let Some((_, note)) = SECTION_NOTES.iter().find(|(header, _)| *header == line) {
                text.push_str(note);
            }
            text.push_str(line);
            text.push('\n');
        }
        Ok(text)
    }
}

/// init-config command implementation
pub fn init(output: Option<PathBuf>, force: bool) -> Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME));

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }

    std::fs::write(&path, Settings::template().to_commented_toml()?)
        .with_context(|| format!("Failed to write {:?}", path))?;

    println!("✓ Wrote {}", path.display());
    Ok(())
}
