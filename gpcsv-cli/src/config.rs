//! Settings shared by the subcommands: the optional TOML config file and plural rule selection.

use std::{fs, path::Path};

use clap::Args;
use gpcsv::{CodecOptions, LocalePluralRule, SchemaMode};
use serde::Deserialize;
use tracing::debug;

/// Values read from `--config`. Command-line flags win over every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub mode: Option<SchemaMode>,
    pub project: Option<String>,
    pub locale: Option<String>,
}

impl CliConfig {
    /// Loads the config file, or returns empty settings when no path was given.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;

        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Codec options after applying command-line overrides.
    pub fn codec_options(&self, mode: Option<SchemaMode>, project: Option<String>) -> CodecOptions {
        CodecOptions::new()
            .with_mode(mode.or(self.mode).unwrap_or_default())
            .with_project(project.or_else(|| self.project.clone()))
    }
}

/// How the target locale's plural rule is chosen.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Target locale code, e.g. `de`, `pt_BR` or `sr-Latn`
    #[arg(short, long, conflicts_with_all = ["nplurals", "plural_expression"])]
    pub locale: Option<String>,

    /// Number of plural forms, for locales not known to gpcsv
    #[arg(long, requires = "plural_expression")]
    pub nplurals: Option<usize>,

    /// Gettext plural expression in `n`, used together with --nplurals
    #[arg(long, requires = "nplurals")]
    pub plural_expression: Option<String>,
}

impl RuleArgs {
    /// Resolves the plural rule from the flags, falling back to the config's locale.
    pub fn resolve(&self, config: &CliConfig) -> Result<LocalePluralRule, String> {
        if let (Some(count), Some(expression)) = (self.nplurals, &self.plural_expression) {
            return LocalePluralRule::new(count, expression).map_err(|e| e.to_string());
        }

        let locale = self
            .locale
            .as_deref()
            .or(config.locale.as_deref())
            .ok_or_else(|| {
                "A target locale is required: pass --locale or --nplurals with --plural-expression"
                    .to_string()
            })?;

        debug!("using plural rule of locale {}", locale);
        LocalePluralRule::for_locale(locale).map_err(|e| e.to_string())
    }
}
