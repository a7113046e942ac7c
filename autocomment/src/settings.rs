//! Persisted settings: the TOML file behind `--config`.
//!
//! Every key is optional; missing keys fall back to the stock templates and
//! access defaults. Settings are converted into an engine [`TemplateConfig`]
//! once per pass.

use anyhow::{Context, Result};
use autocomment_engine::config::{self as defaults, AccessModifier, AccessModifiers};
use autocomment_engine::{Mode, TemplateConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = ".autocomment.toml";

/// Command run by the save hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunOnSaveCommand {
    All,
    #[default]
    Missing,
}

impl From<RunOnSaveCommand> for Mode {
    fn from(command: RunOnSaveCommand) -> Self {
        match command {
            RunOnSaveCommand::All => Mode::Regenerate,
            RunOnSaveCommand::Missing => Mode::FillMissing,
        }
    }
}

/// Line break written into generated comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Follow the first line break found in the file
    #[default]
    Auto,
    Lf,
    Crlf,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub run_on_save: bool,
    pub run_on_save_command: RunOnSaveCommand,
    pub line_ending: LineEnding,
    pub access: AccessSettings,
    pub templates: Templates,
}

/// Per-visibility switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessSettings {
    pub public: bool,
    pub internal: bool,
    pub protected: bool,
    pub protected_internal: bool,
    pub private: bool,
    pub private_protected: bool,
}

impl Default for AccessSettings {
    fn default() -> Self {
        Self {
            public: true,
            internal: true,
            protected: true,
            protected_internal: true,
            private: false,
            private_protected: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Templates {
    pub class: String,
    pub constructor: String,
    pub method: String,
    pub parameter: String,
    pub returns: String,
    pub get: String,
    pub get_set: String,
    pub get_init: String,
    pub set: String,
    pub init: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            class: defaults::DEFAULT_CLASS_TEMPLATE.to_string(),
            constructor: defaults::DEFAULT_CONSTRUCTOR_TEMPLATE.to_string(),
            method: defaults::DEFAULT_METHOD_TEMPLATE.to_string(),
            parameter: defaults::DEFAULT_PARAMETER_TEMPLATE.to_string(),
            returns: defaults::DEFAULT_RETURNS_TEMPLATE.to_string(),
            get: defaults::DEFAULT_GET_TEMPLATE.to_string(),
            get_set: defaults::DEFAULT_GET_SET_TEMPLATE.to_string(),
            get_init: defaults::DEFAULT_GET_INIT_TEMPLATE.to_string(),
            set: defaults::DEFAULT_SET_TEMPLATE.to_string(),
            init: defaults::DEFAULT_INIT_TEMPLATE.to_string(),
        }
    }
}

impl Templates {
    fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("class", self.class.as_str()),
            ("constructor", self.constructor.as_str()),
            ("method", self.method.as_str()),
            ("parameter", self.parameter.as_str()),
            ("returns", self.returns.as_str()),
            ("get", self.get.as_str()),
            ("get_set", self.get_set.as_str()),
            ("get_init", self.get_init.as_str()),
            ("set", self.set.as_str()),
            ("init", self.init.as_str()),
        ]
    }
}

impl Settings {
    /// Load settings from `path`, or from [`DEFAULT_SETTINGS_FILE`] in the
    /// working directory when present, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let candidate = Path::new(DEFAULT_SETTINGS_FILE);
                if candidate.is_file() {
                    Self::from_file(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse settings file: {}", path.display()))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, content)
            .with_context(|| format!("failed to write settings file: {}", path.display()))
    }

    /// Resolve into the engine's read-only template snapshot.
    pub fn template_config(&self) -> TemplateConfig {
        let t = &self.templates;
        TemplateConfig {
            class: t.class.clone(),
            constructor: t.constructor.clone(),
            method: t.method.clone(),
            parameter: t.parameter.clone(),
            returns: t.returns.clone(),
            get: t.get.clone(),
            get_set: t.get_set.clone(),
            get_init: t.get_init.clone(),
            set: t.set.clone(),
            init: t.init.clone(),
            enabled: self.enabled_modifiers(),
        }
    }

    fn enabled_modifiers(&self) -> AccessModifiers {
        let a = &self.access;
        AccessModifiers::empty()
            .with(AccessModifier::Public, a.public)
            .with(AccessModifier::Internal, a.internal)
            .with(AccessModifier::Protected, a.protected)
            .with(AccessModifier::ProtectedInternal, a.protected_internal)
            .with(AccessModifier::Private, a.private)
            .with(AccessModifier::PrivateProtected, a.private_protected)
    }

    /// Line break for generated text; `detected` is the file's own.
    pub fn line_break(&self, detected: &'static str) -> &'static str {
        match self.line_ending {
            LineEnding::Auto => detected,
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    /// Templates whose output lines would not be recognized as `///`
    /// comments on a later pass.
    pub fn template_warnings(&self) -> Vec<String> {
        self.templates
            .entries()
            .into_iter()
            .filter(|(_, template)| {
                template
                    .split("{nl}")
                    .any(|line| !line.trim_start().starts_with("///"))
            })
            .map(|(key, _)| {
                format!("template `{key}` emits lines not starting with `///`; they will not be detected as existing comments")
            })
            .collect()
    }
}
