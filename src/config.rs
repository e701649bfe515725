//! Configuration loaded from `resume.toml`.
//!
//! Every field has a default, so a missing file or a partial one is fine.
//! `RESUME_DATA_DIR` overrides the data directory from the file; CLI flags
//! override both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::render::TemplateId;

pub const CONFIG_FILE: &str = "resume.toml";
pub const DATA_DIR_ENV: &str = "RESUME_DATA_DIR";

/// Top-level configuration loaded from `resume.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeConfig {
    /// Directory holding the stored resume, one file per key.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Template used when none is chosen or stored.
    #[serde(default)]
    pub default_template: TemplateId,

    /// How long the scripted enhancement pretends to think.
    #[serde(default = "default_enhance_delay_ms")]
    pub enhance_delay_ms: u64,

    /// Render scale recorded in the exported PDF.
    #[serde(default = "default_pdf_scale")]
    pub pdf_scale: f32,

    /// Page margin on every side, in inches.
    #[serde(default = "default_pdf_margin_in")]
    pub pdf_margin_in: f32,

    /// Program (and arguments) receiving the text rendition on stdin.
    #[serde(default = "default_print_command")]
    pub print_command: String,

    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default data directory: <local data dir>/resume-builder, or ./.resume without one.
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("resume-builder"))
        .unwrap_or_else(|| PathBuf::from(".resume"))
}

// Default enhancement delay: 2000ms.
fn default_enhance_delay_ms() -> u64 {
    2000
}

// Default PDF render scale: 2.
fn default_pdf_scale() -> f32 {
    2.0
}

// Default PDF margin: half an inch.
fn default_pdf_margin_in() -> f32 {
    0.5
}

// Default print command: "lp".
fn default_print_command() -> String {
    "lp".to_string()
}

// Default log level: "warn".
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_template: TemplateId::default(),
            enhance_delay_ms: default_enhance_delay_ms(),
            pdf_scale: default_pdf_scale(),
            pdf_margin_in: default_pdf_margin_in(),
            print_command: default_print_command(),
            log_level: default_log_level(),
        }
    }
}

impl ResumeConfig {
    /// Loads `resume.toml` from the current directory.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Loads the given file, using defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<ResumeConfig>(&contents)
                .with_context(|| format!("invalid config in {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(dir) = std::env::var(DATA_DIR_ENV)
            && !dir.is_empty()
        {
            config.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = ResumeConfig::default();
        assert_eq!(config.default_template, TemplateId::Modern);
        assert_eq!(config.enhance_delay_ms, 2000);
        assert_eq!(config.pdf_scale, 2.0);
        assert_eq!(config.pdf_margin_in, 0.5);
        assert_eq!(config.print_command, "lp");
        assert_eq!(config.log_level, "warn");
        assert!(!config.data_dir.as_os_str().is_empty());
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            default_template = "tech"
            enhance_delay_ms = 10
            print_command = "lpr -P office"
        "#;
        let config: ResumeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_template, TemplateId::Tech);
        assert_eq!(config.enhance_delay_ms, 10);
        assert_eq!(config.print_command, "lpr -P office");
        assert_eq!(config.pdf_scale, 2.0);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn unknown_template_is_rejected() {
        let result = toml::from_str::<ResumeConfig>(r#"default_template = "fancy""#);
        assert!(result.is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "pdf_margin_in = 1.0\nlog_level = \"debug\"\n").unwrap();

        let config = ResumeConfig::load_from(&path).unwrap();
        assert_eq!(config.pdf_margin_in, 1.0);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ResumeConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.enhance_delay_ms, 2000);
    }
}
