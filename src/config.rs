use std::path::PathBuf;

use anyhow::Result;
use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::default_colors::*;

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "CATALOG_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub bold:   bool,
    pub italic: bool,
    pub color:  crossterm::style::Color,
}

impl StyleConfig {
    fn style(&self, s: impl ToString) -> String {
        let mut s = s.to_string().with(self.color);
        if self.bold {
            s = s.bold();
        }
        if self.italic {
            s = s.italic();
        }
        s.to_string()
    }
}

pub trait Styleable {
    fn style(&self, c: &StyleConfig) -> String;
}

impl<T> Styleable for T
where
    T: ToString + std::fmt::Display,
{
    fn style(&self, c: &StyleConfig) -> String {
        c.style(self)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color:  COLOR_WHITE,
            bold:   false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub display_uuid:      bool,
    pub prefix:            String,
    pub suffix:            String,
    pub description:       String,
    pub style_prefix:      StyleConfig,
    pub style_suffix:      StyleConfig,
    pub style_description: StyleConfig,
    pub style_content:     StyleConfig,
}

impl OutputConfig {
    pub fn format_str(&self, content: impl ToString) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        let content = content.to_string().style(&self.style_content);
        if self.description.is_empty() {
            format!("{prefix}{content}{suffix}")
        } else {
            let description = self.description.style(&self.style_description);
            format!("{prefix}{description} {content}{suffix}")
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            display_uuid:      false,
            prefix:            "[".into(),
            suffix:            "]".into(),
            description:       "".into(),
            style_prefix:      StyleConfig::default(),
            style_suffix:      StyleConfig::default(),
            style_description: StyleConfig {
                italic: true,
                ..StyleConfig::default()
            },
            style_content:     StyleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database_location: PathBuf,
    pub output_author:     OutputConfig,
    pub output_lifespan:   OutputConfig,
    pub output_uuid:       OutputConfig,
    pub output_error:      OutputConfig,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    pub fn read_config() -> Result<Self> {
        Self::figment().extract().map_err(Into::into)
    }

    /// Defaults, then `config.toml`, then `CATALOG_*` variables
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Database location with a leading `~` expanded
    pub fn database_path(&self) -> PathBuf {
        shellexpand::path::tilde(&self.database_location).into_owned()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_location: PathBuf::from("~/.local/share/catalog/database"),
            output_author:     OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_AUTHOR,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_lifespan:   OutputConfig {
                prefix: "(".into(),
                suffix: ")".into(),
                style_content: StyleConfig {
                    color: COLOR_LIFESPAN,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_uuid:       OutputConfig {
                prefix: "(".into(),
                suffix: ")".into(),
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_error:      OutputConfig {
                description: "Error".into(),
                style_content: StyleConfig {
                    color: COLOR_ERROR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
        }
    }
}
