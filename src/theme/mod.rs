//! Theme module - colour mode selection and design tokens

mod tokens;

pub use tokens::{ThemeTokens, DARK_COLORS, DARK_SHADOWS, LIGHT_COLORS, LIGHT_SHADOWS};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Light or dark colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    /// Read the mode from a raw `Cookie` header
    pub fn from_cookie_header(header: Option<&str>, cookie_name: &str) -> Option<Self> {
        header?
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == cookie_name)
            .and_then(|(_, value)| value.trim_matches('"').parse().ok())
    }

    pub fn tokens(self) -> ThemeTokens {
        ThemeTokens::for_mode(self)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColorMode::Light => f.write_str("light"),
            ColorMode::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            other => anyhow::bail!("Unknown color mode: {}. Available: light, dark", other),
        }
    }
}
