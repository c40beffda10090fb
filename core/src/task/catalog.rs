//! Closed enumerations a task's symbolic parameters are resolved against.

use std::fmt;

use crate::error::TaskError;

/// Supported model tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelKey {
    Gemini3Pro,
    #[default]
    GeminiFlash,
}

impl ModelKey {
    pub const ALL: [ModelKey; 2] = [ModelKey::Gemini3Pro, ModelKey::GeminiFlash];

    pub fn key(self) -> &'static str {
        match self {
            Self::Gemini3Pro => "gemini-3-pro",
            Self::GeminiFlash => "gemini-flash",
        }
    }

    /// Provider model identifier sent to the collaborator.
    pub fn model_id(self) -> &'static str {
        match self {
            Self::Gemini3Pro => "google/gemini-3-pro-image",
            Self::GeminiFlash => "google/gemini-2.5-flash-image",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    /// Comma-separated list of every accepted key, for error messages.
    pub fn supported_keys() -> String {
        Self::ALL
            .iter()
            .map(|m| m.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Resolves a model key; unknown keys are never substituted.
pub fn resolve_model(raw: &str) -> Result<ModelKey, TaskError> {
    ModelKey::parse(raw).ok_or_else(|| TaskError::UnsupportedModel {
        key: raw.trim().to_string(),
        supported: ModelKey::supported_keys(),
    })
}

pub const DEFAULT_ASPECT_KEY: &str = "square";
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";

const ASPECT_RATIOS: &[(&str, &str)] = &[
    ("square", "1:1"),
    ("portrait", "9:16"),
    ("landscape", "16:9"),
    ("wide", "21:9"),
    ("4:3", "4:3"),
    ("3:4", "3:4"),
    ("3:2", "3:2"),
    ("2:3", "2:3"),
    ("5:4", "5:4"),
    ("4:5", "4:5"),
    ("16:9", "16:9"),
    ("9:16", "9:16"),
    ("21:9", "21:9"),
];

/// Canonical ratio string for a symbolic name or raw ratio.
pub fn lookup_aspect_ratio(raw: &str) -> Option<&'static str> {
    let key = raw.trim().to_ascii_lowercase();
    ASPECT_RATIOS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, ratio)| *ratio)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    OneK,
    #[default]
    TwoK,
    FourK,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::OneK, Resolution::TwoK, Resolution::FourK];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneK => "1K",
            Self::TwoK => "2K",
            Self::FourK => "4K",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let tier = raw.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|r| r.as_str() == tier)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
