//! Shared artifact types and aliases.

use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// ---------------------------------------------------------------------------
// Artifact language
// ---------------------------------------------------------------------------

/// Declared language string values (as stored by the artifact service).
pub const LANGUAGE_JSX: &str = "jsx";
pub const LANGUAGE_TSX: &str = "tsx";
pub const LANGUAGE_HTML: &str = "html";
pub const LANGUAGE_VUE: &str = "vue";
pub const LANGUAGE_SVELTE: &str = "svelte";

/// All valid declared language strings.
pub const VALID_LANGUAGES: &[&str] = &[
    LANGUAGE_JSX,
    LANGUAGE_TSX,
    LANGUAGE_HTML,
    LANGUAGE_VUE,
    LANGUAGE_SVELTE,
];

/// The language an artifact declares itself to be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactLanguage {
    Jsx,
    Tsx,
    Html,
    Vue,
    Svelte,
}

impl ArtifactLanguage {
    /// Convert from the stored string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            LANGUAGE_JSX => Ok(Self::Jsx),
            LANGUAGE_TSX => Ok(Self::Tsx),
            LANGUAGE_HTML => Ok(Self::Html),
            LANGUAGE_VUE => Ok(Self::Vue),
            LANGUAGE_SVELTE => Ok(Self::Svelte),
            _ => Err(format!(
                "Invalid artifact language '{s}'. Must be one of: {}",
                VALID_LANGUAGES.join(", ")
            )),
        }
    }

    /// Convert to the stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jsx => LANGUAGE_JSX,
            Self::Tsx => LANGUAGE_TSX,
            Self::Html => LANGUAGE_HTML,
            Self::Vue => LANGUAGE_VUE,
            Self::Svelte => LANGUAGE_SVELTE,
        }
    }

    /// Whether this is the typed JavaScript variant.
    pub fn is_typescript(&self) -> bool {
        matches!(self, Self::Tsx)
    }
}

// ---------------------------------------------------------------------------
// Artifact kind
// ---------------------------------------------------------------------------

/// The framework family an artifact belongs to, as detected by the
/// analyzer.  Distinct from [`ArtifactLanguage`]: a `jsx` artifact may
/// still turn out to be plain HTML-in-a-string, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    React,
    Html,
    Vue,
    Svelte,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Html => "html",
            Self::Vue => "vue",
            Self::Svelte => "svelte",
        }
    }
}

// ---------------------------------------------------------------------------
// Artifact
// ---------------------------------------------------------------------------

/// A single-file UI component submitted for deployment.
///
/// Created externally (by the conversation service); read-only to the
/// pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// External identifier assigned by the artifact store.
    pub id: String,
    /// Human-readable title, used as the component-name fallback.
    pub title: String,
    /// Raw source text.
    pub code: String,
    /// Declared language.
    pub language: ArtifactLanguage,
    /// Owning conversation, if any.
    pub conversation_id: Option<String>,
    /// Owning project, if any.
    pub project_id: Option<String>,
    /// Monotonic artifact version.
    pub version: u32,
    /// When the artifact was created (UTC).
    pub created_at: Timestamp,
}
