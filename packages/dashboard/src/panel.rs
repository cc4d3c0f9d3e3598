//! Renderer output that may be replaced by a message.

use serde::Serialize;

/// Output of a renderer: either the artifact or a user-visible message.
///
/// A warning means the renderer declined to draw (the view was empty); a
/// notice is the milder placeholder used by the optional raw table and the
/// debug sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "camelCase")]
pub enum Panel<T> {
    /// The rendered artifact.
    Rendered(T),
    /// A warning shown in place of the artifact.
    Warning(String),
    /// An informational notice shown in place of the artifact.
    Notice(String),
}

impl<T> Panel<T> {
    /// The artifact, if one was rendered.
    #[must_use]
    pub const fn artifact(&self) -> Option<&T> {
        match self {
            Self::Rendered(artifact) => Some(artifact),
            Self::Warning(_) | Self::Notice(_) => None,
        }
    }

    /// The placeholder message, if no artifact was rendered.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Rendered(_) => None,
            Self::Warning(message) | Self::Notice(message) => Some(message),
        }
    }

    /// Whether this panel is a warning.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }
}
