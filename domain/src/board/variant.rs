//! Board variant value object

use serde::{Deserialize, Serialize};

/// Which flavour of board is running.
///
/// - `Open`: anyone types a name and asks; no edit or delete
/// - `Authenticated`: sign in with a magic code; the email is the asker
///   identity and authors can edit or delete their own questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoardVariant {
    #[default]
    Open,
    Authenticated,
}

impl BoardVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardVariant::Open => "open",
            BoardVariant::Authenticated => "authenticated",
        }
    }

    /// Whether questions carry a `creatorId` and may be edited/deleted
    pub fn tracks_ownership(&self) -> bool {
        matches!(self, BoardVariant::Authenticated)
    }
}

impl std::fmt::Display for BoardVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BoardVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(BoardVariant::Open),
            "authenticated" | "auth" => Ok(BoardVariant::Authenticated),
            other => Err(format!("unknown board variant: {}", other)),
        }
    }
}
