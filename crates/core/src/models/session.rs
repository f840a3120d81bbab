use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SlotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionKind {
    Yoga,
    Meditation,
    Diet,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Yoga => "YOGA",
            SessionKind::Meditation => "MEDITATION",
            SessionKind::Diet => "DIET",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionKind {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "YOGA" => Ok(SessionKind::Yoga),
            "MEDITATION" => Ok(SessionKind::Meditation),
            "DIET" => Ok(SessionKind::Diet),
            _ => Err(SlotError::Validation(format!(
                "Session kind must be YOGA, MEDITATION, or DIET, got {:?}",
                s
            ))),
        }
    }
}
