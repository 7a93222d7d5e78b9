//! Open-mode strings (`"r"`, `"rb"`, `"w+"`, ...).

use crate::error::FsError;

const VALID_CHARS: &str = "rwxabt+";

/// Parsed open mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenMode {
    raw: String,
}

impl OpenMode {
    pub fn parse(mode: &str) -> Result<Self, FsError> {
        let invalid = |reason: &str| FsError::InvalidMode {
            mode: mode.to_string(),
            reason: reason.to_string(),
        };
        if let Some(c) = mode.chars().find(|c| !VALID_CHARS.contains(*c)) {
            return Err(invalid(&format!("unknown mode character {c:?}")));
        }
        let kinds = mode.chars().filter(|c| "rwxa".contains(*c)).count();
        if kinds != 1 {
            return Err(invalid("exactly one of r, w, x or a is required"));
        }
        if mode.contains('t') && mode.contains('b') {
            return Err(invalid("text and binary modes are exclusive"));
        }
        Ok(OpenMode {
            raw: mode.to_string(),
        })
    }

    /// Parses a mode for a binary open: text mode is rejected.
    pub fn parse_binary(mode: &str) -> Result<Self, FsError> {
        let parsed = Self::parse(mode)?;
        if parsed.text() {
            return Err(FsError::InvalidMode {
                mode: mode.to_string(),
                reason: "text mode not supported for binary open".to_string(),
            });
        }
        Ok(parsed)
    }

    pub fn reading(&self) -> bool {
        self.raw.contains('r') || self.raw.contains('+')
    }

    pub fn writing(&self) -> bool {
        self.raw.contains('w')
            || self.raw.contains('a')
            || self.raw.contains('x')
            || self.raw.contains('+')
    }

    pub fn text(&self) -> bool {
        self.raw.contains('t')
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for OpenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
