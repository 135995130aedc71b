//! # Source Positions
//!
//! Every typeable node records where it came from so that schema build
//! errors and type-check violations can point the author at the offending
//! line. Positions produced by the `serde_yaml` adapter know their file but
//! not their line; unknown parts render as `?`.

use std::fmt;

use serde::Serialize;

/// Location of a node in its source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// Source file name, if known.
    pub file: Option<String>,
    /// 1-based line number, if known.
    pub line: Option<usize>,
}

impl Position {
    /// A position with neither file nor line.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// A position at `line` in `file`.
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
        }
    }

    /// A position in `file` whose line is not known.
    pub fn in_file(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            line: None,
        }
    }

    /// Whether either the file or the line is known.
    pub fn is_known(&self) -> bool {
        self.file.is_some() || self.line.is_some()
    }

    /// Short `file:line` form used in messages.
    ///
    /// Unknown parts are rendered as `?`; a fully unknown position is `?`.
    pub fn as_compact_string(&self) -> String {
        match (&self.file, self.line) {
            (None, None) => "?".to_string(),
            (Some(file), Some(line)) => format!("{file}:{line}"),
            (Some(file), None) => format!("{file}:?"),
            (None, Some(line)) => format!("?:{line}"),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_compact_string())
    }
}
