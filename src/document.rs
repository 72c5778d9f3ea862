//! Read-only view of the host editor's active document.
//!
//! The host owns the document; the classifier only needs the cursor, a few
//! lines of text and the language tag for the duration of one command.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SmartJumpError;
use crate::language::Language;

/// Zero-based cursor position inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl CursorPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// What the classifier reads from the host for one invocation.
pub trait DocumentView {
    /// Language tag of the document's mode
    fn language(&self) -> Language;

    /// Current cursor position
    fn cursor(&self) -> CursorPosition;

    /// Text of a zero-based line without its line terminator, if the line exists
    fn line(&self, index: usize) -> Option<&str>;
}

/// In-memory document, used by the CLI and by hosts that hand over a snapshot.
#[derive(Debug, Clone)]
pub struct Buffer {
    lines: Vec<String>,
    language: Language,
    cursor: CursorPosition,
}

impl Buffer {
    /// Create a buffer from text with the cursor at the start
    pub fn new(language: Language, text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            language,
            cursor: CursorPosition::default(),
        }
    }

    /// Load a buffer from disk, resolving the language from the file extension
    pub fn open(path: &Path) -> Result<Self, SmartJumpError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SmartJumpError::DocumentReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::new(Language::from_path(path), &content))
    }

    pub fn with_cursor(mut self, cursor: CursorPosition) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn set_cursor(&mut self, cursor: CursorPosition) {
        self.cursor = cursor;
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl DocumentView for Buffer {
    fn language(&self) -> Language {
        self.language
    }

    fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }
}
