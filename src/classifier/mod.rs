//! Context classifier: is the cursor on a definition?
//!
//! Classification is a pure function of the cursor line, the language tag and,
//! for C/C++ only, a few following lines. It never fails: anything that does
//! not match a rule (including every unrecognized language) is "not a
//! definition", so the worst outcome of a miss is an ordinary go-to-definition.
//!
//! ## Usage
//!
//! ```
//! use smart_jump::classifier::Classifier;
//! use smart_jump::document::Buffer;
//! use smart_jump::language::Language;
//!
//! let classifier = Classifier::default();
//! let buffer = Buffer::new(Language::Python, "def handle(self):\n    pass\n");
//! assert!(classifier.is_at_definition(&buffer));
//! ```

pub mod rules;


use serde::Serialize;
use std::sync::LazyLock;

pub use rules::{DEFAULT_C_BLOCK_WINDOW, DefinitionRule, RuleTable, SymbolKind};

use crate::config::ClassifierConfig;
use crate::document::DocumentView;
use crate::language::Language;

static DEFAULT_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(Classifier::default);

/// Which rule recognized the cursor line as a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefinitionMatch {
    pub language: Language,
    pub kind: SymbolKind,
    /// Zero-based line of the cursor
    pub line: usize,
}

/// Evaluates a [`RuleTable`] against the host's active document.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleTable,
}

impl Classifier {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Built-in rules with a custom C/C++ block lookahead
    pub fn with_block_window(c_block_window: usize) -> Self {
        Self::new(RuleTable::builtin(c_block_window))
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::with_block_window(config.c_block_window)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Mutable access for adding rules at runtime
    pub fn rules_mut(&mut self) -> &mut RuleTable {
        &mut self.rules
    }

    /// Classify the cursor line, returning the first rule that fired
    pub fn classify(&self, document: &dyn DocumentView) -> Option<DefinitionMatch> {
        let language = document.language();
        let row = document.cursor().line;

        self.rules
            .rules_for(language)
            .iter()
            .find(|rule| rule.matches(document, row))
            .map(|rule| DefinitionMatch {
                language,
                kind: rule.kind(),
                line: row,
            })
    }

    pub fn is_at_definition(&self, document: &dyn DocumentView) -> bool {
        self.classify(document).is_some()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::with_block_window(DEFAULT_C_BLOCK_WINDOW)
    }
}

/// Classify with the built-in rules and default settings
pub fn is_at_definition(document: &dyn DocumentView) -> bool {
    DEFAULT_CLASSIFIER.is_at_definition(document)
}
