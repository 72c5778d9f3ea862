//! Per-language definition rules.
//!
//! Each rule is a line-anchored prefix regex with optional extra conditions.
//! The built-in table covers Go, Python, JavaScript/TypeScript, C/C++, Rust and
//! Lisp; adding a language means adding entries here, not touching dispatch.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::document::DocumentView;
use crate::error::SmartJumpError;
use crate::language::Language;

/// Lines after the signature searched for `{` by the C/C++ rule
pub const DEFAULT_C_BLOCK_WINDOW: usize = 2;

/// Words that make a C/C++ `name(...)` line a statement rather than a signature
const C_STATEMENT_KEYWORDS: &[&str] = &[
    "if", "else", "while", "for", "do", "switch", "case", "return", "goto", "sizeof", "alignof",
    "typeof", "decltype", "catch", "throw", "new", "delete", "defined",
];

/// Kind of symbol a rule recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Macro,
    Class,
    Struct,
    Interface,
    Trait,
    Enum,
    TypeAlias,
    Variable,
    Constant,
}

impl SymbolKind {
    /// Get a human-readable display name for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Macro => "macro",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Trait => "trait",
            Self::Enum => "enum",
            Self::TypeAlias => "type alias",
            Self::Variable => "variable",
            Self::Constant => "constant",
        }
    }
}

/// A single definition-line heuristic
#[derive(Debug, Clone)]
pub struct DefinitionRule {
    kind: SymbolKind,
    pattern: Regex,
    /// Line must not end with this character
    terminator: Option<char>,
    /// `{` must appear on the line or within this many following lines
    block_window: Option<usize>,
    /// Matched prefix must not contain any of these words
    excluded_words: Vec<String>,
}

impl DefinitionRule {
    /// Compile a rule from a regex that should be anchored at line start
    pub fn new(kind: SymbolKind, pattern: &str) -> Result<Self, SmartJumpError> {
        let compiled = Regex::new(pattern).map_err(|e| SmartJumpError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            kind,
            pattern: compiled,
            terminator: None,
            block_window: None,
            excluded_words: Vec::new(),
        })
    }

    pub fn rejecting_terminator(mut self, terminator: char) -> Self {
        self.terminator = Some(terminator);
        self
    }

    pub fn requiring_block_within(mut self, lines: usize) -> Self {
        self.block_window = Some(lines);
        self
    }

    pub fn excluding_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_words
            .extend(words.into_iter().map(Into::into));
        self
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn terminator(&self) -> Option<char> {
        self.terminator
    }

    pub fn block_window(&self) -> Option<usize> {
        self.block_window
    }

    /// Check whether line `row` of the document is a definition under this rule
    pub fn matches(&self, document: &dyn DocumentView, row: usize) -> bool {
        let Some(line) = document.line(row) else {
            return false;
        };
        let Some(found) = self.pattern.find(line) else {
            return false;
        };

        if let Some(terminator) = self.terminator
            && line.trim_end().ends_with(terminator)
        {
            return false;
        }

        if !self.excluded_words.is_empty()
            && found
                .as_str()
                .split(|c: char| !(c.is_alphanumeric() || c == '_'))
                .any(|word| self.excluded_words.iter().any(|excluded| excluded == word))
        {
            return false;
        }

        match self.block_window {
            Some(window) => (row..=row.saturating_add(window))
                .map_while(|r| document.line(r))
                .any(|text| text.contains('{')),
            None => true,
        }
    }
}

/// Ordered definition rules keyed by language
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<Language, Vec<DefinitionRule>>,
}

impl RuleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rules, with the given C/C++ block lookahead
    pub fn builtin(c_block_window: usize) -> Self {
        let mut table = Self::new();
        for language in Language::SUPPORTED {
            for rule in builtin_rules(language, c_block_window) {
                table.push(language, rule);
            }
        }
        table
    }

    /// Append a rule for a language. Rules for [`Language::Other`] are ignored.
    pub fn push(&mut self, language: Language, rule: DefinitionRule) {
        if language == Language::Other {
            tracing::warn!(
                "Ignoring definition rule '{}' for unrecognized language",
                rule.pattern()
            );
            return;
        }
        self.rules.entry(language).or_default().push(rule);
    }

    /// Rules for a language, in evaluation order
    pub fn rules_for(&self, language: Language) -> &[DefinitionRule] {
        self.rules.get(&language).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Languages with at least one rule, in [`Language::SUPPORTED`] order
    pub fn languages(&self) -> Vec<Language> {
        Language::SUPPORTED
            .into_iter()
            .filter(|language| !self.rules_for(*language).is_empty())
            .collect()
    }

    /// Total number of rules across all languages
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn builtin(kind: SymbolKind, pattern: &str) -> DefinitionRule {
    DefinitionRule::new(kind, pattern).expect("built-in definition pattern must compile")
}

fn builtin_rules(language: Language, c_block_window: usize) -> Vec<DefinitionRule> {
    use SymbolKind::*;

    match language {
        Language::Go => vec![
            builtin(
                Function,
                r"^\s*func\s+(?:\([^)]*\)\s*)?[A-Za-z_]\w*\s*(?:\[[^\]]*\]\s*)?\(",
            ),
            builtin(
                Struct,
                r"^\s*type\s+[A-Za-z_]\w*\s*(?:\[[^\]]*\]\s*)?struct\b",
            ),
            builtin(
                Interface,
                r"^\s*type\s+[A-Za-z_]\w*\s*(?:\[[^\]]*\]\s*)?interface\b",
            ),
            // package level only: no indentation
            builtin(Variable, r"^var\s+(?:[A-Za-z_]\w*|\()"),
            builtin(Constant, r"^const\s+(?:[A-Za-z_]\w*|\()"),
        ],
        Language::Python => vec![
            builtin(
                Function,
                r"^\s*(?:async\s+)?def\s+[A-Za-z_]\w*\s*(?:\[[^\]]*\]\s*)?\(",
            ),
            builtin(Class, r"^\s*class\s+[A-Za-z_]\w*\s*[:(\[]"),
        ],
        Language::JavaScript => vec![
            builtin(
                Function,
                r"^\s*(?:export\s+(?:default\s+)?)?(?:async\s+)?function\s*\*?\s*[A-Za-z_$][\w$]*\s*[<(]",
            ),
            builtin(
                Function,
                r"^\s*(?:export\s+)?(?:const|let|var)\s+[A-Za-z_$][\w$]*\s*(?::[^=]+)?=\s*(?:async\s+)?function\b",
            ),
            builtin(
                Function,
                r"^\s*(?:export\s+)?(?:const|let|var)\s+[A-Za-z_$][\w$]*\s*(?::[^=]+)?=\s*(?:async\s+)?(?:<[^>]*>\s*)?(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*(?::\s*[^=]+?)?\s*=>",
            ),
            builtin(
                Class,
                r"^\s*(?:export\s+(?:default\s+)?)?(?:abstract\s+)?class\s+[A-Za-z_$][\w$]*",
            ),
            builtin(
                Interface,
                r"^\s*(?:export\s+)?(?:declare\s+)?interface\s+[A-Za-z_$][\w$]*",
            ),
            builtin(
                TypeAlias,
                r"^\s*(?:export\s+)?(?:declare\s+)?type\s+[A-Za-z_$][\w$]*\s*(?:<[^>]*>)?\s*=",
            ),
        ],
        Language::C => vec![
            builtin(
                Function,
                r"^\s*(?:[A-Za-z_][\w:<>,\*&\s]*[\s\*&])?~?[A-Za-z_][\w:~]*\s*\(",
            )
            .rejecting_terminator(';')
            .excluding_words(C_STATEMENT_KEYWORDS.iter().copied())
            .requiring_block_within(c_block_window),
        ],
        Language::Rust => vec![
            builtin(
                Function,
                r#"^\s*(?:pub(?:\s*\([^)]*\))?\s+)?(?:default\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+(?:"[^"]*"\s+)?)?fn\s+[A-Za-z_]\w*"#,
            ),
            builtin(
                Struct,
                r"^\s*(?:pub(?:\s*\([^)]*\))?\s+)?struct\s+[A-Za-z_]\w*",
            ),
            builtin(Enum, r"^\s*(?:pub(?:\s*\([^)]*\))?\s+)?enum\s+[A-Za-z_]\w*"),
            builtin(
                Trait,
                r"^\s*(?:pub(?:\s*\([^)]*\))?\s+)?(?:unsafe\s+)?trait\s+[A-Za-z_]\w*",
            ),
        ],
        Language::Lisp => vec![
            builtin(Function, r"^\s*\(defun\s+\S"),
            builtin(Macro, r"^\s*\(defmacro\s+\S"),
            builtin(Variable, r"^\s*\(defvar\s+\S"),
            builtin(Variable, r"^\s*\(defcustom\s+\S"),
        ],
        Language::Other => Vec::new(),
    }
}
