//! Language tag resolution for the active document

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Language family the classifier has rules for.
///
/// Families share one rule set: `JavaScript` also covers TypeScript and the
/// JSX/TSX dialects, `C` also covers C++, `Lisp` covers Emacs Lisp, Common
/// Lisp, Scheme and Clojure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Python,
    JavaScript,
    C,
    Rust,
    Lisp,
    /// Anything without rules; never classified as a definition
    Other,
}

impl Language {
    /// Every tag that carries definition rules
    pub const SUPPORTED: [Language; 6] = [
        Language::Go,
        Language::Python,
        Language::JavaScript,
        Language::C,
        Language::Rust,
        Language::Lisp,
    ];

    /// Resolve a tag from an editor mode name or an LSP language id.
    ///
    /// Accepts forms like `go-mode`, `python-ts-mode`, `c++-mode`, `typescriptreact`
    /// and `emacs-lisp`. Unknown names resolve to [`Language::Other`].
    pub fn from_mode(mode: &str) -> Self {
        let lower = mode.trim().to_lowercase();
        let name = lower.strip_suffix("-mode").unwrap_or(lower.as_str());
        let name = name.strip_suffix("-ts").unwrap_or(name);

        match name {
            "go" | "golang" => Language::Go,
            "python" | "py" => Language::Python,
            "javascript" | "js" | "js2" | "js3" | "rjsx" | "javascriptreact" | "jsx"
            | "typescript" | "ts" | "typescriptreact" | "tsx" => Language::JavaScript,
            "c" | "c++" | "cpp" | "cc" | "objc" | "objective-c" => Language::C,
            "rust" | "rustic" => Language::Rust,
            "lisp" | "emacs-lisp" | "elisp" | "lisp-interaction" | "common-lisp" | "scheme"
            | "clojure" | "clojurescript" | "clojurec" => Language::Lisp,
            _ => Language::Other,
        }
    }

    /// Resolve a tag from a file extension (without the leading dot)
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "go" => Language::Go,
            "py" | "pyi" | "pyw" => Language::Python,
            "js" | "mjs" | "cjs" | "jsx" | "ts" | "mts" | "cts" | "tsx" => Language::JavaScript,
            "c" | "h" | "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Language::C,
            "rs" => Language::Rust,
            "el" | "lisp" | "lsp" | "cl" | "scm" | "ss" | "clj" | "cljs" | "cljc" => {
                Language::Lisp
            }
            _ => Language::Other,
        }
    }

    /// Resolve a tag from a file path's extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Other)
    }

    /// Get a human-readable display name for this language
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Go => "Go",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript/TypeScript",
            Language::C => "C/C++",
            Language::Rust => "Rust",
            Language::Lisp => "Lisp",
            Language::Other => "Other",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_mode_go() {
        assert_eq!(Language::from_mode("go-mode"), Language::Go);
        assert_eq!(Language::from_mode("go-ts-mode"), Language::Go);
        assert_eq!(Language::from_mode("go"), Language::Go);
    }

    #[test]
    fn test_from_mode_python() {
        assert_eq!(Language::from_mode("python-mode"), Language::Python);
        assert_eq!(Language::from_mode("python-ts-mode"), Language::Python);
        assert_eq!(Language::from_mode("python"), Language::Python);
    }

    #[test]
    fn test_from_mode_javascript_family() {
        assert_eq!(Language::from_mode("js-mode"), Language::JavaScript);
        assert_eq!(Language::from_mode("js2-mode"), Language::JavaScript);
        assert_eq!(Language::from_mode("typescript-mode"), Language::JavaScript);
        assert_eq!(Language::from_mode("tsx-ts-mode"), Language::JavaScript);
        assert_eq!(Language::from_mode("typescriptreact"), Language::JavaScript);
    }

    #[test]
    fn test_from_mode_c_family() {
        assert_eq!(Language::from_mode("c-mode"), Language::C);
        assert_eq!(Language::from_mode("c++-mode"), Language::C);
        assert_eq!(Language::from_mode("c++-ts-mode"), Language::C);
        assert_eq!(Language::from_mode("cpp"), Language::C);
    }

    #[test]
    fn test_from_mode_rust_and_lisp() {
        assert_eq!(Language::from_mode("rust-mode"), Language::Rust);
        assert_eq!(Language::from_mode("rustic-mode"), Language::Rust);
        assert_eq!(Language::from_mode("emacs-lisp-mode"), Language::Lisp);
        assert_eq!(Language::from_mode("lisp-interaction-mode"), Language::Lisp);
        assert_eq!(Language::from_mode("clojure-mode"), Language::Lisp);
        assert_eq!(Language::from_mode("scheme-mode"), Language::Lisp);
    }

    #[test]
    fn test_from_mode_case_and_whitespace() {
        assert_eq!(Language::from_mode("  Go-Mode "), Language::Go);
        assert_eq!(Language::from_mode("RUST"), Language::Rust);
    }

    #[test]
    fn test_from_mode_unknown() {
        assert_eq!(Language::from_mode("text-mode"), Language::Other);
        assert_eq!(Language::from_mode("fundamental-mode"), Language::Other);
        assert_eq!(Language::from_mode("java-mode"), Language::Other);
        assert_eq!(Language::from_mode(""), Language::Other);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("go"), Language::Go);
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("ts"), Language::JavaScript);
        assert_eq!(Language::from_extension("jsx"), Language::JavaScript);
        assert_eq!(Language::from_extension("hpp"), Language::C);
        assert_eq!(Language::from_extension("RS"), Language::Rust);
        assert_eq!(Language::from_extension("el"), Language::Lisp);
        assert_eq!(Language::from_extension("txt"), Language::Other);
        assert_eq!(Language::from_extension(""), Language::Other);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            Language::from_path(&PathBuf::from("src/main.rs")),
            Language::Rust
        );
        assert_eq!(Language::from_path(&PathBuf::from("Makefile")), Language::Other);
        assert_eq!(
            Language::from_path(&PathBuf::from("lisp/init.el")),
            Language::Lisp
        );
    }

    #[test]
    fn test_supported_excludes_other() {
        assert!(!Language::SUPPORTED.contains(&Language::Other));
        assert_eq!(Language::SUPPORTED.len(), 6);
    }

    #[test]
    fn test_display() {
        assert_eq!(Language::C.to_string(), "C/C++");
        assert_eq!(Language::JavaScript.to_string(), "JavaScript/TypeScript");
    }
}
