//! # Smart Jump - Context-Sensitive Go-To-Definition
//!
//! Makes one navigation key do the right thing: with the cursor on a symbol's
//! definition it lists the symbol's references, anywhere else it jumps to the
//! definition.
//!
//! ## Overview
//!
//! A per-language table of line heuristics decides whether the cursor sits on a
//! definition. A decorator around the host editor's go-to-definition command
//! uses that decision to run either the host's find-references command or the
//! original go-to-definition. All real code intelligence stays with the host
//! (usually a language server); nothing here resolves symbols or indexes files.
//!
//! ## Architecture
//!
//! ```text
//!   key binding
//!        │
//! ┌──────▼─────────────┐      ┌────────────────┐
//! │ goto-definition    │─────▶│   Classifier   │  (RuleTable per Language)
//! │ (SmartJump wrapper)│◀─────│ at definition? │
//! └──────┬──────┬──────┘      └────────────────┘
//!    yes │      │ no
//! ┌──────▼─────┐ ┌▼──────────────────┐
//! │ find-      │ │ original goto-    │
//! │ references │ │ definition        │
//! └────────────┘ └───────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`classifier`]: Definition-line heuristics and the rule table
//! - [`dispatch`]: Host command table and the smart jump decorator
//! - [`document`]: Cursor position and read-only document access
//! - [`language`]: Language tag resolution from modes, ids and file names
//! - [`config`]: Configuration management with environment variable support
//! - [`error`]: Error types
//! - [`paths`]: Platform config paths
//!
//! ## Usage Example
//!
//! ```
//! use smart_jump::config::Config;
//! use smart_jump::dispatch::{CommandRegistry, SmartJump};
//! use smart_jump::document::{Buffer, DocumentView};
//! use smart_jump::language::Language;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut registry = CommandRegistry::new();
//! registry.register("goto-definition", |_doc: &dyn DocumentView| Ok(()));
//! registry.register("find-references", |_doc: &dyn DocumentView| Ok(()));
//!
//! let mut smart_jump = SmartJump::from_config(&Config::default());
//! smart_jump.enable(&mut registry)?;
//!
//! let buffer = Buffer::new(Language::Python, "def handle(self):");
//! registry.invoke("goto-definition", &buffer)?; // runs find-references
//! # Ok(())
//! # }
//! ```

/// Definition-line heuristics keyed by language
pub mod classifier;

/// Configuration management with environment variable overrides
pub mod config;

/// Host command table and the smart jump decorator
pub mod dispatch;

/// Cursor position and read-only access to the active document
pub mod document;

/// Error types and utilities
pub mod error;

/// Language tags and their resolution
pub mod language;

/// Platform-specific config paths
pub mod paths;
