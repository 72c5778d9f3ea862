//! Smart jump dispatcher.
//!
//! [`SmartJump`] decorates the host's go-to-definition command: on a
//! definition it runs find-references instead, anywhere else it falls through
//! to the original command. The decorator is an explicit object, so enabling
//! and disabling are plain method calls with no process-wide state.
//!
//! ## Usage
//!
//! ```
//! use smart_jump::config::Config;
//! use smart_jump::dispatch::{CommandRegistry, SmartJump};
//! use smart_jump::document::DocumentView;
//!
//! let mut registry = CommandRegistry::new();
//! registry.register("goto-definition", |_doc: &dyn DocumentView| Ok(()));
//! registry.register("find-references", |_doc: &dyn DocumentView| Ok(()));
//!
//! let mut smart_jump = SmartJump::from_config(&Config::default());
//! smart_jump.enable(&mut registry)?;
//! assert!(smart_jump.is_enabled());
//! smart_jump.disable(&mut registry);
//! # Ok::<(), smart_jump::error::SmartJumpError>(())
//! ```

pub mod registry;


use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub use registry::{Command, CommandRegistry};

use crate::classifier::Classifier;
use crate::config::{Config, DebugOutput, DispatchConfig};
use crate::document::DocumentView;
use crate::error::SmartJumpError;

const TRACE_TARGET: &str = "smart_jump::dispatch";

/// Which host action a smart jump resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavAction {
    /// Cursor was not on a definition: go to the definition
    FindDefinitions,
    /// Cursor was on a definition: list its references
    FindReferences,
}

impl fmt::Display for NavAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavAction::FindDefinitions => f.write_str("find definitions"),
            NavAction::FindReferences => f.write_str("find references"),
        }
    }
}

/// Number of smart jumps taken per branch since the decorator was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DispatchStats {
    pub definitions: usize,
    pub references: usize,
}

impl DispatchStats {
    pub fn total(&self) -> usize {
        self.definitions + self.references
    }
}

#[derive(Debug, Default)]
struct Counters {
    definitions: AtomicUsize,
    references: AtomicUsize,
}

/// Classification plus bookkeeping, shared by the installed wrapper and
/// direct [`SmartJump::smart_goto`] calls.
#[derive(Clone)]
struct Router {
    classifier: Arc<Classifier>,
    debug: DebugOutput,
    counters: Arc<Counters>,
}

impl Router {
    fn route(&self, document: &dyn DocumentView) -> NavAction {
        let found = self.classifier.classify(document);
        let action = match found {
            Some(_) => NavAction::FindReferences,
            None => NavAction::FindDefinitions,
        };

        match action {
            NavAction::FindDefinitions => self.counters.definitions.fetch_add(1, Ordering::Relaxed),
            NavAction::FindReferences => self.counters.references.fetch_add(1, Ordering::Relaxed),
        };

        if self.debug.is_on() {
            let line = document.cursor().line.saturating_add(1);
            match found {
                Some(m) => tracing::info!(
                    target: TRACE_TARGET,
                    "{} {} definition at line {}: {}",
                    m.language,
                    m.kind.display_name(),
                    line,
                    action
                ),
                None => tracing::info!(
                    target: TRACE_TARGET,
                    "{} line {} is not a definition: {}",
                    document.language(),
                    line,
                    action
                ),
            }
        }

        action
    }

    /// Bind the router to concrete definition and reference commands
    fn into_command(self, definitions: Command, references: Command) -> Command {
        Arc::new(move |document: &dyn DocumentView| match self.route(document) {
            NavAction::FindReferences => references(document),
            NavAction::FindDefinitions => definitions(document),
        })
    }
}

/// Decorator that makes go-to-definition context sensitive.
pub struct SmartJump {
    router: Router,
    config: DispatchConfig,
    /// The wrapper this decorator installed, while installed
    wrapper: Option<Command>,
}

impl SmartJump {
    pub fn new(classifier: Classifier, config: DispatchConfig) -> Self {
        Self {
            router: Router {
                classifier: Arc::new(classifier),
                debug: config.debug,
                counters: Arc::new(Counters::default()),
            },
            config,
            wrapper: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Classifier::from_config(&config.classifier),
            config.dispatch.clone(),
        )
    }

    pub fn classifier(&self) -> &Classifier {
        &self.router.classifier
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Whether this decorator's wrapper is installed
    pub fn is_enabled(&self) -> bool {
        self.wrapper.is_some()
    }

    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            definitions: self.router.counters.definitions.load(Ordering::Relaxed),
            references: self.router.counters.references.load(Ordering::Relaxed),
        }
    }

    /// Wrap the host's go-to-definition command.
    ///
    /// Both configured commands must be registered. A command carries at most
    /// one wrapper: calling this while this decorator or any other is already
    /// installed on it changes nothing.
    pub fn enable(&mut self, registry: &mut CommandRegistry) -> Result<(), SmartJumpError> {
        let name = &self.config.definition_command;
        if self.wrapper.is_some() {
            tracing::debug!("Smart jump already wraps '{}'", name);
            return Ok(());
        }
        if registry.is_wrapped(name) {
            tracing::debug!("'{}' is already wrapped by another smart jump", name);
            return Ok(());
        }

        let original = self.lookup(registry, name)?;
        let references = self.lookup(registry, &self.config.references_command)?;

        let wrapper = self.router.clone().into_command(original, references);
        if registry.wrap(name, Arc::clone(&wrapper)).is_none() {
            return Err(SmartJumpError::CommandNotFound(name.clone()));
        }
        self.wrapper = Some(wrapper);

        tracing::debug!("Smart jump enabled on '{}'", name);
        Ok(())
    }

    /// Put the original go-to-definition command back.
    ///
    /// Returns whether anything was restored; disabling while disabled is a
    /// no-op. If the wrapper was displaced after enabling, nothing changes and
    /// the decorator stays enabled so a later call can restore once the
    /// wrapper is back in place.
    pub fn disable(&mut self, registry: &mut CommandRegistry) -> bool {
        let Some(wrapper) = &self.wrapper else {
            return false;
        };

        let name = &self.config.definition_command;
        if !registry.restore(name, wrapper) {
            tracing::warn!(
                "'{}' was replaced after smart jump was enabled; leaving the replacement in place",
                name
            );
            return false;
        }

        self.wrapper = None;
        tracing::debug!("Smart jump disabled on '{}'", name);
        true
    }

    /// The interactive "smart go to definition or references" command.
    ///
    /// Works whether or not a wrapper is installed, and always runs the
    /// unwrapped go-to-definition so each call classifies once. Errors from
    /// the host command that ran are returned unchanged.
    pub fn smart_goto(
        &self,
        registry: &CommandRegistry,
        document: &dyn DocumentView,
    ) -> anyhow::Result<NavAction> {
        let action = self.router.route(document);
        match action {
            NavAction::FindReferences => {
                registry.invoke(&self.config.references_command, document)?
            }
            NavAction::FindDefinitions => {
                let definitions = self.lookup(registry, &self.config.definition_command)?;
                definitions(document)?
            }
        }
        Ok(action)
    }

    /// The smart command as a standalone [`Command`], for hosts that bind it
    /// under its own name instead of wrapping go-to-definition.
    pub fn command(&self, registry: &CommandRegistry) -> Result<Command, SmartJumpError> {
        let definitions = self.lookup(registry, &self.config.definition_command)?;
        let references = self.lookup(registry, &self.config.references_command)?;
        Ok(self.router.clone().into_command(definitions, references))
    }

    /// Resolve a host command, looking through any installed wrapper
    fn lookup(&self, registry: &CommandRegistry, name: &str) -> Result<Command, SmartJumpError> {
        registry
            .unwrapped(name)
            .ok_or_else(|| SmartJumpError::CommandNotFound(name.to_string()))
    }
}

impl Default for SmartJump {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl fmt::Debug for SmartJump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartJump")
            .field("config", &self.config)
            .field("enabled", &self.is_enabled())
            .field("stats", &self.stats())
            .finish()
    }
}
