//! Host command table.
//!
//! Hosts register their navigation commands here under names; the smart jump
//! decorator swaps the go-to-definition entry for a wrapper and back. The
//! registry remembers which names are wrapped and what they replaced, so at
//! most one wrapper sits on a command however many decorators exist.

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::document::DocumentView;
use crate::error::SmartJumpError;

/// A host command acting on the active document.
///
/// Errors come from the host's own machinery (usually a language server
/// request) and are passed through untouched.
pub type Command = Arc<dyn Fn(&dyn DocumentView) -> Result<()> + Send + Sync>;

/// Named commands the host exposes to key bindings
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
    /// Wrapped command names mapped to the command each wrapper replaced
    wrapped: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure under `name`, returning the command it replaced
    pub fn register<F>(&mut self, name: impl Into<String>, command: F) -> Option<Command>
    where
        F: Fn(&dyn DocumentView) -> Result<()> + Send + Sync + 'static,
    {
        self.insert(name, Arc::new(command))
    }

    /// Install an already shared command under `name`, returning the one it replaced
    pub fn insert(&mut self, name: impl Into<String>, command: Command) -> Option<Command> {
        self.commands.insert(name.into(), command)
    }

    pub fn get(&self, name: &str) -> Option<Command> {
        self.commands.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Command> {
        self.commands.remove(name)
    }

    /// Whether a wrapper is installed on `name`
    pub fn is_wrapped(&self, name: &str) -> bool {
        self.wrapped.contains_key(name)
    }

    /// The command under `name` as it was before any wrapper was installed
    pub fn unwrapped(&self, name: &str) -> Option<Command> {
        self.wrapped.get(name).cloned().or_else(|| self.get(name))
    }

    /// Install `wrapper` on `name`, returning the command it replaced.
    ///
    /// Returns `None` and changes nothing when `name` is missing or already wrapped.
    pub(crate) fn wrap(&mut self, name: &str, wrapper: Command) -> Option<Command> {
        if self.is_wrapped(name) {
            return None;
        }
        let original = self.get(name)?;
        self.commands.insert(name.to_string(), wrapper);
        self.wrapped.insert(name.to_string(), Arc::clone(&original));
        Some(original)
    }

    /// Put back the command `wrapper` replaced on `name`.
    ///
    /// Only succeeds while `wrapper` is still the installed command (or the
    /// name was removed); otherwise the wrap record is kept for a later retry.
    pub(crate) fn restore(&mut self, name: &str, wrapper: &Command) -> bool {
        if let Some(current) = self.commands.get(name)
            && !Arc::ptr_eq(current, wrapper)
        {
            return false;
        }
        match self.wrapped.remove(name) {
            Some(original) => {
                self.commands.insert(name.to_string(), original);
                true
            }
            None => false,
        }
    }

    /// Run the command registered under `name`
    pub fn invoke(&self, name: &str, document: &dyn DocumentView) -> Result<()> {
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| SmartJumpError::CommandNotFound(name.to_string()))?;
        command(document)
    }

    /// Registered command names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrapped: Vec<&str> = self.wrapped.keys().map(String::as_str).collect();
        wrapped.sort_unstable();
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .field("wrapped", &wrapped)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Buffer;
    use crate::language::Language;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_register_and_invoke() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut registry = CommandRegistry::new();
        registry.register("goto-definition", move |_doc: &dyn DocumentView| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let buffer = Buffer::new(Language::Go, "func main() {");
        registry.invoke("goto-definition", &buffer).unwrap();
        registry.invoke("goto-definition", &buffer).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invoke_missing_command() {
        let registry = CommandRegistry::new();
        let buffer = Buffer::new(Language::Go, "");
        let err = registry.invoke("find-references", &buffer).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SmartJumpError>(),
            Some(SmartJumpError::CommandNotFound(name)) if name == "find-references"
        ));
    }

    #[test]
    fn test_command_errors_pass_through() {
        let mut registry = CommandRegistry::new();
        registry.register("goto-definition", |_doc: &dyn DocumentView| {
            anyhow::bail!("No definition found")
        });

        let buffer = Buffer::new(Language::Go, "");
        let err = registry.invoke("goto-definition", &buffer).unwrap_err();
        assert_eq!(err.to_string(), "No definition found");
    }

    #[test]
    fn test_register_returns_previous() {
        let mut registry = CommandRegistry::new();
        assert!(registry.register("a", |_doc: &dyn DocumentView| Ok(())).is_none());
        let previous = registry.register("a", |_doc: &dyn DocumentView| Ok(()));
        assert!(previous.is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_sorted_and_remove() {
        let mut registry = CommandRegistry::new();
        registry.register("find-references", |_doc: &dyn DocumentView| Ok(()));
        registry.register("goto-definition", |_doc: &dyn DocumentView| Ok(()));
        assert_eq!(registry.names(), vec!["find-references", "goto-definition"]);

        assert!(registry.remove("find-references").is_some());
        assert!(!registry.contains("find-references"));
        assert!(registry.contains("goto-definition"));
        assert!(!registry.is_empty());
    }

    fn noop() -> Command {
        Arc::new(|_doc: &dyn DocumentView| -> Result<()> { Ok(()) })
    }

    #[test]
    fn test_wrap_records_original_once() {
        let mut registry = CommandRegistry::new();
        registry.register("goto-definition", |_doc: &dyn DocumentView| Ok(()));
        let original = registry.get("goto-definition").unwrap();

        let first = noop();
        let second = noop();

        let replaced = registry.wrap("goto-definition", Arc::clone(&first)).unwrap();
        assert!(Arc::ptr_eq(&replaced, &original));
        assert!(registry.is_wrapped("goto-definition"));
        assert!(registry.wrap("goto-definition", Arc::clone(&second)).is_none());
        assert!(Arc::ptr_eq(&registry.get("goto-definition").unwrap(), &first));
        assert!(Arc::ptr_eq(
            &registry.unwrapped("goto-definition").unwrap(),
            &original
        ));

        assert!(!registry.restore("goto-definition", &second));
        assert!(registry.restore("goto-definition", &first));
        assert!(!registry.is_wrapped("goto-definition"));
        assert!(Arc::ptr_eq(&registry.get("goto-definition").unwrap(), &original));
    }

    #[test]
    fn test_wrap_missing_command() {
        let mut registry = CommandRegistry::new();
        assert!(registry.wrap("goto-definition", noop()).is_none());
        assert!(!registry.is_wrapped("goto-definition"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_shares_command() {
        let mut registry = CommandRegistry::new();
        registry.register("goto-definition", |_doc: &dyn DocumentView| Ok(()));

        let first = registry.get("goto-definition").unwrap();
        let second = registry.get("goto-definition").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.get("missing").is_none());
    }
}
