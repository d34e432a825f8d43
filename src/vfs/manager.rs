//! This module provides `VfsManager`, an ordered registry of protocol handlers.

use std::collections::HashMap;

use crate::core::PathHandler;
use crate::vfs::{Replacements, VfsHandler};

/// Either a handler or a handler name, for `VfsManager::has_handler`.
pub enum HandlerRef<'a, H> {
    Handler(&'a H),
    Name(&'a str),
}

impl<'a, H> From<&'a H> for HandlerRef<'a, H>
where
    H: PathHandler,
{
    fn from(handler: &'a H) -> Self {
        HandlerRef::Handler(handler)
    }
}

impl<'a, H> From<&'a str> for HandlerRef<'a, H> {
    fn from(name: &'a str) -> Self {
        HandlerRef::Name(name)
    }
}

/// Dispatches virtual paths to the first registered handler that claims them.
///
/// ### Internal state
///
/// * `handlers` — Registered handlers in dispatch order.
/// * `index` — Handler name → position in `handlers`.
///
/// ### Invariants
///
/// 1. **Unique names**: every name appears once; `index` and `handlers` always agree.
/// 2. **Stable order**: a new name is appended, while re-registering a known name replaces
///    the handler in place and keeps its dispatch position.
///
/// ### Thread Safety
///
/// Not thread‑safe. `resolve_path` needs `&mut self` because handlers absorb dynamic
/// replacements; wrap the manager in `Mutex<VfsManager>` to share it.
///
/// ### Example
///
/// ```no_run
/// use vfs_resolver::{Replacements, VfsHandler, VfsManager};
///
/// let handler = VfsHandler::create("MyVFS", "my", "://", "/srv/data", &Replacements::new()).unwrap();
/// let mut manager = VfsManager::with_handler(handler);
///
/// assert_eq!(manager.resolve("my://bar/baz.txt"), "/srv/data/bar/baz.txt");
/// assert_eq!(manager.resolve("xyz://bar"), "xyz://bar");
/// ```
#[derive(Debug, Clone)]
pub struct VfsManager<H = VfsHandler> {
    handlers: Vec<H>,
    index: HashMap<String, usize>,
}

impl<H: PathHandler> Default for VfsManager<H> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<H: PathHandler> VfsManager<H> {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager with `handler` as its only entry.
    pub fn with_handler(handler: H) -> Self {
        let mut manager = Self::new();
        manager.add_handler(handler);
        manager
    }

    /// Registers `handler` under its name, replacing any handler with the same name.
    pub fn add_handler(&mut self, handler: H) {
        match self.index.get(handler.name()) {
            Some(&position) => {
                tracing::debug!(handler = handler.name(), "handler replaced");
                self.handlers[position] = handler;
            }
            None => {
                tracing::debug!(handler = handler.name(), protocol = %handler.protocol(), "handler added");
                self.index
                    .insert(handler.name().to_string(), self.handlers.len());
                self.handlers.push(handler);
            }
        }
    }

    /// Registers every handler in order.
    pub fn add_handlers<I: IntoIterator<Item = H>>(&mut self, handlers: I) {
        for handler in handlers {
            self.add_handler(handler);
        }
    }

    pub fn get_handler(&self, name: &str) -> Option<&H> {
        self.index.get(name).map(|&position| &self.handlers[position])
    }

    pub fn get_handler_mut(&mut self, name: &str) -> Option<&mut H> {
        self.index
            .get(name)
            .map(|&position| &mut self.handlers[position])
    }

    /// Returns `(name, handler)` pairs in dispatch order.
    pub fn handlers(&self) -> impl Iterator<Item = (&str, &H)> {
        self.handlers.iter().map(|handler| (handler.name(), handler))
    }

    /// Checks for a handler by name; a handler argument is looked up by its name.
    pub fn has_handler<'a, R>(&self, handler: R) -> bool
    where
        R: Into<HandlerRef<'a, H>>,
        H: 'a,
    {
        let name = match handler.into() {
            HandlerRef::Handler(handler) => handler.name(),
            HandlerRef::Name(name) => name,
        };
        self.index.contains_key(name)
    }

    /// Removes all handlers.
    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
        self.index.clear();
    }

    /// Returns handler names in dispatch order.
    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|handler| handler.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Resolves `path` through the first handler whose protocol matches.
    ///
    /// Handlers are tried in registration order with the same `dynamic` replacements;
    /// only the handler that claims the path sees them. If no handler matches,
    /// `path` is returned unchanged.
    pub fn resolve_path(&mut self, path: &str, dynamic: &Replacements) -> String {
        let mut resolved = path.to_string();
        for handler in self.handlers.iter_mut() {
            if handler.try_resolve(&mut resolved, dynamic) {
                tracing::debug!(handler = handler.name(), path, resolved = resolved.as_str(), "path resolved");
                return resolved;
            }
        }
        tracing::trace!(path, "no handler matched");
        resolved
    }

    /// Same as `resolve_path` without dynamic replacements.
    pub fn resolve(&mut self, path: &str) -> String {
        self.resolve_path(path, &Replacements::new())
    }
}
