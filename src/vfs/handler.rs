//! This module provides `VfsHandler`, the resolver for a single virtual protocol.

use std::path::{MAIN_SEPARATOR, Path};

use crate::core::{DEFAULT_PROTOCOL_SEPARATOR, DirProbe, HostFs, PathHandler, utils};
use crate::error::ConfigurationError;
use crate::vfs::{ReplacementStore, Replacements};

/// Maps one virtual protocol (e.g. `foo://`) to a root folder on the host.
///
/// A path starting with the protocol is rewritten to `root_folder + MAIN_SEPARATOR + rest`,
/// then every `${name}` placeholder with a known replacement is substituted.
///
/// ### Internal state
///
/// * `name` — Registry key. Fixed at construction and never part of a resolved path.
/// * `protocol_name`, `protocol_separator` — Together they form the protocol prefix.
///   Blank values are stored as empty strings, which leaves the handler unmatched.
/// * `root_folder` — Host directory the protocol points to, stored without trailing
///   `/` or `\`. It is validated against the file system when bound.
/// * `replacements` — Persistent placeholder values.
/// * `persist_dynamic` — When `true` (default), dynamic replacements passed to
///   `try_resolve` are merged into `replacements` permanently.
///
/// ### Thread Safety
///
/// Resolution mutates the replacement store, so `try_resolve` takes `&mut self`.
/// Share a handler between threads only behind a `Mutex` or `RwLock`.
///
/// ### Example
///
/// ```no_run
/// use vfs_resolver::{PathHandler, Replacements, VfsHandler};
///
/// let mut handler = VfsHandler::new("MyVFS");
/// handler.set_protocol("my", "://");
/// handler.set_root_folder("/srv/data").unwrap();
/// handler.add_replacement("user", "alice");
///
/// let mut path = String::from("my://home/${user}/docs");
/// assert!(handler.try_resolve(&mut path, &Replacements::new()));
/// assert_eq!(path, "/srv/data/home/alice/docs");
/// ```
#[derive(Debug, Clone)]
pub struct VfsHandler {
    name: String,
    protocol_name: String,
    protocol_separator: String,
    root_folder: String,
    replacements: ReplacementStore,
    persist_dynamic: bool,
}

impl VfsHandler {
    /// Creates a handler with no protocol name, the default `://` separator,
    /// an empty root folder and no replacements.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            protocol_name: String::new(),
            protocol_separator: DEFAULT_PROTOCOL_SEPARATOR.to_string(),
            root_folder: String::new(),
            replacements: ReplacementStore::new(),
            persist_dynamic: true,
        }
    }

    /// Creates a fully configured handler.
    ///
    /// * The protocol is only set if both `protocol_name` and `protocol_separator` are non-empty.
    /// * `root_folder` is only bound if non-empty; a non-existent directory is an error.
    /// * `replacements` entries set to `None` are ignored (there is nothing to remove yet).
    pub fn create(
        name: impl Into<String>,
        protocol_name: &str,
        protocol_separator: &str,
        root_folder: &str,
        replacements: &Replacements,
    ) -> Result<Self, ConfigurationError> {
        Self::create_with(
            name,
            protocol_name,
            protocol_separator,
            root_folder,
            replacements,
            &HostFs,
        )
    }

    pub(crate) fn create_with<P: DirProbe + ?Sized>(
        name: impl Into<String>,
        protocol_name: &str,
        protocol_separator: &str,
        root_folder: &str,
        replacements: &Replacements,
        probe: &P,
    ) -> Result<Self, ConfigurationError> {
        let mut handler = Self::new(name);
        if !protocol_name.is_empty() && !protocol_separator.is_empty() {
            handler.set_protocol(protocol_name, protocol_separator);
        }
        if !root_folder.is_empty() {
            handler.set_root_folder_with(root_folder, probe)?;
        }
        if !replacements.is_empty() {
            handler.add_replacements(replacements);
        }
        Ok(handler)
    }

    /// Sets protocol name and separator. Blank values become empty strings.
    pub fn set_protocol(&mut self, name: &str, separator: &str) {
        self.set_protocol_name(name);
        self.set_protocol_separator(separator);
    }

    pub fn set_protocol_name(&mut self, name: &str) {
        self.protocol_name = utils::non_blank(name);
    }

    pub fn set_protocol_separator(&mut self, separator: &str) {
        self.protocol_separator = utils::non_blank(separator);
    }

    /// Binds the root folder after checking it is an existing host directory.
    pub fn set_root_folder(&mut self, folder: &str) -> Result<(), ConfigurationError> {
        self.set_root_folder_with(folder, &HostFs)
    }

    /// Same as `set_root_folder`, asking `probe` whether `folder` is a directory.
    pub fn set_root_folder_with<P: DirProbe + ?Sized>(
        &mut self,
        folder: &str,
        probe: &P,
    ) -> Result<(), ConfigurationError> {
        if !probe.is_dir(Path::new(folder)) {
            tracing::warn!(handler = self.name.as_str(), folder, "root folder rejected");
            return Err(ConfigurationError::InvalidRootFolder(folder.into()));
        }
        self.root_folder = utils::trim_trailing_separators(folder).to_string();
        Ok(())
    }

    /// Inserts or overwrites a replacement; `None` removes it.
    pub fn add_replacement<'a>(&mut self, name: &str, value: impl Into<Option<&'a str>>) {
        self.replacements.set(name, value.into());
    }

    /// Applies every entry through `add_replacement`.
    pub fn add_replacements(&mut self, replacements: &Replacements) {
        self.replacements.merge(replacements);
    }

    pub fn has_replacement(&self, name: &str) -> bool {
        self.replacements.contains(name)
    }

    /// Changes whether dynamic replacements outlive the call they were passed to.
    pub fn set_persist_dynamic(&mut self, persist: bool) {
        self.persist_dynamic = persist;
    }

    pub fn persist_dynamic(&self) -> bool {
        self.persist_dynamic
    }

    pub fn protocol_name(&self) -> &str {
        &self.protocol_name
    }

    pub fn protocol_separator(&self) -> &str {
        &self.protocol_separator
    }

    pub fn root_folder(&self) -> &str {
        &self.root_folder
    }

    pub fn replacements(&self) -> &ReplacementStore {
        &self.replacements
    }
}

impl PathHandler for VfsHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn protocol(&self) -> String {
        format!("{}{}", self.protocol_name, self.protocol_separator)
    }

    /// A handler is usable only when both protocol parts are set.
    fn is_valid(&self) -> bool {
        !self.protocol_name.is_empty() && !self.protocol_separator.is_empty()
    }

    /// Rewrites `path` when it starts with the protocol (case-sensitive).
    ///
    /// Non-empty `dynamic` replacements are merged into the handler's store before
    /// substitution, so they stay available to later calls. With `persist_dynamic`
    /// disabled they only shadow the store for this call.
    fn try_resolve(&mut self, path: &mut String, dynamic: &Replacements) -> bool {
        if !self.is_valid() {
            return false;
        }
        let protocol = self.protocol();
        let Some(rest) = path.strip_prefix(protocol.as_str()) else {
            return false;
        };

        let overlay = if dynamic.is_empty() {
            None
        } else if self.persist_dynamic {
            self.replacements.merge(dynamic);
            None
        } else {
            Some(dynamic)
        };

        let rewritten = format!("{}{}{}", self.root_folder, MAIN_SEPARATOR, rest);
        let resolved = self.replacements.substitute(&rewritten, overlay);
        tracing::trace!(
            handler = self.name.as_str(),
            protocol = protocol.as_str(),
            from = path.as_str(),
            to = resolved.as_str(),
            "path rewritten"
        );
        *path = resolved;
        true
    }
}
