//! Declarative handler configuration.
//!
//! Handlers are listed as `[[handler]]` tables and registered in file order:
//!
//! ```toml
//! [[handler]]
//! name = "MyVFS"
//! protocol = "my"
//! separator = "://"        # optional, "://" by default
//! root = "/srv/data"        # optional, must be an existing directory
//! persist_dynamic = true    # optional, true by default
//!
//! [handler.replacements]
//! user = "alice"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::core::{DEFAULT_PROTOCOL_SEPARATOR, DirProbe, HostFs, Result};
use crate::error::ConfigurationError;
use crate::vfs::{Replacements, VfsHandler, VfsManager};

/// A list of handlers, in dispatch order.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct VfsConfig {
    #[serde(default, rename = "handler")]
    pub handlers: Vec<HandlerConfig>,
}

/// Named-field description of one `VfsHandler`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HandlerConfig {
    pub name: String,
    pub protocol: String,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub replacements: BTreeMap<String, String>,
    #[serde(default = "default_persist_dynamic")]
    pub persist_dynamic: bool,
}

fn default_separator() -> String {
    DEFAULT_PROTOCOL_SEPARATOR.to_string()
}

fn default_persist_dynamic() -> bool {
    true
}

impl HandlerConfig {
    /// Builds the handler, validating the root folder on the host.
    pub fn to_handler(&self) -> std::result::Result<VfsHandler, ConfigurationError> {
        self.to_handler_with(&HostFs)
    }

    fn to_handler_with<P: DirProbe + ?Sized>(
        &self,
        probe: &P,
    ) -> std::result::Result<VfsHandler, ConfigurationError> {
        let replacements: Replacements = self
            .replacements
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        let mut handler = VfsHandler::create_with(
            self.name.as_str(),
            &self.protocol,
            &self.separator,
            self.root.as_deref().unwrap_or_default(),
            &replacements,
            probe,
        )?;
        handler.set_persist_dynamic(self.persist_dynamic);
        Ok(handler)
    }
}

impl VfsConfig {
    /// Parses a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("failed to parse VFS configuration")?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        tracing::debug!(path = %path.display(), handlers = config.handlers.len(), "VFS configuration loaded");
        Ok(config)
    }

    /// Builds a manager holding every configured handler, in order.
    /// Fails on the first handler whose root folder is not an existing directory.
    pub fn build(&self) -> std::result::Result<VfsManager, ConfigurationError> {
        self.build_with(&HostFs)
    }

    fn build_with<P: DirProbe + ?Sized>(
        &self,
        probe: &P,
    ) -> std::result::Result<VfsManager, ConfigurationError> {
        let mut manager = VfsManager::new();
        for handler in &self.handlers {
            manager.add_handler(handler.to_handler_with(probe)?);
        }
        Ok(manager)
    }

    /// Shorthand for `load` followed by `build`.
    pub fn load_manager<P: AsRef<Path>>(path: P) -> Result<VfsManager> {
        let manager = Self::load(path)?.build()?;
        Ok(manager)
    }
}
