use std::path::Path;

use crate::vfs::Replacements;

/// Separator placed between a protocol name and the path body when none is given.
pub const DEFAULT_PROTOCOL_SEPARATOR: &str = "://";

/// A resolver for one virtual protocol.
///
/// `VfsManager` dispatches through this trait, so any type that can claim and rewrite a path
/// may be registered next to the stock `VfsHandler`.
pub trait PathHandler {
    /// Registry key of the handler. Never appears in resolved paths.
    fn name(&self) -> &str;

    /// Full protocol prefix (`name + separator`), e.g. `foo://`.
    fn protocol(&self) -> String;

    /// Whether the handler has a usable protocol.
    fn is_valid(&self) -> bool;

    /// Rewrites `path` in place if it starts with this handler's protocol.
    /// Returns `false` (and leaves `path` untouched) when the path is not claimed.
    fn try_resolve(&mut self, path: &mut String, dynamic: &Replacements) -> bool;
}

/// Answers "does this path denote an existing directory?".
pub trait DirProbe {
    fn is_dir(&self, path: &Path) -> bool;
}

/// `DirProbe` backed by the host file system.
#[derive(Debug, Default, Copy, Clone)]
pub struct HostFs;

impl DirProbe for HostFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

pub type Result<T> = std::result::Result<T, anyhow::Error>;

pub mod utils {
    /// Removes every trailing `/` and `\` from `folder`.
    pub fn trim_trailing_separators(folder: &str) -> &str {
        folder.trim_end_matches(['/', '\\'])
    }

    /// Normalizes a protocol part: blank (empty or whitespace-only) becomes empty.
    pub fn non_blank(value: &str) -> String {
        if value.trim().is_empty() {
            String::new()
        } else {
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_trailing_separators() {
        assert_eq!(utils::trim_trailing_separators("/srv/data/"), "/srv/data");
        assert_eq!(utils::trim_trailing_separators("/srv/data//\\"), "/srv/data");
        assert_eq!(utils::trim_trailing_separators("C:\\vfs\\"), "C:\\vfs");
        assert_eq!(utils::trim_trailing_separators("/srv/data"), "/srv/data");
        assert_eq!(utils::trim_trailing_separators("/"), "");
        assert_eq!(utils::trim_trailing_separators(""), "");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(utils::non_blank("foo"), "foo");
        assert_eq!(utils::non_blank(" :// "), " :// ");
        assert_eq!(utils::non_blank("   "), "");
        assert_eq!(utils::non_blank(""), "");
    }

    #[test]
    fn test_host_fs_is_dir() {
        let tmp = std::env::temp_dir();
        assert!(HostFs.is_dir(&tmp));
        assert!(!HostFs.is_dir(&tmp.join("surely-missing-vfs-resolver-dir")));
    }
}
