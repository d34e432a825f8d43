//! Placeholder replacements: the persistent per-handler store and the per-call dynamic set.
//!
//! A placeholder is a `${name}` token where `name` consists of ASCII letters, digits, `_`, `.`
//! and `-`. Substitution is a single left-to-right pass: replacement values are inserted
//! verbatim and never re-scanned, and tokens without a known value are kept as they are,
//! delimiters included.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z0-9_.-]+)\}").unwrap());

/// Replacements supplied for a single resolution call.
///
/// A `None` value removes the placeholder from the handler store when merged.
///
/// ```
/// use vfs_resolver::Replacements;
///
/// let dynamic = Replacements::new().with("proj", "x1").without("stale");
/// assert_eq!(dynamic.len(), 2);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Replacements {
    values: BTreeMap<String, Option<String>>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), Some(value.into()));
        self
    }

    /// Marks `name` for removal.
    pub fn without(mut self, name: impl Into<String>) -> Self {
        self.values.insert(name.into(), None);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.values.insert(name.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    fn lookup(&self, name: &str) -> Option<Option<&str>> {
        self.values.get(name).map(|value| value.as_deref())
    }
}

impl<K, V> FromIterator<(K, V)> for Replacements
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(name, value)| (name.into(), Some(value.into())))
            .collect();
        Self { values }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Replacements
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// The persistent name → value map owned by a handler. Last write wins.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReplacementStore {
    values: BTreeMap<String, String>,
}

impl ReplacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `name`; `None` removes it.
    pub fn set(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.values.insert(name.to_string(), value.to_string());
            }
            None => {
                self.values.remove(name);
            }
        }
    }

    /// Applies every entry of `replacements` through `set`.
    pub fn merge(&mut self, replacements: &Replacements) {
        for (name, value) in replacements.iter() {
            self.set(name, value);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Substitutes known placeholders in `input`.
    ///
    /// Entries of `overlay` shadow the store for this call only; an overlay entry set to `None`
    /// hides the stored value.
    pub fn substitute(&self, input: &str, overlay: Option<&Replacements>) -> String {
        PLACEHOLDER
            .replace_all(input, |caps: &Captures| {
                let name = &caps[1];
                let value = match overlay.and_then(|o| o.lookup(name)) {
                    Some(shadowed) => shadowed,
                    None => self.get(name),
                };
                match value {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(pairs: &[(&str, &str)]) -> ReplacementStore {
        let mut store = ReplacementStore::new();
        for &(name, value) in pairs {
            store.set(name, Some(value));
        }
        store
    }

    mod store {
        use super::*;

        #[test]
        fn test_set_and_remove() {
            let mut store = ReplacementStore::new();
            assert!(!store.contains("blub"));

            store.set("blub", Some("1234"));
            assert!(store.contains("blub"));
            assert_eq!(store.get("blub"), Some("1234"));

            store.set("blub", Some("5678"));
            assert_eq!(store.get("blub"), Some("5678"));
            assert_eq!(store.len(), 1);

            store.set("blub", None);
            assert!(!store.contains("blub"));
            assert!(store.is_empty());
        }

        #[test]
        fn test_remove_missing_is_noop() {
            let mut store = seeded(&[("a", "1")]);
            store.set("b", None);
            assert_eq!(store.len(), 1);
        }

        #[test]
        fn test_merge() {
            let mut store = seeded(&[("blub", "14"), ("keep", "k")]);
            let updates = Replacements::new().without("blub").with("blubber", "1212");

            store.merge(&updates);

            assert!(!store.contains("blub"));
            assert!(store.contains("keep"));
            assert_eq!(store.get("blubber"), Some("1212"));
        }
    }

    mod substitute {
        use super::*;

        #[test]
        fn test_known_placeholder() {
            let store = seeded(&[("user", "alice")]);
            assert_eq!(
                store.substitute("/srv/data/home/${user}/docs", None),
                "/srv/data/home/alice/docs"
            );
        }

        #[test]
        fn test_unknown_placeholder_kept_verbatim() {
            let store = seeded(&[("user", "alice")]);
            assert_eq!(
                store.substitute("/a/${unknown}/${user}", None),
                "/a/${unknown}/alice"
            );
        }

        #[test]
        fn test_substitution_is_not_recursive() {
            let store = seeded(&[("a", "${b}"), ("b", "never")]);
            assert_eq!(store.substitute("/x/${a}", None), "/x/${b}");
        }

        #[test]
        fn test_repeated_placeholder() {
            let store = seeded(&[("v", "1")]);
            assert_eq!(store.substitute("${v}-${v}/${v}", None), "1-1/1");
        }

        #[test]
        fn test_identifier_charset() {
            let store = seeded(&[("a.b-c_1", "ok"), ("with space", "no")]);
            assert_eq!(store.substitute("${a.b-c_1}", None), "ok");
            assert_eq!(store.substitute("${with space}", None), "${with space}");
            assert_eq!(store.substitute("${}", None), "${}");
            assert_eq!(store.substitute("$user {user}", None), "$user {user}");
        }

        #[test]
        fn test_dollar_in_value_is_literal() {
            let store = seeded(&[("price", "$1")]);
            assert_eq!(store.substitute("/${price}", None), "/$1");
        }

        #[test]
        fn test_overlay_shadows_store() {
            let store = seeded(&[("user", "alice"), ("proj", "p0")]);
            let overlay = Replacements::new().with("proj", "x1").without("user");
            assert_eq!(
                store.substitute("/${user}/${proj}", Some(&overlay)),
                "/${user}/x1"
            );
            // store untouched
            assert_eq!(store.get("proj"), Some("p0"));
        }
    }

    mod dynamic {
        use super::*;

        #[test]
        fn test_from_array_and_iter() {
            let dynamic = Replacements::from([("b", "2"), ("a", "1")]);
            let collected: Vec<_> = dynamic.iter().collect();
            assert_eq!(collected, vec![("a", Some("1")), ("b", Some("2"))]);
        }

        #[test]
        fn test_builder() {
            let mut dynamic = Replacements::new().with("x", "1").without("y");
            dynamic.insert("z", Some("3".to_string()));
            assert_eq!(dynamic.len(), 3);
            assert_eq!(dynamic.lookup("y"), Some(None));
            assert_eq!(dynamic.lookup("missing"), None);
            assert!(Replacements::default().is_empty());
        }
    }
}
