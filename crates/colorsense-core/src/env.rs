//! Immutable environment snapshot.
//!
//! The detector never reads the process environment itself. It is handed an
//! [`Environment`] at construction, which keeps detection pure with respect
//! to its inputs and lets tests describe any terminal setup.

use std::collections::BTreeMap;
use std::ffi::OsStr;

/// A read-only mapping from variable name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Captures the current process environment.
    ///
    /// Variables whose names are not valid UTF-8 are skipped; values are
    /// converted lossily.
    pub fn capture() -> Self {
        std::env::vars_os()
            .filter_map(|(name, value)| {
                let name = name.into_string().ok()?;
                Some((name, value.to_string_lossy().into_owned()))
            })
            .collect()
    }

    /// Returns the value of `name`, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Returns `true` if `name` is set, even to an empty value.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Returns `true` if `name` is set to a non-empty value.
    pub fn is_non_empty(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_empty())
    }

    /// Returns the value of `name` as an `OsStr`, for path-like variables.
    pub fn get_os(&self, name: &str) -> Option<&OsStr> {
        self.get(name).map(OsStr::new)
    }

    /// Iterates over every variable, sorted by name.
    pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of variables in the snapshot.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if the snapshot holds no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_and_presence() {
        let env: Environment = [("TERM", "xterm"), ("COLORTERM", "")].into_iter().collect();
        assert_eq!(env.get("TERM"), Some("xterm"));
        assert_eq!(env.get("ANSICON"), None);
        assert!(env.contains("COLORTERM"));
        assert!(!env.is_non_empty("COLORTERM"));
        assert!(env.is_non_empty("TERM"));
        assert_eq!(env.len(), 2);
        assert_eq!(
            env.vars().collect::<Vec<_>>(),
            vec![("COLORTERM", ""), ("TERM", "xterm")]
        );
    }

    #[test]
    fn empty_snapshot() {
        let env = Environment::default();
        assert!(env.is_empty());
        assert!(!env.contains("TERM"));
    }

    #[test]
    fn capture_reads_process_environment() {
        // PATH is set in every reasonable test environment.
        let env = Environment::capture();
        assert_eq!(env.get("PATH").is_some(), std::env::var_os("PATH").is_some());
    }
}
