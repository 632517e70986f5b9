//! `key=value` option lists.
//!
//! Every key maps to the ordered list of values it was given, whether it appeared once or many
//! times. Callers that expect a scalar use [`OptionMap::single`], which rejects repeated keys.

use std::collections::BTreeMap;

use crate::error::{LoaderError, LoaderResult};

/// Parsed `key=value` options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    values: BTreeMap<String, Vec<String>>,
}

impl OptionMap {
    /// Parse a list of `key=value` strings. Each string is split at its first `=`.
    pub fn parse<I, S>(args: I) -> LoaderResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            let (key, val) = arg.split_once('=').ok_or_else(|| LoaderError::InvalidOption {
                message: format!("expected key=value, got '{arg}'"),
            })?;
            out.insert(key.trim(), val.trim());
        }
        Ok(out)
    }

    /// Parse a comma-separated list such as `name=bikeid,field_type=int`.
    pub fn parse_list(spec: &str) -> LoaderResult<Self> {
        Self::parse(spec.split(',').filter(|s| !s.trim().is_empty()))
    }

    /// Append a value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(val.into());
    }

    /// All values given for `key`, in input order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The value of a key that must appear at most once.
    pub fn single(&self, key: &str) -> LoaderResult<Option<&str>> {
        match self.get_all(key) {
            [] => Ok(None),
            [one] => Ok(Some(one.as_str())),
            many => Err(LoaderError::InvalidOption {
                message: format!("expected a single value for '{key}', got {many:?}"),
            }),
        }
    }

    /// Like [`Self::single`], but the key must be present.
    pub fn required(&self, key: &str) -> LoaderResult<&str> {
        self.single(key)?.ok_or_else(|| LoaderError::InvalidOption {
            message: format!("missing required option '{key}'"),
        })
    }

    /// A boolean option, `default` when absent.
    pub fn flag(&self, key: &str, default: bool) -> LoaderResult<bool> {
        let Some(raw) = self.single(key)? else {
            return Ok(default);
        };
        match raw.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" => Ok(true),
            "false" | "f" | "0" | "no" | "n" => Ok(false),
            _ => Err(LoaderError::InvalidOption {
                message: format!("expected bool for '{key}', got '{raw}'"),
            }),
        }
    }

    /// Iterate keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_accumulate_in_order() {
        let opts = OptionMap::parse(["tag=a", "name=x", "tag=b", "tag=c"]).unwrap();
        assert_eq!(opts.get_all("tag"), ["a", "b", "c"]);
        assert_eq!(opts.get_all("name"), ["x"]);
        assert!(opts.get_all("missing").is_empty());
        assert_eq!(opts.keys().collect::<Vec<_>>(), vec!["name", "tag"]);
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let opts = OptionMap::parse(["q=a=b"]).unwrap();
        assert_eq!(opts.single("q").unwrap(), Some("a=b"));
    }

    #[test]
    fn single_rejects_repeated_key() {
        let opts = OptionMap::parse(["name=a", "name=b"]).unwrap();
        let msg = opts.single("name").unwrap_err().to_string();
        assert!(msg.contains("expected a single value for 'name'"));
    }

    #[test]
    fn missing_equals_is_an_error() {
        let err = OptionMap::parse(["nokey"]).unwrap_err();
        assert!(err.to_string().contains("expected key=value"));
    }

    #[test]
    fn flags_parse_and_default() {
        let opts = OptionMap::parse_list("facet=false,stored=1").unwrap();
        assert!(!opts.flag("facet", true).unwrap());
        assert!(opts.flag("stored", false).unwrap());
        assert!(opts.flag("indexed", true).unwrap());
        assert!(OptionMap::parse(["facet=maybe"]).unwrap().flag("facet", true).is_err());
    }
}
