//! Label Sets
//!
//! Canonical, order-independent identity for one dimension combination.

use std::fmt;

use crate::error::{Error, Result};

/// Label name reserved for the bucket upper bound on `_bucket` lines.
pub const BUCKET_LABEL: &str = "le";

/// Immutable set of label pairs with unique keys.
///
/// Pairs are kept sorted by key, so two sets built from the same pairs in a
/// different order compare and hash equal. The sorted order is also the order
/// the encoder renders them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelSet {
    pairs: Vec<(String, String)>,
}

impl LabelSet {
    /// Build a canonical label set from caller-supplied pairs.
    ///
    /// Fails with [`Error::InvalidLabelSet`] on a duplicate key, a key that is
    /// not a valid label name, or a reserved key (`le`, `__*`).
    pub fn new<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        for (key, _) in &pairs {
            validate_label_name(key)?;
        }

        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(dup) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(Error::InvalidLabelSet(format!(
                "duplicate label key '{}'",
                dup[0].0
            )));
        }

        Ok(Self { pairs })
    }

    /// The empty label set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Look up the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|idx| self.pairs[idx].1.as_str())
    }

    /// Iterate pairs in canonical (key-sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(borrow_pair)
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={:?}", k, v)?;
        }
        f.write_str("}")
    }
}

impl IntoIterator for LabelSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs
            .iter()
            .map(borrow_pair as fn(&'a (String, String)) -> (&'a str, &'a str))
    }
}

fn borrow_pair(pair: &(String, String)) -> (&str, &str) {
    (pair.0.as_str(), pair.1.as_str())
}

fn validate_label_name(key: &str) -> Result<()> {
    let mut chars = key.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if !valid {
        return Err(Error::InvalidLabelSet(format!(
            "'{}' is not a valid label name",
            key
        )));
    }
    if key == BUCKET_LABEL || key.starts_with("__") {
        return Err(Error::InvalidLabelSet(format!(
            "label name '{}' is reserved",
            key
        )));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
