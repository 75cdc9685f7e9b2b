//! Paths from the root of a trace tree.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

/// One step of an address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Field(String),
    Index(usize),
}

impl From<&str> for Key {
    fn from(field: &str) -> Self {
        Key::Field(field.to_owned())
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Field(name) => f.write_str(name),
            Key::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Path of keys from the root. Most addresses in compiled programs are a
/// handful of steps deep, so they live inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address(SmallVec<[Key; 6]>);

impl Address {
    /// The root address.
    pub fn root() -> Self {
        Address(SmallVec::new())
    }

    #[must_use]
    pub fn child(&self, key: impl Into<Key>) -> Self {
        let mut path = self.0.clone();
        path.push(key.into());
        Address(path)
    }

    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Address of the parent node, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.0.split_last()?;
        Some(Address(init.iter().cloned().collect()))
    }
}

impl<K: Into<Key>> FromIterator<K> for Address {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Address(iter.into_iter().map(Into::into).collect())
    }
}

/// Addresses print as `/`-separated keys; the root prints as `/`.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

/// Parses the `Display` form; all-digit segments are indices.
impl FromStr for Address {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.parse::<usize>() {
                Ok(i) => Key::Index(i),
                Err(_) => Key::Field(segment.to_owned()),
            })
            .collect())
    }
}
