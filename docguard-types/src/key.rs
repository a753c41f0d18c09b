//! Ancestry keys.
//!
//! A [`Key`] is an ordered path of `(Kind, Identifier)` pairs. The last pair
//! names the entity itself; the preceding pairs name its ancestors. Lookups
//! by key are strongly consistent in the target store, which is what makes
//! the ancestry uniqueness check usable right after a sibling write.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The type name of an entity, e.g. `"User"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kind(String);

impl Kind {
    /// Creates a kind from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the kind name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Kind {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Kind {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for Kind {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Kind {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Identifier of an entity within its parent and kind.
///
/// Serialized untagged, so a key renders as `[["Parent", 1], ["Child", "bar"]]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    /// Numeric id.
    Int(i64),
    /// String id (application-chosen or generated).
    Name(String),
}

impl Identifier {
    /// Generates a fresh identifier.
    /// Uses UUID v7 so generated ids sort by creation time.
    #[must_use]
    pub fn generate() -> Self {
        Self::Name(Uuid::now_v7().to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Name(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Identifier {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

/// Ordered ancestry chain identifying one entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<(Kind, Identifier)>", into = "Vec<(Kind, Identifier)>")]
pub struct Key {
    pairs: Vec<(Kind, Identifier)>,
}

impl Key {
    /// Builds a key from an ordered list of `(kind, id)` pairs.
    pub fn new<I, K, D>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<Kind>,
        D: Into<Identifier>,
    {
        let pairs: Vec<(Kind, Identifier)> = pairs
            .into_iter()
            .map(|(k, id)| (k.into(), id.into()))
            .collect();
        Self::from_pairs(pairs)
    }

    fn from_pairs(pairs: Vec<(Kind, Identifier)>) -> Result<Self> {
        if pairs.is_empty() {
            return Err(Error::EmptyKey);
        }
        for (kind, id) in &pairs {
            check_pair(kind, id)?;
        }
        Ok(Self { pairs })
    }

    /// Key of a root entity (no ancestors).
    pub fn root(kind: impl Into<Kind>, id: impl Into<Identifier>) -> Result<Self> {
        Self::from_pairs(vec![(kind.into(), id.into())])
    }

    /// Returns a new key one level below this one.
    pub fn child(&self, kind: impl Into<Kind>, id: impl Into<Identifier>) -> Result<Self> {
        let (kind, id) = (kind.into(), id.into());
        check_pair(&kind, &id)?;
        let mut pairs = self.pairs.clone();
        pairs.push((kind, id));
        Ok(Self { pairs })
    }

    /// The entity's own kind (last pair).
    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.last().0
    }

    /// The entity's own identifier (last pair).
    #[must_use]
    pub fn id(&self) -> &Identifier {
        &self.last().1
    }

    /// The parent key, or `None` for a root entity.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.pairs.len() < 2 {
            return None;
        }
        Some(Self {
            pairs: self.pairs[..self.pairs.len() - 1].to_vec(),
        })
    }

    /// All `(kind, id)` pairs, root first.
    #[must_use]
    pub fn pairs(&self) -> &[(Kind, Identifier)] {
        &self.pairs
    }

    /// Number of pairs in the path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.pairs.len()
    }

    /// True if `other` lies strictly below this key.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        other.pairs.len() > self.pairs.len() && other.pairs.starts_with(&self.pairs)
    }

    /// JSON form used when a key is stored as a property value.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.pairs
                .iter()
                .map(|(kind, id)| {
                    let id = match id {
                        Identifier::Int(n) => serde_json::Value::from(*n),
                        Identifier::Name(s) => serde_json::Value::from(s.as_str()),
                    };
                    serde_json::Value::Array(vec![kind.as_str().into(), id])
                })
                .collect(),
        )
    }

    /// Decodes a key previously written with [`Key::to_value`].
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let pairs: Vec<(Kind, Identifier)> = serde_json::from_value(value.clone())
            .map_err(|e| Error::MalformedKey(e.to_string()))?;
        Self::from_pairs(pairs)
    }

    fn last(&self) -> &(Kind, Identifier) {
        // Construction guarantees at least one pair.
        &self.pairs[self.pairs.len() - 1]
    }
}

fn check_pair(kind: &Kind, id: &Identifier) -> Result<()> {
    if kind.as_str().is_empty() {
        return Err(Error::EmptyName("kind"));
    }
    if matches!(id, Identifier::Name(s) if s.is_empty()) {
        return Err(Error::EmptyName("identifier"));
    }
    Ok(())
}

impl TryFrom<Vec<(Kind, Identifier)>> for Key {
    type Error = Error;

    fn try_from(pairs: Vec<(Kind, Identifier)>) -> Result<Self> {
        Self::from_pairs(pairs)
    }
}

impl From<Key> for Vec<(Kind, Identifier)> {
    fn from(key: Key) -> Self {
        key.pairs
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (kind, id)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind}:{id}")?;
        }
        Ok(())
    }
}
