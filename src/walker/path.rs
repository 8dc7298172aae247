//! Document paths
//!
//! A [`SpecPath`] addresses a node from the document root as a sequence of
//! object keys and array indices. It serializes as a plain JSON array
//! (`["paths", "/pets", "parameters", 0]`) and displays in dotted form
//! (`paths./pets.parameters[0]`).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One step from a parent node to a child
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object member name
    Key(String),
    /// Array element position
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{}", key),
            Self::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Absolute location of a node in the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecPath(Vec<PathSegment>);

impl SpecPath {
    /// The document root
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of a direct child of this node
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }

    /// Look the path up in `document`, returning the addressed node
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.0.iter().try_fold(document, |node, segment| match segment {
            PathSegment::Key(key) => node.as_object()?.get(key),
            PathSegment::Index(index) => node.as_array()?.get(*index),
        })
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for SpecPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for SpecPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i > 0 => write!(f, ".{}", key)?,
                other => write!(f, "{}", other)?,
            }
        }
        Ok(())
    }
}

/// Build a [`SpecPath`] from mixed keys and indices
///
/// ```
/// use swagger_semantics::spec_path;
/// let path = spec_path!["paths", "/pets", "parameters", 0usize, "$ref"];
/// assert_eq!(path.to_string(), "paths./pets.parameters[0].$ref");
/// ```
#[macro_export]
macro_rules! spec_path {
    () => { $crate::walker::SpecPath::root() };
    ($($segment:expr),+ $(,)?) => {
        <$crate::walker::SpecPath as ::core::iter::FromIterator<$crate::walker::PathSegment>>::from_iter(
            [$($crate::walker::PathSegment::from($segment)),+]
        )
    };
}
