// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

use std::borrow::Borrow;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::handle::HandleLabel;

/// A stable identifier branded with the entity kind it names.
///
/// The brand is a zero-sized tag, so a `PersonId` cannot be passed where a
/// `NodeId` is expected. Ids are plain strings on the wire; validation only
/// enforces that the id is a non-empty token without `:` or whitespace,
/// because node ids appear as the prefix of composed handle ids
/// (`{node_id}:{label}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id_token(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T: IdKind> Id<T> {
    /// Produces a fresh process-unique id (`node_1`, `arrow_2`, ...).
    pub fn generate() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        let seq = NEXT.fetch_add(1, Ordering::Relaxed);
        Self {
            value: format!("{}_{seq}", T::PREFIX),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(D::Error::custom)
    }
}

impl<T> schemars::JsonSchema for Id<T> {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("Id")
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        String::json_schema(generator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsColon,
    ContainsWhitespace,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::ContainsColon => f.write_str("id must not contain ':'"),
            Self::ContainsWhitespace => f.write_str("id must not contain whitespace"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_id_token(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains(':') {
        return Err(IdError::ContainsColon);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(IdError::ContainsWhitespace);
    }
    Ok(())
}

/// Prefix used by [`Id::generate`] for each entity kind.
pub trait IdKind {
    const PREFIX: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
impl IdKind for NodeIdTag {
    const PREFIX: &'static str = "node";
}
pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArrowIdTag {}
impl IdKind for ArrowIdTag {
    const PREFIX: &'static str = "arrow";
}
pub type ArrowId = Id<ArrowIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PersonIdTag {}
impl IdKind for PersonIdTag {
    const PREFIX: &'static str = "person";
}
pub type PersonId = Id<PersonIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiKeyIdTag {}
impl IdKind for ApiKeyIdTag {
    const PREFIX: &'static str = "apikey";
}
pub type ApiKeyId = Id<ApiKeyIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExecutionIdTag {}
impl IdKind for ExecutionIdTag {
    const PREFIX: &'static str = "exec";
}
pub type ExecutionId = Id<ExecutionIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagramIdTag {}
impl IdKind for DiagramIdTag {
    const PREFIX: &'static str = "diagram";
}
pub type DiagramId = Id<DiagramIdTag>;

/// A handle identifier in the canonical `{node_id}:{label}` grammar.
///
/// Direction is an attribute of the handle record, never part of the id. The
/// legacy underscore grammar (`{node_id}_{label}_{direction}`) is not
/// accepted: it cannot be parsed reliably once node ids contain underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(String);

impl HandleId {
    pub fn compose(node_id: &NodeId, label: HandleLabel) -> Self {
        Self(format!("{node_id}:{}", label.as_str()))
    }

    /// Splits the id back into its owning node id and handle label.
    pub fn parse(&self) -> Result<(NodeId, HandleLabel), HandleIdError> {
        Self::parse_str(&self.0)
    }

    pub fn parse_str(raw: &str) -> Result<(NodeId, HandleLabel), HandleIdError> {
        let Some((node_part, label_part)) = raw.split_once(':') else {
            return Err(HandleIdError::MissingSeparator {
                id: raw.to_owned(),
            });
        };
        let node_id = NodeId::new(node_part).map_err(|reason| HandleIdError::InvalidNodeId {
            id: raw.to_owned(),
            reason,
        })?;
        let label =
            HandleLabel::from_str(label_part).map_err(|_| HandleIdError::UnknownLabel {
                id: raw.to_owned(),
                label: label_part.to_owned(),
            })?;
        Ok((node_id, label))
    }

    /// Parses and validates an externally supplied handle id.
    pub fn from_raw(raw: impl Into<String>) -> Result<Self, HandleIdError> {
        let raw = raw.into();
        Self::parse_str(&raw)?;
        Ok(Self(raw))
    }

    /// The owning node id, recoverable from the id prefix.
    pub fn node_id(&self) -> Result<NodeId, HandleIdError> {
        self.parse().map(|(node_id, _)| node_id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HandleId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for HandleId {
    type Err = HandleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_raw(s.to_owned())
    }
}

impl Serialize for HandleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HandleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::from_raw(value).map_err(D::Error::custom)
    }
}

impl schemars::JsonSchema for HandleId {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("HandleId")
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        String::json_schema(generator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleIdError {
    MissingSeparator { id: String },
    InvalidNodeId { id: String, reason: IdError },
    UnknownLabel { id: String, label: String },
}

impl fmt::Display for HandleIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator { id } => {
                write!(f, "handle id '{id}' is missing the ':' separator")
            }
            Self::InvalidNodeId { id, reason } => {
                write!(f, "handle id '{id}' has an invalid node prefix: {reason}")
            }
            Self::UnknownLabel { id, label } => {
                write!(f, "handle id '{id}' has an unknown label '{label}'")
            }
        }
    }
}

impl std::error::Error for HandleIdError {}
