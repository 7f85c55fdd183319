use {
    crate::{display_json, PolicyGenError, Statement, StatementList},
    derive_builder::Builder,
    serde::{
        ser::{SerializeMap, Serializer},
        Serialize,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// Policy language versions that can be emitted.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PolicyVersion {
    #[default]
    V2012_10_17,
}

impl Display for PolicyVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::V2012_10_17 => f.write_str("2012-10-17"),
        }
    }
}

impl FromStr for PolicyVersion {
    type Err = PolicyGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2012-10-17" => Ok(Self::V2012_10_17),
            _ => Err(PolicyGenError::invalid_format("version", s)),
        }
    }
}

impl Serialize for PolicyVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// The top-level access-policy document.
///
/// This does not derive Serialize so the key order (`Version`, then `Statement`) is spelled out explicitly.
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
pub struct Policy {
    #[builder(setter(into), default)]
    version: PolicyVersion,

    /// Statements in emission order.
    #[builder(setter(into), default)]
    statement: StatementList,
}

impl Policy {
    #[inline]
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    #[inline]
    pub fn version(&self) -> PolicyVersion {
        self.version
    }

    #[inline]
    pub fn statement(&self) -> &[Statement] {
        &self.statement
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.statement.is_empty()
    }
}

display_json!(Policy);

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(2))?;
        state.serialize_entry("Version", &self.version)?;
        state.serialize_entry("Statement", &self.statement)?;
        state.end()
    }
}
