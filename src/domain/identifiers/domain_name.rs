use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::AppError;
use crate::impl_validated_id;

/// A validated domain identifier.
///
/// Domain names double as file stems under `domains/` and as job keys in the
/// scheduler, so they follow the same rules as other identifiers:
/// - Non-empty
/// - Contains only alphanumeric characters, `-`, or `_`
/// - No path traversal components
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainName(String);

impl_validated_id!(DomainName, AppError::InvalidDomainName);

impl From<DomainName> for String {
    fn from(val: DomainName) -> Self {
        val.0
    }
}

impl Serialize for DomainName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DomainName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DomainName::new(&s).map_err(serde::de::Error::custom)
    }
}
