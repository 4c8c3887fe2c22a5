pub mod validation;

use serde::{Deserialize, Deserializer, Serialize};

use crate::impl_validated_id;

/// A validated workflow mode identifier (e.g. `create`, `debug`, `audit`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModeId(String);

impl_validated_id!(ModeId, "mode");

/// A validated form field identifier (e.g. `request-idea`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl_validated_id!(FieldId, "field");

/// A validated action (button) identifier (e.g. `generate-copy-create-request`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl_validated_id!(ActionId, "action");

macro_rules! impl_deserialize_validated {
    ($($name:ident),*) => {
        $(
            impl<'de> Deserialize<'de> for $name {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    let s = String::deserialize(deserializer)?;
                    $name::new(&s).map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

impl_deserialize_validated!(ModeId, FieldId, ActionId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_mode_id() {
        assert!(ModeId::new("create").is_ok());
    }

    #[test]
    fn valid_field_id_with_dashes() {
        assert!(FieldId::new("request-idea").is_ok());
    }

    #[test]
    fn uppercase_is_invalid() {
        assert!(ActionId::new("Generate").is_err());
    }

    #[test]
    fn empty_id_is_invalid() {
        assert!(FieldId::new("").is_err());
    }

    #[test]
    fn leading_dash_is_invalid() {
        assert!(ModeId::new("-create").is_err());
    }

    #[test]
    fn deserialize_rejects_invalid_ids() {
        let parsed: Result<ModeId, _> = serde_json::from_str("\"has space\"");
        assert!(parsed.is_err());
        let parsed: ModeId = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(parsed.as_str(), "debug");
    }

    #[test]
    fn borrow_allows_str_lookups() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(FieldId::new("plan-spec").unwrap(), 1);
        assert_eq!(map.get("plan-spec"), Some(&1));
    }

    #[test]
    fn display_impl() {
        let action = ActionId::new("generate-copy-audit-security").unwrap();
        assert_eq!(format!("{}", action), "generate-copy-audit-security");
    }
}
