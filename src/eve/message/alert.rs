use crate::serde_helpers::deserialize_scalar;
use crate::value::FieldValue;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AlertInfo {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub action: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub gid: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub signature_id: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub rev: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub signature: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub category: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub severity: Option<FieldValue>,
}
