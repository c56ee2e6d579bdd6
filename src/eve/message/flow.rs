use crate::serde_helpers::deserialize_scalar;
use crate::value::FieldValue;
use serde::Deserialize;

/// The `flow` section of a flow event
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FlowInfo {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub pkts_toserver: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub pkts_toclient: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub bytes_toserver: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub bytes_toclient: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub start: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub end: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub age: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub state: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub reason: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub alerted: Option<FieldValue>,
}
