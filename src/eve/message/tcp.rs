use crate::serde_helpers::deserialize_scalar;
use crate::value::FieldValue;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Tcp {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub tcp_flags: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub tcp_flags_ts: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub tcp_flags_tc: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub syn: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub rst: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub psh: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub ack: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub fin: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub state: Option<FieldValue>,
}
