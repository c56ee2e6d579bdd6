use crate::serde_helpers::deserialize_scalar;
use crate::value::FieldValue;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct HttpInfo {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub hostname: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub url: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub http_user_agent: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub http_content_type: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub http_refer: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub http_method: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub protocol: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub status: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub length: Option<FieldValue>,
}
