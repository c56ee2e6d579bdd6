use crate::serde_helpers::deserialize_string_list;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub flowbits: Option<Vec<String>>,
}
