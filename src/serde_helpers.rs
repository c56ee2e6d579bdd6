use crate::eve::EveEventType;
use crate::value::FieldValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Serde deserialize function that reads a flow id from either a json number or a string.
/// Empty strings and other types are treated as missing.
pub fn deserialize_flow_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<Value> = Deserialize::deserialize(deserializer)?;
    let r = match v {
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    };
    Ok(r)
}

/// Serde deserialize function that reads any json value as an optional cell
pub fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<Value> = Deserialize::deserialize(deserializer)?;
    Ok(v.as_ref().and_then(FieldValue::from_json))
}

/// Serde deserialize function for event types. Anything that is not a string is missing.
pub fn deserialize_event_type<'de, D>(deserializer: D) -> Result<Option<EveEventType>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<Value> = Deserialize::deserialize(deserializer)?;
    Ok(v.as_ref()
        .and_then(Value::as_str)
        .map(EveEventType::from))
}

/// Serde deserialize function for nested sections (`flow`, `alert`, ...). A section that is not
/// a json object, or that does not fit `T`, is dropped instead of failing the whole record.
pub fn deserialize_section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v: Option<Value> = Deserialize::deserialize(deserializer)?;
    let r = match v {
        Some(v @ Value::Object(_)) => serde_json::from_value(v)
            .map_err(|e| log::debug!("Dropping section: {}", e))
            .ok(),
        _ => None,
    };
    Ok(r)
}

/// Serde deserialize function that keeps the string entries of a json list
pub fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<Value> = Deserialize::deserialize(deserializer)?;
    let r = match v {
        Some(Value::Array(values)) => Some(
            values
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    };
    Ok(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct FlowIdTest {
        #[serde(default, deserialize_with = "deserialize_flow_id")]
        flow_id: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    struct ListTest {
        #[serde(default, deserialize_with = "deserialize_string_list")]
        flowbits: Option<Vec<String>>,
    }

    #[test]
    fn test_flow_id() {
        let numeric: FlowIdTest =
            serde_json::from_str(r#"{"flow_id":2061665895874790}"#).expect("Failed to parse");
        assert_eq!(numeric.flow_id, Some("2061665895874790".to_owned()));

        let text: FlowIdTest = serde_json::from_str(r#"{"flow_id":"1"}"#).expect("Failed to parse");
        assert_eq!(text.flow_id, Some("1".to_owned()));

        let empty: FlowIdTest = serde_json::from_str(r#"{"flow_id":""}"#).expect("Failed to parse");
        assert!(empty.flow_id.is_none());

        let null: FlowIdTest = serde_json::from_str(r#"{"flow_id":null}"#).expect("Failed to parse");
        assert!(null.flow_id.is_none());

        let missing: FlowIdTest = serde_json::from_str(r#"{}"#).expect("Failed to parse");
        assert!(missing.flow_id.is_none());
    }

    #[test]
    fn test_string_list() {
        let bits: ListTest = serde_json::from_str(r#"{"flowbits":["ET-POLICY", 3, "TOR"]}"#)
            .expect("Failed to parse");
        assert_eq!(
            bits.flowbits,
            Some(vec!["ET-POLICY".to_owned(), "TOR".to_owned()])
        );

        let not_a_list: ListTest =
            serde_json::from_str(r#"{"flowbits":"TOR"}"#).expect("Failed to parse");
        assert!(not_a_list.flowbits.is_none());
    }
}
