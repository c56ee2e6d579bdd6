use serde_json::Value;

/// A single scalar cell of an aggregated flow row.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

impl FieldValue {
    /// Convert a json value into a cell. `null` has no cell. Arrays are joined with `,` and
    /// objects are kept as compact json text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_u64()
                .map(Self::Unsigned)
                .or_else(|| n.as_i64().map(Self::Integer))
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(values) => {
                let joined: Vec<String> = values
                    .iter()
                    .filter_map(Self::from_json)
                    .map(|v| v.to_string())
                    .collect();
                Some(Self::Text(joined.join(",")))
            }
            Value::Object(_) => Some(Self::Text(value.to_string())),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Unsigned(u) => write!(f, "{}", u),
            // Whole seconds still render as a float, e.g. `10.0`
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{:.1}", v)
            }
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        Self::Unsigned(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_whole_floats_with_one_decimal() {
        assert_eq!(FieldValue::Float(10.0).to_string(), "10.0");
        assert_eq!(FieldValue::Float(0.25).to_string(), "0.25");
        assert_eq!(FieldValue::Float(-3.0).to_string(), "-3.0");
    }

    #[test]
    fn converts_json_scalars() {
        assert_eq!(FieldValue::from_json(&json!(null)), None);
        assert_eq!(FieldValue::from_json(&json!(5)), Some(FieldValue::Unsigned(5)));
        assert_eq!(FieldValue::from_json(&json!(-5)), Some(FieldValue::Integer(-5)));
        assert_eq!(FieldValue::from_json(&json!(1.5)), Some(FieldValue::Float(1.5)));
        assert_eq!(FieldValue::from_json(&json!(true)), Some(FieldValue::Bool(true)));
        assert_eq!(
            FieldValue::from_json(&json!("TCP")),
            Some(FieldValue::Text("TCP".to_owned()))
        );
    }

    #[test]
    fn flattens_arrays_and_objects() {
        assert_eq!(
            FieldValue::from_json(&json!([100, 200])),
            Some(FieldValue::Text("100,200".to_owned()))
        );
        assert_eq!(
            FieldValue::from_json(&json!({"a": 1})),
            Some(FieldValue::Text(r#"{"a":1}"#.to_owned()))
        );
    }
}
