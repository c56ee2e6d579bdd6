use crate::config::columns::FLOW_ID;
use crate::config::MergePolicy;
use crate::value::FieldValue;
use std::collections::HashMap;

/// One output row: every column a flow id has populated so far
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedFlow {
    flow_id: String,
    fields: HashMap<&'static str, FieldValue>,
}

impl AggregatedFlow {
    pub fn new(flow_id: String) -> Self {
        let mut fields = HashMap::new();
        fields.insert(FLOW_ID, FieldValue::Text(flow_id.clone()));
        Self { flow_id, fields }
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// Cell text for CSV output, empty when the column was never populated
    pub fn render(&self, column: &str) -> String {
        self.get(column).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Populated columns, `flow_id` included, in no particular order
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// Number of populated columns, `flow_id` included
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Write `value` into `column` under `policy`. A missing value never erases a cell.
    pub fn merge(&mut self, column: &'static str, value: Option<FieldValue>, policy: MergePolicy) {
        let value = match value {
            Some(v) => v,
            None => return,
        };
        match policy {
            MergePolicy::FirstWins => {
                self.fields.entry(column).or_insert(value);
            }
            MergePolicy::LastWins => {
                self.fields.insert(column, value);
            }
        }
    }

    pub fn clear(&mut self, column: &'static str) {
        if column != FLOW_ID {
            self.fields.remove(column);
        }
    }
}
