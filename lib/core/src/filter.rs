//! Property filters evaluated by the engine
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::document::Metadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCondition {
    Equals { field: String, value: Value },
    NotEquals { field: String, value: Value },
    GreaterThan { field: String, value: f64 },
    LessThan { field: String, value: f64 },
    GreaterEqual { field: String, value: f64 },
    LessEqual { field: String, value: f64 },
    /// Substring match on a string property, or membership in a string list
    Contains { field: String, value: String },
    /// Object id is one of the given ids
    IdIn(Vec<String>),
    And(Vec<FilterCondition>),
    Or(Vec<FilterCondition>),
    Not(Box<FilterCondition>),
}

impl FilterCondition {
    pub fn by_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterCondition::IdIn(ids.into_iter().map(Into::into).collect())
    }

    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterCondition::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Evaluate against an object's id and properties
    pub fn matches(&self, id: &str, properties: &Metadata) -> bool {
        match self {
            FilterCondition::Equals { field, value } => {
                field_value(properties, field).map(|v| v == value).unwrap_or(false)
            }
            FilterCondition::NotEquals { field, value } => {
                field_value(properties, field).map(|v| v != value).unwrap_or(true)
            }
            FilterCondition::GreaterThan { field, value } => {
                numeric(properties, field).map(|v| v > *value).unwrap_or(false)
            }
            FilterCondition::LessThan { field, value } => {
                numeric(properties, field).map(|v| v < *value).unwrap_or(false)
            }
            FilterCondition::GreaterEqual { field, value } => {
                numeric(properties, field).map(|v| v >= *value).unwrap_or(false)
            }
            FilterCondition::LessEqual { field, value } => {
                numeric(properties, field).map(|v| v <= *value).unwrap_or(false)
            }
            FilterCondition::Contains { field, value } => match field_value(properties, field) {
                Some(Value::String(s)) => s.contains(value.as_str()),
                Some(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some(value)),
                _ => false,
            },
            FilterCondition::IdIn(ids) => ids.iter().any(|candidate| candidate == id),
            FilterCondition::And(conditions) => conditions.iter().all(|c| c.matches(id, properties)),
            FilterCondition::Or(conditions) => conditions.iter().any(|c| c.matches(id, properties)),
            FilterCondition::Not(condition) => !condition.matches(id, properties),
        }
    }
}

fn field_value<'a>(properties: &'a Metadata, field: &str) -> Option<&'a Value> {
    properties.get(field.strip_prefix('.').unwrap_or(field))
}

fn numeric(properties: &Metadata, field: &str) -> Option<f64> {
    field_value(properties, field).and_then(Value::as_f64)
}
