use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Number, Value};

/// Nested settings keyed by name, in declaration order.
pub type ConfigTree = IndexMap<String, ConfigValue>;

/// A single node of a configuration tree.
///
/// Leaves are scalars or lists; inner nodes are [`ConfigValue::Tree`]. The
/// serialized form maps one to one onto JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    /// Only holds integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Tree(ConfigTree),
}

impl ConfigValue {
    /// Looks up one path segment below this node.
    ///
    /// Trees are indexed by key and lists by a decimal position. Scalars have
    /// no children, so every segment is absent for them.
    pub fn get(&self, segment: &str) -> Option<&ConfigValue> {
        match self {
            ConfigValue::Tree(tree) => tree.get(segment),
            ConfigValue::List(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ConfigValue::Integer(value) => u64::try_from(*value).ok(),
            ConfigValue::Unsigned(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(value) => Some(*value),
            ConfigValue::Integer(value) => Some(*value as f64),
            ConfigValue::Unsigned(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&ConfigTree> {
        match self {
            ConfigValue::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Converts this value into a caller-defined settings type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::from(self.clone()))
    }
}

impl From<Value> for ConfigValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(value) => ConfigValue::Bool(value),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    ConfigValue::Integer(value)
                } else if let Some(value) = number.as_u64() {
                    ConfigValue::Unsigned(value)
                } else {
                    number
                        .as_f64()
                        .map_or(ConfigValue::Null, ConfigValue::Float)
                }
            }
            Value::String(value) => ConfigValue::String(value),
            Value::Array(items) => {
                ConfigValue::List(items.into_iter().map(ConfigValue::from).collect())
            }
            Value::Object(map) => ConfigValue::Tree(
                map.into_iter()
                    .map(|(key, value)| (key, ConfigValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<ConfigValue> for Value {
    fn from(value: ConfigValue) -> Self {
        match value {
            ConfigValue::Null => Value::Null,
            ConfigValue::Bool(value) => Value::Bool(value),
            ConfigValue::Integer(value) => Value::Number(value.into()),
            ConfigValue::Unsigned(value) => Value::Number(value.into()),
            // JSON has no NaN or infinity
            ConfigValue::Float(value) => Number::from_f64(value).map_or(Value::Null, Value::Number),
            ConfigValue::String(value) => Value::String(value),
            ConfigValue::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            ConfigValue::Tree(tree) => Value::Object(
                tree.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<ConfigTree> for ConfigValue {
    fn from(tree: ConfigTree) -> Self {
        ConfigValue::Tree(tree)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::List(items)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}
