use std::{collections::HashMap, fmt::Display};

/// A json number. Whether a numeral becomes an integer or a float only
/// depends on its spelling: a `.` or an exponent makes it a float.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(num) => Some(*num),
            Self::Float(_) => None,
        }
    }

    /// Integers are widened, which may lose precision above 2^53.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Integer(num) => *num as f64,
            Self::Float(num) => *num,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{:?}", num),
        }
    }
}

/// Objects are unordered: duplicate keys keep the last member.
#[derive(Debug, PartialEq, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(HashMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(bool) => Some(*bool),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(num) => Some(num),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(str) => Some(str),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Member of an object, `None` for any other value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Element of an array, `None` for any other value.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|array| array.get(index))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(Number::Integer(_)) => "integer",
            Self::Number(Number::Float(_)) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self::Object(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        assert!(Value::Null.is_null());
        assert!(Value::Bool(true).is_bool());
        assert!(Value::Number(Number::Integer(1)).is_number());
        assert!(Value::String("a".into()).is_string());
        assert!(Value::Array(vec![]).is_array());
        assert!(Value::Object(HashMap::new()).is_object());
    }

    #[test]
    fn numbers_keep_their_representation() {
        assert_eq!(Value::Number(Number::Integer(2)).as_i64(), Some(2));
        assert_eq!(Value::Number(Number::Float(2.0)).as_i64(), None);
        assert_eq!(Value::Number(Number::Integer(2)).as_f64(), Some(2.0));
        assert!(Number::Float(2.0).is_float());
        assert_eq!(Number::Float(2.0).to_string(), "2.0");
        assert_eq!(Number::Integer(-7).to_string(), "-7");
    }

    #[test]
    fn lookups() {
        let value: Value = vec![(
            "list".to_string(),
            Value::Array(vec![Value::Null, Value::String("x".into())]),
        )]
        .into_iter()
        .collect();

        assert_eq!(value.get("list").and_then(|l| l.get_index(1)), Some(&Value::String("x".into())));
        assert_eq!(value.get("missing"), None);
        assert_eq!(value.get_index(0), None);
        assert_eq!(Value::String("x".into()).get("list"), None);
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Bool(false).type_name(), "boolean");
        assert_eq!(Value::Number(Number::Integer(1)).type_name(), "integer");
        assert_eq!(Value::Number(Number::Float(1.5)).type_name(), "float");
        assert_eq!(Value::String("s".into()).type_name(), "string");
        assert_eq!(Value::Array(vec![]).type_name(), "array");
        assert_eq!(Value::Object(HashMap::new()).type_name(), "object");
    }
}
