//! Admin request model

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// HTTP-style request method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            "OPTIONS" => Ok(Method::Options),
            "HEAD" => Ok(Method::Head),
            other => Err(format!("Unknown request method: {}", other)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A submitted admin form: method plus body fields
#[derive(Debug, Clone, Default)]
pub struct AdminRequest {
    pub method: Option<Method>,
    pub fields: Map<String, Value>,
}

impl AdminRequest {
    pub fn new(method: Option<Method>) -> Self {
        Self {
            method,
            fields: Map::new(),
        }
    }

    pub fn post() -> Self {
        Self::new(Some(Method::Post))
    }

    pub fn get() -> Self {
        Self::new(Some(Method::Get))
    }

    pub fn with_field<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn is_post(&self) -> bool {
        self.method == Some(Method::Post)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String form of a field, if it is a string or number
    pub fn field_str(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Whether a field is present and truthy
    pub fn flag(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(is_truthy)
    }
}

/// Form truthiness: missing, null, false, 0, "", "0" and empty arrays or
/// objects are false
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
