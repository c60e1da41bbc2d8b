//! # Path-Aware JSON Access
//!
//! Bundle documents are parsed into `serde_json::Value` first and then
//! walked with a [`Node`], which remembers the document name and the dotted
//! path it was reached by. Every accessor that can fail returns a
//! [`SchemaError`] naming that path, e.g.
//! `services[0].configuration.dataEndpoints[2].queryParameters[1].name`.

use serde_json::{Map, Value};

use crate::error::SchemaError;

/// A borrowed position inside a parsed document.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    document: &'a str,
    path: String,
    value: &'a Value,
}

impl<'a> Node<'a> {
    /// Start at the top of a document.
    pub fn root(document: &'a str, value: &'a Value) -> Self {
        Self {
            document,
            path: String::new(),
            value,
        }
    }

    /// Name of the document this node belongs to.
    pub fn document(&self) -> &'a str {
        self.document
    }

    /// Dotted path of this node. The document root is `$`.
    pub fn path(&self) -> &str {
        if self.path.is_empty() {
            "$"
        } else {
            &self.path
        }
    }

    /// The raw JSON value at this node.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Descend into a required object field.
    pub fn field(&self, key: &str) -> Result<Node<'a>, SchemaError> {
        self.optional(key)?.ok_or_else(|| SchemaError::MissingField {
            document: self.document.to_string(),
            path: self.child_path(key),
        })
    }

    /// Descend into an object field that may be absent.
    ///
    /// A key holding JSON `null` is reported as present.
    pub fn optional(&self, key: &str) -> Result<Option<Node<'a>>, SchemaError> {
        let object = self.as_object()?;
        Ok(object.get(key).map(|value| Node {
            document: self.document,
            path: self.child_path(key),
            value,
        }))
    }

    /// Descend into a required list element.
    pub fn index(&self, index: usize) -> Result<Node<'a>, SchemaError> {
        let items = self.as_array()?;
        let path = format!("{}[{index}]", self.path);
        match items.get(index) {
            Some(value) => Ok(Node {
                document: self.document,
                path,
                value,
            }),
            None => Err(SchemaError::MissingField {
                document: self.document.to_string(),
                path,
            }),
        }
    }

    /// Iterate the elements of a list, each with its indexed path.
    pub fn elements(&self) -> Result<impl Iterator<Item = Node<'a>> + '_, SchemaError> {
        let items = self.as_array()?;
        Ok(items.iter().enumerate().map(move |(i, value)| Node {
            document: self.document,
            path: format!("{}[{i}]", self.path),
            value,
        }))
    }

    /// Read this node as an object.
    pub fn as_object(&self) -> Result<&'a Map<String, Value>, SchemaError> {
        self.value.as_object().ok_or_else(|| self.wrong_type("object"))
    }

    /// Read this node as a list.
    pub fn as_array(&self) -> Result<&'a Vec<Value>, SchemaError> {
        self.value.as_array().ok_or_else(|| self.wrong_type("array"))
    }

    /// Read this node as a string.
    pub fn as_str(&self) -> Result<&'a str, SchemaError> {
        self.value.as_str().ok_or_else(|| self.wrong_type("string"))
    }

    /// Read this node as a boolean.
    pub fn as_bool(&self) -> Result<bool, SchemaError> {
        self.value.as_bool().ok_or_else(|| self.wrong_type("boolean"))
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn wrong_type(&self, expected: &'static str) -> SchemaError {
        SchemaError::WrongType {
            document: self.document.to_string(),
            path: self.path().to_string(),
            expected,
            found: json_type_name(self.value),
        }
    }
}

/// Human-readable JSON type name used in schema errors.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
