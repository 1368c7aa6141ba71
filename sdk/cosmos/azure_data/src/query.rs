// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::Serialize;

/// A SQL query, with optional named parameters.
///
/// Simple queries convert straight from a string:
///
/// ```rust
/// # use azure_data::Query;
/// let query: Query = "SELECT * FROM c".into();
/// ```
///
/// Parameters are named with an `@` prefix and may be any serializable value:
///
/// ```rust
/// # use azure_data::Query;
/// let query = Query::from("SELECT * FROM c WHERE c.customNumber = @n")
///     .with_parameter("@n", 42)
///     .unwrap();
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct Query {
    #[serde(rename = "query")]
    text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    parameters: Vec<QueryParameter>,
}

/// A named query parameter.
#[derive(Clone, Debug, Serialize)]
pub struct QueryParameter {
    name: String,
    value: serde_json::Value,
}

impl Query {
    /// Adds a parameter, serializing its value to JSON.
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Serialize,
    ) -> crate::Result<Self> {
        self.parameters.push(QueryParameter {
            name: name.into(),
            value: serde_json::to_value(value)?,
        });
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parameters(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.parameters.iter().map(|p| (p.name.as_str(), &p.value))
    }
}

impl<T: Into<String>> From<T> for Query {
    fn from(value: T) -> Self {
        Query {
            text: value.into(),
            parameters: Vec::new(),
        }
    }
}
