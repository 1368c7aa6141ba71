// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde_json::Value;

/// The partition key value of a document, sent in `x-ms-documentdb-partitionkey`.
///
/// Values are strings, numbers, booleans or `null`, and convert from the corresponding Rust types:
///
/// ```rust
/// use azure_data::PartitionKey;
///
/// let pk = PartitionKey::from("PartitionKeyValue");
/// assert_eq!(pk.to_header_value().unwrap(), r#"["PartitionKeyValue"]"#);
///
/// let pk = PartitionKey::from(43);
/// assert_eq!(pk.to_header_value().unwrap(), "[43]");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionKey(Vec<Value>);

impl PartitionKey {
    /// The partition key of documents whose partition key property is `null`.
    pub fn null() -> Self {
        PartitionKey(vec![Value::Null])
    }

    /// Builds a partition key from an already-extracted JSON value.
    ///
    /// Returns `None` for arrays and objects, which can't be partition key values.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(_) | Value::Object(_) => None,
            v => Some(PartitionKey(vec![v])),
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Serializes the key as the JSON array the service expects.
    pub fn to_header_value(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

macro_rules! impl_from_for_partition_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PartitionKey {
                fn from(value: $t) -> Self {
                    PartitionKey(vec![Value::from(value)])
                }
            }
        )*
    };
}

impl_from_for_partition_key!(&str, String, bool, i32, i64, u32, u64, f64);

impl From<&String> for PartitionKey {
    fn from(value: &String) -> Self {
        PartitionKey(vec![Value::from(value.as_str())])
    }
}
