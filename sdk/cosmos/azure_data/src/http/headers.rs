// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use std::collections::BTreeMap;
use std::str::FromStr;

/// A set of HTTP headers. Names are case-insensitive and stored lowercased.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing any previous value with the same name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.0
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    pub fn remove(&mut self, name: impl AsRef<str>) -> Option<String> {
        self.0.remove(&name.as_ref().to_ascii_lowercase())
    }

    pub fn get_optional_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.0
            .get(&name.as_ref().to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Gets a header parsed as `T`. Values that don't parse are treated as absent.
    pub fn get_optional_as<T: FromStr>(&self, name: impl AsRef<str>) -> Option<T> {
        self.get_optional_str(name).and_then(|v| v.parse().ok())
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.0.contains_key(&name.as_ref().to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}
