use indexmap::IndexMap;
use serde_json::{Map, Value};

/// In-progress values of one form, in the order they were first set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    values: IndexMap<String, Value>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Stores `value`; `None` removes the entry.
    pub fn set(&mut self, name: &str, value: Option<Value>) {
        match value {
            Some(value) => {
                self.values.insert(name.to_string(), value);
            }
            None => {
                self.values.shift_remove(name);
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    /// Keeps only the entries named in `keep`.
    pub fn retain(&mut self, keep: &[&str]) {
        self.values.retain(|name, _| keep.contains(&name.as_str()));
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// The submitted shape: every entry except nulls.
    pub fn clean(&self) -> Map<String, Value> {
        self.values
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Copies every member of a JSON object.
    pub fn extend_from(&mut self, object: &Map<String, Value>) {
        for (name, value) in object {
            self.values.insert(name.clone(), value.clone());
        }
    }
}

/// `true` when a required field should be reported as missing.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}
