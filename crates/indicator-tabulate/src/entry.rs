//! Ordered field mapping for one decoded log line.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One decoded log entry: field name to pre-formatted text, in arrival
/// order.
///
/// Inserting an existing name replaces its value in place, so a field keeps
/// the position of its first occurrence.
///
/// # Example
///
/// ```rust
/// use indicator_tabulate::LogEntry;
///
/// let mut entry = LogEntry::new();
/// entry.insert("speed", "10.0");
/// entry.insert("rpm", "800");
/// entry.insert("speed", "11.0");
///
/// let names: Vec<_> = entry.names().collect();
/// assert_eq!(names, vec!["speed", "rpm"]);
/// assert_eq!(entry.get("speed"), Some("11.0"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEntry {
    fields: Vec<(String, String)>,
}

impl LogEntry {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(key, _)| key == name)
    }

    /// Returns the value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Sets `name` to `value`, returning the previous value if the field
    /// already existed.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => Some(std::mem::replace(&mut self.fields[index].1, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    /// Removes `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name)
            .map(|index| self.fields.remove(index).1)
    }

    /// Iterates over `(name, value)` pairs in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LogEntry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entry = LogEntry::new();
        for (name, value) in iter {
            entry.insert(name, value);
        }
        entry
    }
}

impl Serialize for LogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_keep_first_position_last_value() {
        let entry: LogEntry = vec![("a", "1"), ("b", "2"), ("a", "3")]
            .into_iter()
            .collect();
        assert_eq!(entry.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn insert_returns_previous_value() {
        let mut entry = LogEntry::new();
        assert_eq!(entry.insert("time", "0.000"), None);
        assert_eq!(entry.insert("time", "1.000"), Some("0.000".to_string()));
        assert_eq!(entry.len(), 1);
    }

    #[test]
    fn remove_then_insert_appends() {
        let mut entry: LogEntry = vec![("position", "(1, 2, 3)"), ("speed", "4")]
            .into_iter()
            .collect();
        assert_eq!(entry.remove("position").as_deref(), Some("(1, 2, 3)"));
        entry.insert("x", "1");
        assert_eq!(entry.names().collect::<Vec<_>>(), vec!["speed", "x"]);
        assert_eq!(entry.remove("missing"), None);
    }

    #[test]
    fn serializes_as_ordered_json_object() {
        let entry: LogEntry = vec![("z", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(serde_json::to_string(&entry).unwrap(), r#"{"z":"1","a":"2"}"#);
    }
}
