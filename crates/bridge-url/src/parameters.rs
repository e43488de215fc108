// File: src/parameters.rs
// Purpose: Ordered, key-unique parameter table with portlet-namespace aware lookups

use indexmap::IndexMap;

/// Parameter name → ordered values, in insertion order
///
/// Lookups accept either the bare name or the name prefixed with the portlet
/// namespace, so `remove("x")` finds an entry stored as `"_p1_x"`.
///
/// ```
/// use bridge_url::ParameterTable;
///
/// let mut table = ParameterTable::with_namespace("_p1_");
/// table.put("_p1_page", vec!["2".to_string()]);
/// assert_eq!(table.get("page"), Some("2"));
/// assert_eq!(table.remove("page"), Some("_p1_page".to_string()));
/// assert!(table.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterTable {
    entries: IndexMap<String, Vec<String>>,
    namespace: String,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            entries: IndexMap::new(),
            namespace: namespace.into(),
        }
    }

    /// Builds a table from `(name, value)` pairs; repeated names accumulate values
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (name, value) in pairs {
            table.append(name, value);
        }
        table
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Stored key for `name`, bare or namespaced
    ///
    /// `"x"` and `"<namespace>x"` name the same parameter, whichever form
    /// the caller passes and whichever form is stored.
    pub fn resolve_key(&self, name: &str) -> Option<&str> {
        let bare = self.bare_name(name);
        if let Some((key, _)) = self.entries.get_key_value(bare) {
            return Some(key.as_str());
        }
        if self.namespace.is_empty() {
            return None;
        }
        self.entries
            .get_key_value(format!("{}{}", self.namespace, bare).as_str())
            .map(|(key, _)| key.as_str())
    }

    fn bare_name<'n>(&self, name: &'n str) -> &'n str {
        if self.namespace.is_empty() {
            return name;
        }
        match name.strip_prefix(self.namespace.as_str()) {
            Some(bare) if !bare.is_empty() => bare,
            _ => name,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve_key(name).is_some()
    }

    /// First value of a parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name)?.first().map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        let key = self.resolve_key(name)?;
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Replaces every value of `name`, keeping the position of an existing entry
    pub fn put(&mut self, name: impl Into<String>, values: Vec<String>) {
        let name = name.into();
        let key = self
            .resolve_key(&name)
            .map(str::to_string)
            .unwrap_or(name);
        self.entries.insert(key, values);
    }

    /// Replaces `name` with a single value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.put(name, vec![value.into()]);
    }

    /// Adds a value after any existing ones
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let key = self
            .resolve_key(&name)
            .map(str::to_string)
            .unwrap_or(name);
        self.entries.entry(key).or_default().push(value.into());
    }

    /// Removes `name` and returns the key it was stored under
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.take(name).map(|(key, _)| key)
    }

    /// Removes `name` and returns the stored key with its values
    pub fn take(&mut self, name: &str) -> Option<(String, Vec<String>)> {
        let key = self.resolve_key(name)?.to_string();
        self.entries.shift_remove_entry(&key)
    }

    /// Copy without the `excluded` names; the source is left untouched
    pub fn export_excluding(&self, excluded: &[&str]) -> ParameterTable {
        let excluded_keys: Vec<&str> = excluded
            .iter()
            .filter_map(|name| self.resolve_key(name))
            .collect();

        Self {
            entries: self
                .entries
                .iter()
                .filter(|(key, _)| !excluded_keys.contains(&key.as_str()))
                .map(|(key, values)| (key.clone(), values.clone()))
                .collect(),
            namespace: self.namespace.clone(),
        }
    }

    /// Puts every entry of `overrides` into this table; overrides win
    pub fn merge(&mut self, overrides: &ParameterTable) {
        for (name, values) in overrides.iter() {
            self.put(name, values.to_vec());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// One `(name, value)` pair per value; names without values are skipped
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Percent-encoded query string in insertion order
    pub fn to_query_string(&self) -> String {
        bridge_uri::encode_query(self.pairs())
    }
}
