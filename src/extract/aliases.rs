use std::collections::HashMap;

/// Known inconsistent location spellings and their canonical form.
const BUILTIN: &[(&str, &str)] = &[("São Paulo, São Paulo", "São Paulo, SP")];

/// Exact-match substitution table for location strings.
#[derive(Debug, Clone)]
pub struct LocationAliases {
    map: HashMap<String, String>,
}

impl LocationAliases {
    pub fn empty() -> Self {
        LocationAliases {
            map: HashMap::new(),
        }
    }

    pub fn with_alias(mut self, raw: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.map.insert(raw.into(), canonical.into());
        self
    }

    pub fn normalize(&self, location: &str) -> String {
        match self.map.get(location) {
            Some(canonical) => canonical.clone(),
            None => location.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for LocationAliases {
    fn default() -> Self {
        BUILTIN
            .iter()
            .fold(LocationAliases::empty(), |acc, (raw, canonical)| acc.with_alias(*raw, *canonical))
    }
}
