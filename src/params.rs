/// Query-parameter model for a loaded URL
use url::{Url, form_urlencoded};

use crate::domain::validate_url;
use crate::error::PopupResult;

/// Ordered query parameters with unique keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        QueryParams { pairs: Vec::new() }
    }

    /// Decode a form-urlencoded query string (without the leading `?`).
    /// A repeated key keeps its first position and first value.
    pub fn parse(query: &str) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if params.get(&key).is_none() {
                params.pairs.push((key.into_owned(), value.into_owned()));
            }
        }
        params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite. Existing keys stay where they are.
    /// An empty value is ignored; use `apply_edit` for field edits.
    pub fn set(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }

        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value.to_string(),
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    pub fn delete(&mut self, key: &str) -> bool {
        let original_len = self.pairs.len();
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.len() < original_len
    }

    /// Apply a field edit: a blank field removes the parameter
    pub fn apply_edit(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.delete(key);
        } else {
            self.set(key, value);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn serialize(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// A validated URL together with its editable parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUrl {
    url: Url,
    pub params: QueryParams,
}

impl ParsedUrl {
    /// Validate `input` and split off its query parameters
    pub fn parse(input: &str) -> PopupResult<ParsedUrl> {
        let url = validate_url(input)?;
        let params = QueryParams::parse(url.query().unwrap_or(""));
        Ok(ParsedUrl { url, params })
    }

    /// Copy of the URL with the current parameters written back
    pub fn finalized(&self) -> Url {
        let mut url = self.url.clone();
        if self.params.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.params.serialize()));
        }
        url
    }
}
