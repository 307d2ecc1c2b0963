//! Per-request state handed to endpoint processors.

use std::collections::HashMap;

/// The slice of request state the dispatch layer owns: the method and path
/// being resolved plus the parameters extracted from the winning pattern.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    /// Named captures of the matched pattern, by capture name.
    pub url_params: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            url_params: HashMap::new(),
        }
    }

    /// Replace the inline URL parameters with the captures of a match.
    pub fn set_url_params(&mut self, params: HashMap<String, String>) {
        self.url_params = params;
    }

    pub fn url_param(&self, name: &str) -> Option<&str> {
        self.url_params.get(name).map(String::as_str)
    }
}
