//! URL rewrite map.
//!
//! # Responsibilities
//! - Group rewrite rules by the first path segment of their source path
//! - Resolve an incoming path to its rewritten form
//!
//! # Design Decisions
//! - First-segment grouping narrows candidates in O(1) before any comparison
//! - A trailing `*` on the source path means prefix rewrite; otherwise the
//!   whole path must match
//! - Built once at configuration time, immutable thereafter

use std::collections::HashMap;

/// One rewrite rule inside a first-segment bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    /// Source path to compare against (leading `/`, no trailing `*`).
    pub target: String,
    /// Replacement path.
    pub replacement: String,
    /// Whole-path match when true, prefix match when false.
    pub full: bool,
}

/// Rewrite rules bucketed by the first segment of their source path.
#[derive(Debug, Clone, Default)]
pub struct RewriteMap {
    buckets: HashMap<String, Vec<RewriteRule>>,
}

impl RewriteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for `from` → `to`. A trailing `*` on `from` requests a
    /// prefix rewrite and is stripped.
    pub fn add(&mut self, from: &str, to: &str) {
        let stripped = from.strip_prefix('/').unwrap_or(from);
        let key = stripped.split('/').next().unwrap_or("").to_string();
        let mut target = format!("/{stripped}");
        let full = !target.ends_with('*');
        if !full {
            target.pop();
        }
        self.buckets.entry(key).or_default().push(RewriteRule {
            target,
            replacement: to.to_string(),
            full,
        });
    }

    /// Candidate rules for a path, by its first segment.
    pub fn candidates(&self, path: &str) -> &[RewriteRule] {
        let stripped = path.strip_prefix('/').unwrap_or(path);
        let key = stripped.split('/').next().unwrap_or("");
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rewrite `path` with the first applicable rule, or return it unchanged.
    pub fn apply(&self, path: &str) -> String {
        for rule in self.candidates(path) {
            if rule.full {
                if path == rule.target {
                    return rule.replacement.clone();
                }
            } else if let Some(rest) = path.strip_prefix(&rule.target) {
                return format!("{}{rest}", rule.replacement);
            }
        }
        path.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_are_grouped_by_first_segment() {
        let mut map = RewriteMap::new();
        map.add("/api/v1", "/internal/v1");
        map.add("/api/v2*", "/internal/v2");
        map.add("/static/img", "/cdn/img");
        assert_eq!(map.candidates("/api/v1").len(), 2);
        assert_eq!(map.candidates("/static/x").len(), 1);
        assert!(map.candidates("/other").is_empty());
    }

    #[test]
    fn full_rule_requires_the_whole_path() {
        let mut map = RewriteMap::new();
        map.add("/api/v1", "/internal/v1");
        assert_eq!(map.apply("/api/v1"), "/internal/v1");
        assert_eq!(map.apply("/api/v1/users"), "/api/v1/users");
    }

    #[test]
    fn star_rule_rewrites_the_prefix() {
        let mut map = RewriteMap::new();
        map.add("/api/v2*", "/internal/v2");
        assert_eq!(map.apply("/api/v2/users/7"), "/internal/v2/users/7");
        assert_eq!(map.apply("/api/v2"), "/internal/v2");
    }

    #[test]
    fn missing_leading_slash_is_tolerated() {
        let mut map = RewriteMap::new();
        map.add("api/v1", "/internal/v1");
        assert_eq!(map.apply("/api/v1"), "/internal/v1");
    }

    #[test]
    fn first_added_rule_wins() {
        let mut map = RewriteMap::new();
        map.add("/a*", "/one");
        map.add("/a*", "/two");
        assert_eq!(map.apply("/a/x"), "/one/x");
    }
}
