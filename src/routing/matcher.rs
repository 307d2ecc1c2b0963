//! Request-path matching.
//!
//! # Data Flow
//! ```text
//! request path
//!     → normalize (trim trailing '/', collapse '//')
//!     → per pool entry, per alternative:
//!         fixed prefix/suffix reject (O(length))
//!         → structural match of middle parts (backtracking + failure memo)
//!         → polarity applied for negative masks
//!     → captures zipped to named ids
//!     → verification callback (business-level veto continues the search)
//! ```
//!
//! # Design Decisions
//! - Pools are immutable at request time; matching takes no locks
//! - Variable-length parts are searched shortest-first with a memo on
//!   (part index, input position) so ambiguous patterns stay bounded
//! - Condition blocks are zero-width boolean gates; an evaluator error is
//!   logged and treated as the condition being false

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use regex::Regex;
use tracing::warn;

use super::pattern::{MaskInfo, MaskPart};
use super::pool::UrlPool;
use crate::expression::ConditionEvaluator;

/// A successful pool lookup: the winning handler plus the named captures of
/// the winning alternative.
#[derive(Debug)]
pub struct MatchOutcome<'p, H> {
    pub handler: &'p H,
    pub captures: HashMap<String, String>,
}

/// Find the first matching pool entry for `path`, in registration order.
///
/// `verify` is invoked with every candidate handler and its captures; a
/// `false` return vetoes the candidate and the search continues with the next
/// alternative or entry.
pub fn search<'p, H>(
    pool: &'p UrlPool<H>,
    path: &str,
    eval: &dyn ConditionEvaluator,
    mut verify: impl FnMut(&'p H, &HashMap<String, String>) -> bool,
) -> Option<MatchOutcome<'p, H>> {
    for entry in pool.entries() {
        for mask in &entry.masks {
            let structural = mask_matches(mask, path, eval);
            if structural.is_some() == mask.is_negative {
                continue;
            }
            let values = structural.unwrap_or_default();
            let captures: HashMap<String, String> = mask
                .named_ids()
                .into_iter()
                .map(str::to_string)
                .zip(values)
                .collect();
            if verify(&entry.handler, &captures) {
                return Some(MatchOutcome {
                    handler: &entry.handler,
                    captures,
                });
            }
        }
    }
    None
}

/// Whether `path` matches the mask, with negative polarity applied.
pub fn matches(mask: &MaskInfo, path: &str, eval: &dyn ConditionEvaluator) -> bool {
    mask_matches(mask, path, eval).is_some() != mask.is_negative
}

/// Raw structural test, polarity not applied. On success returns the values
/// consumed by named captures, in textual order.
pub fn mask_matches(
    mask: &MaskInfo,
    path: &str,
    eval: &dyn ConditionEvaluator,
) -> Option<Vec<String>> {
    let path = normalize_path(path);
    let path = path.as_ref();
    let ci = mask.case_insensitive();
    let fs = &mask.fixed_start;
    let fe = &mask.fixed_end;
    if path.len() < fs.len() || path.len() < fe.len() {
        return None;
    }
    if !path.is_char_boundary(fs.len()) || !path.is_char_boundary(path.len() - fe.len()) {
        return None;
    }
    if !region_eq(&path[..fs.len()], fs, ci) || !region_eq(&path[path.len() - fe.len()..], fe, ci)
    {
        return None;
    }
    let start = fs.len();
    let end = path.len() - fe.len();
    let residual = if end >= start {
        &path[start..end]
    } else if end + 1 == start && fs.ends_with('/') && fe.starts_with('/') {
        // The prefix and suffix share one separator; a middle that matches
        // the empty string bridges it ("/a/**/b" accepting "/a/b").
        ""
    } else {
        return None;
    };
    if residual.len() < mask.middle_min_len {
        return None;
    }
    let mut captures = Vec::new();
    let mut failed = HashSet::new();
    if match_at(
        &mask.middle,
        0,
        residual,
        0,
        ci,
        eval,
        &mut captures,
        &mut failed,
    ) {
        Some(captures)
    } else {
        None
    }
}

/// Trim the trailing separator (mirroring pattern compilation) and collapse
/// duplicate separators the way the compiler collapses them in fixed parts.
fn normalize_path(path: &str) -> Cow<'_, str> {
    let trimmed = path.trim_end_matches(|c: char| c == '/' || c <= ' ');
    if !trimmed.contains("//") {
        return Cow::Borrowed(trimmed);
    }
    let mut out = String::with_capacity(trimmed.len());
    let mut prev_slash = false;
    for c in trimmed.chars() {
        if c == '/' && prev_slash {
            continue;
        }
        prev_slash = c == '/';
        out.push(c);
    }
    Cow::Owned(out)
}

fn region_eq(a: &str, b: &str, ci: bool) -> bool {
    if ci {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

/// Recursive-descent alignment of `parts[pi..]` against `text[pos..]`.
/// `failed` memoizes exhausted (part, position) states.
#[allow(clippy::too_many_arguments)]
fn match_at(
    parts: &[MaskPart],
    pi: usize,
    text: &str,
    pos: usize,
    ci: bool,
    eval: &dyn ConditionEvaluator,
    captures: &mut Vec<String>,
    failed: &mut HashSet<(usize, usize)>,
) -> bool {
    if pi == parts.len() {
        return pos == text.len();
    }
    if failed.contains(&(pi, pos)) {
        return false;
    }
    let mark = captures.len();
    let ok = match &parts[pi] {
        MaskPart::Word(w) => {
            let end = pos + w.len();
            end <= text.len()
                && text.is_char_boundary(end)
                && region_eq(&text[pos..end], w, ci)
                && match_at(parts, pi + 1, text, end, ci, eval, captures, failed)
        }
        MaskPart::Wildcard {
            min,
            max,
            crosses_slash,
        } => try_span(
            parts,
            pi,
            text,
            pos,
            SpanKind::Plain,
            *min,
            *max,
            *crosses_slash,
            ci,
            eval,
            captures,
            failed,
        ),
        MaskPart::Capture(name) => try_span(
            parts,
            pi,
            text,
            pos,
            if name.is_empty() {
                SpanKind::Plain
            } else {
                SpanKind::Record
            },
            1,
            None,
            false,
            ci,
            eval,
            captures,
            failed,
        ),
        MaskPart::Regex { re, .. } => try_span(
            parts,
            pi,
            text,
            pos,
            SpanKind::Content(re),
            0,
            None,
            true,
            ci,
            eval,
            captures,
            failed,
        ),
        MaskPart::Condition(expr) => match eval.evaluate(expr) {
            Ok(true) => match_at(parts, pi + 1, text, pos, ci, eval, captures, failed),
            Ok(false) => false,
            Err(err) => {
                warn!(condition = %expr, %err, "condition evaluation failed, treating as false");
                false
            }
        },
    };
    if !ok {
        captures.truncate(mark);
        failed.insert((pi, pos));
    }
    ok
}

#[derive(Clone, Copy)]
enum SpanKind<'a> {
    /// Plain wildcard span.
    Plain,
    /// Named-capture span; the consumed text is recorded.
    Record,
    /// Regex span; each candidate gets a post-hoc content test.
    Content(&'a Regex),
}

/// Search over the lengths a variable part may own, shortest first.
#[allow(clippy::too_many_arguments)]
fn try_span(
    parts: &[MaskPart],
    pi: usize,
    text: &str,
    pos: usize,
    kind: SpanKind<'_>,
    min: usize,
    max: Option<usize>,
    crosses_slash: bool,
    ci: bool,
    eval: &dyn ConditionEvaluator,
    captures: &mut Vec<String>,
    failed: &mut HashSet<(usize, usize)>,
) -> bool {
    let mut end = pos;
    let mut count = 0usize;
    loop {
        if count >= min {
            let accepted = match kind {
                SpanKind::Content(re) => re.is_match(&text[pos..end]),
                _ => true,
            };
            if accepted {
                if matches!(kind, SpanKind::Record) {
                    captures.push(text[pos..end].to_string());
                }
                if match_at(parts, pi + 1, text, end, ci, eval, captures, failed) {
                    return true;
                }
                if matches!(kind, SpanKind::Record) {
                    captures.pop();
                }
            }
        }
        if max.is_some_and(|m| count == m) {
            break;
        }
        match text[end..].chars().next() {
            Some('/') if !crosses_slash => break,
            Some(c) => {
                end += c.len_utf8();
                count += 1;
            }
            None => break,
        }
    }
    false
}
