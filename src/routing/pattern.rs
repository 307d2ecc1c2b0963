//! Path pattern compiler.
//!
//! # Responsibilities
//! - Compile one pattern string into a comparison-ready `MaskInfo`
//! - Split whitespace-separated declarations into alternative patterns
//! - Extract the ordered list of named-capture identifiers
//!
//! # Design Decisions
//! - Compilation never fails: malformed input is logged and degraded to a
//!   best-effort fallback so one bad rule cannot abort a configuration load
//! - Literal prefix/suffix are extracted up front so the matcher can reject
//!   most paths with two string comparisons before structural matching
//! - Parts are a closed enum switched on at match time, no trait objects

use regex::Regex;
use tracing::warn;

/// Case handling requested by a leading `<` (insensitive) or `>` (sensitive)
/// marker. `Unspecified` behaves as sensitive at match time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    #[default]
    Unspecified,
    Sensitive,
    Insensitive,
}

/// One structural element of a compiled pattern's middle section.
#[derive(Debug, Clone)]
pub enum MaskPart {
    /// Literal text, matched exactly.
    Word(String),
    /// A `?`/`*` run. `max` of `None` means unbounded; `crosses_slash` is set
    /// when the run contained `**`.
    Wildcard {
        min: usize,
        max: Option<usize>,
        crosses_slash: bool,
    },
    /// An embedded regular expression. The source text is retained so
    /// compiled masks stay structurally comparable.
    Regex { source: String, re: Regex },
    /// `{name}`: one `/`-free path segment bound to `name`.
    Capture(String),
    /// `{{expr}}`: a boolean sub-expression for the external engine.
    Condition(String),
}

impl PartialEq for MaskPart {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MaskPart::Word(a), MaskPart::Word(b)) => a == b,
            (
                MaskPart::Wildcard {
                    min: a1,
                    max: a2,
                    crosses_slash: a3,
                },
                MaskPart::Wildcard {
                    min: b1,
                    max: b2,
                    crosses_slash: b3,
                },
            ) => a1 == b1 && a2 == b2 && a3 == b3,
            (MaskPart::Regex { source: a, .. }, MaskPart::Regex { source: b, .. }) => a == b,
            (MaskPart::Capture(a), MaskPart::Capture(b)) => a == b,
            (MaskPart::Condition(a), MaskPart::Condition(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for MaskPart {}

impl MaskPart {
    /// Minimum number of characters this part must consume.
    fn min_len(&self) -> usize {
        match self {
            MaskPart::Word(w) => w.len(),
            MaskPart::Wildcard { min, .. } => *min,
            MaskPart::Regex { .. } => 0,
            MaskPart::Capture(_) => 1,
            MaskPart::Condition(_) => 0,
        }
    }
}

/// A compiled pattern.
///
/// Concatenating `fixed_start`, anything the middle parts can match, and
/// `fixed_end` reconstructs the matchable path space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaskInfo {
    /// The rule's effect is inverted by the consumer.
    pub is_negative: bool,
    pub case: CaseSensitivity,
    /// Literal prefix of every matching path; empty if none.
    pub fixed_start: String,
    /// Literal suffix of every matching path; empty if none.
    pub fixed_end: String,
    /// Structural parts between the fixed prefix and suffix.
    pub middle: Vec<MaskPart>,
    /// Minimum residual length required by `middle`, for the fast reject.
    pub middle_min_len: usize,
}

impl MaskInfo {
    pub fn case_insensitive(&self) -> bool {
        self.case == CaseSensitivity::Insensitive
    }

    /// Named-capture identifiers in middle order, skipping empty names.
    /// The matcher zips extracted values to this ordering.
    pub fn named_ids(&self) -> Vec<&str> {
        self.middle
            .iter()
            .filter_map(|part| match part {
                MaskPart::Capture(name) if !name.is_empty() => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Fallback literal emitted for an invalid embedded regex. A request path can
/// never contain `?`, so the part never matches anything.
pub(crate) const BAD_REGEX_WORD: &str = "?? Error ??";

/// Compile one pattern string. Never fails; malformed syntax is logged and
/// degraded per the module-level policy.
pub fn compile(pattern: &str) -> MaskInfo {
    let (mut mask, middle) = cut_fixed_parts(pattern);
    parse_middle(&mut mask, &middle);
    mask.middle_min_len = mask.middle.iter().map(MaskPart::min_len).sum();
    mask
}

/// Split a whitespace-separated declaration into independently compiled
/// alternatives (logical OR, declaration order).
pub fn compile_set(declaration: &str) -> Vec<MaskInfo> {
    declaration.split_whitespace().map(compile).collect()
}

/// Strip leading modifiers, trim the tail, and peel the literal prefix and
/// suffix off the pattern. Returns the mask scaffold and the middle text.
fn cut_fixed_parts(pattern: &str) -> (MaskInfo, String) {
    let mut mask = MaskInfo::default();
    let bytes = pattern.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        match bytes[start] {
            b'!' => mask.is_negative = true,
            b'<' => mask.case = CaseSensitivity::Insensitive,
            b'>' => mask.case = CaseSensitivity::Sensitive,
            c if c <= b' ' => {}
            _ => break,
        }
        start += 1;
    }
    let data = pattern[start..].trim_end_matches(|c: char| c == '/' || c <= ' ');

    let (fixed_start, rest) = cut_fixed_start(data);
    let (fixed_end, middle) = cut_fixed_end(rest);
    mask.fixed_start = fixed_start;
    mask.fixed_end = fixed_end;
    (mask, middle.to_string())
}

/// Forward scan: collect the maximal literal run (collapsing `//` to `/`)
/// until the first special character.
fn cut_fixed_start(data: &str) -> (String, &str) {
    let b = data.as_bytes();
    let n = b.len();
    let mut fixed = String::new();
    let mut flush_from = 0;
    let mut i = 0;
    while i < n {
        let c = b[i];
        if c <= b' ' && i == flush_from {
            flush_from = i + 1;
        } else if c == b'/' && i > 0 && b[i - 1] == b'/' {
            fixed.push_str(&data[flush_from..i]);
            flush_from = i + 1;
        } else if matches!(c, b'?' | b'*' | b'{' | b'`' | b'^') {
            break;
        }
        i += 1;
    }
    fixed.push_str(&data[flush_from..i]);
    (fixed, &data[i..])
}

/// Backward scan, symmetric to `cut_fixed_start`: collect the literal suffix
/// until the first special character from the end.
fn cut_fixed_end(data: &str) -> (String, &str) {
    let b = data.as_bytes();
    let mut n = b.len();
    let mut fixed = String::new();
    let mut i = n as isize - 1;
    while i >= 0 {
        let idx = i as usize;
        let c = b[idx];
        if matches!(c, b'?' | b'*' | b'`' | b'^' | b'$' | b'{' | b'}') {
            break;
        }
        if c == b'/' && idx + 1 < b.len() && b[idx + 1] == b'/' {
            fixed.insert_str(0, &data[idx + 1..n]);
            while i >= 0 && b[i as usize] == b'/' {
                i -= 1;
            }
            i += 1;
            n = i as usize;
        }
        i -= 1;
    }
    let cut = (i + 1) as usize;
    if cut < n {
        fixed.insert_str(0, &data[cut..n]);
    }
    (fixed, &data[..cut])
}

/// Single left-to-right scan classifying the middle text into parts.
fn parse_middle(mask: &mut MaskInfo, data: &str) {
    let b = data.as_bytes();
    let n = b.len();
    let mut i = 0;
    while i < n {
        match b[i] {
            b'?' | b'*' => {
                let mut min = 0;
                let mut max = Some(0);
                let mut crosses_slash = false;
                let mut prev_star = false;
                while i < n {
                    match b[i] {
                        b'?' => {
                            min += 1;
                            if let Some(m) = max.as_mut() {
                                *m += 1;
                            }
                            prev_star = false;
                        }
                        b'*' => {
                            if prev_star {
                                crosses_slash = true;
                            }
                            max = None;
                            prev_star = true;
                        }
                        _ => break,
                    }
                    i += 1;
                }
                mask.middle.push(MaskPart::Wildcard {
                    min,
                    max,
                    crosses_slash,
                });
            }
            b'`' | b'^' => {
                let anchored = b[i] == b'^';
                let closer = if anchored { '$' } else { '`' };
                match data[i + 1..].find(closer) {
                    Some(off) => {
                        let pos = i + 1 + off;
                        let source = if anchored {
                            &data[i..=pos]
                        } else {
                            &data[i + 1..pos]
                        };
                        push_regex(mask, source);
                        i = pos + 1;
                    }
                    None => {
                        warn!(
                            pattern = %data,
                            at = i,
                            "expected closing {closer} in url pattern"
                        );
                        // The unterminated quotation consumes the rest of the
                        // string and the already-extracted fixed suffix.
                        let mut source = String::new();
                        if anchored {
                            source.push_str(&data[i..]);
                            source.push_str(&mask.fixed_end);
                            source.push('$');
                        } else {
                            source.push_str(&data[i + 1..]);
                            source.push_str(&mask.fixed_end);
                        }
                        mask.fixed_end.clear();
                        push_regex(mask, &source);
                        i = n;
                    }
                }
            }
            b'{' => {
                i += 1;
                let condition = i < n && b[i] == b'{';
                let closer = if condition {
                    i += 1;
                    "}}"
                } else {
                    "}"
                };
                match data[i..].find(closer) {
                    Some(off) => {
                        let word = data[i..i + off].to_string();
                        mask.middle.push(if condition {
                            MaskPart::Condition(word)
                        } else {
                            MaskPart::Capture(word)
                        });
                        i += off + closer.len();
                    }
                    None => {
                        // Brace characters are skipped, no part is emitted,
                        // and the scan resumes on the following text.
                        warn!(pattern = %data, at = i, "expected closing {closer} in url pattern");
                    }
                }
            }
            _ => {
                let start = i;
                i += 1;
                while i < n && !matches!(b[i], b'?' | b'*' | b'{' | b'`' | b'^') {
                    i += 1;
                }
                mask.middle.push(MaskPart::Word(data[start..i].to_string()));
            }
        }
    }
}

fn push_regex(mask: &mut MaskInfo, source: &str) {
    if source.is_empty() {
        return;
    }
    match Regex::new(source) {
        Ok(re) => mask.middle.push(MaskPart::Regex {
            source: source.to_string(),
            re,
        }),
        Err(err) => {
            warn!(regex = %source, %err, "incorrect regular expression in url pattern");
            mask.middle.push(MaskPart::Word(BAD_REGEX_WORD.to_string()));
        }
    }
}
