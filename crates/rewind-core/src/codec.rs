//! Textual delta codec: unified-diff compute and strict apply
//!
//! Deltas are plain unified-diff text blocks. Header labels carry the
//! tracked file's base name, or [`ABSENT_LABEL`] when a side has no
//! content. Every delta produced by [`DeltaCodec::compute_delta`] applies
//! cleanly through [`DeltaCodec::apply_delta`] against the exact content
//! it was computed from.

use similar::TextDiff;
use std::iter::Peekable;

/// Header label used for a side with no content.
pub const ABSENT_LABEL: &str = "/dev/null";

/// Errors reported by the delta codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed delta at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("delta does not apply at line {line}: {reason}")]
    Mismatch { line: usize, reason: String },
}

impl CodecError {
    fn malformed(line: usize, reason: impl Into<String>) -> Self {
        CodecError::Malformed {
            line,
            reason: reason.into(),
        }
    }

    fn mismatch(line: usize, reason: impl Into<String>) -> Self {
        CodecError::Mismatch {
            line,
            reason: reason.into(),
        }
    }
}

/// Capability interface for computing and applying textual deltas.
///
/// Any implementation that round-trips the unified-diff contract can stand
/// in for the shipped [`UnifiedCodec`], including one that shells out to
/// external diff/patch tools.
pub trait DeltaCodec {
    /// Compute the delta that transforms `from` into `to`.
    ///
    /// Returns `None` when the contents are identical. Both header labels
    /// are `label`, except that a side with no content is labelled
    /// [`ABSENT_LABEL`].
    fn compute_delta(&self, label: &str, from: &str, to: &str)
        -> Result<Option<String>, CodecError>;

    /// Apply a delta to `base`, producing the patched content.
    ///
    /// Application is strict: hunks must match `base` exactly at the
    /// positions their headers claim.
    fn apply_delta(&self, base: &str, delta: &str) -> Result<String, CodecError>;
}

/// Line-based unified-diff codec.
#[derive(Debug, Clone)]
pub struct UnifiedCodec {
    context_lines: usize,
}

impl UnifiedCodec {
    pub fn new(context_lines: usize) -> Self {
        Self { context_lines }
    }
}

impl Default for UnifiedCodec {
    fn default() -> Self {
        Self::new(3)
    }
}

impl DeltaCodec for UnifiedCodec {
    fn compute_delta(
        &self,
        label: &str,
        from: &str,
        to: &str,
    ) -> Result<Option<String>, CodecError> {
        if from == to {
            return Ok(None);
        }

        let diff = TextDiff::from_lines(from, to);
        let text = diff
            .unified_diff()
            .context_radius(self.context_lines)
            .header(side_label(label, from), side_label(label, to))
            .to_string();

        Ok(Some(text))
    }

    fn apply_delta(&self, base: &str, delta: &str) -> Result<String, CodecError> {
        let base_lines: Vec<&str> = base.split_inclusive('\n').collect();
        let mut out = String::with_capacity(base.len());
        let mut cursor = 0usize;
        let mut lines = delta.lines().enumerate().peekable();

        while let Some((idx, line)) = lines.next() {
            let line_no = idx + 1;

            if line.starts_with("--- ") || line.starts_with("+++ ") {
                continue;
            }

            let Some(ranges) = line.strip_prefix("@@ ") else {
                return Err(CodecError::malformed(line_no, "expected hunk header"));
            };
            let (old_start, old_len, new_len) = parse_hunk_header(ranges, line_no)?;

            // The old range is 1-based; a zero-length range names the line
            // after which the insertion happens.
            let hunk_base = if old_len == 0 { old_start } else { old_start - 1 };
            if hunk_base < cursor {
                return Err(CodecError::malformed(line_no, "hunks overlap"));
            }
            if hunk_base > base_lines.len() {
                return Err(CodecError::mismatch(line_no, "hunk beyond end of input"));
            }
            for kept in &base_lines[cursor..hunk_base] {
                out.push_str(kept);
            }
            cursor = hunk_base;

            let mut old_remaining = old_len;
            let mut new_remaining = new_len;
            while old_remaining > 0 || new_remaining > 0 {
                let Some((idx, body)) = lines.next() else {
                    return Err(CodecError::malformed(line_no, "truncated hunk"));
                };
                let body_no = idx + 1;

                match body.as_bytes().first().copied() {
                    Some(b' ') | None => {
                        if old_remaining == 0 || new_remaining == 0 {
                            return Err(CodecError::malformed(
                                body_no,
                                "hunk longer than its header claims",
                            ));
                        }
                        let actual = expect_base_line(&base_lines, cursor, body_no)?;
                        if trim_newline(actual) != tag_text(body) {
                            return Err(CodecError::mismatch(
                                body_no,
                                "context line does not match",
                            ));
                        }
                        out.push_str(actual);
                        cursor += 1;
                        old_remaining -= 1;
                        new_remaining -= 1;
                        take_newline_hint(&mut lines);
                    }
                    Some(b'-') => {
                        if old_remaining == 0 {
                            return Err(CodecError::malformed(
                                body_no,
                                "hunk longer than its header claims",
                            ));
                        }
                        let actual = expect_base_line(&base_lines, cursor, body_no)?;
                        if trim_newline(actual) != tag_text(body) {
                            return Err(CodecError::mismatch(
                                body_no,
                                "removed line does not match",
                            ));
                        }
                        cursor += 1;
                        old_remaining -= 1;
                        take_newline_hint(&mut lines);
                    }
                    Some(b'+') => {
                        if new_remaining == 0 {
                            return Err(CodecError::malformed(
                                body_no,
                                "hunk longer than its header claims",
                            ));
                        }
                        out.push_str(tag_text(body));
                        if !take_newline_hint(&mut lines) {
                            out.push('\n');
                        }
                        new_remaining -= 1;
                    }
                    Some(b'\\') => continue,
                    Some(_) => {
                        return Err(CodecError::malformed(body_no, "unexpected line in hunk"));
                    }
                }
            }
        }

        for kept in &base_lines[cursor..] {
            out.push_str(kept);
        }
        Ok(out)
    }
}

fn side_label<'a>(label: &'a str, content: &str) -> &'a str {
    if content.is_empty() {
        ABSENT_LABEL
    } else {
        label
    }
}

fn tag_text(body: &str) -> &str {
    body.get(1..).unwrap_or("")
}

fn trim_newline(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

fn expect_base_line<'a>(
    base_lines: &[&'a str],
    cursor: usize,
    line_no: usize,
) -> Result<&'a str, CodecError> {
    base_lines
        .get(cursor)
        .copied()
        .ok_or_else(|| CodecError::mismatch(line_no, "hunk runs past end of input"))
}

/// Consume a `\ No newline at end of file` marker if one follows.
fn take_newline_hint<'a, I>(lines: &mut Peekable<I>) -> bool
where
    I: Iterator<Item = (usize, &'a str)>,
{
    if lines.peek().is_some_and(|(_, l)| l.starts_with('\\')) {
        lines.next();
        true
    } else {
        false
    }
}

/// Parse the range part of a hunk header, e.g. `-1,2 +1 @@`.
fn parse_hunk_header(rest: &str, line_no: usize) -> Result<(usize, usize, usize), CodecError> {
    let inner = rest
        .find(" @@")
        .map(|i| &rest[..i])
        .ok_or_else(|| CodecError::malformed(line_no, "unterminated hunk header"))?;

    let mut parts = inner.split(' ');
    let old = parts
        .next()
        .and_then(|p| p.strip_prefix('-'))
        .ok_or_else(|| CodecError::malformed(line_no, "missing old range"))?;
    let new = parts
        .next()
        .and_then(|p| p.strip_prefix('+'))
        .ok_or_else(|| CodecError::malformed(line_no, "missing new range"))?;
    if parts.next().is_some() {
        return Err(CodecError::malformed(line_no, "trailing content in header"));
    }

    let (old_start, old_len) = parse_range(old, line_no)?;
    let (_, new_len) = parse_range(new, line_no)?;
    if old_len > 0 && old_start == 0 {
        return Err(CodecError::malformed(line_no, "old range starts at zero"));
    }
    Ok((old_start, old_len, new_len))
}

fn parse_range(range: &str, line_no: usize) -> Result<(usize, usize), CodecError> {
    let parse = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| CodecError::malformed(line_no, format!("bad range '{range}'")))
    };
    match range.split_once(',') {
        Some((start, len)) => Ok((parse(start)?, parse(len)?)),
        None => Ok((parse(range)?, 1)),
    }
}
