//! Log sanitization: credential and contact-detail filtering.
//!
//! Every formatted log line passes through [`SanitizingMakeWriter`] before it
//! reaches the sink. Patterns cover:
//! - Google API keys (`AIza…`) and bearer/JWT tokens
//! - `key=…` / `token=…` style secrets
//! - Email addresses and phone numbers
//!
//! Free-text symptoms are never logged in the first place; this is the net
//! under that rule, not a replacement for it.
//!
//! Input is capped (`HEALTHMATE_SANITIZE_MAX_BYTES`, default 16 KiB) so a
//! runaway log line cannot stall the writer.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static RULES: OnceLock<Rules> = OnceLock::new();

const DEFAULT_MAX_BYTES: usize = 16 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Rules {
    set: RegexSet,
    rules: Vec<Rule>,
}

const PATTERNS: [(&str, &str); 6] = [
    // Google API keys: "AIza" + 35 URL-safe chars
    (r"\bAIza[0-9A-Za-z_-]{35}\b", "[REDACTED-API-KEY]"),
    // Bearer tokens
    (r"(?i)\bbearer\s+[A-Za-z0-9._~+/-]{16,}=*", "Bearer [REDACTED-TOKEN]"),
    // JWTs
    (
        r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\b",
        "[REDACTED-JWT]",
    ),
    // key=..., token: ..., x-goog-api-key: ...
    (
        r#"(?i)\b(?:x-goog-api-key|api[_-]?key|access[_-]?token|token|secret|password|key)\b["']?\s*[:=]\s*["']?[A-Za-z0-9_\-+/]{12,}={0,2}"#,
        "[REDACTED-SECRET]",
    ),
    // Email
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    // Phone numbers (NANP and +CC groups)
    (
        r"(?:\+\d{1,3}[-.\s]?)?\(?\b\d{3}\)?[-.\s]\d{3}[-.\s]\d{4}\b",
        "[REDACTED-PHONE]",
    ),
];

fn max_bytes() -> usize {
    std::env::var("HEALTHMATE_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_MAX_BYTES)
}

fn rules() -> &'static Rules {
    RULES.get_or_init(|| {
        // Patterns are compile-time constants covered by tests.
        let set = RegexSet::new(PATTERNS.iter().map(|(p, _)| *p)).expect("valid pattern set");
        let rules = PATTERNS
            .iter()
            .map(|(pattern, replacement)| Rule {
                regex: Regex::new(pattern).expect("valid pattern"),
                replacement,
            })
            .collect();
        Rules { set, rules }
    })
}

fn truncate_to_char_boundary(input: &str, max: usize) -> (&str, bool) {
    if input.len() <= max {
        return (input, false);
    }
    let mut end = max;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Redact secrets and contact details from `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_bytes())
}

fn sanitize_with_limit(input: &str, limit: usize) -> String {
    let rules = rules();
    // The line terminator survives truncation so records stay one per line.
    let (body, terminator) = match input.strip_suffix('\n') {
        Some(body) => (body, "\n"),
        None => (input, ""),
    };
    let (prefix, truncated) = truncate_to_char_boundary(body, limit);

    let mut out = prefix.to_string();
    for idx in rules.set.matches(prefix).into_iter() {
        let rule = &rules.rules[idx];
        out = rule.regex.replace_all(&out, rule.replacement).into_owned();
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out.push_str(terminator);
    out
}

/// `MakeWriter` wrapper that sanitizes each formatted line.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
    limit: usize,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self::with_limit(inner, max_bytes())
    }

    fn with_limit(inner: W, limit: usize) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
            limit,
        }
    }

    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner
            .write_all(sanitize_with_limit(&text, self.limit).as_bytes())
    }

    fn drain_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        self.drain_lines()?;

        // A single line with no newline must not grow without bound.
        if self.buffer.len() > self.limit.saturating_mul(2) {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}
