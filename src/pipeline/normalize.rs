//! Text normalisation: deterministic cleanup of scraped cell text.
//!
//! Cell text lifted from a live page carries rendering debris: hard line
//! breaks from `<br>`, indentation from the markup, non-breaking spaces,
//! zero-width joiners, and the labels of action buttons that sit inside the
//! cell ("View"). Every field goes through [`normalize_field`]; columns may
//! additionally carry source-specific [`TextRule`]s, which always run
//! *between* two whitespace passes so a removed token never leaves a double
//! space behind.
//!
//! All passes are pure `&str → String` functions and idempotent: feeding
//! normalised text back in returns it unchanged.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::Arc;

/// Normalise one field: drop invisible characters, turn every whitespace
/// run (line breaks included) into a single space, trim the ends.
pub fn normalize_field(input: &str) -> String {
    let s = remove_invisible_chars(input);
    collapse_whitespace(&s)
}

/// Normalise a field and apply its column rules.
///
/// The result satisfies the record invariant regardless of what the rules
/// return, because whitespace is collapsed again afterwards.
pub fn clean_field(input: &str, rules: &[Arc<dyn TextRule>]) -> String {
    let mut s = normalize_field(input);
    if rules.is_empty() {
        return s;
    }
    for rule in rules {
        s = rule.apply(&s);
    }
    collapse_whitespace(&s)
}

// ── Rule 1: Strip invisible Unicode ──────────────────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Rule 2: Collapse whitespace ──────────────────────────────────────────────

// `\s` is Unicode-aware: covers CR/LF, tabs, NBSP and the other Zs spaces.
static RE_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn collapse_whitespace(input: &str) -> String {
    RE_WHITESPACE_RUN.replace_all(input, " ").trim().to_string()
}

// ── Pluggable column rules ───────────────────────────────────────────────────

/// A source-specific cleanup rule applied to one column.
///
/// Rules see already-normalised text and may leave stray spaces behind;
/// [`clean_field`] collapses them afterwards.
pub trait TextRule: Send + Sync {
    /// Short identifier used in logs and `Debug` output.
    fn name(&self) -> &str;

    fn apply(&self, input: &str) -> String;
}

/// How [`StripToken`] matches its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatch {
    /// Anywhere, even inside a longer word.
    Substring,
    /// Only as a standalone word.
    WholeWord,
}

/// Remove every case-insensitive occurrence of a literal token.
#[derive(Clone)]
pub struct StripToken {
    token: String,
    mode: TokenMatch,
    pattern: Regex,
}

static RE_VIEW_SUBSTRING: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new("view")
        .case_insensitive(true)
        .build()
        .unwrap()
});

impl StripToken {
    pub fn new(token: &str, mode: TokenMatch) -> Result<Self, regex::Error> {
        let escaped = regex::escape(token);
        let source = match mode {
            TokenMatch::Substring => escaped,
            TokenMatch::WholeWord => format!(r"\b{escaped}\b"),
        };
        let pattern = RegexBuilder::new(&source).case_insensitive(true).build()?;
        Ok(Self {
            token: token.to_string(),
            mode,
            pattern,
        })
    }

    /// The eCourts "View" button label, removed as a substring.
    pub fn view_label() -> Self {
        Self {
            token: "view".to_string(),
            mode: TokenMatch::Substring,
            pattern: RE_VIEW_SUBSTRING.clone(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn mode(&self) -> TokenMatch {
        self.mode
    }
}

impl TextRule for StripToken {
    fn name(&self) -> &str {
        match self.mode {
            TokenMatch::Substring => "strip-token",
            TokenMatch::WholeWord => "strip-word",
        }
    }

    fn apply(&self, input: &str) -> String {
        // Removing one match can join its neighbours into another ("viVIEWew").
        let mut out = input.to_string();
        loop {
            let next = self.pattern.replace_all(&out, "");
            if next.len() == out.len() {
                return out;
            }
            out = next.into_owned();
        }
    }
}

impl fmt::Debug for StripToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripToken")
            .field("token", &self.token)
            .field("mode", &self.mode)
            .finish()
    }
}
