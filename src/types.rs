//! Core types for text-modification rules.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Where a rule's text is inserted relative to the matched value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Prepend: `text + value`.
    Start,
    /// Append: `value + text`.
    #[default]
    End,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Start => write!(f, "start"),
            Placement::End => write!(f, "end"),
        }
    }
}

/// Compilation flags for a [`Pattern`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PatternFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
}

impl PatternFlags {
    /// Flags with only case-insensitive matching enabled.
    pub fn ignore_case() -> Self {
        Self {
            case_insensitive: true,
            ..Default::default()
        }
    }
}

/// A compiled regular expression that gates a rule.
///
/// Matching is unanchored: any substring match counts. Equality and hashing
/// look at the source text and flags only, so two patterns compiled from the
/// same input are interchangeable.
///
/// The empty source is the match-all pattern. It matches every input,
/// including the empty string, and needs no compiled automaton.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    flags: PatternFlags,
    regex: Option<Regex>,
}

impl Pattern {
    /// Compile a pattern with default flags.
    ///
    /// # Errors
    ///
    /// Returns the `regex` crate's error unchanged if `source` is invalid.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Self::with_flags(source, PatternFlags::default())
    }

    /// Compile a pattern with explicit flags.
    ///
    /// # Errors
    ///
    /// Returns the `regex` crate's error unchanged if `source` is invalid.
    pub fn with_flags(source: &str, flags: PatternFlags) -> Result<Self, regex::Error> {
        let regex = if source.is_empty() {
            None
        } else {
            Some(
                RegexBuilder::new(source)
                    .case_insensitive(flags.case_insensitive)
                    .multi_line(flags.multi_line)
                    .dot_matches_new_line(flags.dot_matches_new_line)
                    .build()?,
            )
        };

        Ok(Self {
            source: source.to_string(),
            flags,
            regex,
        })
    }

    /// The pattern that matches anything.
    pub fn match_all() -> Self {
        Self {
            source: String::new(),
            flags: PatternFlags::default(),
            regex: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// True if any substring of `value` matches.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.as_ref().map_or(true, |re| re.is_match(value))
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::match_all()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.flags.hash(state);
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("flags", &self.flags)
            .finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)?;
        if self.flags.case_insensitive {
            write!(f, "i")?;
        }
        if self.flags.multi_line {
            write!(f, "m")?;
        }
        if self.flags.dot_matches_new_line {
            write!(f, "s")?;
        }
        Ok(())
    }
}

/// One transformation: insert `append_text` at `placement` when `pattern`
/// matches.
///
/// Rules are immutable. To change behavior, unsubscribe and subscribe a new
/// rule.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rule {
    placement: Placement,
    append_text: String,
    pattern: Pattern,
}

impl Rule {
    pub fn new(placement: Placement, append_text: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            placement,
            append_text: append_text.into(),
            pattern,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn append_text(&self) -> &str {
        &self.append_text
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Apply this rule to `value`.
    ///
    /// Returns `None` when the pattern does not match. A match with empty
    /// `append_text` returns the value unchanged, which is distinct from
    /// `None`.
    pub fn apply(&self, value: &str) -> Option<String> {
        if !self.pattern.is_match(value) {
            return None;
        }

        let mut out = String::with_capacity(value.len() + self.append_text.len());
        match self.placement {
            Placement::Start => {
                out.push_str(&self.append_text);
                out.push_str(value);
            }
            Placement::End => {
                out.push_str(value);
                out.push_str(&self.append_text);
            }
        }
        Some(out)
    }
}

/// A partially specified rule.
///
/// Fields left unset are filled from the registry's defaults at subscribe
/// time.
///
/// # Example
///
/// ```
/// use text_modifier::{Pattern, Placement, Rule, RuleOptions};
///
/// let rule = RuleOptions::new()
///     .placement(Placement::Start)
///     .append_text("Hello ")
///     .pattern(Pattern::new(".+").unwrap())
///     .merge_over(&Rule::default());
///
/// assert_eq!(rule.apply("World").as_deref(), Some("Hello World"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleOptions {
    pub placement: Option<Placement>,
    pub append_text: Option<String>,
    pub pattern: Option<Pattern>,
}

impl RuleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn append_text(mut self, text: impl Into<String>) -> Self {
        self.append_text = Some(text.into());
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Build a rule, taking each unset field from `defaults`.
    pub fn merge_over(self, defaults: &Rule) -> Rule {
        Rule {
            placement: self.placement.unwrap_or(defaults.placement),
            append_text: self
                .append_text
                .unwrap_or_else(|| defaults.append_text.clone()),
            pattern: self.pattern.unwrap_or_else(|| defaults.pattern.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_start_prepends() {
        let rule = Rule::new(Placement::Start, "Hello ", Pattern::new(".+").unwrap());
        assert_eq!(rule.apply("World").as_deref(), Some("Hello World"));
    }

    #[test]
    fn test_end_appends() {
        let rule = Rule::new(Placement::End, "!", Pattern::new(".+").unwrap());
        assert_eq!(rule.apply("World").as_deref(), Some("World!"));
    }

    #[test]
    fn test_non_match_is_absent() {
        let rule = Rule::new(Placement::Start, "Hey ", Pattern::new("^H").unwrap());
        assert_eq!(rule.apply("World"), None);
    }

    #[test]
    fn test_substring_match() {
        let rule = Rule::new(Placement::End, "?", Pattern::new("or").unwrap());
        assert_eq!(rule.apply("World").as_deref(), Some("World?"));
    }

    #[test]
    fn test_empty_text_returns_value_unchanged() {
        let rule = Rule::new(Placement::Start, "", Pattern::new("W").unwrap());
        assert_eq!(rule.apply("World").as_deref(), Some("World"));
    }

    #[test]
    fn test_match_all_matches_empty_input() {
        let rule = Rule::default();
        assert_eq!(rule.apply("").as_deref(), Some(""));

        let rule = Rule::new(Placement::End, "x", Pattern::new("a*").unwrap());
        assert_eq!(rule.apply("").as_deref(), Some("x"));
    }

    #[test]
    fn test_dot_plus_rejects_empty_input() {
        let rule = Rule::new(Placement::End, "x", Pattern::new(".+").unwrap());
        assert_eq!(rule.apply(""), None);
    }

    #[test]
    fn test_default_rule() {
        let rule = Rule::default();
        assert_eq!(rule.placement(), Placement::End);
        assert_eq!(rule.append_text(), "");
        assert_eq!(rule.pattern().source(), "");
    }

    #[test]
    fn test_ignore_case_flag() {
        let pattern = Pattern::with_flags("^hello", PatternFlags::ignore_case()).unwrap();
        assert!(pattern.is_match("HELLO world"));
        assert!(!Pattern::new("^hello").unwrap().is_match("HELLO world"));
    }

    #[test]
    fn test_multi_line_flag() {
        let flags = PatternFlags {
            multi_line: true,
            ..Default::default()
        };
        assert!(Pattern::with_flags("^b", flags).unwrap().is_match("a\nb"));
        assert!(!Pattern::new("^b").unwrap().is_match("a\nb"));
    }

    #[test]
    fn test_dot_matches_new_line_flag() {
        let flags = PatternFlags {
            dot_matches_new_line: true,
            ..Default::default()
        };
        assert!(Pattern::with_flags("a.b", flags).unwrap().is_match("a\nb"));
        assert!(!Pattern::new("a.b").unwrap().is_match("a\nb"));
    }

    #[test]
    fn test_pattern_equality_ignores_compiled_state() {
        let a = Pattern::new(r"\d+").unwrap();
        let b = Pattern::new(r"\d+").unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let c = Pattern::with_flags(r"\d+", PatternFlags::ignore_case()).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_pattern_surfaces_regex_error() {
        let err = Pattern::new("[unclosed").unwrap_err();
        assert!(matches!(err, regex::Error::Syntax(_)));
    }

    #[test]
    fn test_merge_over_defaults() {
        let defaults = Rule::new(Placement::Start, ">> ", Pattern::new("x").unwrap());

        let rule = RuleOptions::new().append_text("!").merge_over(&defaults);
        assert_eq!(rule.placement(), Placement::Start);
        assert_eq!(rule.append_text(), "!");
        assert_eq!(rule.pattern().source(), "x");

        let rule = RuleOptions::new().merge_over(&defaults);
        assert_eq!(rule, defaults);
    }

    #[test]
    fn test_display() {
        let pattern = Pattern::with_flags("^a", PatternFlags::ignore_case()).unwrap();
        assert_eq!(pattern.to_string(), "/^a/i");
        assert_eq!(Placement::Start.to_string(), "start");
    }
}
