use itertools::Itertools;
use lazy_regex::regex::RegexBuilder;
use lazy_regex::{Regex, regex};

use crate::error::{EvalError, EvalResult};

/// Compiled size above which a delimiter set is rejected.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Splits expressions into trimmed sub-tokens around a fixed set of delimiters.
///
/// Every delimiter occurrence is a token of its own, and every run of text between two
/// delimiters is a token once trimmed. Whitespace-only runs are dropped.
#[derive(Debug, Clone)]
pub enum Tokenizer {
    /// All delimiters are a single character.
    Chars(Vec<char>),
    /// At least one delimiter spans several characters.
    Pattern(Regex),
}

impl Tokenizer {
    pub fn new<'a>(delimiters: impl IntoIterator<Item = &'a str>) -> EvalResult<Self> {
        let delimiters = delimiters
            .into_iter()
            .filter(|d| !d.is_empty())
            .unique()
            .collect_vec();

        if delimiters.iter().all(|d| d.chars().count() == 1) {
            let chars = delimiters.iter().filter_map(|d| d.chars().next()).collect_vec();
            return Ok(Self::Chars(chars));
        }

        // Descending order puts "->" ahead of "-" and "<->" ahead of "<", so the longest
        // overlapping delimiter wins the alternation.
        let alternation = delimiters
            .iter()
            .sorted_by(|a, b| b.cmp(a))
            .map(|d| lazy_regex::regex::escape(d))
            .join("|");
        let pattern = RegexBuilder::new(&alternation)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|err| EvalError::DelimiterPattern {
                message: err.to_string(),
            })?;
        Ok(Self::Pattern(pattern))
    }

    /// Tokenizer for the standard connectives and parentheses.
    pub fn standard() -> Self {
        Self::Pattern((*regex!(r"\||<->|->|\)|\(|&|!")).clone())
    }

    pub fn tokenize<'t, 's>(&'t self, subject: &'s str) -> Tokens<'t, 's> {
        Tokens {
            tokenizer: self,
            subject,
            pos: 0,
            pending: None,
        }
    }

    /// Byte range of the first delimiter at or after `pos`.
    fn find_delimiter(&self, subject: &str, pos: usize) -> Option<(usize, usize)> {
        match self {
            Self::Chars(chars) => subject[pos..]
                .char_indices()
                .find(|(_, c)| chars.contains(c))
                .map(|(i, c)| (pos + i, pos + i + c.len_utf8())),
            Self::Pattern(pattern) => pattern.find_at(subject, pos).map(|m| (m.start(), m.end())),
        }
    }
}

/// Lazy token sequence produced by [`Tokenizer::tokenize`].
#[derive(Debug, Clone)]
pub struct Tokens<'t, 's> {
    tokenizer: &'t Tokenizer,
    subject: &'s str,
    pos: usize,
    pending: Option<&'s str>,
}

impl<'s> Iterator for Tokens<'_, 's> {
    type Item = &'s str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(delimiter) = self.pending.take() {
                return Some(delimiter);
            }
            if self.pos >= self.subject.len() {
                return None;
            }

            let literal = match self.tokenizer.find_delimiter(self.subject, self.pos) {
                Some((start, end)) => {
                    let literal = &self.subject[self.pos..start];
                    self.pending = Some(&self.subject[start..end]);
                    self.pos = end;
                    literal
                }
                None => {
                    let literal = &self.subject[self.pos..];
                    self.pos = self.subject.len();
                    literal
                }
            };

            let literal = literal.trim();
            if !literal.is_empty() {
                return Some(literal);
            }
        }
    }
}
