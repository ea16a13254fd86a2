//! Wildcard pattern compilation.
//!
//! # Grammar
//! ```text
//! **   any run of characters, including '/'
//! *    any run of characters except '/'
//! ?    exactly one character
//! else the character itself (regex metacharacters are escaped)
//! ```
//!
//! # Design Decisions
//! - Patterns are lowercased at compile time; candidates at match time
//! - Compiled expression is anchored on both ends (whole-string match)
//! - Every literal goes through `regex::escape`, so only the regex size
//!   limit can make compilation fail
//! - The size limit is raised to 256 MiB; each `*` costs roughly a kilobyte
//!   of compiled program, so patterns up to tens of thousands of wildcards compile

use regex::{Regex, RegexBuilder};
use thiserror::Error;

const REGEX_SIZE_LIMIT: usize = 256 * (1 << 20);
const DFA_SIZE_LIMIT: usize = 32 * (1 << 20);

/// Errors produced while validating or compiling a pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    /// Pattern is empty or whitespace.
    #[error("pattern is empty")]
    Empty,

    /// Pattern has no literal character besides `*` and `?`.
    #[error("pattern '{0}' contains only wildcards")]
    WildcardOnly(String),

    /// The generated expression was rejected by the regex engine.
    #[error("pattern could not be compiled: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// `**`
    AnyDeep,
    /// `*`
    AnySegment,
    /// `?`
    AnyChar,
    Literal(char),
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        let token = match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                Token::AnyDeep
            }
            '*' => Token::AnySegment,
            '?' => Token::AnyChar,
            other => Token::Literal(other),
        };
        tokens.push(token);
    }

    tokens
}

fn to_expression(tokens: &[Token]) -> String {
    let mut expr = String::with_capacity(tokens.len() * 2 + 2);
    let mut buf = [0u8; 4];

    expr.push('^');
    for token in tokens {
        match token {
            Token::AnyDeep => expr.push_str(".*"),
            Token::AnySegment => expr.push_str("[^/]*"),
            Token::AnyChar => expr.push('.'),
            Token::Literal(c) => expr.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    expr.push('$');

    expr
}

/// A wildcard pattern compiled into an anchored matcher.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compile `pattern`. The pattern is lowercased first.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let source = pattern.to_lowercase();
        let expr = to_expression(&tokenize(&source));
        let regex = RegexBuilder::new(&expr)
            .dot_matches_new_line(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .dfa_size_limit(DFA_SIZE_LIMIT)
            .build()?;

        Ok(Self { source, regex })
    }

    /// Returns true if the whole of `candidate` (compared in lowercase) matches.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(&candidate.to_lowercase())
    }

    /// The lowercased pattern this matcher was built from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The generated regular expression.
    pub fn expression(&self) -> &str {
        self.regex.as_str()
    }
}
