//! Instruction tokenizer
//!
//! Splits an instruction into whitespace-delimited tokens. Only space, tab,
//! newline and carriage return separate tokens; every other character,
//! punctuation included, belongs to a token.

/// A single word of an instruction
///
/// Keeps the original text for identifier slots and an uppercased copy for
/// keyword matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    raw: &'a str,
    upper: String,
}

impl<'a> Token<'a> {
    fn new(raw: &'a str) -> Self {
        Token {
            raw,
            upper: raw.to_uppercase(),
        }
    }

    /// The token as written
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The token case-folded to uppercase
    pub fn upper(&self) -> &str {
        &self.upper
    }

    /// Whether this token is `keyword` (which must be given in uppercase)
    ///
    /// Folding uses Unicode uppercasing, so letters that uppercase to ASCII
    /// match too: `dEBıT` (dotless i) is the keyword `DEBIT`.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.upper == keyword
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Split `input` into tokens, preserving order and casing
///
/// Never yields an empty token; empty or all-separator input yields an
/// empty vector.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    input
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .map(Token::new)
        .collect()
}
