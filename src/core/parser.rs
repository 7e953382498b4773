//! Instruction grammar parser
//!
//! A recursive-descent parser over the token slice produced by the tokenizer.
//! The grammar is positional:
//!
//! ```text
//! DEBIT  <amount> <CUR> FROM ACCOUNT <id> FOR CREDIT TO ACCOUNT <id> [ON <YYYY-MM-DD>]
//! CREDIT <amount> <CUR> TO ACCOUNT <id> FOR DEBIT FROM ACCOUNT <id> [ON <YYYY-MM-DD>]
//! ```
//!
//! # Anchor
//!
//! The anchor is the first `DEBIT` or `CREDIT` token anywhere in the stream.
//! Tokens before it are skipped, so the earliest keyword wins even if it was
//! meant as the companion keyword of the `FOR` clause.
//!
//! # Totality
//!
//! Every input is either a complete [`Instruction`] or a [`GrammarError`]
//! naming the rule that failed. [`parse_instruction`] folds the error into
//! [`ParsedInstruction::Unparsed`]; nothing partially parsed escapes.
//!
//! Keywords match case-insensitively. Identifier slots keep the token as
//! written. Tokens after the grammar tail (or after the date clause) that do
//! not start an `ON` clause are ignored.

use tracing::debug;

use crate::core::tokenizer::{tokenize, Token};
use crate::core::validators::{is_valid_account_id, is_valid_date};
use crate::types::{
    Amount, CurrencyCode, GrammarError, Instruction, InstructionType, ParsedInstruction,
};

/// Keywords of a grammar tail: `<lead> ACCOUNT <id> FOR <companion> <trail> ACCOUNT <id>`
struct TailKeywords {
    lead: &'static str,
    companion: &'static str,
    trail: &'static str,
}

fn tail_keywords(kind: InstructionType) -> TailKeywords {
    match kind {
        InstructionType::Debit => TailKeywords {
            lead: "FROM",
            companion: "CREDIT",
            trail: "TO",
        },
        InstructionType::Credit => TailKeywords {
            lead: "TO",
            companion: "DEBIT",
            trail: "FROM",
        },
    }
}

/// Parser state: an immutable token slice and a cursor into it
struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    cursor: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Parser { tokens, cursor: 0 }
    }

    /// instruction := anchor amount currency tail date_clause?
    fn parse(mut self) -> Result<Instruction, GrammarError> {
        let kind = self.anchor()?;
        let amount = self.amount()?;
        let currency = self.currency()?;
        let (first, second) = self.tail(kind)?;
        let execute_by = self.date_clause()?;

        let (debit_account, credit_account) = match kind {
            InstructionType::Debit => (first, second),
            InstructionType::Credit => (second, first),
        };

        Ok(Instruction {
            kind,
            amount,
            currency,
            debit_account,
            credit_account,
            execute_by,
        })
    }

    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.cursor)
    }

    /// Consume the next token, failing with `expected` at end of input
    fn advance(&mut self, expected: &'static str) -> Result<(usize, &'t Token<'a>), GrammarError> {
        let position = self.cursor;
        let token = self
            .tokens
            .get(position)
            .ok_or(GrammarError::UnexpectedEnd { expected, position })?;
        self.cursor += 1;
        Ok((position, token))
    }

    fn anchor(&mut self) -> Result<InstructionType, GrammarError> {
        let (position, kind) = self
            .tokens
            .iter()
            .enumerate()
            .find_map(|(position, token)| match token.upper() {
                "DEBIT" => Some((position, InstructionType::Debit)),
                "CREDIT" => Some((position, InstructionType::Credit)),
                _ => None,
            })
            .ok_or(GrammarError::MissingAnchor)?;

        self.cursor = position + 1;
        Ok(kind)
    }

    /// Digits only, no leading zero, positive, fits in u64
    fn amount(&mut self) -> Result<Amount, GrammarError> {
        let (position, token) = self.advance("amount")?;
        let raw = token.raw();

        let canonical = !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && !raw.starts_with('0');

        match raw.parse::<Amount>() {
            Ok(amount) if canonical && amount > 0 => Ok(amount),
            _ => Err(GrammarError::InvalidAmount {
                token: raw.to_string(),
                position,
            }),
        }
    }

    fn currency(&mut self) -> Result<CurrencyCode, GrammarError> {
        let (position, token) = self.advance("currency")?;

        CurrencyCode::parse(token.raw()).ok_or_else(|| GrammarError::InvalidCurrency {
            token: token.raw().to_string(),
            position,
        })
    }

    /// Walk the fixed tail for `kind`, returning the two identifiers in
    /// order of appearance
    fn tail(&mut self, kind: InstructionType) -> Result<(String, String), GrammarError> {
        let keywords = tail_keywords(kind);

        self.keyword(keywords.lead)?;
        self.keyword("ACCOUNT")?;
        let first = self.account_id()?;

        self.keyword("FOR")?;
        self.keyword(keywords.companion)?;
        self.keyword(keywords.trail)?;
        self.keyword("ACCOUNT")?;
        let second = self.account_id()?;

        Ok((first, second))
    }

    fn keyword(&mut self, keyword: &'static str) -> Result<(), GrammarError> {
        let (position, token) = self.advance(keyword)?;

        if token.is_keyword(keyword) {
            Ok(())
        } else {
            Err(GrammarError::UnexpectedToken {
                expected: keyword,
                found: token.raw().to_string(),
                position,
            })
        }
    }

    fn account_id(&mut self) -> Result<String, GrammarError> {
        let (position, token) = self.advance("account identifier")?;

        if is_valid_account_id(token.raw()) {
            Ok(token.raw().to_string())
        } else {
            Err(GrammarError::InvalidAccountId {
                token: token.raw().to_string(),
                position,
            })
        }
    }

    /// date_clause := ON <YYYY-MM-DD>
    ///
    /// The clause is optional, but once `ON` appears the date is mandatory.
    fn date_clause(&mut self) -> Result<Option<String>, GrammarError> {
        match self.peek() {
            Some(token) if token.is_keyword("ON") => self.cursor += 1,
            _ => return Ok(None),
        }

        let (position, token) = self.advance("execution date")?;
        if is_valid_date(token.raw()) {
            Ok(Some(token.raw().to_string()))
        } else {
            Err(GrammarError::InvalidDate {
                token: token.raw().to_string(),
                position,
            })
        }
    }
}

/// Parse an instruction, reporting which grammar rule failed
pub fn try_parse_instruction(text: &str) -> Result<Instruction, GrammarError> {
    let tokens = tokenize(text);
    Parser::new(&tokens).parse()
}

/// Parse an instruction into a [`ParsedInstruction`]
///
/// Any grammar failure yields `Unparsed`; the reason is logged at debug
/// level.
pub fn parse_instruction(text: &str) -> ParsedInstruction {
    match try_parse_instruction(text) {
        Ok(instruction) => ParsedInstruction::Parsed(instruction),
        Err(error) => {
            debug!(reason = %error, "instruction did not match the grammar");
            ParsedInstruction::Unparsed
        }
    }
}
