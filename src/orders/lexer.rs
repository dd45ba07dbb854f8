//! Order-language lexer.
//!
//! Splits a submission into tokens one line at a time. Every line ends in
//! an `Eol` token and the stream ends in `Eof`, so the parser can always
//! find a line boundary to recover at. Lexical problems (an unterminated
//! quote, an oversized number) become `Invalid` tokens rather than
//! aborting the scan.

use std::fmt;

use thiserror::Error;

use super::order::UnitKeyword;
use crate::catalog::{UnitKind, MAX_TECH_LEVEL};
use crate::galaxy::{DepositId, HullId};

/// Problems found while scanning a single token.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated quoted text")]
    UnterminatedText,

    #[error("number too large")]
    NumberTooLarge,

    #[error("tech level must be 1 to 10")]
    TechLevelOutOfRange,
}

/// Order-language verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Assemble,
    Control,
    Name,
}

impl Verb {
    pub const fn keyword(self) -> &'static str {
        match self {
            Verb::Assemble => "assemble",
            Verb::Control => "control",
            Verb::Name => "name",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Verb> {
        match word {
            "assemble" => Some(Verb::Assemble),
            "control" => Some(Verb::Control),
            "name" => Some(Verb::Name),
            _ => None,
        }
    }
}

/// A scanned token's payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Integer(u64),
    Decimal(f64),
    /// Quoted text with the quotes stripped.
    QuotedText(String),
    /// Any word matching nothing else, lower-cased.
    Text(String),
    Hull(HullId),
    Deposit(DepositId),
    BlockOpen,
    BlockClose,
    Verb(Verb),
    Unit(UnitKeyword),
    Eol,
    Eof,
    Invalid(LexError),
}

/// The category a grammar position can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Integer,
    Decimal,
    QuotedText,
    Text,
    ColonyId,
    ShipId,
    DepositId,
    BlockOpen,
    BlockClose,
    Assemble,
    Control,
    Name,
    FactoryUnit,
    FarmUnit,
    MineUnit,
    /// Any other unit-kind keyword.
    OtherUnit,
    Eol,
    Eof,
    Invalid,
}

impl TokenKind {
    /// Human-readable description for error messages.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::Integer => "integer",
            TokenKind::Decimal => "decimal number",
            TokenKind::QuotedText => "quoted text",
            TokenKind::Text => "text",
            TokenKind::ColonyId => "colony id",
            TokenKind::ShipId => "ship id",
            TokenKind::DepositId => "deposit id",
            TokenKind::BlockOpen => "'{'",
            TokenKind::BlockClose => "'}'",
            TokenKind::Assemble => "'assemble'",
            TokenKind::Control => "'control'",
            TokenKind::Name => "'name'",
            TokenKind::FactoryUnit => "factory unit",
            TokenKind::FarmUnit => "farm unit",
            TokenKind::MineUnit => "mine unit",
            TokenKind::OtherUnit => "unit",
            TokenKind::Eol => "end of line",
            TokenKind::Eof => "end of input",
            TokenKind::Invalid => "invalid token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// 1-based line number.
    pub line: usize,
    /// The source text of the token, quotes included.
    pub lexeme: String,
    pub value: TokenValue,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match &self.value {
            TokenValue::Integer(_) => TokenKind::Integer,
            TokenValue::Decimal(_) => TokenKind::Decimal,
            TokenValue::QuotedText(_) => TokenKind::QuotedText,
            TokenValue::Text(_) => TokenKind::Text,
            TokenValue::Hull(HullId::Colony(_)) => TokenKind::ColonyId,
            TokenValue::Hull(HullId::Ship(_)) => TokenKind::ShipId,
            TokenValue::Deposit(_) => TokenKind::DepositId,
            TokenValue::BlockOpen => TokenKind::BlockOpen,
            TokenValue::BlockClose => TokenKind::BlockClose,
            TokenValue::Verb(Verb::Assemble) => TokenKind::Assemble,
            TokenValue::Verb(Verb::Control) => TokenKind::Control,
            TokenValue::Verb(Verb::Name) => TokenKind::Name,
            TokenValue::Unit(unit) => match unit.kind {
                UnitKind::Factory => TokenKind::FactoryUnit,
                UnitKind::Farm => TokenKind::FarmUnit,
                UnitKind::Mine => TokenKind::MineUnit,
                _ => TokenKind::OtherUnit,
            },
            TokenValue::Eol => TokenKind::Eol,
            TokenValue::Eof => TokenKind::Eof,
            TokenValue::Invalid(_) => TokenKind::Invalid,
        }
    }

    /// The token as shown in error messages.
    pub fn describe(&self) -> String {
        match self.value {
            TokenValue::Eol | TokenValue::Eof => self.kind().describe().to_string(),
            _ => self.lexeme.clone(),
        }
    }
}

/// Scans a whole submission into tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (index, raw) in input.split('\n').enumerate() {
        let line = index + 1;
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        scan_line(text, line, &mut tokens);
        tokens.push(Token {
            line,
            lexeme: String::new(),
            value: TokenValue::Eol,
        });
    }
    let last_line = tokens.last().map_or(1, |t| t.line);
    tokens.push(Token {
        line: last_line,
        lexeme: String::new(),
        value: TokenValue::Eof,
    });
    tokens
}

fn scan_line(text: &str, line: usize, tokens: &mut Vec<Token>) {
    let mut rest = text;
    loop {
        rest = rest.trim_start();
        let Some(first) = rest.chars().next() else {
            return;
        };
        match first {
            ';' => return,
            '{' | '}' => {
                let value = if first == '{' {
                    TokenValue::BlockOpen
                } else {
                    TokenValue::BlockClose
                };
                tokens.push(Token {
                    line,
                    lexeme: first.to_string(),
                    value,
                });
                rest = &rest[1..];
            }
            '"' => match rest[1..].find('"') {
                Some(end) => {
                    let body = &rest[1..1 + end];
                    tokens.push(Token {
                        line,
                        lexeme: rest[..end + 2].to_string(),
                        value: TokenValue::QuotedText(clean_text(body)),
                    });
                    rest = &rest[end + 2..];
                }
                None => {
                    tokens.push(Token {
                        line,
                        lexeme: rest.to_string(),
                        value: TokenValue::Invalid(LexError::UnterminatedText),
                    });
                    return;
                }
            },
            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || matches!(c, '"' | '{' | '}' | ';'))
                    .unwrap_or(rest.len());
                let word = &rest[..end];
                tokens.push(Token {
                    line,
                    lexeme: word.to_string(),
                    value: classify(word),
                });
                rest = &rest[end..];
            }
        }
    }
}

/// Tabs become spaces; other control characters are dropped.
fn clean_text(body: &str) -> String {
    body.chars()
        .filter_map(|c| match c {
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

fn classify(word: &str) -> TokenValue {
    if let Some(value) = number(word) {
        return value;
    }
    if let Ok(hull) = word.parse::<HullId>() {
        return TokenValue::Hull(hull);
    }
    if let Ok(deposit) = word.parse::<DepositId>() {
        return TokenValue::Deposit(deposit);
    }

    let lower = word.to_ascii_lowercase();
    if let Some(verb) = Verb::from_keyword(&lower) {
        return TokenValue::Verb(verb);
    }
    if let Some(value) = unit_keyword(&lower) {
        return value;
    }
    TokenValue::Text(lower)
}

/// Integers allow `,` and `_` between digit groups; decimals have one `.`.
fn number(word: &str) -> Option<TokenValue> {
    let first = word.chars().next()?;
    if !first.is_ascii_digit() {
        return None;
    }
    let (whole, fraction) = match word.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (word, None),
    };
    if !whole.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '_') {
        return None;
    }
    let digits: String = whole.chars().filter(char::is_ascii_digit).collect();
    match fraction {
        None => Some(
            digits
                .parse::<u64>()
                .map(TokenValue::Integer)
                .unwrap_or(TokenValue::Invalid(LexError::NumberTooLarge)),
        ),
        Some(fraction) => {
            if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            format!("{}.{}", digits, fraction)
                .parse::<f64>()
                .ok()
                .map(TokenValue::Decimal)
        }
    }
}

/// Recognises `factory-<n>`-style and bare unit keywords.
fn unit_keyword(word: &str) -> Option<TokenValue> {
    if let Some(kind) = UnitKind::from_keyword(word) {
        if !kind.is_tech_levelled() {
            return Some(TokenValue::Unit(UnitKeyword::new(kind, 0)));
        }
    }
    let (base, level) = word.rsplit_once('-')?;
    if level.is_empty() || !level.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let kind = UnitKind::from_keyword(base).filter(|k| k.is_tech_levelled())?;
    match level.parse::<u8>() {
        Ok(tech) if (1..=MAX_TECH_LEVEL).contains(&tech) => {
            Some(TokenValue::Unit(UnitKeyword::new(kind, tech)))
        }
        _ => Some(TokenValue::Invalid(LexError::TechLevelOutOfRange)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(input: &str) -> Vec<TokenValue> {
        tokenize(input).into_iter().map(|t| t.value).collect()
    }

    #[test]
    fn empty_input_is_one_line() {
        assert_eq!(values(""), vec![TokenValue::Eol, TokenValue::Eof]);
    }

    #[test]
    fn integers_ignore_separators() {
        assert_eq!(
            values("500 1,000 2_500_000"),
            vec![
                TokenValue::Integer(500),
                TokenValue::Integer(1000),
                TokenValue::Integer(2_500_000),
                TokenValue::Eol,
                TokenValue::Eof,
            ]
        );
    }

    #[test]
    fn decimals() {
        assert_eq!(values("1.25")[0], TokenValue::Decimal(1.25));
        assert_eq!(values("1,000.5")[0], TokenValue::Decimal(1000.5));
        assert_eq!(values("1.")[0], TokenValue::Text("1.".to_string()));
    }

    #[test]
    fn oversized_integer_is_invalid() {
        assert_eq!(
            values("99999999999999999999999")[0],
            TokenValue::Invalid(LexError::NumberTooLarge)
        );
    }

    #[test]
    fn ids_are_classified_by_prefix() {
        assert_eq!(
            values("C1 s7 DP12"),
            vec![
                TokenValue::Hull(HullId::Colony(1)),
                TokenValue::Hull(HullId::Ship(7)),
                TokenValue::Deposit(DepositId(12)),
                TokenValue::Eol,
                TokenValue::Eof,
            ]
        );
    }

    #[test]
    fn verbs_are_case_insensitive() {
        assert_eq!(values("ASSEMBLE")[0], TokenValue::Verb(Verb::Assemble));
        assert_eq!(values("Name")[0], TokenValue::Verb(Verb::Name));
        assert_eq!(values("control")[0], TokenValue::Verb(Verb::Control));
    }

    #[test]
    fn unit_keywords() {
        assert_eq!(
            values("factory-1 Farm-2 mine-10 hyper-drive-3 consumer-goods research structural")[..7],
            [
                TokenValue::Unit(UnitKeyword::new(UnitKind::Factory, 1)),
                TokenValue::Unit(UnitKeyword::new(UnitKind::Farm, 2)),
                TokenValue::Unit(UnitKeyword::new(UnitKind::Mine, 10)),
                TokenValue::Unit(UnitKeyword::new(UnitKind::HyperDrive, 3)),
                TokenValue::Unit(UnitKeyword::new(UnitKind::ConsumerGoods, 0)),
                TokenValue::Unit(UnitKeyword::new(UnitKind::Research, 0)),
                TokenValue::Unit(UnitKeyword::new(UnitKind::Structural, 0)),
            ]
        );
    }

    #[test]
    fn tech_level_out_of_range() {
        assert_eq!(
            values("factory-0")[0],
            TokenValue::Invalid(LexError::TechLevelOutOfRange)
        );
        assert_eq!(
            values("farm-11")[0],
            TokenValue::Invalid(LexError::TechLevelOutOfRange)
        );
        assert_eq!(
            values("sensor-999")[0],
            TokenValue::Invalid(LexError::TechLevelOutOfRange)
        );
    }

    #[test]
    fn bare_tech_kind_is_text() {
        assert_eq!(values("factory")[0], TokenValue::Text("factory".to_string()));
        assert_eq!(values("research-2")[0], TokenValue::Text("research-2".to_string()));
    }

    #[test]
    fn unknown_words_are_lowercased_text() {
        assert_eq!(values("Widget")[0], TokenValue::Text("widget".to_string()));
    }

    #[test]
    fn quoted_text_is_cleaned() {
        let tokens = tokenize("name S7 \"The\tBig\u{7}  One\"");
        assert_eq!(tokens[2].value, TokenValue::QuotedText("The Big  One".to_string()));
        assert_eq!(tokens[2].lexeme, "\"The\tBig\u{7}  One\"");
    }

    #[test]
    fn quoted_text_keeps_semicolons() {
        let tokens = tokenize("\"a;b\" ; comment");
        assert_eq!(tokens[0].value, TokenValue::QuotedText("a;b".to_string()));
        assert_eq!(tokens[1].value, TokenValue::Eol);
    }

    #[test]
    fn unterminated_quote_consumes_line() {
        let tokens = tokenize("name C1 \"oops\nname C2 \"ok\"");
        assert_eq!(tokens[2].value, TokenValue::Invalid(LexError::UnterminatedText));
        assert_eq!(tokens[3].value, TokenValue::Eol);
        assert_eq!(tokens[6].value, TokenValue::QuotedText("ok".to_string()));
        assert_eq!(tokens[6].line, 2);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(
            values("; whole line\nC1 ; trailing"),
            vec![
                TokenValue::Eol,
                TokenValue::Hull(HullId::Colony(1)),
                TokenValue::Eol,
                TokenValue::Eof,
            ]
        );
    }

    #[test]
    fn block_delimiters() {
        assert_eq!(
            values("{C1}")[..3],
            [
                TokenValue::BlockOpen,
                TokenValue::Hull(HullId::Colony(1)),
                TokenValue::BlockClose,
            ]
        );
    }

    #[test]
    fn line_numbers_and_crlf() {
        let tokens = tokenize("C1\r\n\r\nS2\r\n");
        let lines: Vec<(usize, TokenKind)> = tokens.iter().map(|t| (t.line, t.kind())).collect();
        assert_eq!(
            lines,
            vec![
                (1, TokenKind::ColonyId),
                (1, TokenKind::Eol),
                (2, TokenKind::Eol),
                (3, TokenKind::ShipId),
                (3, TokenKind::Eol),
                (4, TokenKind::Eol),
                (4, TokenKind::Eof),
            ]
        );
    }

    #[test]
    fn describe_uses_lexeme_or_kind() {
        let tokens = tokenize("Widget");
        assert_eq!(tokens[0].describe(), "Widget");
        assert_eq!(tokens[1].describe(), "end of line");
        assert_eq!(tokens[2].describe(), "end of input");
    }
}
