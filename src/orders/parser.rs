//! Recovering order parser.
//!
//! Parses a token stream into orders one statement per line. A malformed
//! line never aborts the batch: the error is recorded with the rest of the
//! line's tokens and parsing resumes on the next line.

use std::fmt;

use thiserror::Error;

use super::lexer::{tokenize, LexError, Token, TokenKind, TokenValue};
use super::order::{GroupSpec, Order, OrderKind, PhaseOrders, UnitKeyword};
use crate::catalog::UnitKind;
use crate::galaxy::{DepositId, HullId, PlayerId};

/// Errors that can occur parsing one statement.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected '{found}', expected {expected}")]
    UnexpectedToken { expected: String, found: String },

    #[error("{reason}: '{found}'")]
    Lexical { reason: LexError, found: String },

    #[error("quantity must be greater than zero")]
    ZeroQuantity,

    #[error("name must not be empty")]
    EmptyName,
}

/// A parse error and the line it occurred on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub error: ParseError,
    /// Source text of the tokens discarded during recovery.
    pub rejected: Vec<String>,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// The result of parsing one submission: every accepted order and every
/// rejected line, both in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOrders {
    pub orders: Vec<Order>,
    pub errors: Vec<LineError>,
}

impl ParsedOrders {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Groups the accepted orders by phase for `player`.
    pub fn into_phase_orders(self, player: PlayerId) -> PhaseOrders {
        PhaseOrders::from_orders(player, self.orders)
    }
}

/// Parses a player's submission.
pub fn parse(input: &str) -> ParsedOrders {
    Parser::new(tokenize(input)).run()
}

const VERBS: &[TokenKind] = &[TokenKind::Assemble, TokenKind::Control, TokenKind::Name];
const HULL_IDS: &[TokenKind] = &[TokenKind::ColonyId, TokenKind::ShipId];
const GROUP_UNITS: &[TokenKind] = &[
    TokenKind::FactoryUnit,
    TokenKind::FarmUnit,
    TokenKind::MineUnit,
];
const PRODUCTS: &[TokenKind] = &[
    TokenKind::FactoryUnit,
    TokenKind::FarmUnit,
    TokenKind::MineUnit,
    TokenKind::OtherUnit,
];

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn run(mut self) -> ParsedOrders {
        let mut parsed = ParsedOrders::default();
        loop {
            match self.peek().kind() {
                TokenKind::Eof => break,
                TokenKind::Eol => {
                    self.pos += 1;
                    continue;
                }
                _ => {}
            }
            let line = self.peek().line;
            match self.statement() {
                Ok(kind) => parsed.orders.push(Order { line, kind }),
                Err(error) => {
                    let line = self.peek().line;
                    let rejected = self.reject_to_eol();
                    parsed.errors.push(LineError {
                        line,
                        error,
                        rejected,
                    });
                }
            }
        }
        parsed
    }

    fn peek(&self) -> &Token {
        // tokenize always ends the stream with Eof, which is never consumed.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Consumes the next token if it is one of `kinds`.
    fn accept(&mut self, kinds: &[TokenKind]) -> Result<Token, ParseError> {
        let token = self.peek();
        if let TokenValue::Invalid(reason) = token.value {
            return Err(ParseError::Lexical {
                reason,
                found: token.lexeme.clone(),
            });
        }
        if !kinds.contains(&token.kind()) {
            return Err(ParseError::UnexpectedToken {
                expected: describe(kinds),
                found: token.describe(),
            });
        }
        let token = token.clone();
        self.pos += 1;
        Ok(token)
    }

    /// Discards the rest of the current line, returning the discarded text.
    fn reject_to_eol(&mut self) -> Vec<String> {
        let mut rejected = Vec::new();
        loop {
            match self.peek().kind() {
                TokenKind::Eof => break,
                TokenKind::Eol => {
                    self.pos += 1;
                    break;
                }
                _ => {
                    rejected.push(self.peek().lexeme.clone());
                    self.pos += 1;
                }
            }
        }
        rejected
    }

    fn end_of_statement(&mut self) -> Result<(), ParseError> {
        match self.peek().kind() {
            TokenKind::Eof => Ok(()),
            _ => self.accept(&[TokenKind::Eol]).map(|_| ()),
        }
    }

    fn statement(&mut self) -> Result<OrderKind, ParseError> {
        let verb = self.accept(VERBS)?;
        let kind = match verb.kind() {
            TokenKind::Assemble => self.assemble()?,
            TokenKind::Name => self.name()?,
            _ => OrderKind::Control {
                hull: self.hull_id()?,
            },
        };
        self.end_of_statement()?;
        Ok(kind)
    }

    fn assemble(&mut self) -> Result<OrderKind, ParseError> {
        let hull = self.hull_id()?;
        let quantity = match self.accept(&[TokenKind::Integer])?.value {
            TokenValue::Integer(0) => return Err(ParseError::ZeroQuantity),
            TokenValue::Integer(n) => n,
            _ => unreachable!("accept returned a non-integer"),
        };
        let unit = self.unit(GROUP_UNITS)?;
        let group = match unit.kind {
            UnitKind::Factory => GroupSpec::Factory {
                tech_level: unit.tech_level,
                product: self.unit(PRODUCTS)?,
            },
            UnitKind::Farm => GroupSpec::Farm {
                tech_level: unit.tech_level,
            },
            _ => GroupSpec::Mine {
                tech_level: unit.tech_level,
                deposit: self.deposit_id()?,
            },
        };
        Ok(OrderKind::Assemble {
            hull,
            quantity,
            group,
        })
    }

    fn name(&mut self) -> Result<OrderKind, ParseError> {
        let hull = self.hull_id()?;
        let name = match self.accept(&[TokenKind::QuotedText])?.value {
            TokenValue::QuotedText(text) => text.trim().to_string(),
            _ => unreachable!("accept returned non-text"),
        };
        if name.is_empty() {
            return Err(ParseError::EmptyName);
        }
        Ok(OrderKind::Name { hull, name })
    }

    fn hull_id(&mut self) -> Result<HullId, ParseError> {
        match self.accept(HULL_IDS)?.value {
            TokenValue::Hull(id) => Ok(id),
            _ => unreachable!("accept returned a non-hull token"),
        }
    }

    fn deposit_id(&mut self) -> Result<DepositId, ParseError> {
        match self.accept(&[TokenKind::DepositId])?.value {
            TokenValue::Deposit(id) => Ok(id),
            _ => unreachable!("accept returned a non-deposit token"),
        }
    }

    fn unit(&mut self, kinds: &[TokenKind]) -> Result<UnitKeyword, ParseError> {
        match self.accept(kinds)?.value {
            TokenValue::Unit(unit) => Ok(unit),
            _ => unreachable!("accept returned a non-unit token"),
        }
    }
}

/// Joins kind descriptions as "a, b or c".
fn describe(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => String::new(),
        [only] => only.describe().to_string(),
        [init @ .., last] => {
            let init: Vec<&str> = init.iter().map(|k| k.describe()).collect();
            format!("{} or {}", init.join(", "), last.describe())
        }
    }
}
