//! The order language.
//!
//! Players submit one statement per line:
//!
//! ```text
//! assemble C1 500 factory-1 structural   ; build a factory group
//! assemble C1 2,000 mine-1 DP3
//! name S7 "Intrepid"
//! control C4
//! ```
//!
//! `parse` turns a submission into orders plus per-line errors, `format_order`
//! writes the canonical form back, and `annotate` echoes a submission with
//! its errors for the player to fix.

pub mod format;
pub mod lexer;
pub mod order;
pub mod parser;

pub use format::{annotate, format_order, format_orders};
pub use lexer::{tokenize, LexError, Token, TokenKind, TokenValue, Verb};
pub use order::{GroupSpec, Order, OrderKind, PhaseOrders, UnitKeyword};
pub use parser::{parse, LineError, ParseError, ParsedOrders};
