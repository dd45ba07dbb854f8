//! Canonical order text and annotated submissions.

use super::order::{GroupSpec, Order, OrderKind};
use super::parser::ParsedOrders;

/// Formats an order in canonical form. The output parses back to the same
/// order.
pub fn format_order(order: &OrderKind) -> String {
    match order {
        OrderKind::Assemble {
            hull,
            quantity,
            group,
        } => match group {
            GroupSpec::Factory { product, .. } => {
                format!("assemble {} {} {} {}", hull, quantity, group.unit(), product)
            }
            GroupSpec::Farm { .. } => format!("assemble {} {} {}", hull, quantity, group.unit()),
            GroupSpec::Mine { deposit, .. } => {
                format!("assemble {} {} {} {}", hull, quantity, group.unit(), deposit)
            }
        },
        OrderKind::Name { hull, name } => format!("name {} \"{}\"", hull, name),
        OrderKind::Control { hull } => format!("control {}", hull),
    }
}

/// Formats orders one per line, each newline-terminated.
pub fn format_orders(orders: &[Order]) -> String {
    let mut out = String::new();
    for order in orders {
        out.push_str(&format_order(&order.kind));
        out.push('\n');
    }
    out
}

/// Echoes a submission with each error written as a comment beneath the
/// line it belongs to. The result is itself a valid submission.
pub fn annotate(input: &str, parsed: &ParsedOrders) -> String {
    let mut out = String::new();
    let mut errors = parsed.errors.iter().peekable();
    for (index, text) in input.lines().enumerate() {
        let line = index + 1;
        out.push_str(text);
        out.push('\n');
        while let Some(error) = errors.next_if(|e| e.line <= line) {
            out.push_str(&format!(";; error: {}\n", error));
            if !error.rejected.is_empty() {
                out.push_str(&format!(";; rejected: {}\n", error.rejected.join(" ")));
            }
        }
    }
    for error in errors {
        out.push_str(&format!(";; error: {}\n", error));
    }
    out
}
