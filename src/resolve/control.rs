//! Ownership and naming orders.
//!
//! Every control-phase order is applied on its own. A failed order is
//! reported and the rest of the batch still runs.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use super::phase::{Phase, TurnContext};
use crate::engine::EngineError;
use crate::galaxy::{Galaxy, HullId, PlayerId};
use crate::orders::{Order, OrderKind};

/// Why a control-phase order failed.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "error", rename_all = "kebab-case")]
pub enum ControlError {
    #[error("{player} line {line}: {hull} is owned by {owner}")]
    OwnedByOther {
        player: PlayerId,
        line: usize,
        hull: HullId,
        owner: PlayerId,
    },

    #[error("{player} line {line}: {hull} is not yours to name")]
    NotOwner {
        player: PlayerId,
        line: usize,
        hull: HullId,
    },

    #[error("{player} line {line}: no such hull {hull}")]
    UnknownHull {
        player: PlayerId,
        line: usize,
        hull: HullId,
    },
}

/// Applies one control-phase order for `player`.
///
/// Orders resolved in other phases are ignored.
pub fn apply_order(galaxy: &mut Galaxy, player: PlayerId, order: &Order) -> Result<(), ControlError> {
    let hull_id = order.kind.hull();
    let hull = galaxy.hull_mut(hull_id).ok_or(ControlError::UnknownHull {
        player,
        line: order.line,
        hull: hull_id,
    })?;
    match &order.kind {
        OrderKind::Control { .. } => match hull.owner {
            Some(owner) if owner != player => Err(ControlError::OwnedByOther {
                player,
                line: order.line,
                hull: hull_id,
                owner,
            }),
            _ => {
                hull.owner = Some(player);
                Ok(())
            }
        },
        OrderKind::Name { name, .. } => {
            if hull.owner != Some(player) {
                return Err(ControlError::NotOwner {
                    player,
                    line: order.line,
                    hull: hull_id,
                });
            }
            hull.name = name.clone();
            Ok(())
        }
        OrderKind::Assemble { .. } => Ok(()),
    }
}

pub(crate) fn run(ctx: &mut TurnContext<'_>) -> Result<(), EngineError> {
    for bundle in ctx.orders {
        for order in bundle.for_phase(Phase::Control) {
            match apply_order(ctx.galaxy, bundle.player, order) {
                Ok(()) => info!(player = %bundle.player, hull = %order.kind.hull(), line = order.line, "control order applied"),
                Err(err) => {
                    warn!(error = %err, "control order failed");
                    ctx.report.control_errors.push(err);
                }
            }
        }
    }
    Ok(())
}
