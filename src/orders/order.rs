//! Order types.
//!
//! A player's submission parses into a list of `Order`s, each tagged with
//! the line it came from. Orders are then bucketed by the phase that
//! resolves them.

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::UnitKind;
use crate::galaxy::{DepositId, HullId, PlayerId};
use crate::resolve::phase::Phase;

/// A unit kind as written in orders: `factory-2`, `structural`, ...
///
/// `tech_level` is 0 for kinds that are not tech-levelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitKeyword {
    pub kind: UnitKind,
    pub tech_level: u8,
}

impl UnitKeyword {
    pub const fn new(kind: UnitKind, tech_level: u8) -> Self {
        UnitKeyword { kind, tech_level }
    }

    /// The catalog code this keyword names.
    pub fn code(&self) -> String {
        self.kind.code(self.tech_level)
    }
}

impl fmt::Display for UnitKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.kind.keyword().unwrap_or_else(|| self.kind.prefix());
        if self.kind.is_tech_levelled() {
            write!(f, "{}-{}", keyword, self.tech_level)
        } else {
            f.write_str(keyword)
        }
    }
}

/// What an assemble order builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupSpec {
    /// `factory-<n> <product>`
    Factory { tech_level: u8, product: UnitKeyword },
    /// `farm-<n>`
    Farm { tech_level: u8 },
    /// `mine-<n> DP<id>`
    Mine { tech_level: u8, deposit: DepositId },
}

impl GroupSpec {
    /// The unit assembled into the group.
    pub fn unit(&self) -> UnitKeyword {
        match *self {
            GroupSpec::Factory { tech_level, .. } => UnitKeyword::new(UnitKind::Factory, tech_level),
            GroupSpec::Farm { tech_level } => UnitKeyword::new(UnitKind::Farm, tech_level),
            GroupSpec::Mine { tech_level, .. } => UnitKeyword::new(UnitKind::Mine, tech_level),
        }
    }
}

/// The parsed intent of one order line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderKind {
    /// `assemble C1 500 factory-1 structural`
    Assemble {
        hull: HullId,
        quantity: u64,
        group: GroupSpec,
    },
    /// `name S7 "Intrepid"`
    Name { hull: HullId, name: String },
    /// `control C3`
    Control { hull: HullId },
}

impl OrderKind {
    /// The phase that resolves this order.
    pub fn phase(&self) -> Phase {
        match self {
            OrderKind::Assemble { .. } => Phase::Assembly,
            OrderKind::Name { .. } | OrderKind::Control { .. } => Phase::Control,
        }
    }

    /// The hull the order acts on.
    pub fn hull(&self) -> HullId {
        match self {
            OrderKind::Assemble { hull, .. }
            | OrderKind::Name { hull, .. }
            | OrderKind::Control { hull } => *hull,
        }
    }
}

/// A parsed order and the line it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Order {
    pub line: usize,
    pub kind: OrderKind,
}

/// One player's orders for a turn, grouped by phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseOrders {
    pub player: PlayerId,
    orders: BTreeMap<Phase, Vec<Order>>,
}

impl PhaseOrders {
    /// Creates an empty bundle.
    pub fn new(player: PlayerId) -> Self {
        PhaseOrders {
            player,
            orders: BTreeMap::new(),
        }
    }

    /// Buckets orders by phase, keeping submission order within each phase.
    pub fn from_orders(player: PlayerId, orders: impl IntoIterator<Item = Order>) -> Self {
        let mut bundle = PhaseOrders::new(player);
        for order in orders {
            bundle.push(order);
        }
        bundle
    }

    pub fn push(&mut self, order: Order) {
        self.orders.entry(order.kind.phase()).or_default().push(order);
    }

    /// Orders resolved by a phase, in submission order.
    pub fn for_phase(&self, phase: Phase) -> &[Order] {
        self.orders.get(&phase).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.orders.values().all(Vec::is_empty)
    }

    /// Total orders across all phases.
    pub fn len(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(line: usize, kind: OrderKind) -> Order {
        Order { line, kind }
    }

    #[test]
    fn unit_keyword_display() {
        assert_eq!(UnitKeyword::new(UnitKind::Factory, 2).to_string(), "factory-2");
        assert_eq!(UnitKeyword::new(UnitKind::ConsumerGoods, 0).to_string(), "consumer-goods");
        assert_eq!(UnitKeyword::new(UnitKind::SpaceDrive, 4).to_string(), "space-drive-4");
    }

    #[test]
    fn unit_keyword_code() {
        assert_eq!(UnitKeyword::new(UnitKind::Mine, 3).code(), "MIN-3");
        assert_eq!(UnitKeyword::new(UnitKind::Research, 0).code(), "RSCH");
    }

    #[test]
    fn group_spec_unit() {
        let group = GroupSpec::Mine {
            tech_level: 2,
            deposit: DepositId(4),
        };
        assert_eq!(group.unit(), UnitKeyword::new(UnitKind::Mine, 2));
    }

    #[test]
    fn orders_bucket_by_phase() {
        let bundle = PhaseOrders::from_orders(
            PlayerId(1),
            vec![
                order(
                    1,
                    OrderKind::Assemble {
                        hull: HullId::Colony(1),
                        quantity: 10,
                        group: GroupSpec::Farm { tech_level: 1 },
                    },
                ),
                order(2, OrderKind::Control { hull: HullId::Colony(2) }),
                order(
                    3,
                    OrderKind::Name {
                        hull: HullId::Ship(1),
                        name: "Intrepid".to_string(),
                    },
                ),
            ],
        );
        assert_eq!(bundle.len(), 3);
        assert_eq!(bundle.for_phase(Phase::Assembly).len(), 1);
        let control: Vec<usize> = bundle
            .for_phase(Phase::Control)
            .iter()
            .map(|o| o.line)
            .collect();
        assert_eq!(control, vec![2, 3]);
        assert!(bundle.for_phase(Phase::Retool).is_empty());
    }

    #[test]
    fn empty_bundle() {
        let bundle = PhaseOrders::new(PlayerId(3));
        assert!(bundle.is_empty());
        assert_eq!(bundle.len(), 0);
    }
}
