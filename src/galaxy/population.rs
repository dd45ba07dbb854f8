//! Population records, pay and ration rates.

use serde::{Deserialize, Serialize};

/// Number of population classes.
pub const POPULATION_CLASS_COUNT: usize = 6;

/// A population class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PopulationClass {
    #[serde(rename = "PRO")]
    Professional,
    #[serde(rename = "SLD")]
    Soldier,
    #[serde(rename = "USK")]
    Unskilled,
    #[serde(rename = "UEM")]
    Unemployed,
    #[serde(rename = "CNW")]
    ConstructionCrew,
    #[serde(rename = "SPY")]
    SpyTeam,
}

/// All classes in declaration order. Ties in the death law resolve in this order.
pub const ALL_POPULATION_CLASSES: [PopulationClass; POPULATION_CLASS_COUNT] = [
    PopulationClass::Professional,
    PopulationClass::Soldier,
    PopulationClass::Unskilled,
    PopulationClass::Unemployed,
    PopulationClass::ConstructionCrew,
    PopulationClass::SpyTeam,
];

/// The people living on a hull.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Population {
    pub professional: u64,
    pub soldier: u64,
    pub unskilled: u64,
    pub unemployed: u64,
    pub construction_crews: u64,
    pub spy_teams: u64,
    /// Share of the population in open rebellion, 0.0 to 100.0.
    pub rebel_pct: f64,
    pub births_this_turn: u64,
    pub deaths_this_turn: u64,
}

impl Population {
    /// Head count of one class.
    pub fn quantity(&self, class: PopulationClass) -> u64 {
        match class {
            PopulationClass::Professional => self.professional,
            PopulationClass::Soldier => self.soldier,
            PopulationClass::Unskilled => self.unskilled,
            PopulationClass::Unemployed => self.unemployed,
            PopulationClass::ConstructionCrew => self.construction_crews,
            PopulationClass::SpyTeam => self.spy_teams,
        }
    }

    fn quantity_mut(&mut self, class: PopulationClass) -> &mut u64 {
        match class {
            PopulationClass::Professional => &mut self.professional,
            PopulationClass::Soldier => &mut self.soldier,
            PopulationClass::Unskilled => &mut self.unskilled,
            PopulationClass::Unemployed => &mut self.unemployed,
            PopulationClass::ConstructionCrew => &mut self.construction_crews,
            PopulationClass::SpyTeam => &mut self.spy_teams,
        }
    }

    /// Head count across all classes.
    pub fn total(&self) -> u64 {
        ALL_POPULATION_CLASSES.iter().map(|&c| self.quantity(c)).sum()
    }

    /// Computes how many people of each class die when `deaths` people must be removed.
    ///
    /// Each class loses `round(deaths * q / total)`. Rounding drift is settled
    /// against the largest classes first so the losses sum to exactly
    /// `min(deaths, total)`.
    pub fn proportional_losses(&self, deaths: u64) -> [u64; POPULATION_CLASS_COUNT] {
        let total = self.total();
        let deaths = deaths.min(total);
        let mut losses = [0u64; POPULATION_CLASS_COUNT];
        if deaths == 0 {
            return losses;
        }

        let quantities = ALL_POPULATION_CLASSES.map(|c| self.quantity(c));
        for (loss, &q) in losses.iter_mut().zip(quantities.iter()) {
            // round half up in integer arithmetic
            let scaled = 2 * u128::from(deaths) * u128::from(q) + u128::from(total);
            *loss = (scaled / (2 * u128::from(total))) as u64;
        }

        // Largest class first; stable sort keeps declaration order on ties.
        let mut order: Vec<usize> = (0..POPULATION_CLASS_COUNT).collect();
        order.sort_by(|&a, &b| quantities[b].cmp(&quantities[a]));

        let assigned: u64 = losses.iter().sum();
        if assigned < deaths {
            let mut short = deaths - assigned;
            for &i in &order {
                let room = quantities[i] - losses[i];
                let take = room.min(short);
                losses[i] += take;
                short -= take;
                if short == 0 {
                    break;
                }
            }
        } else if assigned > deaths {
            let mut over = assigned - deaths;
            for &i in &order {
                let give = losses[i].min(over);
                losses[i] -= give;
                over -= give;
                if over == 0 {
                    break;
                }
            }
        }
        losses
    }

    /// Removes `deaths` people proportionally across classes and records them
    /// as deaths this turn. Returns the number actually removed.
    pub fn kill_proportionally(&mut self, deaths: u64) -> u64 {
        let losses = self.proportional_losses(deaths);
        let mut removed = 0;
        for (class, loss) in ALL_POPULATION_CLASSES.iter().zip(losses) {
            *self.quantity_mut(*class) -= loss;
            removed += loss;
        }
        self.deaths_this_turn += removed;
        removed
    }
}

/// Pay per person per turn, by class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayRates {
    pub professional: f64,
    pub soldier: f64,
    pub unskilled: f64,
    pub unemployed: f64,
}

impl Default for PayRates {
    fn default() -> Self {
        PayRates {
            professional: 0.375,
            soldier: 0.25,
            unskilled: 0.125,
            unemployed: 0.0,
        }
    }
}

/// Food ration as a percentage of the standard ration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RationRates {
    pub ration_pct: f64,
}

impl Default for RationRates {
    fn default() -> Self {
        RationRates { ration_pct: 100.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(quantities: [u64; POPULATION_CLASS_COUNT]) -> Population {
        Population {
            professional: quantities[0],
            soldier: quantities[1],
            unskilled: quantities[2],
            unemployed: quantities[3],
            construction_crews: quantities[4],
            spy_teams: quantities[5],
            ..Population::default()
        }
    }

    #[test]
    fn total_sums_all_classes() {
        let pop = population([1, 2, 3, 4, 5, 6]);
        assert_eq!(pop.total(), 21);
    }

    #[test]
    fn losses_are_proportional() {
        let pop = population([100, 0, 300, 600, 0, 0]);
        assert_eq!(pop.proportional_losses(100), [10, 0, 30, 60, 0, 0]);
    }

    #[test]
    fn rounding_shortfall_goes_to_largest_class() {
        let pop = population([10, 10, 12, 0, 0, 0]);
        let losses = pop.proportional_losses(10);
        assert_eq!(losses, [3, 3, 4, 0, 0, 0]);

        // 3.33 rounds to 3 for each class, leaving 1 unassigned
        let pop = population([10, 10, 10, 0, 0, 0]);
        let losses = pop.proportional_losses(10);
        assert_eq!(losses, [4, 3, 3, 0, 0, 0]);
    }

    #[test]
    fn rounding_excess_taken_from_largest_class() {
        // 2.5 rounds up to 3 for each of four classes; two too many
        let pop = population([5, 5, 5, 5, 0, 0]);
        let losses = pop.proportional_losses(10);
        assert_eq!(losses.iter().sum::<u64>(), 10);
        assert_eq!(losses, [1, 3, 3, 3, 0, 0]);
    }

    #[test]
    fn losses_never_exceed_population() {
        let pop = population([3, 1, 0, 0, 0, 1]);
        let losses = pop.proportional_losses(50);
        assert_eq!(losses, [3, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn kill_proportionally_records_deaths() {
        let mut pop = population([1000, 0, 3000, 0, 0, 0]);
        let removed = pop.kill_proportionally(400);
        assert_eq!(removed, 400);
        assert_eq!(pop.professional, 900);
        assert_eq!(pop.unskilled, 2700);
        assert_eq!(pop.deaths_this_turn, 400);
    }

    #[test]
    fn kill_zero_is_noop() {
        let mut pop = population([10, 10, 10, 10, 10, 10]);
        assert_eq!(pop.kill_proportionally(0), 0);
        assert_eq!(pop.total(), 60);
        assert_eq!(pop.deaths_this_turn, 0);
    }
}
