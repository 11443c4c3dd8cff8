//! Scoring engine: persona counters and the derived-metric arithmetic.
//!
//! All functions here are pure and total for well-typed, non-negative
//! inputs. Option codes are resolved to values by the flow tables before
//! anything reaches this module; an unmapped code is a caller error.

use serde::Serialize;

use crate::scenario::Scenario;

// ---------------------------------------------------------------------------
// ScoreCard
// ---------------------------------------------------------------------------

/// Per-scenario answer counters for one persona-quiz run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreCard {
    impostor: u32,
    eternal_student: u32,
    seeker: u32,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a card by counting occurrences in an answer sequence.
    pub fn tally(answers: impl IntoIterator<Item = Scenario>) -> Self {
        let mut card = Self::new();
        for answer in answers {
            card.record(answer);
        }
        card
    }

    /// Restore a card from already-persisted counters.
    pub fn from_counts(impostor: u32, eternal_student: u32, seeker: u32) -> Self {
        Self { impostor, eternal_student, seeker }
    }

    /// Increment the counter for one answered question by exactly 1.
    pub fn record(&mut self, scenario: Scenario) {
        match scenario {
            Scenario::Impostor => self.impostor += 1,
            Scenario::EternalStudent => self.eternal_student += 1,
            Scenario::Seeker => self.seeker += 1,
        }
    }

    pub fn get(&self, scenario: Scenario) -> u32 {
        match scenario {
            Scenario::Impostor => self.impostor,
            Scenario::EternalStudent => self.eternal_student,
            Scenario::Seeker => self.seeker,
        }
    }

    /// Total number of recorded answers.
    pub fn total(&self) -> u32 {
        self.impostor + self.eternal_student + self.seeker
    }

    /// The scenario with the maximum counter.
    ///
    /// Ties resolve deterministically to the first maximum in
    /// [`Scenario::ALL`] order; there is no business rule behind the order,
    /// it is simply fixed so repeated evaluation agrees.
    pub fn dominant(&self) -> Scenario {
        let mut best = Scenario::ALL[0];
        for scenario in Scenario::ALL {
            if self.get(scenario) > self.get(best) {
                best = scenario;
            }
        }
        best
    }
}

// ---------------------------------------------------------------------------
// Cost of inaction
// ---------------------------------------------------------------------------

/// Derived figures for the professional cost-of-inaction quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    /// `max(expected - current, 0)` per month.
    pub lost_per_month: i64,
    /// Loss accumulated over the delay period.
    pub lost_total: i64,
    /// Projection over 36 months.
    pub lost_three_years: i64,
}

/// Compute the cost of delaying the move from `current` to `expected`
/// monthly income by `months` months.
pub fn cost_of_inaction(expected: i64, current: i64, months: i64) -> CostBreakdown {
    let lost_per_month = (expected - current).max(0);
    CostBreakdown {
        lost_per_month,
        lost_total: lost_per_month * months,
        lost_three_years: lost_per_month * 36,
    }
}

// ---------------------------------------------------------------------------
// Lost potential
// ---------------------------------------------------------------------------

/// Derived figures for the non-professional lost-potential quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LostPotential {
    /// `months * 365 / 12`, rounded to the nearest day (ties to even).
    pub days: i64,
    /// How many times the "I should start" thought recurred.
    pub thoughts: i64,
    /// `4 + chosen self-sabotage items`.
    pub sabotage_forms: i64,
}

/// Compute the lost-potential figures from the three raw answers.
pub fn lost_potential(months: i64, freq_coef: i64, sabotage_count: i64) -> LostPotential {
    LostPotential {
        days: days_interested(months),
        thoughts: months * freq_coef,
        sabotage_forms: 4 + sabotage_count,
    }
}

/// `months * 365 / 12` to the nearest whole day, ties to even
/// (6 months is 182.5 days and counts as 182).
fn days_interested(months: i64) -> i64 {
    let total = months * 365;
    let base = total / 12;
    let rem2 = (total % 12) * 2;
    if rem2 > 12 {
        base + 1
    } else if rem2 < 12 {
        base
    } else {
        base + (base & 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_each_category() {
        let card = ScoreCard::tally([
            Scenario::Impostor,
            Scenario::Impostor,
            Scenario::Seeker,
        ]);
        assert_eq!(card.get(Scenario::Impostor), 2);
        assert_eq!(card.get(Scenario::EternalStudent), 0);
        assert_eq!(card.get(Scenario::Seeker), 1);
        assert_eq!(card.total(), 3);
    }

    #[test]
    fn dominant_picks_maximum() {
        let card = ScoreCard::from_counts(2, 1, 0);
        assert_eq!(card.dominant(), Scenario::Impostor);

        let card = ScoreCard::from_counts(0, 1, 2);
        assert_eq!(card.dominant(), Scenario::Seeker);
    }

    #[test]
    fn dominant_tie_resolves_in_fixed_order() {
        // Two-way tie between impostor and eternal_student.
        let card = ScoreCard::from_counts(2, 2, 1);
        assert_eq!(card.dominant(), Scenario::Impostor);

        // eternal_student vs seeker tie.
        let card = ScoreCard::from_counts(0, 2, 2);
        assert_eq!(card.dominant(), Scenario::EternalStudent);

        // Three-way tie.
        let card = ScoreCard::from_counts(1, 1, 1);
        assert_eq!(card.dominant(), Scenario::Impostor);
    }

    #[test]
    fn dominant_is_deterministic_on_repeat() {
        let card = ScoreCard::from_counts(2, 2, 1);
        let first = card.dominant();
        for _ in 0..10 {
            assert_eq!(card.dominant(), first);
        }
    }

    #[test]
    fn cost_of_inaction_reference_values() {
        let cost = cost_of_inaction(100_000, 30_000, 6);
        assert_eq!(cost.lost_per_month, 70_000);
        assert_eq!(cost.lost_total, 420_000);
        assert_eq!(cost.lost_three_years, 2_520_000);
    }

    #[test]
    fn cost_of_inaction_clamps_negative_gap() {
        let cost = cost_of_inaction(30_000, 100_000, 12);
        assert_eq!(cost.lost_per_month, 0);
        assert_eq!(cost.lost_total, 0);
        assert_eq!(cost.lost_three_years, 0);
    }

    #[test]
    fn lost_potential_reference_values() {
        let result = lost_potential(24, 4, 3);
        assert_eq!(result.days, 730);
        assert_eq!(result.thoughts, 96);
        assert_eq!(result.sabotage_forms, 7);
    }

    #[test]
    fn lost_potential_rounds_days_half_to_even() {
        // 6 months -> 182.5 days: the even neighbour wins.
        assert_eq!(lost_potential(6, 1, 0).days, 182);
        // 18 months -> 547.5 days: rounds up to the even 548.
        assert_eq!(lost_potential(18, 1, 0).days, 548);
    }

    #[test]
    fn lost_potential_exact_day_counts_pass_through() {
        assert_eq!(lost_potential(12, 1, 0).days, 365);
        assert_eq!(lost_potential(36, 1, 0).days, 1095);
    }
}
