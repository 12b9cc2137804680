use crate::report::format::non_finite_text;
use serde::{Serialize, Serializer};

/// Inputs of an all-in progressive plan. Only obtainable through
/// [`StakingParameters::new`] or [`StakingParameters::parse`], which reject
/// non-finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StakingParameters {
    pub start_amount: f64,
    pub target_amount: f64,
    pub start_odds: f64,
    pub odds_increment: f64,
}

/// One wager of the plan. `stake` always equals `bankroll_before`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StakingStep {
    pub index: usize, // 1-based
    #[serde(serialize_with = "amount")]
    pub bankroll_before: f64,
    #[serde(serialize_with = "amount")]
    pub stake: f64,
    pub odds: f64,
    #[serde(serialize_with = "amount")]
    pub potential_win: f64,
    #[serde(serialize_with = "amount")]
    pub bankroll_after: f64,
}

// JSON has no infinity: an overflowed bankroll goes out as "Infinity" instead of null.
fn amount<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match non_finite_text(*value) {
        Some(text) => serializer.serialize_str(text),
        None => serializer.serialize_f64(*value),
    }
}

/// A fully computed, non-empty plan. Never mutated after generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakingPlan {
    steps: Vec<StakingStep>,
}

impl StakingPlan {
    pub(crate) fn from_steps(steps: Vec<StakingStep>) -> Self {
        Self { steps }
    }

    #[allow(dead_code)]
    pub fn steps(&self) -> &[StakingStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StakingStep> {
        self.steps.iter()
    }

    pub fn final_bankroll(&self) -> Option<f64> {
        self.steps.last().map(|s| s.bankroll_after)
    }

    /// Combined multiplier of every leg, i.e. the odds of the equivalent accumulator.
    pub fn total_odds(&self) -> f64 {
        self.steps.iter().map(|s| s.odds).product()
    }
}

impl<'a> IntoIterator for &'a StakingPlan {
    type Item = &'a StakingStep;
    type IntoIter = std::slice::Iter<'a, StakingStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
