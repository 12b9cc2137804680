use crate::strategy::types::{StakingParameters, StakingPlan, StakingStep};
use thiserror::Error;
use tracing::debug;

/// Hard bound on the length of a plan. Guarantees the generation loop ends
/// whatever the inputs.
pub const MAX_PLAN_STEPS: usize = 20;

/// Lowest accepted starting odds.
pub const MIN_START_ODDS: f64 = 1.01;

/// Why no plan was produced. Variants are listed in validation priority order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Veuillez entrer des valeurs numériques valides.")]
    NonNumericInput,

    #[error("Les montants doivent être positifs.")]
    NonPositiveAmount,

    #[error("La cote de départ doit être d'au moins 1.01.")]
    OddsTooLow,

    #[error("L'incrément de cote ne peut pas être négatif.")]
    NegativeIncrement,

    #[error("Le montant cible doit être supérieur au montant de départ.")]
    TargetNotAboveStart,

    #[error(
        "Le plan dépasse {max_steps} étapes. L'objectif est peut-être trop élevé pour ces paramètres."
    )]
    PlanTooLong { max_steps: usize },
}

impl PlanError {
    /// Input rejections versus the step-cap policy rejection.
    #[allow(dead_code)]
    pub fn is_input_rejection(&self) -> bool {
        !matches!(self, PlanError::PlanTooLong { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            PlanError::NonNumericInput => "non_numeric_input",
            PlanError::NonPositiveAmount => "non_positive_amount",
            PlanError::OddsTooLow => "odds_too_low",
            PlanError::NegativeIncrement => "negative_increment",
            PlanError::TargetNotAboveStart => "target_not_above_start",
            PlanError::PlanTooLong { .. } => "plan_too_long",
        }
    }
}

impl StakingParameters {
    pub fn new(
        start_amount: f64,
        target_amount: f64,
        start_odds: f64,
        odds_increment: f64,
    ) -> Result<Self, PlanError> {
        let all_finite = [start_amount, target_amount, start_odds, odds_increment]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(PlanError::NonNumericInput);
        }
        Ok(Self {
            start_amount,
            target_amount,
            start_odds,
            odds_increment,
        })
    }

    /// Parses the four values from user text (surrounding whitespace ignored).
    pub fn parse(
        start_amount: &str,
        target_amount: &str,
        start_odds: &str,
        odds_increment: &str,
    ) -> Result<Self, PlanError> {
        let num = |s: &str| -> Result<f64, PlanError> {
            s.trim().parse::<f64>().map_err(|_| PlanError::NonNumericInput)
        };
        Self::new(
            num(start_amount)?,
            num(target_amount)?,
            num(start_odds)?,
            num(odds_increment)?,
        )
    }

    /// Checks everything that can be decided without running the plan.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.start_amount <= 0.0 || self.target_amount <= 0.0 {
            return Err(PlanError::NonPositiveAmount);
        }
        if self.start_odds < MIN_START_ODDS {
            return Err(PlanError::OddsTooLow);
        }
        if self.odds_increment < 0.0 {
            return Err(PlanError::NegativeIncrement);
        }
        if self.target_amount <= self.start_amount {
            return Err(PlanError::TargetNotAboveStart);
        }
        Ok(())
    }
}

/// All-in progressive staking: the whole bankroll goes on every leg, and the
/// odds grow by a fixed increment after each one.
pub struct ProgressiveStaker {
    max_steps: usize,
}

impl Default for ProgressiveStaker {
    fn default() -> Self {
        Self {
            max_steps: MAX_PLAN_STEPS,
        }
    }
}

impl ProgressiveStaker {
    #[allow(dead_code)]
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self { max_steps }
    }

    pub fn generate(&self, params: &StakingParameters) -> Result<StakingPlan, PlanError> {
        let result = params.validate().and_then(|_| self.run(params));

        match &result {
            Ok(plan) => {
                debug!(
                    steps = plan.len(),
                    final_bankroll = plan.final_bankroll().unwrap_or_default(),
                    "Staking plan generated"
                );
                metrics::counter!("staking_plans_total", "outcome" => "ok").increment(1);
            }
            Err(e) => {
                debug!(reason = e.label(), "Staking plan rejected");
                metrics::counter!("staking_plans_total", "outcome" => e.label()).increment(1);
            }
        }
        result
    }

    fn run(&self, params: &StakingParameters) -> Result<StakingPlan, PlanError> {
        let mut steps = Vec::new();
        let mut bankroll = params.start_amount;
        let mut odds = params.start_odds;
        let mut index = 1;

        while bankroll < params.target_amount && index <= self.max_steps {
            let stake = bankroll;
            let potential_win = stake * odds;

            steps.push(StakingStep {
                index,
                bankroll_before: bankroll,
                stake,
                odds,
                potential_win,
                bankroll_after: potential_win,
            });

            bankroll = potential_win;
            odds += params.odds_increment;
            index += 1;
        }

        // Target still out of reach once the cap is hit: no truncated plan.
        if bankroll < params.target_amount {
            return Err(PlanError::PlanTooLong {
                max_steps: self.max_steps,
            });
        }
        Ok(StakingPlan::from_steps(steps))
    }
}
