use tracing::{debug, warn};

use super::error::Result;
use super::types::{Allocation, AllocationTemplate, AssetClass, Goal, Recommendation, RiskTier};

const LOW_RISK_TEMPLATE: AllocationTemplate = AllocationTemplate {
    equity: 20,
    debt: 60,
    gold: 10,
    cash: 10,
};

const MODERATE_RISK_TEMPLATE: AllocationTemplate = AllocationTemplate {
    equity: 40,
    debt: 40,
    gold: 15,
    cash: 5,
};

const HIGH_RISK_TEMPLATE: AllocationTemplate = AllocationTemplate {
    equity: 70,
    debt: 20,
    gold: 10,
    cash: 0,
};

// Ages strictly below / above these bounds get an equity / debt tilt.
const EQUITY_TILT_BELOW_AGE: u32 = 30;
const DEBT_TILT_ABOVE_AGE: u32 = 45;
const AGE_SHIFT: i32 = 10;
const SHORT_TERM_SHIFT: i32 = 10;
const GROWTH_GOAL_SHIFT: i32 = 5;
const INVESTABLE_INCOME_SHARE: f64 = 0.25;

pub fn template_for(risk: RiskTier) -> &'static AllocationTemplate {
    match risk {
        RiskTier::Low => &LOW_RISK_TEMPLATE,
        RiskTier::Moderate => &MODERATE_RISK_TEMPLATE,
        RiskTier::High => &HIGH_RISK_TEMPLATE,
    }
}

// Unknown risk is an error; unknown goal resolves to `None`, which applies no goal
// adjustment.
pub fn resolve_labels(risk_label: &str, goal_label: &str) -> Result<(RiskTier, Option<Goal>)> {
    let risk = risk_label.parse::<RiskTier>()?;
    let goal = Goal::from_label(goal_label);
    if goal.is_none() {
        warn!(goal = goal_label, "unrecognized goal, skipping goal adjustment");
    }
    Ok((risk, goal))
}

pub fn compute_allocation(
    age: u32,
    monthly_income: f64,
    risk: RiskTier,
    goal: Option<Goal>,
) -> Recommendation {
    let mut working = *template_for(risk);
    apply_age_adjustment(&mut working, age);
    apply_goal_adjustment(&mut working, goal);
    debug!(
        %risk,
        age,
        goal = goal.map(Goal::label),
        equity = working.equity,
        debt = working.debt,
        gold = working.gold,
        cash = working.cash,
        "adjusted allocation before normalization"
    );

    Recommendation {
        allocation: normalize(&working),
        suggested_investment: suggested_investment(monthly_income),
    }
}

fn apply_age_adjustment(working: &mut AllocationTemplate, age: u32) {
    if age < EQUITY_TILT_BELOW_AGE {
        working.equity += AGE_SHIFT;
        working.debt -= AGE_SHIFT;
    } else if age > DEBT_TILT_ABOVE_AGE {
        working.equity -= AGE_SHIFT;
        working.debt += AGE_SHIFT;
    }
}

fn apply_goal_adjustment(working: &mut AllocationTemplate, goal: Option<Goal>) {
    match goal {
        Some(Goal::ShortTerm) => {
            working.equity -= SHORT_TERM_SHIFT;
            working.debt += SHORT_TERM_SHIFT;
        }
        Some(Goal::Retirement | Goal::WealthCreation) => {
            working.equity += GROWTH_GOAL_SHIFT;
            working.cash -= GROWTH_GOAL_SHIFT;
        }
        Some(Goal::LongTerm) | None => {}
    }
}

// Clamp at zero, rescale to 100 at one decimal. Nothing left after clamping -> all zero.
fn normalize(working: &AllocationTemplate) -> Allocation {
    let clamped = AssetClass::ALL.map(|class| (class, working.weight(class).max(0)));
    let total: i32 = clamped.iter().map(|&(_, value)| value).sum();
    if total == 0 {
        return Allocation::zero();
    }

    let total = total as f64;
    clamped
        .into_iter()
        .map(|(class, value)| (class, round_one_decimal(value as f64 / total * 100.0)))
        .collect()
}

pub fn suggested_investment(monthly_income: f64) -> f64 {
    round_to_nearest_hundred(monthly_income * INVESTABLE_INCOME_SHARE)
}

// Ties go to the even hundred: 12_450 -> 12_400, 12_550 -> 12_600.
fn round_to_nearest_hundred(value: f64) -> f64 {
    (value / 100.0).round_ties_even() * 100.0
}

// Ties go away from zero.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
