use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::AllocationError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub enum AssetClass {
    Equity,
    Debt,
    Gold,
    Cash,
}

impl AssetClass {
    pub const ALL: [AssetClass; 4] = [
        AssetClass::Equity,
        AssetClass::Debt,
        AssetClass::Gold,
        AssetClass::Cash,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AssetClass::Equity => "Equity",
            AssetClass::Debt => "Debt",
            AssetClass::Gold => "Gold",
            AssetClass::Cash => "Cash",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Moderate, RiskTier::High];

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskTier {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskTier::ALL
            .into_iter()
            .find(|risk| risk.label() == s)
            .ok_or_else(|| AllocationError::invalid_risk_tier(s))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Goal {
    ShortTerm,
    LongTerm,
    Retirement,
    WealthCreation,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::ShortTerm,
        Goal::LongTerm,
        Goal::Retirement,
        Goal::WealthCreation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Goal::ShortTerm => "Short-term",
            Goal::LongTerm => "Long-term",
            Goal::Retirement => "Retirement",
            Goal::WealthCreation => "Wealth Creation",
        }
    }

    // Exact display label only; anything else is "no goal adjustment", not an error.
    pub fn from_label(label: &str) -> Option<Goal> {
        Goal::ALL.into_iter().find(|goal| goal.label() == label)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Every template sums to 100.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AllocationTemplate {
    pub equity: i32,
    pub debt: i32,
    pub gold: i32,
    pub cash: i32,
}

impl AllocationTemplate {
    pub fn weight(&self, class: AssetClass) -> i32 {
        match class {
            AssetClass::Equity => self.equity,
            AssetClass::Debt => self.debt,
            AssetClass::Gold => self.gold,
            AssetClass::Cash => self.cash,
        }
    }

    pub fn total(&self) -> i32 {
        self.equity + self.debt + self.gold + self.cash
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Allocation(BTreeMap<AssetClass, f64>);

impl Allocation {
    pub fn zero() -> Self {
        Self(AssetClass::ALL.iter().map(|&class| (class, 0.0)).collect())
    }

    pub fn get(&self, class: AssetClass) -> f64 {
        self.0.get(&class).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        self.0.iter().map(|(&class, &value)| (class, value))
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn is_all_zero(&self) -> bool {
        self.0.values().all(|&value| value == 0.0)
    }
}

impl FromIterator<(AssetClass, f64)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (AssetClass, f64)>>(iter: I) -> Self {
        let mut allocation = Allocation::zero();
        for (class, value) in iter {
            allocation.0.insert(class, value);
        }
        allocation
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub allocation: Allocation,
    pub suggested_investment: f64,
}
