use thiserror::Error;

pub type Result<T> = std::result::Result<T, AllocationError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("invalid risk tier '{value}': expected one of Low, Moderate, High")]
    InvalidRiskTier { value: String },
}

impl AllocationError {
    pub fn invalid_risk_tier(value: impl Into<String>) -> Self {
        Self::InvalidRiskTier {
            value: value.into(),
        }
    }
}
