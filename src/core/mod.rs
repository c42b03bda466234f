mod engine;
mod error;
mod types;

pub use engine::{compute_allocation, resolve_labels, suggested_investment, template_for};
pub use error::{AllocationError, Result};
pub use types::{Allocation, AllocationTemplate, AssetClass, Goal, Recommendation, RiskTier};
