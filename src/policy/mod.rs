pub mod demand_stats;
pub mod formulas;
pub mod implementations;
pub mod optimizer;
pub mod types;

pub use demand_stats::{CostParameters, DemandStats};
pub use formulas::{economic_order_quantity, safety_stock, z_score};
pub use optimizer::{compare_policies, optimize};
pub use types::{
    InventoryPolicy, PolicyInputs, PolicyOptimizationRequest, PolicyOutcome,
    PolicyRecommendation, PolicyType,
};
