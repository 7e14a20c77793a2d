//! Inventory policy optimization.
//!
//! Sizes safety stock, reorder points and order quantities for (s,S),
//! Min-Max, EOQ and base-stock policies and estimates their annual cost.

pub mod commands;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod policy;

pub use error::{AppError, PolicyError};
pub use policy::{
    compare_policies, optimize, PolicyOptimizationRequest, PolicyRecommendation, PolicyType,
};
