//! stocking: safety stock and par levels.
//!
//! A [`StockingPolicy`] (z-score and volatility window) turns an entity's
//! forecast path and recent weekly volatility into a [`ParEstimate`]; see
//! [`par`] for the formulas.

pub mod errors;
pub mod par;

pub use self::errors::{StockingError, StockingResult};
pub use self::par::{
    estimate_par, round2, ParEstimate, StockingPolicy, DEFAULT_VOLATILITY_WINDOW, DEFAULT_Z_SCORE,
};
