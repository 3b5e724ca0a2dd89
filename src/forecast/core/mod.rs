//! core: building blocks of the ARIMA model.
//!
//! - [`order`]: validated `(p, d, q)`.
//! - [`data`]: levels, differences and integration tails.
//! - [`params`]: coefficients and their optimizer coordinates.
//! - [`filter`]: exact likelihood and its derivatives.
//! - [`init`] / [`options`]: starting values and fitting options.
//! - [`forecasts`]: multi-step projection and integration.

pub mod data;
pub mod filter;
pub mod forecasts;
pub mod init;
pub mod options;
pub mod order;
pub mod params;
