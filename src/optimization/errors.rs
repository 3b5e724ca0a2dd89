//! optimization::errors: error surface of the likelihood optimizer.
//!
//! Every failure raised while configuring or running a maximum-likelihood
//! fit is normalized into [`OptError`]. Errors produced by a model's own
//! objective travel through argmin as boxed errors; [`From<Error>`] recovers
//! them unchanged before falling back to argmin's own error kinds, so callers
//! see e.g. [`OptError::DegenerateVariance`] rather than an opaque backend
//! message.
use argmin::core::{ArgminError, Error};
use thiserror::Error;

/// Result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptError {
    // ---- Gradient ----
    /// Signals the adapter to fall back to finite differences.
    #[error("Analytic gradient not implemented")]
    GradientNotImplemented,

    #[error("Gradient dimension mismatch: expected {expected}, found {found}")]
    GradientDimMismatch { expected: usize, found: usize },

    #[error("Invalid gradient at index {index}: {value}: {reason}")]
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- MLEOptions ----
    #[error("Invalid gradient tolerance {tol}: {reason}")]
    InvalidTolGrad { tol: f64, reason: &'static str },

    #[error("Invalid cost change tolerance {tol}: {reason}")]
    InvalidTolCost { tol: f64, reason: &'static str },

    #[error("Invalid maximum iterations {max_iter}: {reason}")]
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    #[error("No tolerances provided")]
    NoTolerancesProvided,

    #[error("Invalid line searcher '{name}': {reason}")]
    InvalidLineSearch { name: String, reason: &'static str },

    #[error("Invalid L-BFGS memory {mem}: {reason}")]
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Objective ----
    #[error("Non-finite log-likelihood value: {value}")]
    NonFiniteCost { value: f64 },

    /// Concentrated innovation variance is zero, negative or non-finite.
    #[error("Degenerate innovation variance: {sigma2}")]
    DegenerateVariance { sigma2: f64 },

    #[error("Parameter vector length mismatch: expected {expected}, found {actual}")]
    ThetaLengthMismatch { expected: usize, actual: usize },

    #[error("Unconstrained parameter at index {index} is not finite: {value}")]
    InvalidThetaInput { index: usize, value: f64 },

    // ---- Optimizer outcome ----
    #[error("Invalid estimated parameter at index {index}: {value}: {reason}")]
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    #[error("Missing estimated parameters")]
    MissingThetaHat,

    // ---- Finite differences ----
    #[error("Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}")]
    HessianDimMismatch { expected: usize, found: (usize, usize) },

    #[error("Invalid Hessian at ({row}, {col}): {value}, must be finite")]
    InvalidHessian { row: usize, col: usize, value: f64 },

    // ---- Argmin ----
    #[error("Invalid parameter: {text}")]
    InvalidParameter { text: String },

    #[error("Not implemented: {text}")]
    NotImplemented { text: String },

    #[error("Not initialized: {text}")]
    NotInitialized { text: String },

    #[error("Condition violated: {text}")]
    ConditionViolated { text: String },

    #[error("Checkpoint not found: {text}")]
    CheckPointNotFound { text: String },

    #[error("Potential bug: {text}")]
    PotentialBug { text: String },

    #[error("Impossible error: {text}")]
    ImpossibleError { text: String },

    #[error("Backend error: {text}")]
    BackendError { text: String },
}

impl OptError {
    /// True for failures raised while the solver was running, as opposed to
    /// invalid configuration or starting values. A different line search may
    /// get past these.
    pub fn is_solver_failure(&self) -> bool {
        matches!(
            self,
            OptError::ConditionViolated { .. }
                | OptError::PotentialBug { .. }
                | OptError::ImpossibleError { .. }
                | OptError::BackendError { .. }
                | OptError::NotInitialized { .. }
                | OptError::NonFiniteCost { .. }
                | OptError::InvalidGradient { .. }
                | OptError::InvalidThetaHat { .. }
                | OptError::MissingThetaHat
        )
    }
}

impl From<Error> for OptError {
    fn from(err: Error) -> Self {
        let err = match err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(other) => other,
        };
        match err.downcast::<ArgminError>() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                other => OptError::BackendError { text: other.to_string() },
            },
            Err(other) => OptError::BackendError { text: other.to_string() },
        }
    }
}
