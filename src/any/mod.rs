pub use self::{
    attributes::{CalculationOutcome, ScoreAttributes, ScoreContext, ScoreWarning},
    calculator::{Calculator, ScoreRequest},
    reconstructor::{reconstructor, ReconstructParams, Reconstructor},
};

pub use crate::model::statistics::HitResultSource;

mod attributes;
mod calculator;

/// The [`Reconstructor`] trait and its per-mode dispatch.
pub mod reconstructor;
