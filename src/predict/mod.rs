//! Scoring environmental conditions against a species classifier.
//!
//! Feature vectors are always laid out as (sst, sss, depth). That order is
//! the interface every model artifact was trained against, so it is fixed
//! here and checked again when an artifact is loaded.
//!
//! Missing features are filled with [`crate::MISSING_FEATURE`] (-999). This
//! is a contract of the trained artifacts rather than a numeric convention:
//! the training pipeline substituted the same value, and no real reading
//! can take it.
use crate::model::Repository;
use crate::model::Vector;
use crate::Error;
use crate::Measure;
use crate::Probability;
use crate::Result;
use crate::MISSING_FEATURE;

/// Optional environmental readings supplied by a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Features {
    pub sst: Option<Measure>,
    pub sss: Option<Measure>,
    pub depth: Option<Measure>,
}

impl Features {
    /// Fixed-order vector with the sentinel in place of missing readings.
    pub fn vector(&self) -> Result<Vector> {
        let fill = |label: &str, x: Option<Measure>| match x {
            None => Ok(MISSING_FEATURE),
            Some(x) if x.is_finite() => Ok(x),
            Some(_) => Err(Error::BadInput(format!("{} must be a finite number", label))),
        };
        Ok([
            fill("sst", self.sst)?,
            fill("sss", self.sss)?,
            fill("depth", self.depth)?,
        ])
    }
}

/// Probability that `species` is present under `features`.
pub async fn predict(repo: &Repository, species: &str, features: Features) -> Result<Probability> {
    let ref x = features.vector()?;
    repo.resolve(species)
        .await?
        .map(|model| model.probability(x))
        .inspect(|p| log::debug!("predicted {:.4} for {} at {:?}", p, species, x))
        .ok_or_else(|| Error::NotFound(format!("model for species not found: {}", species)))
}
