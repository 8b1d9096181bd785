use super::request::*;
use super::response::*;
use crate::model::Repository;
use crate::occurrence::Dataset;
use crate::occurrence::Loader;
use crate::predict;
use crate::predict::Features;
use crate::query;
use crate::query::Window;
use crate::Degrees;
use crate::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared context every request runs against: the loaded occurrence table
/// and the model repository. Both are read-only once built.
pub struct API {
    data: Arc<Dataset>,
    models: Repository,
}

impl API {
    pub fn new(data: Arc<Dataset>, models: Repository) -> Self {
        Self { data, models }
    }
    /// Load the table through `loader` and point the repository at `models`.
    pub fn open(loader: &Loader, models: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(loader.load()?, Repository::new(models)))
    }
    pub fn data(&self) -> &Arc<Dataset> {
        &self.data
    }
    pub fn models(&self) -> &Repository {
        &self.models
    }
}

// species lookups
impl API {
    pub fn species(&self) -> ApiSpecies {
        let species = query::species(&self.data);
        ApiSpecies {
            num_species: species.len(),
            species,
        }
    }
    pub fn records(&self, name: &str, req: &SetRecords) -> Result<ApiRecords> {
        let window = Window::parse(
            req.limit,
            req.start_date.as_deref(),
            req.end_date.as_deref(),
        )?;
        let records = query::records(&self.data, name, window)?
            .into_iter()
            .map(ApiRecord::from)
            .collect::<Vec<_>>();
        Ok(ApiRecords {
            species: name.to_string(),
            count: records.len(),
            records,
        })
    }
    pub fn environment(&self, name: &str) -> Result<ApiEnvironment> {
        Ok(ApiEnvironment {
            species: name.to_string(),
            environment: query::environment(&self.data, name)?,
        })
    }
}

// spatial lookups
impl API {
    pub fn nearest(&self, lat: Degrees, lon: Degrees) -> Result<ApiNearest> {
        query::nearest(&self.data, lat, lon).map(ApiNearest::from)
    }
}

// model scoring
impl API {
    pub async fn predict(&self, req: &SetPredict) -> Result<ApiPrediction> {
        predict::predict(&self.models, &req.species, Features::from(req))
            .await
            .map(|probability| ApiPrediction {
                species: req.species.clone(),
                probability,
                decimal_latitude: req.decimal_latitude,
                decimal_longitude: req.decimal_longitude,
            })
    }
}
