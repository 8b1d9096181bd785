use crate::occurrence::Occurrence;
use crate::query::Environment;
use crate::query::Nearest;
use crate::Degrees;
use crate::Measure;
use crate::Probability;
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRecord {
    pub scientific_name: Option<String>,
    pub event_date: Option<String>,
    pub decimal_latitude: Option<Degrees>,
    pub decimal_longitude: Option<Degrees>,
    pub sst: Option<Measure>,
    pub sss: Option<Measure>,
    pub depth: Option<Measure>,
}

impl From<&Occurrence> for ApiRecord {
    fn from(r: &Occurrence) -> Self {
        Self {
            scientific_name: r.name().map(String::from),
            event_date: r.date().map(|d| d.format(DATE_FORMAT).to_string()),
            decimal_latitude: r.lat(),
            decimal_longitude: r.lon(),
            sst: r.sst(),
            sss: r.sss(),
            depth: r.depth(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiSpecies {
    pub num_species: usize,
    pub species: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiRecords {
    pub species: String,
    pub count: usize,
    pub records: Vec<ApiRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiEnvironment {
    pub species: String,
    pub environment: Environment,
}

/// Coordinates are echoed from the request and play no part in scoring.
#[derive(Debug, Clone, Serialize)]
pub struct ApiPrediction {
    pub species: String,
    pub probability: Probability,
    #[serde(rename = "decimalLatitude")]
    pub decimal_latitude: Option<Degrees>,
    #[serde(rename = "decimalLongitude")]
    pub decimal_longitude: Option<Degrees>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiNearest {
    pub nearest_species: Option<String>,
    pub distance_degrees: Degrees,
    pub nearest_lat: Degrees,
    pub nearest_lon: Degrees,
    #[serde(rename = "eventDate")]
    pub event_date: Option<String>,
}

impl From<Nearest<'_>> for ApiNearest {
    fn from(hit: Nearest<'_>) -> Self {
        Self {
            nearest_species: hit.record.name().map(String::from),
            distance_degrees: hit.distance,
            nearest_lat: hit.point.lat(),
            nearest_lon: hit.point.lon(),
            event_date: hit.record.date().map(|d| d.format(DATE_FORMAT).to_string()),
        }
    }
}

/// Failure body returned for every error kind.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub kind: &'static str,
    pub detail: String,
}

impl From<&crate::Error> for ApiError {
    fn from(e: &crate::Error) -> Self {
        Self {
            kind: e.kind(),
            detail: e.public(),
        }
    }
}
