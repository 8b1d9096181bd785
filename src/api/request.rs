use crate::Degrees;
use crate::Measure;
use crate::predict::Features;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetRecords {
    pub limit: Option<usize>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetNearest {
    pub lat: Degrees,
    pub lon: Degrees,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPredict {
    pub species: String,
    pub sst: Option<Measure>,
    pub sss: Option<Measure>,
    pub depth: Option<Measure>,
    pub decimal_latitude: Option<Degrees>,
    pub decimal_longitude: Option<Degrees>,
}

impl From<&SetPredict> for Features {
    fn from(req: &SetPredict) -> Self {
        Self {
            sst: req.sst,
            sss: req.sss,
            depth: req.depth,
        }
    }
}
