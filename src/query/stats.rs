use super::species::members;
use crate::occurrence::Dataset;
use crate::occurrence::Occurrence;
use crate::Measure;
use crate::Result;
use serde::Serialize;

/// Order statistics over the non-null values of one field.
/// Every statistic is `None` when the field has no values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub min: Option<Measure>,
    pub max: Option<Measure>,
    pub mean: Option<Measure>,
    pub median: Option<Measure>,
}

impl FromIterator<Measure> for Summary {
    fn from_iter<I: IntoIterator<Item = Measure>>(iter: I) -> Self {
        let mut values = iter
            .into_iter()
            .filter(|x| x.is_finite())
            .collect::<Vec<_>>();
        if values.is_empty() {
            return Self::default();
        }
        values.sort_by(|a, b| a.total_cmp(b));
        let n = values.len();
        let mid = n / 2;
        let median = match n % 2 {
            0 => (values[mid - 1] + values[mid]) / 2.,
            _ => values[mid],
        };
        Self {
            count: n,
            min: values.first().copied(),
            max: values.last().copied(),
            mean: Some(values.iter().sum::<Measure>() / n as Measure).filter(|m| m.is_finite()),
            median: Some(median).filter(|m| m.is_finite()),
        }
    }
}

/// Environmental profile of a species.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Environment {
    pub sst: Summary,
    pub sss: Summary,
    pub depth: Summary,
}

impl<'a> FromIterator<&'a Occurrence> for Environment {
    fn from_iter<I: IntoIterator<Item = &'a Occurrence>>(iter: I) -> Self {
        let rows = iter.into_iter().collect::<Vec<_>>();
        Self {
            sst: rows.iter().filter_map(|r| r.sst()).collect(),
            sss: rows.iter().filter_map(|r| r.sss()).collect(),
            depth: rows.iter().filter_map(|r| r.depth()).collect(),
        }
    }
}

pub fn environment(data: &Dataset, name: &str) -> Result<Environment> {
    Ok(members(data, name)?.into_iter().collect())
}
