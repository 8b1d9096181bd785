use crate::occurrence::Dataset;
use crate::occurrence::Occurrence;
use crate::Error;
use crate::Result;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Case-insensitive key for a scientific name.
///
/// Every species-keyed operation (listing, records, statistics, model
/// lookup) compares names through this key, so "thunnus ALBACARES"
/// and "Thunnus albacares" are the same species everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Species(String);

impl Species {
    pub fn key(&self) -> &str {
        &self.0
    }
    pub fn matches(&self, record: &Occurrence) -> bool {
        record.name().is_some_and(|name| Self::from(name) == *self)
    }
}

impl From<&str> for Species {
    fn from(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Distinct species names, sorted ascending.
/// Each species is displayed with the first spelling seen in the table.
pub fn species(data: &Dataset) -> Vec<String> {
    let mut seen = HashMap::<Species, &str>::new();
    for name in data.records().iter().filter_map(Occurrence::name) {
        seen.entry(Species::from(name)).or_insert(name);
    }
    let mut names = seen.into_values().map(String::from).collect::<Vec<_>>();
    names.sort();
    names
}

/// All rows of one species, in table order.
pub fn members<'a>(data: &'a Dataset, name: &str) -> Result<Vec<&'a Occurrence>> {
    let ref species = Species::from(name);
    let rows = data
        .records()
        .iter()
        .filter(|r| species.matches(r))
        .collect::<Vec<_>>();
    match rows.is_empty() {
        true => Err(Error::NotFound(format!("species not found: {}", name))),
        false => Ok(rows),
    }
}

/// Display spelling used in the table for a species, if present.
pub fn spelling<'a>(data: &'a Dataset, name: &str) -> Option<&'a str> {
    let ref species = Species::from(name);
    data.records()
        .iter()
        .find(|r| species.matches(r))
        .and_then(Occurrence::name)
}

/// Species counts keyed by display spelling.
pub fn census(data: &Dataset) -> BTreeMap<String, usize> {
    let mut spellings = HashMap::<Species, &str>::new();
    let mut counts = HashMap::<Species, usize>::new();
    for name in data.records().iter().filter_map(Occurrence::name) {
        let species = Species::from(name);
        spellings.entry(species.clone()).or_insert(name);
        *counts.entry(species).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(species, n)| (spellings[&species].to_string(), n))
        .collect()
}
