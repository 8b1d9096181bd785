use super::point::Point;
use super::record::Occurrence;
use super::timestamp;
use crate::*;
use std::io::Read;
use std::path::Path;

/// Immutable in-memory view of the occurrence table.
///
/// Spatial capability is a property of the table, not of each row:
/// it requires both coordinate columns in the header. Individual rows
/// may still lack coordinates and are then skipped by spatial queries.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Occurrence>,
    spatial: bool,
}

impl Dataset {
    /// Read and normalise the whole table. Any structural problem fails the load.
    pub fn read(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Internal(format!("open {}: {}", path.display(), e)))?;
        Self::parse(file)
            .inspect(|data| {
                log::info!(
                    "loaded {} occurrences ({} species) from {}",
                    data.len(),
                    crate::query::species(data).len(),
                    path.display()
                )
            })
            .inspect_err(|e| log::error!("failed to load {}: {}", path.display(), e))
    }

    pub fn parse<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let ref columns = Columns::try_from(reader.headers()?)?;
        let records = reader
            .records()
            .enumerate()
            .map(|(index, row)| columns.occurrence(index, &row?))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            records,
            spatial: columns.lat.is_some() && columns.lon.is_some(),
        })
    }

    pub fn records(&self) -> &[Occurrence] {
        &self.records
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    pub fn spatial(&self) -> bool {
        self.spatial
    }
    /// Rows carrying a usable coordinate, or why the table cannot answer spatially.
    pub fn points(&self) -> Result<impl Iterator<Item = (&Occurrence, Point)>> {
        if !self.spatial {
            return Err(Error::Unavailable(
                "occurrence data lacks latitude/longitude columns".into(),
            ));
        }
        Ok(self
            .records
            .iter()
            .filter_map(|r| r.point().map(|p| (r, p))))
    }
}

impl From<Vec<Occurrence>> for Dataset {
    /// Assemble a spatial dataset from rows, renumbering them in order.
    fn from(records: Vec<Occurrence>) -> Self {
        Self {
            records: records
                .into_iter()
                .enumerate()
                .map(|(index, r)| Occurrence { index, ..r })
                .collect(),
            spatial: true,
        }
    }
}

impl Dataset {
    /// Drop spatial capability, as if the coordinate columns were absent.
    pub fn without_points(self) -> Self {
        Self {
            spatial: false,
            ..self
        }
    }
}

/// Header positions of the columns we understand.
struct Columns {
    name: usize,
    date: Option<usize>,
    lat: Option<usize>,
    lon: Option<usize>,
    sst: Option<usize>,
    sss: Option<usize>,
    depth: Option<usize>,
}

impl TryFrom<&csv::StringRecord> for Columns {
    type Error = Error;
    fn try_from(header: &csv::StringRecord) -> Result<Self> {
        let find = |column: &str| header.iter().position(|h| h == column);
        Ok(Self {
            name: find(COLUMN_NAME).ok_or_else(|| {
                Error::Internal(format!("occurrence table lacks {} column", COLUMN_NAME))
            })?,
            date: find(COLUMN_DATE),
            lat: find(COLUMN_LAT),
            lon: find(COLUMN_LON),
            sst: find(COLUMN_SST),
            sss: find(COLUMN_SSS),
            depth: find(COLUMN_DEPTH),
        })
    }
}

impl Columns {
    fn occurrence(&self, index: usize, row: &csv::StringRecord) -> Result<Occurrence> {
        let cell = |i: Option<usize>| i.and_then(|i| row.get(i)).unwrap_or("");
        let number = |column: &str, i: Option<usize>| measure(cell(i)).ok_or_else(|| {
            Error::Internal(format!(
                "row {}: {} is not numeric: {:?}",
                index + 1,
                column,
                cell(i)
            ))
        });
        Ok(Occurrence {
            index,
            name: Some(cell(Some(self.name)))
                .filter(|s| !s.is_empty())
                .map(String::from),
            date: timestamp::parse(cell(self.date)),
            lat: number(COLUMN_LAT, self.lat)?,
            lon: number(COLUMN_LON, self.lon)?,
            sst: number(COLUMN_SST, self.sst)?,
            sss: number(COLUMN_SSS, self.sss)?,
            depth: number(COLUMN_DEPTH, self.depth)?,
        })
    }
}

/// `None` on malformed text, `Some(None)` for an absent value.
fn measure(text: &str) -> Option<Option<f64>> {
    match text {
        "" | "NaN" | "nan" | "NA" | "null" => Some(None),
        text => text
            .parse::<f64>()
            .ok()
            .map(|x| Some(x).filter(|x| x.is_finite())),
    }
}
