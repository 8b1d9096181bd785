use super::point::Point;
use super::timestamp::Timestamp;
use crate::Arbitrary;
use crate::Degrees;
use crate::Measure;

/// One observed sighting of a species.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub(crate) index: usize,
    pub(crate) name: Option<String>,
    pub(crate) date: Option<Timestamp>,
    pub(crate) lat: Option<Degrees>,
    pub(crate) lon: Option<Degrees>,
    pub(crate) sst: Option<Measure>,
    pub(crate) sss: Option<Measure>,
    pub(crate) depth: Option<Measure>,
}

impl Occurrence {
    /// Row position in the source table, header excluded.
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn date(&self) -> Option<Timestamp> {
        self.date
    }
    pub fn lat(&self) -> Option<Degrees> {
        self.lat
    }
    pub fn lon(&self) -> Option<Degrees> {
        self.lon
    }
    pub fn sst(&self) -> Option<Measure> {
        self.sst
    }
    pub fn sss(&self) -> Option<Measure> {
        self.sss
    }
    pub fn depth(&self) -> Option<Measure> {
        self.depth
    }
    /// Coordinates, when both are present.
    pub fn point(&self) -> Option<Point> {
        self.lat.zip(self.lon).map(Point::from)
    }
}

/// Test and benchmark fixtures.
impl Occurrence {
    pub fn new(
        index: usize,
        name: &str,
        date: Option<Timestamp>,
        point: Option<(Degrees, Degrees)>,
        env: [Option<Measure>; 3],
    ) -> Self {
        let [sst, sss, depth] = env;
        Self {
            index,
            name: Some(name.to_string()).filter(|n| !n.trim().is_empty()),
            date,
            lat: point.map(|(lat, _)| lat),
            lon: point.map(|(_, lon)| lon),
            sst,
            sss,
            depth,
        }
    }
}

const NAMES: [&str; 6] = [
    "Thunnus albacares",
    "Thunnus obesus",
    "Katsuwonus pelamis",
    "Sardinella longiceps",
    "Rastrelliger kanagurta",
    "Coryphaena hippurus",
];

impl Arbitrary for Occurrence {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        let name = NAMES[rng.random_range(0..NAMES.len())];
        let date = chrono::NaiveDate::from_ymd_opt(
            rng.random_range(2000..2024),
            rng.random_range(1..=12),
            rng.random_range(1..=28),
        )
        .filter(|_| rng.random_bool(0.9))
        .map(|d| d.and_time(chrono::NaiveTime::MIN));
        let point = Some(Point::random())
            .filter(|_| rng.random_bool(0.95))
            .map(|p| (p.lat(), p.lon()));
        let sst = Some(rng.random_range(-2.0..32.0)).filter(|_| rng.random_bool(0.8));
        let sss = Some(rng.random_range(28.0..40.0)).filter(|_| rng.random_bool(0.8));
        let depth = Some(rng.random_range(0.0..4000.0)).filter(|_| rng.random_bool(0.8));
        Self::new(0, name, date, point, [sst, sss, depth])
    }
}
