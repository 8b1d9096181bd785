use crate::Arbitrary;
use crate::Degrees;
use serde::Serialize;

/// A coordinate pair in decimal degrees (WGS84 latitude, longitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    lat: Degrees,
    lon: Degrees,
}

impl Point {
    pub fn lat(&self) -> Degrees {
        self.lat
    }
    pub fn lon(&self) -> Degrees {
        self.lon
    }
    /// Planar Euclidean distance on raw degree differences.
    ///
    /// This is not a geodesic distance. One degree of longitude shrinks
    /// with the cosine of latitude, and the antimeridian is not wrapped,
    /// so the value is only a rough proximity rank near the equator.
    pub fn distance(&self, other: &Self) -> Degrees {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

impl From<(Degrees, Degrees)> for Point {
    fn from((lat, lon): (Degrees, Degrees)) -> Self {
        Self { lat, lon }
    }
}

impl Arbitrary for Point {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        Self::from((rng.random_range(-90.0..=90.0), rng.random_range(-180.0..=180.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = Point::random();
        assert_eq!(p.distance(&p), 0.);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::random();
        let b = Point::random();
        assert_eq!(a.distance(&b), b.distance(&a));
        assert!(a.distance(&b) >= 0.);
    }

    #[test]
    fn distance_is_degree_euclidean() {
        let a = Point::from((10., 20.));
        let b = Point::from((13., 24.));
        assert_eq!(a.distance(&b), 5.);
    }

    #[test]
    fn antimeridian_is_not_wrapped() {
        let a = Point::from((0., 179.));
        let b = Point::from((0., -179.));
        assert_eq!(a.distance(&b), 358.);
    }
}
