use crate::occurrence::Dataset;
use crate::occurrence::Occurrence;
use crate::occurrence::Point;
use crate::Degrees;
use crate::Error;
use crate::Result;

/// Closest occurrence to a query coordinate and its degree-space distance.
#[derive(Debug, Clone, Copy)]
pub struct Nearest<'a> {
    pub record: &'a Occurrence,
    pub point: Point,
    pub distance: Degrees,
}

/// Brute-force scan by planar degree distance. See [`Point::distance`]
/// for why the result is approximate. Equal distances resolve to the
/// earliest row.
pub fn nearest(data: &Dataset, lat: Degrees, lon: Degrees) -> Result<Nearest<'_>> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err(Error::BadInput("lat and lon must be finite numbers".into()));
    }
    let ref query = Point::from((lat, lon));
    data.points()?
        .map(|(record, point)| Nearest {
            record,
            point,
            distance: point.distance(query),
        })
        .reduce(|best, next| match next.distance < best.distance {
            true => next,
            false => best,
        })
        .ok_or_else(|| Error::Unavailable("no occurrence data with coordinates".into()))
}
