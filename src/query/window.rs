use super::species::members;
use crate::occurrence::timestamp;
use crate::occurrence::Dataset;
use crate::occurrence::Occurrence;
use crate::occurrence::Timestamp;
use crate::Error;
use crate::Result;
use crate::RECORD_LIMIT;
use std::cmp::Ordering;

/// Filter applied to one species' records: inclusive date bounds and a row cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    limit: usize,
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            limit: RECORD_LIMIT,
            start: None,
            end: None,
        }
    }
}

impl Window {
    pub fn limit(self, limit: usize) -> Self {
        Self { limit, ..self }
    }
    pub fn start(self, start: Timestamp) -> Self {
        Self {
            start: Some(start),
            ..self
        }
    }
    pub fn end(self, end: Timestamp) -> Self {
        Self {
            end: Some(end),
            ..self
        }
    }
    /// Build from caller-supplied text, rejecting unparseable bounds.
    pub fn parse(limit: Option<usize>, start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let bound = |label: &str, text: Option<&str>| match text {
            None => Ok(None),
            Some(text) => timestamp::parse(text)
                .map(Some)
                .ok_or_else(|| Error::BadInput(format!("invalid {}: {:?}", label, text))),
        };
        Ok(Self {
            limit: limit.unwrap_or(RECORD_LIMIT),
            start: bound("start_date", start)?,
            end: bound("end_date", end)?,
        })
    }
    /// A record with no timestamp never satisfies a bound.
    fn contains(&self, record: &Occurrence) -> bool {
        match (self.start, self.end, record.date()) {
            (None, None, _) => true,
            (_, _, None) => false,
            (start, end, Some(date)) => {
                start.is_none_or(|s| s <= date) && end.is_none_or(|e| date <= e)
            }
        }
    }
}

/// Most recent first, undated last. Ties keep table order.
fn recency(a: &&Occurrence, b: &&Occurrence) -> Ordering {
    match (a.date(), b.date()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Records of one species within the window, newest first, truncated after sorting.
pub fn records<'a>(data: &'a Dataset, name: &str, window: Window) -> Result<Vec<&'a Occurrence>> {
    let mut rows = members(data, name)?
        .into_iter()
        .filter(|r| window.contains(r))
        .collect::<Vec<_>>();
    rows.sort_by(recency);
    rows.truncate(window.limit);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    fn day(text: &str) -> Timestamp {
        timestamp::parse(text).unwrap()
    }

    fn tuna() -> Dataset {
        Dataset::from(vec![
            Occurrence::new(0, "Thunnus albacares", Some(day("2020-01-01")), Some((10., 20.)), [None; 3]),
            Occurrence::new(0, "Thunnus albacares", Some(day("2020-06-01")), Some((10., 20.)), [None; 3]),
            Occurrence::new(0, "Thunnus albacares", Some(day("2021-01-01")), Some((12., 22.)), [None; 3]),
        ])
    }

    #[test]
    fn newest_first_then_truncated() {
        let data = tuna();
        let rows = records(&data, "Thunnus albacares", Window::default().limit(2)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index(), 2);
        assert_eq!(rows[1].index(), 1);
    }

    #[test]
    fn bounds_are_inclusive() {
        let data = tuna();
        let window = Window::default()
            .start(day("2020-06-01"))
            .end(day("2021-01-01"));
        let rows = records(&data, "Thunnus albacares", window).unwrap();
        assert_eq!(rows.iter().map(|r| r.index()).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn inverted_bounds_are_empty() {
        let data = tuna();
        let window = Window::default()
            .start(day("2021-01-01"))
            .end(day("2020-01-01"));
        assert!(records(&data, "Thunnus albacares", window).unwrap().is_empty());
    }

    #[test]
    fn zero_limit_is_empty() {
        let data = tuna();
        let window = Window::default().limit(0);
        assert!(records(&data, "Thunnus albacares", window).unwrap().is_empty());
    }

    #[test]
    fn undated_rows_sort_last_and_fail_bounds() {
        let mut rows = tuna().records().to_vec();
        rows.insert(0, Occurrence::new(0, "Thunnus albacares", None, None, [None; 3]));
        let data = Dataset::from(rows);
        let all = records(&data, "Thunnus albacares", Window::default()).unwrap();
        assert_eq!(all.last().map(|r| r.index()), Some(0));
        let bounded = records(&data, "Thunnus albacares", Window::default().start(day("1900-01-01"))).unwrap();
        assert!(bounded.iter().all(|r| r.date().is_some()));
    }

    #[test]
    fn unknown_species_is_not_found() {
        assert!(matches!(
            records(&tuna(), "Mola mola", Window::default()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn unparseable_bound_is_bad_input() {
        assert!(matches!(
            Window::parse(None, Some("last week"), None),
            Err(Error::BadInput(_))
        ));
        assert_eq!(Window::parse(None, None, None).unwrap(), Window::default());
    }

    #[test]
    fn random_windows_hold_invariants() {
        let data = Dataset::from((0..512).map(|_| Occurrence::random()).collect::<Vec<_>>());
        let window = Window::default()
            .limit(17)
            .start(day("2005-01-01"))
            .end(day("2015-12-31"));
        for name in crate::query::species(&data) {
            let rows = records(&data, &name, window).unwrap();
            assert!(rows.len() <= 17);
            assert!(rows.iter().all(|r| r.date().is_some_and(|d| d >= day("2005-01-01"))));
            assert!(rows.iter().all(|r| r.date().is_some_and(|d| d <= day("2015-12-31"))));
            assert!(rows.windows(2).all(|w| w[0].date() >= w[1].date()));
        }
    }
}
