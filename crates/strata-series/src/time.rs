//! Calendar time points of a simulation.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use strata_core::ReportDate;

use crate::error::SeriesError;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

fn days_to_delta(days: f64) -> Option<TimeDelta> {
    let millis = (days * MILLIS_PER_DAY).round();
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(millis as i64)
}

/// An increasing sequence of calendar times. The first point is the origin
/// (elapsed time zero).
///
/// Points after the origin are strictly increasing. Only a map built by
/// [`TimeMap::from_elapsed`] may hold a second point equal to the origin,
/// for a report step that ends at elapsed zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeMap {
    points: Vec<NaiveDateTime>,
}

impl TimeMap {
    fn checked(points: Vec<NaiveDateTime>) -> Result<Self, SeriesError> {
        if let Some(index) = points.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SeriesError::TimeOrder { index: index + 1 });
        }
        Ok(Self { points })
    }

    /// The origin followed by `dates`, which must be strictly increasing
    /// and after the origin.
    pub fn from_dates(origin: NaiveDateTime, dates: &[NaiveDateTime]) -> Result<Self, SeriesError> {
        let mut points = Vec::with_capacity(dates.len() + 1);
        points.push(origin);
        points.extend_from_slice(dates);
        Self::checked(points)
    }

    /// The origin followed by successive steps of the given durations in
    /// days. Every step must be positive.
    pub fn from_steps(origin: NaiveDateTime, days: &[f64]) -> Result<Self, SeriesError> {
        let mut points = Vec::with_capacity(days.len() + 1);
        points.push(origin);
        let mut elapsed = 0.0;
        for (i, &step) in days.iter().enumerate() {
            elapsed += step;
            if step.is_nan() || step <= 0.0 {
                return Err(SeriesError::TimeOrder { index: i + 1 });
            }
            let point = days_to_delta(elapsed)
                .and_then(|d| origin.checked_add_signed(d))
                .ok_or(SeriesError::TimeOrder { index: i + 1 })?;
            points.push(point);
        }
        Self::checked(points)
    }

    /// Midnight of `start` followed by points at the given elapsed days.
    ///
    /// `elapsed_days` must be non-negative and strictly increasing. The
    /// first value may be zero. Values closer together than a millisecond
    /// are kept one millisecond apart so that distinct steps stay distinct.
    pub fn from_elapsed(start: ReportDate, elapsed_days: &[f64]) -> Result<Self, SeriesError> {
        let origin = start.to_naive().and_time(NaiveTime::MIN);
        let mut points = Vec::with_capacity(elapsed_days.len() + 1);
        points.push(origin);
        let mut previous_days = None;
        for (i, &days) in elapsed_days.iter().enumerate() {
            let index = i + 1;
            let increasing = match previous_days {
                None => days >= 0.0,
                Some(prev) => days > prev,
            };
            if !increasing {
                return Err(SeriesError::TimeOrder { index });
            }
            let mut point = days_to_delta(days)
                .and_then(|d| origin.checked_add_signed(d))
                .ok_or(SeriesError::TimeOrder { index })?;
            if previous_days.is_some() {
                let floor = points[i]
                    .checked_add_signed(TimeDelta::milliseconds(1))
                    .ok_or(SeriesError::TimeOrder { index })?;
                point = point.max(floor);
            }
            points.push(point);
            previous_days = Some(days);
        }
        Ok(Self { points })
    }

    /// Number of points, including the origin.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the map is empty. Never true for a constructed map.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The origin.
    pub fn origin(&self) -> NaiveDateTime {
        self.points[0]
    }

    /// Point `index`.
    pub fn get(&self, index: usize) -> Option<NaiveDateTime> {
        self.points.get(index).copied()
    }

    /// Every point, in order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.points.iter().copied()
    }

    /// Days from the origin to point `index`.
    pub fn elapsed_days(&self, index: usize) -> Option<f64> {
        let point = self.get(index)?;
        Some((point - self.origin()).num_milliseconds() as f64 / MILLIS_PER_DAY)
    }

    /// Index of the point exactly at `time`.
    pub fn index_of(&self, time: NaiveDateTime) -> Option<usize> {
        self.points.binary_search(&time).ok()
    }

    /// Index of the first point on calendar day `date`.
    pub fn index_of_date(&self, date: ReportDate) -> Option<usize> {
        let day = date.to_naive();
        self.points.iter().position(|p| p.date() == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn elapsed_zero_coincides_with_origin() {
        let start = ReportDate::new(2010, 1, 1).unwrap();
        let tm = TimeMap::from_elapsed(start, &[0.0, 1.0]).unwrap();
        assert_eq!(tm.len(), 3);
        assert_eq!(tm.get(1), Some(at(2010, 1, 1)));
        assert_eq!(tm.get(2), Some(at(2010, 1, 2)));
        assert_eq!(tm.elapsed_days(1), Some(0.0));
    }

    #[test]
    fn sub_millisecond_steps_stay_ordered() {
        let start = ReportDate::new(2010, 1, 1).unwrap();
        let tm = TimeMap::from_elapsed(start, &[1.0, 1.0 + 1e-12, 1.0 + 2e-12]).unwrap();
        let points: Vec<_> = tm.iter().collect();
        assert!(points[1..].windows(2).all(|w| w[0] < w[1]));
        assert!(matches!(
            TimeMap::from_elapsed(start, &[2.0, 1.0]),
            Err(SeriesError::TimeOrder { index: 2 })
        ));
        assert!(matches!(
            TimeMap::from_elapsed(start, &[-1.0]),
            Err(SeriesError::TimeOrder { index: 1 })
        ));
    }

    #[test]
    fn steps_accumulate() {
        let tm = TimeMap::from_steps(at(2010, 1, 1), &[31.0, 28.0, 0.5]).unwrap();
        assert_eq!(tm.len(), 4);
        assert_eq!(tm.get(1), Some(at(2010, 2, 1)));
        assert_eq!(tm.get(2), Some(at(2010, 3, 1)));
        assert_eq!(tm.elapsed_days(3), Some(59.5));
        assert_eq!(tm.index_of(at(2010, 3, 1)), Some(2));
        assert_eq!(
            tm.index_of_date(ReportDate::new(2010, 3, 1).unwrap()),
            Some(2)
        );
    }

    #[test]
    fn non_increasing_rejected() {
        assert!(matches!(
            TimeMap::from_dates(at(2010, 1, 1), &[at(2010, 2, 1), at(2010, 2, 1)]),
            Err(SeriesError::TimeOrder { index: 2 })
        ));
        assert!(matches!(
            TimeMap::from_dates(at(2010, 1, 1), &[at(2009, 12, 1)]),
            Err(SeriesError::TimeOrder { index: 1 })
        ));
        assert!(matches!(
            TimeMap::from_steps(at(2010, 1, 1), &[1.0, 0.0]),
            Err(SeriesError::TimeOrder { index: 2 })
        ));
        assert!(matches!(
            TimeMap::from_steps(at(2010, 1, 1), &[f64::NAN]),
            Err(SeriesError::TimeOrder { index: 1 })
        ));
    }

    #[test]
    fn elapsed_from_start_date() {
        let start = ReportDate::new(2000, 1, 1).unwrap();
        let tm = TimeMap::from_elapsed(start, &[1.0, 366.0]).unwrap();
        assert_eq!(tm.origin(), at(2000, 1, 1));
        assert_eq!(tm.get(2), Some(at(2001, 1, 1)));
        assert!(TimeMap::from_elapsed(start, &[0.0]).is_err());
    }
}
