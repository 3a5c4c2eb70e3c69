use super::{Engine, WeekBucket};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Dimanche le plus récent, `date` incluse (calendrier local, sans passage UTC).
pub fn week_start_key(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

pub(super) fn weekly_buckets(engine: &Engine) -> Vec<WeekBucket> {
    // BTreeMap : clés triées par date quel que soit l'ordre de saisie
    let mut buckets: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for shift in engine.shifts() {
        let entry = buckets.entry(week_start_key(shift.date)).or_default();
        entry.0 += shift.hours_worked();
        entry.1 += shift.income();
    }

    buckets
        .into_iter()
        .map(|(week_start, (total_hours, total_income))| WeekBucket {
            week_start,
            total_hours,
            total_income,
        })
        .collect()
}
