use crate::model::Shift;
use chrono::{NaiveDate, NaiveTime};

/// Intervalles semi-ouverts `[start, end)` : des bornes qui se touchent ne chevauchent pas.
pub(super) fn overlaps(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Regroupe les shifts par date, dates croissantes, ordre d'entrée conservé dans un groupe.
pub(super) fn group_by_date(shifts: &[Shift]) -> Vec<(NaiveDate, Vec<&Shift>)> {
    let mut sorted: Vec<&Shift> = shifts.iter().collect();
    // sort_by_key est stable
    sorted.sort_by_key(|s| s.date);

    let mut groups: Vec<(NaiveDate, Vec<&Shift>)> = Vec::new();
    for shift in sorted {
        match groups.last_mut() {
            Some((date, group)) if *date == shift.date => group.push(shift),
            _ => groups.push((shift.date, vec![shift])),
        }
    }
    groups
}
