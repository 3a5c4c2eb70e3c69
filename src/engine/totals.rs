use super::{Engine, WorkplaceTotals};
use std::collections::BTreeMap;

pub(super) fn workplace_totals(engine: &Engine) -> Vec<WorkplaceTotals> {
    let mut by_place: BTreeMap<&str, WorkplaceTotals> = BTreeMap::new();
    for shift in engine.shifts() {
        let entry = by_place
            .entry(shift.workplace.as_str())
            .or_insert_with(|| WorkplaceTotals {
                workplace: shift.workplace.clone(),
                total_hours: 0.0,
                total_income: 0.0,
                shift_count: 0,
            });
        entry.total_hours += shift.hours_worked();
        entry.total_income += shift.income();
        entry.shift_count += 1;
    }
    by_place.into_values().collect()
}
