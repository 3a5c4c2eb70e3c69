use super::{util, CalendarDay, DailyHours, Engine, EngineError, HeatLevel};
use chrono::{Datelike, NaiveDate};

pub(super) fn daily_hours(engine: &Engine) -> Vec<DailyHours> {
    util::group_by_date(engine.shifts())
        .into_iter()
        .map(|(date, shifts)| {
            let hours: f64 = shifts.iter().map(|s| s.hours_worked()).sum();
            DailyHours {
                date,
                hours,
                level: HeatLevel::from_hours(hours),
            }
        })
        .collect()
}

/// Une entrée par jour du mois, jours sans shift compris.
pub(super) fn month_heatmap(
    engine: &Engine,
    year: i32,
    month: u32,
) -> Result<Vec<DailyHours>, EngineError> {
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(EngineError::InvalidMonth { year, month })?;

    let mut out = Vec::with_capacity(31);
    let mut day = first;
    while day.month() == month && day.year() == year {
        let hours: f64 = engine
            .shifts()
            .iter()
            .filter(|s| s.date == day)
            .map(|s| s.hours_worked())
            .sum();
        out.push(DailyHours {
            date: day,
            hours,
            level: HeatLevel::from_hours(hours),
        });
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    Ok(out)
}

pub(super) fn calendar_days(engine: &Engine) -> Vec<CalendarDay> {
    util::group_by_date(engine.shifts())
        .into_iter()
        .map(|(date, shifts)| CalendarDay {
            date,
            shifts: shifts.into_iter().cloned().collect(),
        })
        .collect()
}
