use super::{weekly::week_start_key, Engine, RestrictionLimits, RestrictionReport, RestrictionStatus, Severity};
use chrono::{Duration, NaiveDate};

pub(super) fn restrictions_at(
    engine: &Engine,
    today: NaiveDate,
    limits: RestrictionLimits,
) -> RestrictionReport {
    let week_start = week_start_key(today);
    let fortnight_start = week_start - Duration::days(7);

    // bornes basses inclusives, pas de borne haute (shifts futurs compris)
    let mut week_hours = 0.0;
    let mut fortnight_hours = 0.0;
    for shift in engine.shifts() {
        if shift.date >= week_start {
            week_hours += shift.hours_worked();
        }
        if shift.date >= fortnight_start {
            fortnight_hours += shift.hours_worked();
        }
    }

    RestrictionReport {
        week: RestrictionStatus {
            since: week_start,
            hours: week_hours,
            limit: limits.week_critical_hours,
            severity: Severity::classify(
                week_hours,
                limits.week_warning_hours,
                limits.week_critical_hours,
            ),
        },
        fortnight: RestrictionStatus {
            since: fortnight_start,
            hours: fortnight_hours,
            limit: limits.fortnight_critical_hours,
            severity: Severity::classify(
                fortnight_hours,
                limits.fortnight_warning_hours,
                limits.fortnight_critical_hours,
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;
    use crate::model::{parse_time, Shift};

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn shift(date: &str, start: &str, end: &str) -> Shift {
        Shift::new("Cafe", d(date), parse_time(start).unwrap(), parse_time(end).unwrap(), None)
            .unwrap()
    }

    fn report(shifts: Vec<Shift>, today: &str) -> RestrictionReport {
        Engine::new(shifts, vec![])
            .unwrap()
            .restrictions_at(d(today), RestrictionLimits::default())
    }

    #[test]
    fn windows_are_anchored_on_sunday() {
        // mercredi 2024-01-10 → semaine du 2024-01-07, quinzaine depuis 2023-12-31
        let r = report(vec![], "2024-01-10");
        assert_eq!(r.week.since, d("2024-01-07"));
        assert_eq!(r.fortnight.since, d("2023-12-31"));
        assert_eq!(r.week.hours, 0.0);
        assert_eq!(r.week.severity, Severity::Ok);
    }

    #[test]
    fn boundaries_are_inclusive_and_future_counts() {
        let r = report(
            vec![
                shift("2024-01-07", "09:00", "13:00"),
                shift("2023-12-31", "09:00", "11:00"),
                shift("2023-12-30", "09:00", "17:00"),
                shift("2024-02-01", "09:00", "10:00"),
            ],
            "2024-01-10",
        );
        assert_eq!(r.week.hours, 5.0);
        assert_eq!(r.fortnight.hours, 7.0);
    }

    #[test]
    fn exactly_24_hours_is_warning_not_critical() {
        let r = report(
            vec![
                shift("2024-01-08", "09:00", "17:00"),
                shift("2024-01-09", "09:00", "17:00"),
                shift("2024-01-10", "09:00", "17:00"),
            ],
            "2024-01-10",
        );
        assert_eq!(r.week.hours, 24.0);
        assert_eq!(r.week.severity, Severity::Warning);
        assert_eq!(r.week.percent_of_limit(), 100.0);
    }

    #[test]
    fn just_over_24_hours_is_critical() {
        let r = report(
            vec![
                shift("2024-01-08", "09:00", "17:00"),
                shift("2024-01-09", "09:00", "17:00"),
                shift("2024-01-10", "09:00", "17:06"),
            ],
            "2024-01-10",
        );
        assert!((r.week.hours - 24.1).abs() < 1e-9);
        assert_eq!(r.week.severity, Severity::Critical);
    }

    #[test]
    fn limits_must_be_positive_and_ordered() {
        assert!(RestrictionLimits::default().validate().is_ok());

        let inverted = RestrictionLimits {
            week_warning_hours: 30.0,
            ..RestrictionLimits::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(EngineError::InvalidLimits { window: "week", .. })
        ));

        let zero = RestrictionLimits {
            fortnight_warning_hours: 0.0,
            ..RestrictionLimits::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(EngineError::InvalidLimits { window: "fortnight", .. })
        ));
    }

    #[test]
    fn severity_bands() {
        assert_eq!(Severity::classify(20.0, 20.0, 24.0), Severity::Ok);
        assert_eq!(Severity::classify(20.5, 20.0, 24.0), Severity::Warning);
        assert_eq!(Severity::classify(40.0, 40.0, 48.0), Severity::Ok);
        assert_eq!(Severity::classify(48.0, 40.0, 48.0), Severity::Warning);
        assert_eq!(Severity::classify(48.5, 40.0, 48.0), Severity::Critical);
    }
}
