use crate::model::Shift;
use chrono::{NaiveDate, NaiveTime};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid shift '{shift_id}': {message}")]
    InvalidShift { shift_id: String, message: String },
    #[error("invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("invalid {window} limits: warning {warning} h, critical {critical} h")]
    InvalidLimits {
        window: &'static str,
        warning: f64,
        critical: f64,
    },
}

/// Cumul d'une semaine (dimanche → samedi), clé = dimanche.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekBucket {
    pub week_start: NaiveDate,
    pub total_hours: f64,
    pub total_income: f64,
}

/// Paire de shifts qui se chevauchent le même jour.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub date: NaiveDate,
    pub shift_a: Shift,
    pub shift_b: Shift,
    pub overlap_start: NaiveTime,
    pub overlap_end: NaiveTime,
}

impl Conflict {
    pub fn overlap_minutes(&self) -> i64 {
        (self.overlap_end - self.overlap_start).num_minutes()
    }

    pub fn overlap_hours(&self) -> f64 {
        self.overlap_minutes() as f64 / 60.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Severity {
    /// `hours <= warning` → Ok, `hours <= critical` → Warning, sinon Critical.
    pub fn classify(hours: f64, warning: f64, critical: f64) -> Self {
        if hours > critical {
            Severity::Critical
        } else if hours > warning {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seuils indicatifs (aucun blocage de saisie)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestrictionLimits {
    pub week_warning_hours: f64,
    pub week_critical_hours: f64,
    pub fortnight_warning_hours: f64,
    pub fortnight_critical_hours: f64,
}

impl RestrictionLimits {
    /// Exige `0 < warning <= critical` pour chaque fenêtre.
    pub fn validate(&self) -> Result<(), EngineError> {
        let windows = [
            ("week", self.week_warning_hours, self.week_critical_hours),
            ("fortnight", self.fortnight_warning_hours, self.fortnight_critical_hours),
        ];
        for (window, warning, critical) in windows {
            // NaN échoue aussi
            if !(warning > 0.0 && warning <= critical && critical.is_finite()) {
                return Err(EngineError::InvalidLimits {
                    window,
                    warning,
                    critical,
                });
            }
        }
        Ok(())
    }
}

impl Default for RestrictionLimits {
    fn default() -> Self {
        Self {
            week_warning_hours: 20.0,
            week_critical_hours: 24.0,
            fortnight_warning_hours: 40.0,
            fortnight_critical_hours: 48.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestrictionStatus {
    pub since: NaiveDate,
    pub hours: f64,
    pub limit: f64,
    pub severity: Severity,
}

impl RestrictionStatus {
    /// Remplissage de la jauge, plafonné à 100.
    pub fn percent_of_limit(&self) -> f64 {
        if self.limit <= 0.0 {
            return 100.0;
        }
        (self.hours / self.limit * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestrictionReport {
    pub week: RestrictionStatus,
    pub fortnight: RestrictionStatus,
}

/// Lieux travaillés / bloquables pour une date donnée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateAvailability {
    pub date: NaiveDate,
    pub worked: Vec<String>,
    pub blockable: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAdvice {
    pub date: NaiveDate,
    pub worked: String,
    pub block: String,
}

impl fmt::Display for BlockAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You are working at {} on {} — block {} on this day.",
            self.worked, self.date, self.block
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkplaceTotals {
    pub workplace: String,
    pub total_hours: f64,
    pub total_income: f64,
    pub shift_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatLevel {
    None,
    Light,
    Moderate,
    Heavy,
}

impl HeatLevel {
    pub fn from_hours(hours: f64) -> Self {
        if hours <= 0.0 {
            HeatLevel::None
        } else if hours <= 4.0 {
            HeatLevel::Light
        } else if hours <= 8.0 {
            HeatLevel::Moderate
        } else {
            HeatLevel::Heavy
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyHours {
    pub date: NaiveDate,
    pub hours: f64,
    pub level: HeatLevel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub shifts: Vec<Shift>,
}
