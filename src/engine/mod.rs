mod availability;
mod conflicts;
mod daily;
mod restrictions;
mod totals;
mod types;
mod util;
mod weekly;

pub use types::{
    BlockAdvice, CalendarDay, Conflict, DailyHours, DateAvailability, EngineError, HeatLevel,
    RestrictionLimits, RestrictionReport, RestrictionStatus, Severity, WeekBucket,
    WorkplaceTotals,
};
pub use weekly::week_start_key;

use crate::model::Shift;
use chrono::{Local, NaiveDate};

/// Engine : instantané immuable des shifts et des lieux connus.
///
/// Toutes les vues dérivées sont des fonctions pures de cet instantané ;
/// l'ordre de saisie n'influence jamais les clés exposées.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    shifts: Vec<Shift>,
    workplaces: Vec<String>,
}

impl Engine {
    /// Construit l'instantané en revalidant chaque shift (cf. [`Shift::validate`]).
    pub fn new(shifts: Vec<Shift>, workplaces: Vec<String>) -> Result<Self, EngineError> {
        for s in &shifts {
            s.validate().map_err(|e| EngineError::InvalidShift {
                shift_id: s.id.as_str().to_string(),
                message: e.to_string(),
            })?;
        }
        Ok(Self { shifts, workplaces })
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }
    pub fn workplaces(&self) -> &[String] {
        &self.workplaces
    }

    pub fn weekly_buckets(&self) -> Vec<WeekBucket> {
        weekly::weekly_buckets(self)
    }

    /// Plafonds hebdo/quinzaine calculés par rapport à la date locale du jour.
    pub fn restrictions(&self, limits: RestrictionLimits) -> RestrictionReport {
        self.restrictions_at(Local::now().date_naive(), limits)
    }

    pub fn restrictions_at(&self, today: NaiveDate, limits: RestrictionLimits) -> RestrictionReport {
        restrictions::restrictions_at(self, today, limits)
    }

    pub fn conflicts(&self) -> Vec<Conflict> {
        conflicts::detect_conflicts(self)
    }

    pub fn availability(&self) -> Vec<DateAvailability> {
        availability::availability(self)
    }

    pub fn block_advice(&self) -> Vec<BlockAdvice> {
        availability::block_advice(self)
    }

    pub fn workplace_totals(&self) -> Vec<WorkplaceTotals> {
        totals::workplace_totals(self)
    }

    pub fn daily_hours(&self) -> Vec<DailyHours> {
        daily::daily_hours(self)
    }

    pub fn month_heatmap(&self, year: i32, month: u32) -> Result<Vec<DailyHours>, EngineError> {
        daily::month_heatmap(self, year, month)
    }

    pub fn calendar_days(&self) -> Vec<CalendarDay> {
        daily::calendar_days(self)
    }
}
