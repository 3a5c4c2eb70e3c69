#![forbid(unsafe_code)]
//! RosterFlow — suivi personnel des heures travaillées par lieu (sans BD).
//!
//! - Stockage fichier (JSON), import/export CSV, export ICS.
//! - Cumuls hebdomadaires, plafonds semaine/quinzaine indicatifs.
//! - Détection des chevauchements et conseils de blocage de disponibilité.
//! - Le moteur travaille sur un instantané immuable ; aucune I/O dans `engine`.

pub mod engine;
pub mod ics;
pub mod io;
pub mod model;
pub mod report;
pub mod storage;

pub use engine::{
    week_start_key, BlockAdvice, CalendarDay, Conflict, DailyHours, DateAvailability, Engine,
    EngineError, HeatLevel, RestrictionLimits, RestrictionReport, RestrictionStatus, Severity,
    WeekBucket, WorkplaceTotals,
};
pub use ics::{export_ics, write_ics};
pub use model::{Ledger, LedgerError, Shift, ShiftError, ShiftId, DEFAULT_HOURLY_RATE};
pub use report::{Dashboard, ReportRenderer, TextReport};
pub use storage::{JsonStorage, Storage};
