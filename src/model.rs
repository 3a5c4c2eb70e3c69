use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::engine::{Engine, EngineError};

/// Taux horaire appliqué quand aucun taux valide n'est fourni.
pub const DEFAULT_HOURLY_RATE: f64 = 30.0;

/// Identifiant fort pour Shift (attribué à la persistance)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShiftError {
    #[error("workplace cannot be empty")]
    EmptyWorkplace,
    #[error("end time {end} must be after start time {start}")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },
    #[error("time {0} must be a whole minute (HH:MM)")]
    SubMinuteTime(NaiveTime),
}

/// Période travaillée dans un lieu, sur une seule journée locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub workplace: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default = "default_rate", deserialize_with = "deserialize_rate")]
    pub hourly_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Shift {
    /// Crée un shift en validant `end_time > start_time` et un lieu non vide.
    ///
    /// Un taux absent, non fini ou négatif retombe sur [`DEFAULT_HOURLY_RATE`].
    pub fn new<W: Into<String>>(
        workplace: W,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        hourly_rate: Option<f64>,
    ) -> Result<Self, ShiftError> {
        let shift = Self {
            id: ShiftId::random(),
            workplace: workplace.into().trim().to_string(),
            date,
            start_time,
            end_time,
            hourly_rate: sanitize_rate(hourly_rate),
            notes: None,
        };
        shift.validate()?;
        Ok(shift)
    }

    /// Invariants partagés par la saisie et l'instantané du moteur :
    /// lieu non vide, heures à la minute près, `end_time > start_time`.
    pub fn validate(&self) -> Result<(), ShiftError> {
        if self.workplace.trim().is_empty() {
            return Err(ShiftError::EmptyWorkplace);
        }
        for t in [self.start_time, self.end_time] {
            if t.second() != 0 || t.nanosecond() != 0 {
                return Err(ShiftError::SubMinuteTime(t));
            }
        }
        if self.end_time <= self.start_time {
            return Err(ShiftError::InvalidTimeRange {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }

    pub fn with_notes<N: Into<String>>(mut self, notes: N) -> Self {
        let notes = notes.into().trim().to_string();
        self.notes = (!notes.is_empty()).then_some(notes);
        self
    }

    /// Durée en minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    pub fn hours_worked(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }

    pub fn income(&self) -> f64 {
        self.hours_worked() * self.hourly_rate
    }
}

fn sanitize_rate(rate: Option<f64>) -> f64 {
    match rate {
        Some(r) if r.is_finite() && r > 0.0 => r,
        _ => DEFAULT_HOURLY_RATE,
    }
}

fn default_rate() -> f64 {
    DEFAULT_HOURLY_RATE
}

// un fichier édité à la main suit la même règle que la saisie
fn deserialize_rate<'de, D: serde::Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Option::<f64>::deserialize(d).map(sanitize_rate)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("workplace name cannot be empty")]
    EmptyWorkplace,
    #[error("workplace already exists: {0}")]
    DuplicateWorkplace(String),
}

/// Carnet complet : lieux connus + shifts saisis.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Ledger {
    #[serde(default)]
    pub workplaces: Vec<String>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
}

impl Ledger {
    /// Ajoute un lieu (comparaison exacte, sensible à la casse).
    pub fn add_workplace<S: AsRef<str>>(&mut self, name: S) -> Result<(), LedgerError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyWorkplace);
        }
        if self.has_workplace(name) {
            return Err(LedgerError::DuplicateWorkplace(name.to_string()));
        }
        self.workplaces.push(name.to_string());
        #[cfg(feature = "logging")]
        tracing::debug!(workplace = name, "workplace added");
        Ok(())
    }

    pub fn has_workplace(&self, name: &str) -> bool {
        self.workplaces.iter().any(|w| w == name)
    }

    /// Enregistre un shift et renvoie son identifiant.
    pub fn add_shift(&mut self, shift: Shift) -> ShiftId {
        let id = shift.id.clone();
        #[cfg(feature = "logging")]
        tracing::debug!(id = id.as_str(), workplace = %shift.workplace, date = %shift.date, "shift added");
        self.shifts.push(shift);
        id
    }

    pub fn delete_shift(&mut self, id: &ShiftId) -> Result<Shift, LedgerError> {
        let pos = self
            .shifts
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| LedgerError::UnknownShift(id.as_str().to_string()))?;
        #[cfg(feature = "logging")]
        tracing::debug!(id = id.as_str(), "shift deleted");
        Ok(self.shifts.remove(pos))
    }

    pub fn find_shift(&self, id: &ShiftId) -> Option<&Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }

    /// Instantané immuable pour les calculs d'agrégation.
    pub fn engine(&self) -> Result<Engine, EngineError> {
        Engine::new(self.shifts.clone(), self.workplaces.clone())
    }
}

/// (Dé)sérialisation stricte `HH:MM`.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw, "%H:%M")
    }
}

pub use hhmm::parse as parse_time;
