use crate::engine::Conflict;
use crate::model::{parse_time, Ledger, Shift};
use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de shifts: header `workplace,date,start,end[,rate][,notes]`
///
/// Date `YYYY-MM-DD`, heures `HH:MM`. Un taux vide ou invalide retombe sur le
/// taux par défaut, comme à la saisie.
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Shift>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        // ligne 1 = header
        let row = line + 2;
        let field = |idx: usize, name: &str| {
            rec.get(idx)
                .map(str::trim)
                .with_context(|| format!("missing {name} on row {row}"))
        };
        let workplace = field(0, "workplace")?;
        let date = parse_date(field(1, "date")?).with_context(|| format!("row {row}"))?;
        let start = parse_hhmm(field(2, "start")?).with_context(|| format!("row {row}"))?;
        let end = parse_hhmm(field(3, "end")?).with_context(|| format!("row {row}"))?;
        let rate = rec.get(4).and_then(|r| r.trim().parse::<f64>().ok());
        let mut shift = Shift::new(workplace, date, start, end, rate)
            .with_context(|| format!("invalid shift on row {row}"))?;
        if let Some(notes) = rec.get(5) {
            shift = shift.with_notes(notes);
        }
        out.push(shift);
    }
    Ok(out)
}

pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw:?}"))
}

pub fn parse_hhmm(raw: &str) -> anyhow::Result<NaiveTime> {
    if raw.is_empty() {
        bail!("missing time");
    }
    parse_time(raw).with_context(|| format!("invalid time: {raw:?}"))
}

/// Export JSON du carnet (jolie mise en forme)
pub fn export_ledger_json<P: AsRef<Path>>(path: P, ledger: &Ledger) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(ledger)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des shifts: header `id,workplace,date,start,end,rate,hours,income,notes`
pub fn export_shifts_csv<P: AsRef<Path>>(path: P, shifts: &[Shift]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id",
        "workplace",
        "date",
        "start",
        "end",
        "rate",
        "hours",
        "income",
        "notes",
    ])?;
    for s in shifts {
        w.write_record([
            s.id.as_str().to_string(),
            s.workplace.clone(),
            s.date.to_string(),
            s.start_time.format("%H:%M").to_string(),
            s.end_time.format("%H:%M").to_string(),
            s.hourly_rate.to_string(),
            format!("{:.2}", s.hours_worked()),
            format!("{:.2}", s.income()),
            s.notes.clone().unwrap_or_default(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Rapport CSV des conflits: header `date,shift_a,shift_b,overlap_start,overlap_end,overlap_hours`
pub fn export_conflicts_csv<P: AsRef<Path>>(path: P, conflicts: &[Conflict]) -> anyhow::Result<()> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record([
        "date",
        "shift_a",
        "shift_b",
        "overlap_start",
        "overlap_end",
        "overlap_hours",
    ])?;
    for c in conflicts {
        w.write_record([
            c.date.to_string(),
            c.shift_a.id.as_str().to_string(),
            c.shift_b.id.as_str().to_string(),
            c.overlap_start.format("%H:%M").to_string(),
            c.overlap_end.format("%H:%M").to_string(),
            format!("{:.2}", c.overlap_hours()),
        ])?;
    }
    w.flush()?;
    Ok(())
}
