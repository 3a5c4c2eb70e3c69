//! Export iCalendar (RFC 5545) : un VEVENT par shift, horaires convertis en UTC.

use crate::model::Shift;
use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use std::fs;
use std::path::Path;

const PRODID: &str = "-//RosterFlow//EN";
const MAX_LINE_OCTETS: usize = 75;

/// Génère le calendrier ; `tz` est le fuseau local dans lequel les shifts ont été saisis.
pub fn export_ics<Tz: TimeZone>(shifts: &[Shift], tz: &Tz) -> Result<String> {
    if shifts.is_empty() {
        bail!("no shifts to export");
    }

    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:{PRODID}"));

    for shift in shifts {
        let dtstart = utc_stamp(tz, shift.date, shift.start_time)
            .with_context(|| format!("shift {}", shift.id.as_str()))?;
        let dtend = utc_stamp(tz, shift.date, shift.end_time)
            .with_context(|| format!("shift {}", shift.id.as_str()))?;

        push_line(&mut out, "BEGIN:VEVENT");
        push_line(&mut out, &format!("UID:{}@rosterflow", shift.id.as_str()));
        push_line(
            &mut out,
            &format!("SUMMARY:{}", escape_text(&format!("Work at {}", shift.workplace))),
        );
        push_line(&mut out, &format!("DESCRIPTION:{}", escape_text(&description(shift))));
        push_line(&mut out, &format!("DTSTART:{dtstart}"));
        push_line(&mut out, &format!("DTEND:{dtend}"));
        push_line(&mut out, "END:VEVENT");
    }

    push_line(&mut out, "END:VCALENDAR");
    Ok(out)
}

pub fn write_ics<P: AsRef<Path>, Tz: TimeZone>(path: P, shifts: &[Shift], tz: &Tz) -> Result<()> {
    let ics = export_ics(shifts, tz)?;
    fs::write(path.as_ref(), ics)
        .with_context(|| format!("writing {}", path.as_ref().display()))?;
    Ok(())
}

fn description(shift: &Shift) -> String {
    let mut desc = format!(
        "Shift at {}\nTime: {} - {}\nExpected Income: ${:.2}",
        shift.workplace,
        shift.start_time.format("%H:%M"),
        shift.end_time.format("%H:%M"),
        shift.income()
    );
    if let Some(notes) = &shift.notes {
        desc.push_str("\nNotes: ");
        desc.push_str(notes);
    }
    desc
}

fn utc_stamp<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: NaiveTime) -> Result<String> {
    let local = date.and_time(time);
    let at = tz
        .from_local_datetime(&local)
        .earliest()
        .with_context(|| format!("local time {local} does not exist in this time zone"))?;
    Ok(at.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string())
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Pliage à 75 octets, suite de ligne préfixée d'un espace.
fn push_line(out: &mut String, line: &str) {
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out.push_str("\r\n");
}
