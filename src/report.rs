use crate::engine::{
    BlockAdvice, Conflict, Engine, RestrictionLimits, RestrictionReport, RestrictionStatus,
    WeekBucket, WorkplaceTotals,
};
use chrono::NaiveDate;
use std::fmt::Write;

/// Toutes les vues dérivées d'un même instantané, prêtes pour l'affichage.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub weeks: Vec<WeekBucket>,
    pub restrictions: RestrictionReport,
    pub conflicts: Vec<Conflict>,
    pub advice: Vec<BlockAdvice>,
    pub workplaces: Vec<WorkplaceTotals>,
}

impl Dashboard {
    pub fn build(engine: &Engine, today: NaiveDate, limits: RestrictionLimits) -> Self {
        Self {
            today,
            weeks: engine.weekly_buckets(),
            restrictions: engine.restrictions_at(today, limits),
            conflicts: engine.conflicts(),
            advice: engine.block_advice(),
            workplaces: engine.workplace_totals(),
        }
    }
}

/// Permet de customiser le rendu (texte, HTML, etc.).
pub trait ReportRenderer {
    fn render(&self, dashboard: &Dashboard) -> String;
}

/// Rendu texte brut pour le terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport;

impl ReportRenderer for TextReport {
    fn render(&self, dashboard: &Dashboard) -> String {
        let mut out = String::new();

        out.push_str("Weekly summary\n");
        if dashboard.weeks.is_empty() {
            out.push_str("  No shifts added yet.\n");
        }
        for week in &dashboard.weeks {
            let _ = writeln!(out, "  {}", week_line(week));
        }

        out.push_str("\nWork restrictions\n");
        let _ = writeln!(
            out,
            "  {}",
            restriction_line("This week", &dashboard.restrictions.week)
        );
        let _ = writeln!(
            out,
            "  {}",
            restriction_line("This fortnight", &dashboard.restrictions.fortnight)
        );

        out.push_str("\nConflicting shifts\n");
        if dashboard.conflicts.is_empty() {
            out.push_str("  No overlapping shifts.\n");
        }
        for c in &dashboard.conflicts {
            let _ = writeln!(out, "  {}", conflict_line(c));
        }

        out.push_str("\nBlock availability\n");
        if dashboard.advice.is_empty() {
            out.push_str("  No shifts to block yet.\n");
        }
        for advice in &dashboard.advice {
            let _ = writeln!(out, "  {advice}");
        }

        if !dashboard.workplaces.is_empty() {
            out.push_str("\nBy workplace\n");
            for w in &dashboard.workplaces {
                let _ = writeln!(
                    out,
                    "  {}: {:.1} hrs, ${:.2} ({} shifts)",
                    w.workplace, w.total_hours, w.total_income, w.shift_count
                );
            }
        }

        out
    }
}

pub fn week_line(week: &WeekBucket) -> String {
    format!(
        "Week of {}: {:.1} hrs, ${:.2}",
        week.week_start, week.total_hours, week.total_income
    )
}

pub fn restriction_line(label: &str, status: &RestrictionStatus) -> String {
    format!(
        "{label}: {:.1} hrs / {:.0} hrs [{}] {:.0}%",
        status.hours,
        status.limit,
        status.severity,
        status.percent_of_limit()
    )
}

pub fn conflict_line(c: &Conflict) -> String {
    format!(
        "{}: {} ({}-{}) overlaps {} ({}-{}) by {:.1} h [{}-{}]",
        c.date,
        c.shift_a.workplace,
        c.shift_a.start_time.format("%H:%M"),
        c.shift_a.end_time.format("%H:%M"),
        c.shift_b.workplace,
        c.shift_b.start_time.format("%H:%M"),
        c.shift_b.end_time.format("%H:%M"),
        c.overlap_hours(),
        c.overlap_start.format("%H:%M"),
        c.overlap_end.format("%H:%M"),
    )
}
