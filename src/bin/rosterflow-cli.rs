#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local};
use clap::{Args, Parser, Subcommand};
use rosterflow::{
    ics, io,
    model::{Shift, ShiftId, DEFAULT_HOURLY_RATE},
    report::{self, Dashboard, ReportRenderer, TextReport},
    storage::{JsonStorage, Storage},
    HeatLevel, RestrictionLimits,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Suivi des heures travaillées par lieu (JSON local)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du carnet
    #[arg(long, global = true, default_value = "shifts.json")]
    ledger: String,

    #[command(subcommand)]
    cmd: Commands,
}

/// Seuils indicatifs (heures)
#[derive(Args, Debug, Clone, Copy)]
struct LimitArgs {
    #[arg(long, default_value_t = 20.0)]
    week_warning: f64,
    #[arg(long, default_value_t = 24.0)]
    week_limit: f64,
    #[arg(long, default_value_t = 40.0)]
    fortnight_warning: f64,
    #[arg(long, default_value_t = 48.0)]
    fortnight_limit: f64,
}

impl LimitArgs {
    fn limits(self) -> Result<RestrictionLimits> {
        let limits = RestrictionLimits {
            week_warning_hours: self.week_warning,
            week_critical_hours: self.week_limit,
            fortnight_warning_hours: self.fortnight_warning,
            fortnight_critical_hours: self.fortnight_limit,
        };
        if let Err(err) = limits.validate() {
            bail!("{err} (expected 0 < warning <= limit)");
        }
        Ok(limits)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un lieu de travail
    AddWorkplace {
        #[arg(long)]
        name: String,
    },

    /// Lister les lieux connus
    Workplaces,

    /// Saisir un shift
    AddShift {
        #[arg(long)]
        workplace: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        start: String,
        /// HH:MM
        #[arg(long)]
        end: String,
        #[arg(long, default_value_t = DEFAULT_HOURLY_RATE)]
        rate: f64,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Supprimer un shift par identifiant
    DeleteShift {
        #[arg(long)]
        id: String,
    },

    /// Importer des shifts depuis un CSV
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Cumuls par semaine (dimanche → samedi)
    Weekly,

    /// Heures de la semaine / quinzaine en cours
    Restrictions {
        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Vérifier les chevauchements
    Conflicts {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Conseils de blocage de disponibilité
    Advise,

    /// Heures par jour (mois courant par défaut)
    Daily {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },

    /// Tableau de bord texte complet
    Summary {
        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Exporter les shifts au format iCalendar
    ExportIcs {
        #[arg(long, default_value = "RosterFlow_Shifts.ics")]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.ledger)?;
    let mut ledger = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::AddWorkplace { name } => {
            ledger.add_workplace(&name)?;
            storage.save(&ledger)?;
            0
        }
        Commands::Workplaces => {
            for w in &ledger.workplaces {
                println!("{w}");
            }
            0
        }
        Commands::AddShift {
            workplace,
            date,
            start,
            end,
            rate,
            notes,
        } => {
            if !ledger.has_workplace(workplace.trim()) {
                bail!("unknown workplace: {workplace} (add it with add-workplace first)");
            }
            let date = io::parse_date(&date)?;
            let start = io::parse_hhmm(&start)?;
            let end = io::parse_hhmm(&end)?;
            let mut shift = Shift::new(workplace, date, start, end, Some(rate))?;
            if let Some(notes) = notes {
                shift = shift.with_notes(notes);
            }
            let id = ledger.add_shift(shift);
            storage.save(&ledger)?;
            println!("{}", id.as_str());
            0
        }
        Commands::DeleteShift { id } => {
            ledger.delete_shift(&ShiftId::new(id))?;
            storage.save(&ledger)?;
            0
        }
        Commands::ImportShifts { csv } => {
            let shifts = io::import_shifts_csv(&csv).with_context(|| format!("importing {csv}"))?;
            for shift in shifts {
                if !ledger.has_workplace(&shift.workplace) {
                    ledger.add_workplace(&shift.workplace)?;
                }
                ledger.add_shift(shift);
            }
            storage.save(&ledger)?;
            0
        }
        Commands::List { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_ledger_json(path, &ledger)?;
            }
            if let Some(path) = out_csv {
                io::export_shifts_csv(path, &ledger.shifts)?;
            }
            for day in ledger.engine()?.calendar_days() {
                println!("{}", day.date);
                for s in &day.shifts {
                    println!(
                        "  {} | {} ({}-{}) {:.1}h ${:.2}{}",
                        s.id.as_str(),
                        s.workplace,
                        s.start_time.format("%H:%M"),
                        s.end_time.format("%H:%M"),
                        s.hours_worked(),
                        s.income(),
                        s.notes
                            .as_deref()
                            .map(|n| format!(" - {n}"))
                            .unwrap_or_default()
                    );
                }
            }
            0
        }
        Commands::Weekly => {
            let weeks = ledger.engine()?.weekly_buckets();
            if weeks.is_empty() {
                println!("No shifts added yet.");
            }
            for week in &weeks {
                println!("{}", report::week_line(week));
            }
            0
        }
        Commands::Restrictions { limits } => {
            let r = ledger.engine()?.restrictions(limits.limits()?);
            println!("{}", report::restriction_line("This week", &r.week));
            println!("{}", report::restriction_line("This fortnight", &r.fortnight));
            0
        }
        Commands::Conflicts { report: out } => {
            let conflicts = ledger.engine()?.conflicts();
            if let Some(path) = out {
                io::export_conflicts_csv(path, &conflicts)?;
            }
            if conflicts.is_empty() {
                println!("OK: no overlapping shifts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for c in &conflicts {
                    println!("{}", report::conflict_line(c));
                }
                // Code 2 = WARNING
                2
            }
        }
        Commands::Advise => {
            let advice = ledger.engine()?.block_advice();
            if advice.is_empty() {
                println!("No shifts to block yet.");
            }
            for a in &advice {
                println!("{a}");
            }
            0
        }
        Commands::Daily { year, month } => {
            let today = Local::now().date_naive();
            let days = ledger.engine()?.month_heatmap(
                year.unwrap_or_else(|| today.year()),
                month.unwrap_or_else(|| today.month()),
            )?;
            for day in days.iter().filter(|d| d.level != HeatLevel::None) {
                println!("{}: {:.1} hrs ({:?})", day.date, day.hours, day.level);
            }
            0
        }
        Commands::Summary { limits } => {
            let dashboard =
                Dashboard::build(&ledger.engine()?, Local::now().date_naive(), limits.limits()?);
            print!("{}", TextReport.render(&dashboard));
            0
        }
        Commands::ExportIcs { out } => {
            ics::write_ics(&out, &ledger.shifts, &Local)?;
            println!("Exported {} shift(s) to {out}", ledger.shifts.len());
            0
        }
    };

    std::process::exit(code);
}
