//! CLI logic for the Shoreline beach guide.
//!
//! Each subcommand exercises one part of the guide against the persisted data
//! directory; output goes to the writer handed to [`execute`].

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, FeedbackAction};

use std::io::{self, Write};

use chrono::{Local, Utc};
use log::info;

use shoreline::{
    ShorelineError,
    export::{self, render_document},
    feedback::{self, FeedbackBook, FeedbackEntry, FeedbackForm},
    storage::FileStore,
    ticker::{Coordinates, ticker_text},
    tour::Tour,
};
use shoreline_core::{
    catalog::{self, Catalog},
    identifier::SectionId,
};

/// Run the Shoreline CLI application, printing to standard output.
///
/// # Errors
///
/// Returns `ShorelineError` for:
/// - Configuration loading errors
/// - Rejected feedback
/// - Storage and export failures
pub fn run(args: &Args) -> Result<(), ShorelineError> {
    let stdout = io::stdout();
    execute(args, &mut stdout.lock())
}

/// Run the CLI application, writing its output to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn execute<W: Write>(args: &Args, out: &mut W) -> Result<(), ShorelineError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(dir) = &args.data_dir {
        app_config = app_config.with_storage_dir(dir.clone());
    }
    let catalog = Catalog::builtin();

    match &args.command {
        Command::Beaches { zone } => {
            for beach in catalog.filter(*zone) {
                writeln!(
                    out,
                    "{} ({}) [{}]\n  {}",
                    beach.name(),
                    beach.country(),
                    beach.zone(),
                    beach.description()
                )?;
            }
        }
        Command::Gallery { limit } => {
            for src in catalog.gallery_images(*limit) {
                writeln!(out, "{src}")?;
            }
        }
        Command::Sections => {
            for section in catalog::site_sections() {
                writeln!(out, "{}\t#{}", section.label(), section.anchor())?;
            }
        }
        Command::Feedback { action } => {
            let store = FileStore::new(config::data_dir(&app_config));
            let mut book = FeedbackBook::open(store);
            match action {
                FeedbackAction::Submit {
                    name,
                    email,
                    message,
                } => {
                    let form = FeedbackForm::new(name.as_str(), email.as_str(), message.as_str());
                    book.submit(form, Utc::now())?;
                    writeln!(out, "Thanks for your feedback!")?;
                }
                FeedbackAction::List { all } => {
                    let entries = if *all { book.entries() } else { book.recent() };
                    for entry in entries {
                        write_entry(out, entry)?;
                    }
                }
            }
        }
        Command::Visit => {
            let mut store = FileStore::new(config::data_dir(&app_config));
            let visits = feedback::record_visit(&mut store)?;
            writeln!(out, "Visitors: {}", group_thousands(visits))?;
        }
        Command::Export { output } => {
            let store = FileStore::new(config::data_dir(&app_config));
            let book = FeedbackBook::open(store);
            let document = render_document(&catalog, book.recent());
            export::write_document(output, &document)?;
            writeln!(out, "Saved {}", output.display())?;
        }
        Command::Tour { steps } => {
            let mut tour = Tour::new(&app_config, catalog::section_ids());
            writeln!(out, "start\t{}\t{}", 0, active_label(tour.active_section()))?;
            for stop in tour.run(steps.iter().copied()) {
                writeln!(
                    out,
                    "{}\t{:.0}\t{}",
                    stop.step(),
                    stop.scroll_top(),
                    active_label(stop.active())
                )?;
            }
            tour.finish();
        }
        Command::Ticker { lat, lon } => {
            let coords = lat.zip(*lon).map(|(lat, lon)| Coordinates::new(lat, lon));
            writeln!(out, "{}", ticker_text(Local::now().naive_local(), coords))?;
        }
    }

    info!(command:? = args.command; "Command completed");
    Ok(())
}

fn write_entry<W: Write>(out: &mut W, entry: &FeedbackEntry) -> io::Result<()> {
    let when = entry
        .submitted_at()
        .map(|ts| {
            ts.with_timezone(&Local)
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string()
        })
        .unwrap_or_default();
    writeln!(
        out,
        "{} <{}> {when}\n  {}",
        entry.name(),
        entry.email(),
        entry.message()
    )
}

fn active_label(active: Option<SectionId>) -> String {
    active.map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// Formats `n` with comma thousands separators.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
