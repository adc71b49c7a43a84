//! Weekly occupancy calendar.

use std::collections::HashMap;

use chrono::NaiveDate;
use clap::Args;
use tabled::builder::Builder;

use innkeep_core::error::AppError;
use innkeep_core::types::BookingId;
use innkeep_engine::{CalendarOptions, CalendarWindow};
use innkeep_entity::booking::BookingFilter;
use innkeep_service::{ServiceState, WeekCalendar};

use crate::output::{self, OutputFormat};

/// Arguments for the calendar command
#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Any day of the week to show (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Show the following week instead
    #[arg(long, conflicts_with = "previous")]
    pub next: bool,
    /// Show the preceding week instead
    #[arg(long)]
    pub previous: bool,
    /// Include rooms with nothing booked; `--show-empty=false` overrides
    /// calendar.show_empty_rooms
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub show_empty: Option<bool>,
    /// Include cancelled bookings; `--include-cancelled=false` overrides
    /// calendar.include_cancelled
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub include_cancelled: Option<bool>,
}

impl CalendarArgs {
    /// Configured options with the command-line overrides applied.
    fn options(&self, defaults: &CalendarOptions) -> CalendarOptions {
        CalendarOptions {
            show_empty_rooms: self.show_empty.unwrap_or(defaults.show_empty_rooms),
            include_cancelled: self.include_cancelled.unwrap_or(defaults.include_cancelled),
            week_starts_on: defaults.week_starts_on,
        }
    }

    /// The week to show: the one containing `date`, or its neighbour.
    fn window(&self, date: NaiveDate, options: &CalendarOptions) -> Result<CalendarWindow, AppError> {
        let week = CalendarWindow::week_containing(date, options.week_starts_on);
        if self.next {
            week.next()
        } else if self.previous {
            week.previous()
        } else {
            Some(week)
        }
        .ok_or_else(|| AppError::validation("Date is out of range"))
    }
}

/// Execute the calendar command
pub async fn execute(
    args: &CalendarArgs,
    state: &ServiceState,
    format: OutputFormat,
) -> Result<bool, AppError> {
    let options = args.options(state.bookings.calendar_options());
    let window = args.window(args.date.unwrap_or_else(super::today), &options)?;
    let calendar = state
        .bookings
        .week_calendar_with(window.first(), &options)
        .await?;

    match format {
        OutputFormat::Json => output::print_json(&calendar),
        OutputFormat::Table => print_grid(state, &calendar).await?,
    }
    Ok(false)
}

async fn print_grid(state: &ServiceState, week: &WeekCalendar) -> Result<(), AppError> {
    println!("Week of {} to {}", week.first, week.last);
    if week.rows.is_empty() {
        println!("No bookings this week.");
        return Ok(());
    }

    let labels = guest_labels(state).await?;

    let mut builder = Builder::default();
    let mut header = vec!["Room".to_string()];
    header.extend(week.days().iter().map(|d| d.format("%a %m-%d").to_string()));
    builder.push_record(header);

    for row in &week.rows {
        let mut record = vec![row.room.number.clone()];
        record.extend(row.days.iter().map(|cell| {
            cell.bookings
                .iter()
                .map(|id| labels.get(id).cloned().unwrap_or_else(|| id.short()))
                .collect::<Vec<_>>()
                .join(" / ")
        }));
        builder.push_record(record);
    }

    println!("{}", builder.build());
    Ok(())
}

/// Guest last names keyed by booking, for grid cells.
async fn guest_labels(state: &ServiceState) -> Result<HashMap<BookingId, String>, AppError> {
    let guests: HashMap<_, _> = state
        .guests
        .list()
        .await?
        .into_iter()
        .map(|g| (g.id, g.last_name))
        .collect();

    Ok(state
        .bookings
        .list_bookings(&BookingFilter::all())
        .await?
        .into_iter()
        .filter_map(|b| guests.get(&b.guest_id).map(|name| (b.id, name.clone())))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> CalendarArgs {
        let cli = Cli::try_parse_from(["innkeep", "calendar"].iter().chain(args)).unwrap();
        match cli.command {
            Commands::Calendar(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    fn configured() -> CalendarOptions {
        CalendarOptions {
            show_empty_rooms: true,
            include_cancelled: true,
            ..CalendarOptions::default()
        }
    }

    #[test]
    fn test_flags_override_configuration() {
        let options = parse(&[]).options(&configured());
        assert!(options.show_empty_rooms);
        assert!(options.include_cancelled);

        let options = parse(&["--show-empty=false", "--include-cancelled=false"]).options(&configured());
        assert!(!options.show_empty_rooms);
        assert!(!options.include_cancelled);

        let options = parse(&["--show-empty"]).options(&CalendarOptions::default());
        assert!(options.show_empty_rooms);
        assert!(!options.include_cancelled);
    }

    #[test]
    fn test_week_navigation() {
        let date: NaiveDate = "2024-06-05".parse().unwrap();
        let options = CalendarOptions::default();

        let window = parse(&[]).window(date, &options).unwrap();
        assert_eq!(window.first(), "2024-06-03".parse::<NaiveDate>().unwrap());
        let window = parse(&["--next"]).window(date, &options).unwrap();
        assert_eq!(window.first(), "2024-06-10".parse::<NaiveDate>().unwrap());
        let window = parse(&["--previous"]).window(date, &options).unwrap();
        assert_eq!(window.last(), "2024-06-02".parse::<NaiveDate>().unwrap());
    }
}
