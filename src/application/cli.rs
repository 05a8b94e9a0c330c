use crate::application::AvailabilityApp;
use crate::domain::{
    CalendarMonth, DateRange, RejectionReason, RentalDecision, RentalRequest, parse_date,
};
use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lendable")]
#[command(about = "Track when lendable items are unavailable")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List items with stored availability
    Items,
    /// Show the merged unavailable ranges for an item
    Ranges {
        #[arg(short, long)]
        item: String,
        /// Print as JSON instead of one range per line
        #[arg(long)]
        json: bool,
    },
    /// Block a range of days (or a single day without --end)
    Block {
        #[arg(short, long)]
        item: String,
        #[arg(short, long, value_parser = parse_date)]
        start: NaiveDate,
        #[arg(short, long, value_parser = parse_date)]
        end: Option<NaiveDate>,
    },
    /// Remove an exactly matching blocked range (or single day)
    Unblock {
        #[arg(short, long)]
        item: String,
        #[arg(short, long, value_parser = parse_date)]
        start: NaiveDate,
        #[arg(short, long, value_parser = parse_date)]
        end: Option<NaiveDate>,
    },
    /// Check whether a single day is unavailable (every item when --item is omitted)
    Day {
        #[arg(short, long)]
        item: Option<String>,
        #[arg(short, long, value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Validate a rental request against the item's availability
    Check {
        #[arg(short, long)]
        item: String,
        #[arg(short, long, value_parser = parse_date)]
        start: NaiveDate,
        /// Rental length in days, starting on --start
        #[arg(short, long, conflicts_with = "end", required_unless_present = "end")]
        days: Option<u32>,
        /// Last rental day (inclusive)
        #[arg(short, long, value_parser = parse_date)]
        end: Option<NaiveDate>,
        /// Reference date for the past-start check (defaults to today)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },
    /// Print a month grid, marking unavailable days with `x`
    Month {
        #[arg(short, long)]
        item: String,
        /// YYYY-MM, defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// List items whose unavailability overlaps a window
    Conflicts {
        #[arg(short, long, value_parser = parse_date)]
        start: NaiveDate,
        #[arg(short, long, value_parser = parse_date)]
        end: NaiveDate,
    },
}

impl Cli {
    pub fn run() -> Result<()> {
        let cli = Self::parse();
        let app = AvailabilityApp::new()?;

        match cli.command {
            Commands::Items => {
                for item_id in app.items()? {
                    println!("{item_id}");
                }
            }
            Commands::Ranges { item, json } => {
                let ranges = app.ranges(&item)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&ranges)?);
                } else if ranges.is_empty() {
                    println!("{item} is fully available");
                } else {
                    for range in ranges {
                        println!("{range}");
                    }
                }
            }
            Commands::Block { item, start, end } => {
                let updated = app.block(&item, start, end)?;
                print_ranges(&item, &updated.ranges());
            }
            Commands::Unblock { item, start, end } => {
                let updated = app.unblock(&item, start, end)?;
                print_ranges(&item, &updated.ranges());
            }
            Commands::Day {
                item: Some(item),
                date,
            } => {
                if app.is_day_unavailable(&item, date)? {
                    println!("{item} is unavailable on {date}");
                } else {
                    println!("{item} is available on {date}");
                }
            }
            Commands::Day { item: None, date } => {
                let items = app.unavailable_on(date)?;
                if items.is_empty() {
                    println!("No items blocked on {date}");
                }
                for item_id in items {
                    println!("{item_id}");
                }
            }
            Commands::Check {
                item,
                start,
                days,
                end,
                today,
            } => {
                let request = match (days, end) {
                    (Some(days), _) => RentalRequest::for_duration(start, days)?,
                    (None, Some(end)) => RentalRequest::between(start, end)?,
                    (None, None) => anyhow::bail!("either --days or --end is required"),
                };
                let today = today.unwrap_or_else(|| Local::now().date_naive());
                println!("{}", describe_decision(&app.check_rental(&item, &request, today)?));
            }
            Commands::Month { item, month } => {
                let (year, month) = match month {
                    Some(raw) => parse_month(&raw)?,
                    None => {
                        let today = Local::now().date_naive();
                        (today.year(), today.month())
                    }
                };
                print!("{}", render_month(&app.month(&item, year, month)?));
            }
            Commands::Conflicts { start, end } => {
                let window = DateRange::new(start, end)?;
                let items = app.conflicts(&window)?;
                if items.is_empty() {
                    println!("No items blocked during {window}");
                }
                for item_id in items {
                    println!("{item_id}");
                }
            }
        }

        Ok(())
    }
}

fn print_ranges(item_id: &str, ranges: &[DateRange]) {
    if ranges.is_empty() {
        println!("{item_id} is fully available");
        return;
    }
    println!("{item_id} unavailable:");
    for range in ranges {
        println!("  {range}");
    }
}

/// Parses `YYYY-MM` into a year and month.
pub fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .with_context(|| format!("Expected YYYY-MM, got {raw:?}"))?;
    Ok((first.year(), first.month()))
}

pub fn describe_decision(decision: &RentalDecision) -> String {
    match decision {
        RentalDecision::Accepted { window } => format!("Accepted: {window}"),
        RentalDecision::Rejected(RejectionReason::StartsInPast) => {
            "Rejected: the rental starts in the past".to_string()
        }
        RentalDecision::Rejected(RejectionReason::TooLong { max_days }) => {
            format!("Rejected: rentals are limited to {max_days} days")
        }
        RentalDecision::Rejected(RejectionReason::DatesUnavailable { conflicts }) => {
            let spans: Vec<String> = conflicts.iter().map(DateRange::to_string).collect();
            format!("Rejected: unavailable during {}", spans.join(", "))
        }
    }
}

/// Days outside the month are left blank.
pub fn render_month(calendar: &CalendarMonth) -> String {
    let mut out = format!("{}\n", calendar.month.start().format("%B %Y"));
    out.push_str("Su  Mo  Tu  We  Th  Fr  Sa\n");

    for week in &calendar.weeks {
        let cells: Vec<String> = week
            .iter()
            .map(|day| {
                if !day.in_month {
                    "   ".to_string()
                } else {
                    let marker = if day.unavailable { 'x' } else { ' ' };
                    format!("{:>2}{marker}", day.date.day())
                }
            })
            .collect();
        out.push_str(cells.join(" ").trim_end());
        out.push('\n');
    }

    out
}
