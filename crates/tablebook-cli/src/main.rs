//! Tablebook CLI - Book presentation tables from the terminal
//!
//! Thin client over the Tablebook HTTP API. Missing arguments are asked for
//! interactively.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Select;
use std::fs;
use std::path::PathBuf;

use api::{AvailabilityResponse, CatalogResponse, TablebookClient};
use config::Config;

const LAYOUT_COLUMNS: usize = 5;

#[derive(Parser)]
#[command(name = "tablebook")]
#[command(about = "Tablebook CLI - Table booking for group presentations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether the booking system is open
    Status,

    /// Show the table layout with free and taken tables
    Layout {
        /// Slot key (thu-am, fri-am, fri-pm); all slots when omitted
        #[arg(short, long)]
        slot: Option<String>,
    },

    /// Book a table for a group
    Book {
        /// Group, e.g. "A1" (will prompt if not provided)
        #[arg(short, long)]
        group: Option<String>,
        /// Slot key or label (will prompt if not provided)
        #[arg(short, long)]
        slot: Option<String>,
        /// Table number (will prompt if not provided)
        #[arg(short, long)]
        table: Option<u8>,
    },

    /// Cancel one of a group's bookings
    Cancel {
        /// Group, e.g. "A1" (will prompt if not provided)
        #[arg(short, long)]
        group: Option<String>,
    },

    /// List all bookings and the per-group summary
    List,

    /// Download all bookings as CSV
    Export {
        /// Output file
        #[arg(short, long, default_value = "bookings.csv")]
        output: PathBuf,
    },

    /// Show or update configuration
    Config {
        /// Server URL to store
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Status => cmd_status().await,
        Commands::Layout { slot } => cmd_layout(slot).await,
        Commands::Book { group, slot, table } => cmd_book(group, slot, table).await,
        Commands::Cancel { group } => cmd_cancel(group).await,
        Commands::List => cmd_list().await,
        Commands::Export { output } => cmd_export(output).await,
        Commands::Config { base_url } => cmd_config(base_url),
    }
}

fn client() -> Result<TablebookClient> {
    let config = Config::load()?;
    Ok(TablebookClient::new(&config.base_url))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_status() -> Result<()> {
    let client = client()?;

    print!("Testing connection... ");
    match client.health().await {
        Ok(true) => println!("{}", "OK".green()),
        _ => {
            println!("{}", "Failed".red());
            bail!(
                "Could not connect to Tablebook API. Check the base URL with 'tablebook config'."
            );
        }
    }

    let status = client.status().await?;
    let state = if status.open {
        "open".green().bold()
    } else {
        "closed".red().bold()
    };

    println!("{} Booking system is {}", "•".cyan(), state);
    println!("  Today: {}", status.today);
    println!("  Opens: {}", status.open_date);
    println!("  Storage: {}", status.storage.dimmed());

    Ok(())
}

async fn cmd_layout(slot: Option<String>) -> Result<()> {
    let client = client()?;
    let catalog = client.catalog().await?;

    let slots: Vec<String> = match slot {
        Some(s) => vec![s],
        None => catalog.slots.iter().map(|s| s.key.clone()).collect(),
    };

    for slot in slots {
        let availability = client.availability(&slot).await?;
        print_layout(&availability, catalog.max_tables);
        println!();
    }

    Ok(())
}

fn print_layout(availability: &AvailabilityResponse, max_tables: u8) {
    println!(
        "{} ({} free, {} booked)",
        availability.slot.bold(),
        availability.available.len().to_string().green(),
        availability.booked.len().to_string().red()
    );

    for row in layout_rows(&availability.booked, max_tables, LAYOUT_COLUMNS) {
        let cells: Vec<String> = row
            .into_iter()
            .map(|(table, booked)| {
                let cell = format!("[{:>2}]", table);
                if booked {
                    cell.red().to_string()
                } else {
                    cell.green().to_string()
                }
            })
            .collect();
        println!("  {}", cells.join(" "));
    }
}

/// Tables 1..=max_tables split into rows, each flagged booked or free
fn layout_rows(booked: &[u8], max_tables: u8, columns: usize) -> Vec<Vec<(u8, bool)>> {
    let tables: Vec<(u8, bool)> = (1..=max_tables)
        .map(|t| (t, booked.contains(&t)))
        .collect();
    tables.chunks(columns.max(1)).map(|row| row.to_vec()).collect()
}

async fn cmd_book(group: Option<String>, slot: Option<String>, table: Option<u8>) -> Result<()> {
    let client = client()?;
    let catalog = client.catalog().await?;

    let group = match group {
        Some(g) => g,
        None => select_group(&catalog)?,
    };

    let slot = match slot {
        Some(s) => s,
        None => {
            let labels: Vec<&str> = catalog.slots.iter().map(|s| s.label.as_str()).collect();
            let idx = Select::new()
                .with_prompt("Time slot")
                .items(&labels)
                .default(0)
                .interact()
                .context("Failed to read time slot")?;
            catalog.slots[idx].key.clone()
        }
    };

    let table = match table {
        Some(t) => t,
        None => {
            let availability = client.availability(&slot).await?;
            if availability.available.is_empty() {
                bail!("No tables left for {}", availability.slot);
            }
            let items: Vec<String> = availability
                .available
                .iter()
                .map(|t| format!("Table {}", t))
                .collect();
            let idx = Select::new()
                .with_prompt("Table")
                .items(&items)
                .default(0)
                .interact()
                .context("Failed to read table")?;
            availability.available[idx]
        }
    };

    let booking = client.book(&group, &slot, table).await?;

    println!(
        "{} Booked {} for {}",
        "✓".green(),
        booking.label.cyan(),
        booking.group.bold()
    );

    Ok(())
}

async fn cmd_cancel(group: Option<String>) -> Result<()> {
    let client = client()?;

    let group = match group {
        Some(g) => g,
        None => select_group(&client.catalog().await?)?,
    };

    let bookings = client.bookings(Some(&group)).await?;
    if bookings.is_empty() {
        println!("No bookings to cancel for {}", group.cyan());
        return Ok(());
    }

    let labels: Vec<&str> = bookings.iter().map(|b| b.label.as_str()).collect();
    let idx = Select::new()
        .with_prompt("Booking to cancel")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to read booking")?;
    let booking = &bookings[idx];

    let resp = client
        .cancel(&booking.group, &booking.slot_key, booking.table)
        .await?;

    if resp.cancelled {
        println!("{} Cancelled {} for {}", "✓".green(), booking.label, group.bold());
    } else {
        println!("{} {}", "•".yellow(), resp.message);
    }

    Ok(())
}

async fn cmd_list() -> Result<()> {
    let client = client()?;
    let bookings = client.bookings(None).await?;

    if bookings.is_empty() {
        println!("No bookings yet.");
        return Ok(());
    }

    println!("{}", "Bookings:".bold());
    for booking in &bookings {
        println!(
            "  {:<4} {} {}",
            booking.group.cyan(),
            booking.slot.dimmed(),
            format!("Table {}", booking.table).green()
        );
    }

    let summary = client.summary().await?;
    println!("\n{}", "Per group:".bold());
    for entry in summary {
        println!("  {:<4} {}", entry.group.cyan(), entry.total_bookings);
    }

    Ok(())
}

async fn cmd_export(output: PathBuf) -> Result<()> {
    let bytes = client()?.export().await?;

    fs::write(&output, &bytes).with_context(|| format!("Failed to write {:?}", output))?;

    println!("{} Exported bookings to {:?}", "✓".green(), output);
    Ok(())
}

fn select_group(catalog: &CatalogResponse) -> Result<String> {
    let idx = Select::new()
        .with_prompt(format!(
            "Group (max {} bookings each)",
            catalog.max_booking_per_group
        ))
        .items(&catalog.groups)
        .default(0)
        .max_length(10)
        .interact()
        .context("Failed to read group")?;
    Ok(catalog.groups[idx].clone())
}

fn cmd_config(base_url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(url) = base_url {
        config.set_base_url(&url);
        config.save()?;
        println!("{} Base URL saved to {:?}", "✓".green(), Config::config_path()?);
    }

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_rows_five_columns() {
        let rows = layout_rows(&[3, 20], 20, LAYOUT_COLUMNS);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.len() == 5));
        assert_eq!(rows[0][2], (3, true));
        assert_eq!(rows[0][0], (1, false));
        assert_eq!(rows[3][4], (20, true));
    }

    #[test]
    fn test_layout_rows_partial_last_row() {
        let rows = layout_rows(&[], 7, 5);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec![(6, false), (7, false)]);
    }
}
