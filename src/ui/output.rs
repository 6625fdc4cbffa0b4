use colored::*;

use crate::models::{ExitOutcome, ExitVerdict, LogPage, ParkingSession, RemovalReceipt, Statistics};
use crate::ui::format::{format_average, format_date, format_time, NOT_AVAILABLE};

fn or_na(value: Option<&str>) -> &str {
    value.filter(|s| !s.is_empty()).unwrap_or(NOT_AVAILABLE)
}

/// Display one session as a detail block
pub fn display_session(session: &ParkingSession) {
    let status = if session.is_open() {
        "Parked".green()
    } else {
        "Exited".dimmed()
    };

    println!("{} {}", "Plate:".bold(), session.license_plate.cyan().bold());
    println!("  {:<12}{}", "Card:", session.card_id);
    println!("  {:<12}{}", "Id:", session.id.dimmed());
    println!(
        "  {:<12}{} {}",
        "Entered:",
        format_date(session.entry_time),
        format_time(session.entry_time)
    );
    if !session.is_open() {
        println!(
            "  {:<12}{} {}",
            "Exited:",
            format_date(session.exit_time),
            format_time(session.exit_time)
        );
    }
    if let Some(duration) = &session.parking_duration {
        println!("  {:<12}{}", "Duration:", duration.formatted);
    }
    println!("  {:<12}{}", "Entry image:", or_na(session.entry_image.as_deref()));
    if session.exit_image.is_some() {
        println!("  {:<12}{}", "Exit image:", or_na(session.exit_image.as_deref()));
    }
    println!("  {:<12}{}", "Status:", status);
}

/// Display a page of sessions as a table, newest first as the backend sends them
pub fn display_page(title: &str, page: &LogPage) {
    println!(
        "{}",
        format!("{} ({})", title, page.parking_logs.len()).bold()
    );

    if page.parking_logs.is_empty() {
        println!("{}", "  No vehicles".dimmed());
        return;
    }

    for (index, log) in page.parking_logs.iter().enumerate() {
        let marker = if index == 0 { "new".yellow() } else { "   ".normal() };
        println!(
            "  {} {:<14} {:<12} {} {}  {}",
            marker,
            log.license_plate.cyan(),
            log.card_id,
            format_date(log.entry_time),
            format_time(log.entry_time),
            log.id.dimmed()
        );
    }

    if let Some(pagination) = &page.pagination {
        if let (Some(page_no), Some(pages)) = (pagination.page, pagination.pages) {
            println!("{}", format!("  page {} of {}", page_no, pages).dimmed());
        }
    }
}

/// Display an exit check result, including the plate comparison on mismatch
pub fn display_exit_outcome(outcome: &ExitOutcome, exit_time: &str, duration: &str) {
    match outcome.verdict {
        ExitVerdict::Matched => {
            println!("{}", "Exit check passed".green().bold());
            if let Some(session) = &outcome.session {
                println!("  {:<12}{}", "Plate:", session.license_plate.cyan());
                println!("  {:<12}{}", "Card:", session.card_id);
                println!("  {:<12}{}", "Entered:", format_time(session.entry_time));
                println!("  {:<12}{}", "Exit:", exit_time);
                println!("  {:<12}{}", "Duration:", duration);
                println!(
                    "  {:<12}{}  |  {}",
                    "Images:",
                    or_na(session.entry_image.as_deref()),
                    or_na(outcome.exit_image.as_deref())
                );
            }
            println!("{}", outcome.message.dimmed());
        }
        ExitVerdict::Mismatched => {
            println!("{}", "License plate mismatch!".red().bold());
            if let Some((entry, exit)) = outcome.plate_details() {
                println!("  {:<12}{}", "Entry:", entry.green());
                println!("  {:<12}{}", "Exit:", exit.red());
            }
            let entry_image = outcome
                .session
                .as_ref()
                .and_then(|s| s.entry_image.as_deref());
            println!(
                "  {:<12}{}  |  {}",
                "Images:",
                or_na(entry_image),
                or_na(outcome.exit_image.as_deref())
            );
            println!("  {:<12}{}", "Exit time:", exit_time);
            println!("{}", outcome.message.dimmed());
        }
        ExitVerdict::NotFound => {
            println!("{}", "Vehicle not found!".red().bold());
            println!("{}", outcome.message.dimmed());
        }
    }
}

pub fn display_receipt(receipt: &RemovalReceipt) {
    println!("{}", "Exit confirmed".green().bold());
    if let Some(message) = &receipt.message {
        println!("{}", message.dimmed());
    }
    if let Some(duration) = &receipt.parking_duration {
        println!("  {:<12}{}", "Duration:", duration.formatted);
    }
}

pub fn display_statistics(stats: &Statistics) {
    println!("{}", "Parking statistics".bold());
    println!("  {:<18}{}", "Sessions:", stats.total);
    println!("  {:<18}{}", "Unique vehicles:", stats.unique_vehicles);
    println!("  {:<18}{}", "Unique cards:", stats.unique_cards);
    println!(
        "  {:<18}{}",
        "Avg. time parked:",
        format_average(stats.average_parking_duration)
    );
}

pub fn display_notice(text: &str) {
    println!("{}", text.green());
}

pub fn display_error(text: &str) {
    eprintln!("{} {}", "Error:".red(), text);
}
