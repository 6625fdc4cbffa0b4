use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{Local, Utc};
use colored::*;

use crate::api::ParkingLogClient;
use crate::cli::Command;
use crate::config::{Config, FileConfig};
use crate::error::{ParkError, Result};
use crate::models::{LogFilter, LogPage, ParkingSession, SessionUpdate};
use crate::ui::format::format_time;
use crate::ui::{
    display_error, display_exit_outcome, display_notice, display_page, display_receipt,
    display_session, display_statistics,
};
use crate::workflow::{EntryForm, EntryWorkflow, ExitForm, ExitWorkflow, Refresh};

pub struct OrchestratorContext {
    pub config: Config,
    pub client: ParkingLogClient,
}

impl OrchestratorContext {
    pub fn new(config: Config) -> Result<Self> {
        let client = ParkingLogClient::new(&config.base_url)?;
        Ok(Self { config, client })
    }
}

/// Refresh hook that reloads and prints the vehicles still in the lot.
struct CurrentParkingRefresh<'a> {
    client: &'a ParkingLogClient,
    latest: Mutex<Option<LogPage>>,
}

impl<'a> CurrentParkingRefresh<'a> {
    fn new(client: &'a ParkingLogClient) -> Self {
        Self {
            client,
            latest: Mutex::new(None),
        }
    }

    /// Newest session from the last successful refresh.
    fn newest(&self) -> Option<ParkingSession> {
        self.latest
            .lock()
            .ok()
            .and_then(|page| page.as_ref().and_then(|p| p.parking_logs.first().cloned()))
    }
}

#[async_trait]
impl Refresh for CurrentParkingRefresh<'_> {
    async fn refresh(&self) {
        match self.client.list_current().await {
            Ok(page) => {
                println!();
                display_page("Vehicles in the lot", &page);
                if let Ok(mut latest) = self.latest.lock() {
                    *latest = Some(page);
                }
            }
            Err(e) => tracing::warn!(error = %e, "Refresh of current parking failed"),
        }
    }
}

pub async fn run(context: OrchestratorContext, command: Command) -> Result<()> {
    let client = &context.client;
    tracing::debug!(base_url = %context.config.base_url, "Using parking backend");

    match command {
        Command::Entry { plate, card, image } => {
            record_entry(client, plate, card, image.unwrap_or_default()).await
        }
        Command::Exit {
            card,
            plate,
            image,
            yes,
        } => process_exit(client, card, plate, image.unwrap_or_default(), yes).await,
        Command::Current => {
            let page = client.list_current().await?;
            display_page("Vehicles in the lot", &page);
            Ok(())
        }
        Command::Show { id } => show_session(client, &id).await,
        Command::List {
            card,
            plate,
            from,
            to,
            page,
            limit,
            today,
        } => {
            let mut filter = if today {
                LogFilter::today(Local::now())
            } else {
                LogFilter::date_range(from, to)
            };
            filter.card_id = card;
            filter.license_plate = plate;
            filter.page = page;
            filter.limit = limit;

            let result = client.list(&filter).await?;
            display_page("Parking logs", &result);
            Ok(())
        }
        Command::Search { term } => {
            let result = client.search(&term).await?;
            display_page(&format!("Results for \"{}\"", term), &result);
            Ok(())
        }
        Command::Stats { from, to } => {
            let stats = client.statistics(from, to).await?;
            display_statistics(&stats);
            Ok(())
        }
        Command::Update {
            id,
            plate,
            card,
            entry_image,
            exit_image,
        } => {
            let update = SessionUpdate {
                license_plate: plate.map(|p| p.to_uppercase()),
                card_id: card,
                entry_image,
                exit_image,
                ..Default::default()
            };
            if update.is_empty() {
                return Err(ParkError::Validation(
                    "Nothing to update; pass at least one field".to_string(),
                ));
            }
            let updated = client.update(&id, &update).await?;
            display_session(&updated);
            Ok(())
        }
        Command::Delete { id } => {
            let receipt = client.remove(&id).await?;
            display_receipt(&receipt);
            Ok(())
        }
        Command::ConfigInit => {
            let dir = FileConfig::user_config_dir()
                .ok_or_else(|| ParkError::ConfigError("Cannot locate home directory".into()))?;
            let path = dir.join("parkctl.yaml");
            if FileConfig::write_example(&path)? {
                display_notice(&format!("Wrote {}", path.display()));
            } else {
                println!(
                    "{}",
                    format!("{} already exists, leaving it alone", path.display()).yellow()
                );
            }
            Ok(())
        }
    }
}

async fn record_entry(
    client: &ParkingLogClient,
    plate: String,
    card: String,
    image: String,
) -> Result<()> {
    let refresh = CurrentParkingRefresh::new(client);
    let mut lane = EntryWorkflow::new();
    lane.toggle_form();
    *lane.form_mut() = EntryForm::new(plate, card, image);

    let now = Instant::now();
    if let Err(e) = lane.submit(client, &refresh, now).await {
        return Err(as_shown(e, lane.error()));
    }

    let newest = refresh.newest();
    lane.observe_latest(newest.as_ref());

    println!();
    if let Some(notice) = lane.visible_notice(now) {
        display_notice(notice);
    }
    if let Some(session) = lane.displayed(newest.as_ref()) {
        display_session(session);
    }
    Ok(())
}

async fn show_session(client: &ParkingLogClient, id: &str) -> Result<()> {
    let listed = client
        .list_current()
        .await
        .ok()
        .and_then(|page| page.parking_logs.into_iter().find(|log| log.id == id));

    let mut lane = EntryWorkflow::new();
    match listed {
        // Start from the listed copy; the workflow refreshes it by id.
        Some(entry) => lane.select(client, entry).await,
        None => {
            let fresh = client.get_by_id(id).await?;
            lane.observe_latest(Some(&fresh));
        }
    }

    if let Some(session) = lane.selected() {
        display_session(session);
    }
    Ok(())
}

async fn process_exit(
    client: &ParkingLogClient,
    card: String,
    plate: String,
    image: String,
    assume_yes: bool,
) -> Result<()> {
    let refresh = CurrentParkingRefresh::new(client);
    let mut lane = ExitWorkflow::new();
    *lane.form_mut() = ExitForm::new(card, plate, image);

    let outcome = match lane.submit(client, Utc::now()).await {
        Ok(outcome) => outcome,
        Err(e) => return Err(as_shown(e, lane.error())),
    };

    display_exit_outcome(
        &outcome,
        &format_time(lane.exit_time()),
        &lane.duration_text(),
    );

    let question = if lane.can_confirm() {
        "Confirm exit?"
    } else if lane.can_force_exit() {
        "Force exit despite plate mismatch?"
    } else {
        return Ok(());
    };

    if !assume_yes && !prompt_yes_no(question)? {
        println!("{}", "Exit not confirmed; session left open.".dimmed());
        return Ok(());
    }

    loop {
        let attempt = if lane.can_confirm() {
            lane.confirm(client, &refresh, Instant::now()).await
        } else {
            lane.force_exit(client, &refresh, Instant::now()).await
        };

        match attempt {
            Ok(receipt) => {
                println!();
                display_receipt(&receipt);
                return Ok(());
            }
            Err(e) => {
                if assume_yes {
                    return Err(as_shown(e, lane.error()));
                }
                display_error(lane.error().unwrap_or("Failed to confirm exit"));
                if !prompt_yes_no("Retry confirmation?")? {
                    return Err(e);
                }
            }
        }
    }
}

/// Replace a workflow failure with the message the workflow chose to show.
fn as_shown(err: ParkError, shown: Option<&str>) -> ParkError {
    tracing::debug!(error = ?err, "Workflow step failed");
    match shown {
        Some(message) => ParkError::Other(message.to_string()),
        None => err,
    }
}

fn prompt_yes_no(question: &str) -> Result<bool> {
    print!("{} {} ", question.bold(), "[y/N]".dimmed());
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
