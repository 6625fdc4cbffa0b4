use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "park")]
#[command(about = "Operator console for the parking lot backend", long_about = None)]
pub struct Args {
    #[arg(
        long = "api-url",
        global = true,
        help = "Backend base URL (e.g., http://localhost:3001/api)"
    )]
    pub api_url: Option<String>,

    #[arg(short = 'v', long = "verbose", global = true, help = "Show diagnostic logs")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Record a vehicle entering the lot
    Entry {
        #[arg(long, help = "License plate (uppercased before sending)")]
        plate: String,
        #[arg(long, help = "Card id handed to the driver")]
        card: String,
        #[arg(long, help = "Entry image URL")]
        image: Option<String>,
    },

    /// Check a vehicle at the exit and close its session on confirmation
    Exit {
        #[arg(long, help = "Card id presented at the exit")]
        card: String,
        #[arg(long, help = "License plate read at the exit")]
        plate: String,
        #[arg(long, help = "Exit image URL")]
        image: Option<String>,
        #[arg(short = 'y', long = "yes", help = "Confirm without prompting")]
        yes: bool,
    },

    /// List vehicles currently in the lot
    Current,

    /// Show a single parking log
    Show {
        id: String,
    },

    /// List parking logs with optional filters
    List {
        #[arg(long)]
        card: Option<String>,
        #[arg(long)]
        plate: Option<String>,
        #[arg(long, help = "Start date (ISO-8601)")]
        from: Option<String>,
        #[arg(long, help = "End date (ISO-8601)")]
        to: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, conflicts_with_all = ["from", "to"], help = "Only today's logs")]
        today: bool,
    },

    /// Search logs by license plate or card id
    Search {
        term: String,
    },

    /// Show occupancy statistics
    Stats {
        #[arg(long, help = "Start date (ISO-8601)")]
        from: Option<String>,
        #[arg(long, help = "End date (ISO-8601)")]
        to: Option<String>,
    },

    /// Update fields of a parking log
    Update {
        id: String,
        #[arg(long)]
        plate: Option<String>,
        #[arg(long)]
        card: Option<String>,
        #[arg(long = "entry-image")]
        entry_image: Option<String>,
        #[arg(long = "exit-image")]
        exit_image: Option<String>,
    },

    /// Delete a parking log outright
    Delete {
        id: String,
    },

    /// Write an example config file to ~/.config/parkctl/parkctl.yaml
    ConfigInit,
}
