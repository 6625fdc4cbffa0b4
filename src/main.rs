use clap::Parser;
use std::process;

use parkctl::cli::Args;
use parkctl::config::Config;
use parkctl::orchestrator::{self, OrchestratorContext};
use parkctl::ui::display_error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            display_error(&e);
            process::exit(1);
        }
    };

    parkctl::logging::init(&config.log_filter);

    let context = match OrchestratorContext::new(config) {
        Ok(context) => context,
        Err(e) => {
            display_error(&e.to_string());
            process::exit(1);
        }
    };

    if let Err(e) = orchestrator::run(context, args.command).await {
        display_error(&e.to_string());
        process::exit(1);
    }
}
