pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

pub const BASE_URL_ENV: &str = "PARKING_API_URL";
pub const VERBOSE_ENV: &str = "PARKING_VERBOSE";
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

pub fn default_log_filter(verbose: bool) -> String {
    if verbose {
        "parkctl=debug".to_string()
    } else {
        "parkctl=warn".to_string()
    }
}

pub fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

pub const EXAMPLE_CONFIG: &str = r#"# parkctl configuration
api:
  # Backend base URL; ${VAR} references are expanded from the environment.
  base_url: "http://localhost:3001/api"

logging:
  verbose: false
  # filter: "parkctl=info"
"#;
