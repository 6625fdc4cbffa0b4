use std::env;

use regex::Regex;

/// Expand environment variables in a string using ${VAR_NAME} syntax.
/// Unknown variables are left as written.
pub fn expand_env_var_in_string(value: &str) -> String {
    let re = match Regex::new(r"\$\{([^}]+)\}") {
        Ok(re) => re,
        Err(_) => return value.to_string(),
    };

    let mut result = value.to_string();
    for cap in re.captures_iter(value) {
        let var_name = &cap[1];
        let replacement = env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name));
        result = result.replace(&cap[0], &replacement);
    }

    result
}

/// Trim whitespace and trailing slashes so paths can be appended directly.
pub fn normalize_base_url(url: &str) -> Result<String, String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("API base URL is empty".to_string());
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(format!(
            "API base URL must start with http:// or https://: {}",
            trimmed
        ));
    }
    Ok(trimmed.to_string())
}
