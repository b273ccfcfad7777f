use clap::ArgMatches;
use crate::config::{config_path, load_config, save_config};
use crate::logging::get_log_file_path;

pub async fn handle_config(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config();
    let mut changed = false;

    if let Some(api_url) = matches.get_one::<String>("api-url") {
        config.api_url = Some(api_url.trim_end_matches('/').to_string());
        changed = true;
    }
    if let Some(delay) = matches.get_one::<u64>("reveal-delay") {
        config.reveal_delay_ms = Some(*delay);
        changed = true;
    }

    if changed {
        save_config(&config)?;
        println!("Configuration saved to {}", config_path()?.display());
    }

    if matches.get_flag("show") || !changed {
        println!("API URL: {}", config.api_url());
        println!("Reveal delay: {}ms", config.reveal_delay_ms());
        if let Some(log_file) = get_log_file_path() {
            println!("Log file: {}", log_file.display());
        }
    }

    Ok(())
}
