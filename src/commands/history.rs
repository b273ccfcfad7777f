use clap::ArgMatches;

use crate::cli_context::CliContext;
use crate::error::SpinwheelResult;
use crate::formatting::{print_history, print_profile_header};
use super::friendly_error;

const HISTORY_FAILED: &str = "Failed to load history. Please try again later.";

pub async fn handle_history(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    handle_history_impl(matches).await.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}

async fn handle_history_impl(matches: &ArgMatches) -> SpinwheelResult<()> {
    let format = matches.get_one::<String>("format").map(|s| s.as_str()).unwrap_or("simple");

    let mut context = CliContext::load()?;
    context.check_auth().await;
    let user = context.require_user()?.clone();

    let entries = context
        .client()
        .get_history()
        .await
        .map_err(|e| friendly_error(e, HISTORY_FAILED))?;

    if format != "json" {
        print_profile_header(&user);
    }
    print_history(&entries, format);

    Ok(())
}
