use clap::ArgMatches;
use colored::*;
use tokio::time::{sleep, Duration};

use crate::cli_context::CliContext;
use crate::error::SpinwheelResult;
use crate::models::{Activity, SpinResult};
use super::{friendly_error, record_activity};

const SPIN_FAILED: &str = "Failed to spin the wheel. Please try again.";

pub async fn handle_spin(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    handle_spin_impl(matches).await.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}

async fn handle_spin_impl(matches: &ArgMatches) -> SpinwheelResult<()> {
    let mut context = CliContext::load()?;
    let delay_ms = if matches.get_flag("no-delay") { 0 } else { context.config().reveal_delay_ms() };
    spin_wheel(&mut context, delay_ms).await?;
    Ok(())
}

/// Spins, reveals the result after `delay_ms`, and saves it to the history
/// of a logged-in user.
pub async fn spin_wheel(context: &mut CliContext, delay_ms: u64) -> SpinwheelResult<SpinResult> {
    let authenticated = context.check_auth().await;
    let client = context.client();

    println!("{}", "Spinning...".bright_blue());
    let spin = client.spin().await.map_err(|e| friendly_error(e, SPIN_FAILED))?;

    // Cosmetic pause before the reveal
    if delay_ms > 0 {
        sleep(Duration::from_millis(delay_ms)).await;
    }

    println!("{} {}", "Result:".bold(), spin.result.to_string().bright_blue().bold());

    if authenticated {
        record_activity(&client, Activity::WheelSpin { result: spin.result }).await;
    }

    Ok(spin)
}
