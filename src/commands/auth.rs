use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::error::{SpinwheelError, SpinwheelResult};
use crate::formatting::mask_token;
use crate::models::{LoginRequest, RegisterRequest};

const LOGIN_FAILED: &str = "Login failed. Please try again.";
const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// Surfaces the backend's explanation when there is one.
fn auth_failure(error: SpinwheelError, fallback: &str) -> SpinwheelError {
    match error {
        SpinwheelError::Unauthorized(detail) | SpinwheelError::Backend { message: detail, .. } => {
            SpinwheelError::Unauthorized(detail)
        }
        other => super::friendly_error(other, fallback),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> SpinwheelResult<&'a String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| SpinwheelError::Validation(format!("--{} is required", name)))
}

pub async fn handle_login(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    handle_login_impl(matches).await.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}

async fn handle_login_impl(matches: &ArgMatches) -> SpinwheelResult<()> {
    let credentials = LoginRequest {
        username: required(matches, "username")?.clone(),
        password: required(matches, "password")?.clone(),
    };

    let mut context = CliContext::load()?;
    let user = context
        .login(&credentials)
        .await
        .map_err(|e| auth_failure(e, LOGIN_FAILED))?;

    println!("{} {}", "✅".green(), format!("Logged in as: {}", user.username).green().bold());
    Ok(())
}

pub async fn handle_register(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    handle_register_impl(matches).await.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}

async fn handle_register_impl(matches: &ArgMatches) -> SpinwheelResult<()> {
    let registration = RegisterRequest {
        username: required(matches, "username")?.clone(),
        password: required(matches, "password")?.clone(),
        email: matches.get_one::<String>("email").cloned(),
    };

    let mut context = CliContext::load()?;
    let user = context
        .register(&registration)
        .await
        .map_err(|e| auth_failure(e, REGISTRATION_FAILED))?;

    println!("{} {}", "✅".green(), format!("Account created. Logged in as: {}", user.username).green().bold());
    Ok(())
}

pub async fn handle_logout(_matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut context = CliContext::load()?;
    context.logout()?;
    println!("Logged out.");
    Ok(())
}

/// Who is logged in, and what they can do next.
pub async fn handle_status(_matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut context = CliContext::load()?;

    println!("{} {}", "Wheel App".bold(), format!("({})", context.client().http().base_url()).dimmed());
    println!("  spinwheel spin      Spin the wheel");
    println!("  spinwheel teams     Generate random teams");

    if context.check_auth().await {
        let username = context.user().map(|u| u.username.as_str()).unwrap_or("Profile");
        println!("\n{} Logged in as {}", "●".green(), username.bright_cyan().bold());
        if let Some(token) = context.store().access_token() {
            println!("  {}", format!("Session token: {}", mask_token(&token)).dimmed());
        }
        println!("  spinwheel history   View your profile");
        println!("  spinwheel logout    Log out");
    } else {
        println!("\n{} Not logged in", "○".dimmed());
        println!("  spinwheel login -u <USERNAME> -p <PASSWORD>");
        println!("  spinwheel register -u <USERNAME> -p <PASSWORD>");
    }

    Ok(())
}
