use clap::ArgMatches;
use crate::cli_context::CliContext;
use crate::error::SpinwheelError;

pub async fn handle_whoami(_matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let context = CliContext::load()?;
    if context.store().access_token().is_none() {
        return Err(SpinwheelError::NotAuthenticated.into());
    }

    let user = context.client().verify().await?;
    match &user.email {
        Some(email) => println!("Logged in as: {} ({})", user.username, email),
        None => println!("Logged in as: {}", user.username),
    }
    println!("User ID: {}", user.id);

    Ok(())
}
