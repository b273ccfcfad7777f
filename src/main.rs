use std::process;

use clap::{Arg, ArgAction, Command};

use spinwheel_cli::commands::{auth, config, history, teams, wheel, whoami};
use spinwheel_cli::logging::{init_logging, log_error, log_panic_info};

fn build_cli() -> Command {
    Command::new("spinwheel")
        .about("Spinwheel CLI - Spin the wheel and generate random teams")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("login")
                .about("Log in and store a session")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .short('u')
                        .value_name("USERNAME")
                        .help("Account username")
                        .required(true)
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .short('p')
                        .value_name("PASSWORD")
                        .help("Account password")
                        .required(true)
                )
        )
        .subcommand(
            Command::new("register")
                .about("Create an account and log in")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .short('u')
                        .value_name("USERNAME")
                        .help("Account username")
                        .required(true)
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .short('p')
                        .value_name("PASSWORD")
                        .help("Account password")
                        .required(true)
                )
                .arg(
                    Arg::new("email")
                        .long("email")
                        .short('e')
                        .value_name("EMAIL")
                        .help("Email address")
                )
        )
        .subcommand(
            Command::new("logout")
                .about("Forget the stored session")
        )
        .subcommand(
            Command::new("status")
                .about("Show login state and available commands")
        )
        .subcommand(
            Command::new("whoami")
                .about("Show current user information")
        )
        .subcommand(
            Command::new("spin")
                .about("Spin the wheel for a random number")
                .arg(
                    Arg::new("no-delay")
                        .long("no-delay")
                        .help("Reveal the result immediately")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("teams")
                .about("Split players into random teams")
                .arg(
                    Arg::new("players")
                        .long("players")
                        .value_name("NAMES")
                        .help("Player names, comma-separated (repeatable)")
                        .action(ArgAction::Append)
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('f')
                        .value_name("FILE")
                        .help("Read players from a file, one per line ('-' for stdin)")
                )
                .arg(
                    Arg::new("num-teams")
                        .long("num-teams")
                        .short('n')
                        .value_name("COUNT")
                        .help("Number of teams")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("2")
                )
        )
        .subcommand(
            Command::new("history")
                .about("Show your profile and activity history")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format")
                        .value_parser(["simple", "json"])
                        .default_value("simple")
                )
        )
        .subcommand(
            Command::new("config")
                .about("View or change CLI settings")
                .arg(
                    Arg::new("api-url")
                        .long("api-url")
                        .value_name("URL")
                        .help("Backend API base URL")
                )
                .arg(
                    Arg::new("reveal-delay")
                        .long("reveal-delay")
                        .value_name("MS")
                        .help("Pause before revealing a spin result, in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show current settings")
                        .action(ArgAction::SetTrue)
                )
        )
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Warning: could not initialize logging: {}", e);
    }
    std::panic::set_hook(Box::new(|info| {
        log_panic_info(info);
        eprintln!("{}", info);
    }));

    let matches = build_cli().get_matches();

    let result = match matches.subcommand() {
        Some(("login", sub_matches)) => auth::handle_login(sub_matches).await,
        Some(("register", sub_matches)) => auth::handle_register(sub_matches).await,
        Some(("logout", sub_matches)) => auth::handle_logout(sub_matches).await,
        Some(("status", sub_matches)) => auth::handle_status(sub_matches).await,
        Some(("whoami", sub_matches)) => whoami::handle_whoami(sub_matches).await,
        Some(("spin", sub_matches)) => wheel::handle_spin(sub_matches).await,
        Some(("teams", sub_matches)) => teams::handle_teams(sub_matches).await,
        Some(("history", sub_matches)) => history::handle_history(sub_matches).await,
        Some(("config", sub_matches)) => config::handle_config(sub_matches).await,
        _ => {
            eprintln!("Unknown command. Use 'spinwheel --help' for available commands.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        log_error(&e.to_string());
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
