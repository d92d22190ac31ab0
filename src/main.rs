use anyhow::Result;
use clap::{Arg, Command};

use forcedel::commands;

fn main() -> Result<()> {
    forcedel::init_logging();

    let matches = Command::new("forcedel")
        .version("0.1.0")
        .about("Resilient directory deletion with lock reaping, mirror force-wipe and reboot-queue fallbacks")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("inspect")
                .about("Dry run: list processes holding open handles under a directory")
                .arg(
                    Arg::new("path")
                        .help("Target directory")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Terminate lockers and delete the directory, escalating through fallback strategies")
                .arg(
                    Arg::new("path")
                        .help("Target directory")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Skip the confirmation prompt")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("reboot-queue")
                .about("Register the directory for deletion at next system startup")
                .arg(
                    Arg::new("path")
                        .help("Target directory")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Skip the confirmation prompt")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("inspect", sub)) => commands::inspect(sub),
        Some(("delete", sub)) => commands::delete(sub),
        Some(("reboot-queue", sub)) => commands::reboot_queue(sub),
        _ => unreachable!("subcommand is required"),
    }
}
