use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use crate::core::ForceDeleteEngine;
use crate::platform::{is_elevated, is_privilege_error, RebootOutcome};

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let raw = matches.get_one::<String>("path").expect("path is required");
    let assume_yes = matches.get_flag("yes");
    let target = super::absolute_target(raw)?;

    if !assume_yes {
        print!(
            "{}",
            format!("Queue '{}' for deletion on reboot? (y/n): ", target.display())
                .white()
                .bold()
        );
        std::io::stdout().flush().ok();

        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        let response = input.trim().to_lowercase();
        if response != "y" && response != "yes" {
            println!("{}", "Operation cancelled by user.".yellow());
            return Ok(());
        }
    }

    let engine = ForceDeleteEngine::new();
    match engine.queue_for_reboot(&target)? {
        RebootOutcome::Queued { .. } => {
            println!(
                "{}",
                format!(
                    "SUCCESS: '{}' queued for deletion on next reboot.",
                    target.display()
                )
                .green()
                .bold()
            );
        }
        RebootOutcome::QueueFailed { code } => {
            println!(
                "{}",
                format!("FAILURE: registration rejected (error code {}).", code)
                    .red()
                    .bold()
            );
            if is_privilege_error(code) && !is_elevated() {
                println!(
                    "{}",
                    "Try re-running with administrator/root privileges.".yellow()
                );
            }
        }
    }

    Ok(())
}
