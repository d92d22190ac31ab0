use std::io::Write;
use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::core::{DeletionOutcome, ForceDeleteEngine};

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let raw = matches.get_one::<String>("path").expect("path is required");
    let assume_yes = matches.get_flag("yes");
    let target = super::absolute_target(raw)?;

    if is_critical_root(&target) {
        println!(
            "{}",
            format!("Refusing to delete critical system path: {}", target.display())
                .red()
                .bold()
        );
        return Ok(());
    }

    if !target.exists() {
        println!(
            "{}",
            format!("Target {} does not exist; nothing to do.", target.display()).green()
        );
        return Ok(());
    }

    if !assume_yes {
        print!(
            "{}",
            format!(
                "Confirm deletion of '{}'.\nType 'DELETE' to confirm: ",
                target.display()
            )
            .white()
            .bold()
        );
        std::io::stdout().flush().ok();

        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        if input.trim() != "DELETE" {
            println!("{}", "Operation cancelled by user.".yellow());
            return Ok(());
        }
    }

    let engine = ForceDeleteEngine::new();
    match engine.execute(&target)? {
        DeletionOutcome::Succeeded { strategy } => {
            println!(
                "{}",
                format!("SUCCESS: directory eliminated via {}.", strategy)
                    .green()
                    .bold()
            );
        }
        DeletionOutcome::Exhausted { reasons } => {
            println!("{}", "FAILURE: all deletion strategies exhausted.".red().bold());
            for (strategy, reason) in &reasons {
                println!("  {} {}: {}", "-".dimmed(), strategy, reason);
            }
            println!();
            println!(
                "{}",
                format!(
                    "Consider queueing for deletion on reboot: forcedel reboot-queue \"{}\"",
                    target.display()
                )
                .yellow()
            );
        }
    }

    Ok(())
}

/// Roots that must never be handed to the engine, no matter what the user
/// typed.
fn is_critical_root(target: &Path) -> bool {
    #[cfg(windows)]
    let roots: &[&str] = &[
        "C:\\",
        "C:\\Windows",
        "C:\\Windows\\System32",
        "C:\\Program Files",
        "C:\\Program Files (x86)",
        "C:\\ProgramData",
        "C:\\Users",
    ];

    #[cfg(not(windows))]
    let roots: &[&str] = &[
        "/", "/bin", "/sbin", "/usr", "/etc", "/var", "/home", "/boot", "/dev", "/proc", "/sys",
    ];

    roots
        .iter()
        .any(|root| target == Path::new(root))
}
