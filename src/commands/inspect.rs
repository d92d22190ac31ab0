use anyhow::Result;
use colored::Colorize;

use crate::core::ForceDeleteEngine;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let raw = matches.get_one::<String>("path").expect("path is required");
    let target = super::absolute_target(raw)?;

    println!(
        "{}",
        format!("Scanning {} for open handles...", target.display()).cyan()
    );

    let engine = ForceDeleteEngine::new();
    let records = engine.inspect(&target)?;

    if records.is_empty() {
        println!("{}", "No active locks detected.".green());
        return Ok(());
    }

    for record in &records {
        println!(
            " {} {} (PID: {}) -> {}",
            "[LOCK]".red().bold(),
            record.name,
            record.pid,
            record.matched_path.display()
        );
    }
    println!();
    println!(
        "{}",
        format!("{} process(es) hold handles under the target.", records.len()).yellow()
    );

    Ok(())
}
