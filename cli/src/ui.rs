// Terminal UI utilities

use colored::Colorize;
use std::time::Duration;

use crate::domain::RunResult;
use crate::services::GroupPlan;

pub fn print_header(title: &str) {
    println!();
    println!(
        "{}",
        "╔════════════════════════════════════════════════════════════╗".bright_blue()
    );
    println!("{}", format!("║  {:<58}║", title).bright_blue());
    println!(
        "{}",
        "╚════════════════════════════════════════════════════════════╝".bright_blue()
    );
    println!();
}

pub fn print_success(message: &str) {
    println!("{}", format!("✅ {}", message).bright_green().bold());
}

pub fn print_error(message: &str) {
    eprintln!("{}", format!("❌ {}", message).bright_red().bold());
}

pub fn print_info(message: &str) {
    println!("{}", format!("ℹ️  {}", message).bright_cyan());
}

pub fn print_warning(message: &str) {
    println!("{}", format!("⚠️  {}", message).bright_yellow());
}

/// List every pair a run would copy, grouped by registry
pub fn print_plan(plans: &[GroupPlan]) {
    for plan in plans {
        println!("{}", format!("{} ({} images)", plan.name, plan.pairs.len()).bold());
        for pair in &plan.pairs {
            println!("  {} {} {}", pair.source, "->".dimmed(), pair.target);
        }
    }
}

/// End-of-run summary listing every failed pair with its reason
pub fn print_summary(result: &RunResult, elapsed: Duration) {
    println!();
    println!("{}", "Summary".bold());
    println!("  Total:     {}", result.total);
    println!("  Succeeded: {}", result.succeeded.to_string().green());
    println!("  Failed:    {}", result.failed.len().to_string().red());
    if result.not_attempted > 0 {
        println!(
            "  Skipped:   {}",
            result.not_attempted.to_string().yellow()
        );
    }
    println!(
        "  Duration:  {}",
        humantime::format_duration(Duration::from_secs(elapsed.as_secs()))
    );

    if !result.failed.is_empty() {
        println!();
        println!("{}", "Failed images:".red().bold());
        for failure in &result.failed {
            println!(
                "  [{}] {} ({} failed: {})",
                failure.group, failure.pair, failure.step, failure.reason
            );
        }
    }
    println!();

    if result.is_success() {
        print_success(&format!("Copied {} image(s)", result.succeeded));
    } else if result.failed.is_empty() {
        print_warning("Run interrupted before all images were copied");
    } else {
        print_error(&format!(
            "{} of {} image(s) failed; re-run with the same options to retry",
            result.failed.len(),
            result.total
        ));
    }
}
