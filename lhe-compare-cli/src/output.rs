//! End-of-run summary rendering.

use console::style;
use lhe_compare_core::{RunSummary, StageStatus};
use std::fmt::Display;

/// Print a section heading with clear separation
pub fn print_section(text: &str) {
    println!();
    println!("{}", style(format!(" {} ", text)).bold());
    println!("{}", style("-".repeat(40)).blue());
}

/// Print a label/value line with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("  {:<18} {}", style(format!("{}:", label)).cyan(), value);
}

/// Human readable summary of a finished run.
pub fn print_summary(summary: &RunSummary) {
    print_section("SUMMARY");

    print_info("Identifier", &summary.identifier);
    match summary.dimensions {
        Some(dims) => print_info("Dimensions", dims),
        None => print_info("Dimensions", style("unknown").dim()),
    }
    if let Some(dump) = &summary.original_dump {
        print_info("Frames", dump.frames);
    }

    if let Some(report) = &summary.report {
        if let Some(y) = report.psnr_y {
            print_info("PSNR(Y)", format!("{:.4} dB", y));
        }
        if let Some(planes) = report.planes {
            print_info(
                "PSNR(Y,U,V)",
                format!("{:.4} / {:.4} / {:.4} dB", planes.y, planes.u, planes.v),
            );
        }
    }
    print_info("Elapsed", format!("{:.1}s", summary.elapsed.as_secs_f64()));

    println!();
    for result in &summary.stages {
        match &result.status {
            StageStatus::Succeeded => {
                println!("  {} {}", style("✓").green(), result.stage);
            }
            StageStatus::Failed(message) => {
                println!("  {} {}: {}", style("✗").red().bold(), result.stage, message);
            }
        }
    }

    if summary.succeeded() {
        println!("\n  {}", style("All stages completed").green().bold());
    } else {
        let failed = summary.failures().count();
        println!(
            "\n  {}",
            style(format!("{} stage(s) failed", failed)).red().bold()
        );
    }
}

/// Summary as a single JSON line, closing the `--json` event stream.
pub fn print_json_summary(summary: &RunSummary) {
    match serde_json::to_value(summary) {
        Ok(mut value) => {
            if let Some(map) = value.as_object_mut() {
                map.insert("type".to_string(), serde_json::json!("summary"));
                map.insert("succeeded".to_string(), serde_json::json!(summary.succeeded()));
            }
            println!("{}", value);
        }
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}
