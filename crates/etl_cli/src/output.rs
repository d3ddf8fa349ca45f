use colored::*;
use etl_core::ValidationResult;
use etl_stages::StageReport;
use etl_store::BucketStatus;

pub fn print_stage_report(report: &StageReport) {
    print_success(&format!("Stage '{}' completed", report.stage));

    if let Some(input) = &report.input {
        println!("  Input:     {}", input.display());
    }
    if let Some(artifact) = &report.artifact {
        println!("  Artifact:  {}", artifact.display());
    }
    if let Some(source_id) = &report.source_id {
        println!("  Source id: {}", source_id);
    }
    if let Some(rows) = report.rows {
        println!("  Rows:      {}", rows);
    }
    match report.bucket {
        Some(BucketStatus::Created) => println!("  Bucket:    created"),
        Some(BucketStatus::Existing) => println!("  Bucket:    already existed"),
        None => {}
    }
    if let Some(key) = &report.published {
        println!("  Published: {}", key);
    }
}

pub fn print_validation_result(result: &ValidationResult) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if result.success {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    let failures: Vec<_> = result.failures().collect();
    if !failures.is_empty() {
        println!("\n{}", "Failed expectations:".red().bold());
        for (i, failure) in failures.iter().enumerate() {
            println!(
                "  {}. {} (observed: {})",
                i + 1,
                failure.expectation.to_string().red(),
                failure.observed
            );
        }
    }

    let stats = &result.statistics;
    println!("\n{}", "Summary:".bold());
    println!("  Suite:      {}", result.suite);
    println!("  Evaluated:  {}", stats.evaluated);
    println!("  Successful: {}", stats.successful);
    println!("  Failed:     {}", stats.unsuccessful);
    if let Some(percent) = stats.success_percent {
        println!("  Success:    {:.1}%", percent);
    }
    println!("{}", "═".repeat(60));
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
