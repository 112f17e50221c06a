use colored::*;

use crate::FileReport;

/// Print one block per file followed by a summary line.
///
/// Returns the number of files that did not validate.
pub fn print_reports(reports: &[FileReport], verbose: bool) -> usize {
    let mut valid_count = 0;
    let mut invalid_count = 0;

    for report in reports {
        match (&report.result, &report.error) {
            (Some(result), _) if result.valid => {
                println!("{} Valid: {}", "✅".green(), report.file.display());
                // The validator sometimes prints warnings next to its success line
                for warning in &result.errors {
                    println!("   {} {}", "⚠".yellow(), warning);
                }
                if verbose {
                    println!("   Output: {}", result.output_file.display());
                }
                valid_count += 1;
            }
            (Some(result), _) => {
                println!("{} Invalid: {}", "❌".red(), report.file.display());
                for (i, issue) in result.errors.iter().enumerate() {
                    println!("   {}. {}", i + 1, issue);
                }
                invalid_count += 1;
            }
            (None, error) => {
                println!(
                    "{} Error processing {}: {}",
                    "❌".red(),
                    report.file.display(),
                    error.as_deref().unwrap_or("unknown error")
                );
                invalid_count += 1;
            }
        }
    }

    println!(
        "\nSummary: {} valid, {} invalid",
        valid_count.to_string().green(),
        invalid_count.to_string().red()
    );

    invalid_count
}
