//! Console rendering of per-project audit results
//!
//! For each environment the renderer prints a fixed-width two-column table:
//! missing variables on the left, unused variables on the right, with a
//! centered `<project> - Environment: <name>` title. Missing variables can
//! optionally carry their usage-site detail lines. Environments in a
//! restricted network zone (name ending `-DMZ`) can be skipped, and output
//! can be paginated page-by-page for long batches.
//!
//! Rendering is presentation only - every number and name comes straight from
//! the [`AnalysisResult`](crate::analysis::AnalysisResult) queries.

use colored::Colorize;
use std::io::BufRead;

use crate::analysis::AnalysisResult;

/// Total table width in characters
const TABLE_WIDTH: usize = 140;

/// Environment-name suffix marking a restricted network zone
const DMZ_SUFFIX: &str = "-DMZ";

/// Presentation switches for the renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Print the usage-site context lines under each missing variable
    pub show_usage: bool,
    /// Wait for Enter between environment pages
    pub paginate: bool,
    /// Skip environments whose name ends in `-DMZ`
    pub ignore_dmz: bool,
}

/// Render one project's reconciliation report to stdout
pub fn render_project(result: &AnalysisResult, project_name: &str, options: ReportOptions) {
    let separator = "-".repeat(TABLE_WIDTH);
    let environments = result.environments();

    for (index, environment) in environments.iter().enumerate() {
        if options.ignore_dmz && environment.name.ends_with(DMZ_SUFFIX) {
            continue;
        }

        println!("{separator}");
        println!(
            "{}",
            center_line(&format!("{project_name} - Environment: {}", environment.name))
                .bold()
        );
        println!("{separator}");
        println!("{}", table_line(&["Missing variables", "Unused variables"], true));
        println!("{separator}");

        let missing = result.missing_for_environment(&environment.id);
        let unused = result.unused_for_environment(&environment.id);

        let rows = missing.len().max(unused.len());
        for i in 0..rows {
            let missing_text = missing.get(i).map_or("", |v| v.name.as_str());
            let unused_text = unused.get(i).copied().unwrap_or("");
            println!("{}", table_line(&[missing_text, unused_text], false));

            if options.show_usage {
                if let Some(variable) = missing.get(i) {
                    println!("{}", table_line(&["  Usage:", ""], false));
                    for context in &variable.contexts {
                        println!("{}", table_line(&[&format!("   - {context}"), ""], false));
                    }
                    println!("{}", table_line(&["", ""], false));
                }
            }
        }

        println!("{separator}");
        println!();

        if options.paginate && index + 1 < environments.len() {
            wait_for_enter();
        }
    }
}

/// Truncate `text` to at most `max` characters, respecting char boundaries
fn fit(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Center `text` within the table width, bordered with `|`
fn center_line(text: &str) -> String {
    let inner = TABLE_WIDTH - 2;
    let text = fit(text, inner);
    let left = (inner - text.chars().count()) / 2;
    let right = inner - text.chars().count() - left;
    format!("|{}{}{}|", " ".repeat(left), text, " ".repeat(right))
}

/// Format one table row, splitting the width evenly across the columns
fn table_line(columns: &[&str], center: bool) -> String {
    let column_width = TABLE_WIDTH / columns.len();
    let inner = column_width - 2;

    columns
        .iter()
        .map(|text| {
            if center {
                let text = fit(text, inner);
                let left = (inner - text.chars().count()) / 2;
                let right = inner - text.chars().count() - left;
                format!("|{}{}{}|", " ".repeat(left), text, " ".repeat(right))
            } else {
                let text = fit(text, inner - 1);
                let padding = inner - text.chars().count() - 1;
                format!("| {}{}|", text, " ".repeat(padding))
            }
        })
        .collect()
}

/// Block until the user presses Enter
fn wait_for_enter() {
    println!("Press enter to display next page...");
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_line_width_and_content() {
        let line = center_line("Billing - Environment: Prod");
        assert_eq!(line.len(), TABLE_WIDTH);
        assert!(line.starts_with('|') && line.ends_with('|'));
        assert!(line.contains("Billing - Environment: Prod"));
    }

    #[test]
    fn test_table_line_two_columns() {
        let line = table_line(&["Missing.Var", "Unused.Var"], false);
        assert_eq!(line.len(), TABLE_WIDTH);
        assert!(line.contains("Missing.Var"));
        assert!(line.contains("Unused.Var"));
        // Column boundary: four border characters in a two-column row
        assert_eq!(line.matches('|').count(), 4);
    }

    #[test]
    fn test_table_line_truncates_overlong_text() {
        let long = "x".repeat(TABLE_WIDTH);
        let line = table_line(&[long.as_str(), ""], false);
        assert_eq!(line.len(), TABLE_WIDTH);
    }

    #[test]
    fn test_centered_header_row() {
        let line = table_line(&["Missing variables", "Unused variables"], true);
        assert_eq!(line.len(), TABLE_WIDTH);
        assert!(line.contains("Missing variables"));
    }
}
