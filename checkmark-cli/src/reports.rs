use anyhow::Result;
use checkmark_core::{CategoryReport, ProgressSummary, ReconciledItem};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use crate::util::{fingerprint_hex, generated_at};

/// Which item lines to include under each category.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingOptions {
    pub verbose: bool,
    pub missing_only: bool,
}

impl ListingOptions {
    const fn lists_items(self) -> bool {
        self.verbose || self.missing_only
    }

    fn items(self, report: &CategoryReport) -> Vec<&ReconciledItem> {
        if self.missing_only {
            report.missing().collect()
        } else {
            report.items.iter().collect()
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    complete: usize,
    categories: Vec<JsonCategory<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonCategory<'a> {
    key: &'a str,
    name: &'a str,
    fingerprint: String,
    label: String,
    progress: &'a ProgressSummary,
    items: Vec<&'a ReconciledItem>,
}

pub fn generate_console_report<W: Write>(
    out: &mut W,
    reports: &[CategoryReport],
    options: ListingOptions,
) -> Result<()> {
    writeln!(out, "{}", "🐭 Ultimate Checkmark Progress".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;

    if reports.is_empty() {
        writeln!(out, "No categories selected.")?;
        return Ok(());
    }

    let width = reports.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for report in reports {
        let status = if report.is_complete() {
            "✅".green()
        } else {
            "❌".red()
        };
        let label = report.progress_label();
        let label = if report.is_complete() {
            label.green()
        } else {
            label.yellow()
        };
        if report.is_complete() {
            writeln!(out, "{status} {:width$}  {label}", report.name.bold())?;
        } else {
            let remaining = format!("{} to go", report.progress.remaining());
            writeln!(
                out,
                "{status} {:width$}  {label}  {}",
                report.name.bold(),
                remaining.dimmed()
            )?;
        }

        if options.lists_items() {
            for item in options.items(report) {
                writeln!(out, "     {}", console_item_line(item))?;
            }
            writeln!(out)?;
        }
    }

    let complete = reports.iter().filter(|r| r.is_complete()).count();
    writeln!(out)?;
    writeln!(
        out,
        "Overall: {complete} of {} categories complete",
        reports.len()
    )?;
    Ok(())
}

fn console_item_line(item: &ReconciledItem) -> String {
    let tile = item.tile_state();
    match (tile.collected, tile.limited_edition) {
        (true, true) => format!(
            "{} {} ({}) {}",
            "★".bright_magenta(),
            item.name,
            tile.badge.unwrap_or_default(),
            "LE".magenta()
        ),
        (true, false) => format!(
            "{} {} ({})",
            "✔".green(),
            item.name,
            tile.badge.unwrap_or_default()
        ),
        (false, _) => format!("{} {}", "✘".red(), item.name.dimmed()),
    }
}

pub fn generate_json_report<W: Write>(
    out: &mut W,
    reports: &[CategoryReport],
    options: ListingOptions,
) -> Result<()> {
    let report = JsonReport {
        generated_at: generated_at(),
        complete: reports.iter().filter(|r| r.is_complete()).count(),
        categories: reports
            .iter()
            .map(|report| JsonCategory {
                key: report.key.as_str(),
                name: &report.name,
                fingerprint: fingerprint_hex(report.fingerprint),
                label: report.progress_label(),
                progress: &report.progress,
                items: options.items(report),
            })
            .collect(),
    };
    let json_output = serde_json::to_string_pretty(&report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(
    out: &mut W,
    reports: &[CategoryReport],
    options: ListingOptions,
) -> Result<()> {
    writeln!(out, "# Ultimate Checkmark Progress\n")?;

    if reports.is_empty() {
        writeln!(out, "_No categories selected._")?;
        return Ok(());
    }

    let complete = reports.iter().filter(|r| r.is_complete()).count();
    writeln!(
        out,
        "- **Categories complete**: {complete} of {}\n",
        reports.len()
    )?;

    writeln!(out, "| Category | Progress | Checkmark |")?;
    writeln!(out, "|----------|----------|-----------|")?;
    for report in reports {
        let status = if report.is_complete() { "✅" } else { "❌" };
        writeln!(
            out,
            "| {} | {} | {status} |",
            report.name,
            report.progress_label()
        )?;
    }

    if !options.lists_items() {
        return Ok(());
    }

    for report in reports {
        writeln!(out, "\n## {} ({})\n", report.name, report.progress_label())?;
        for item in options.items(report) {
            let tile = item.tile_state();
            let mark = if tile.collected { "x" } else { " " };
            let badge = tile.badge.map(|b| format!(" ({b})")).unwrap_or_default();
            let le = if tile.limited_edition { " _LE_" } else { "" };
            writeln!(out, "- [{mark}] {}{badge}{le}", item.name)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkmark_core::{CategoryKey, Checklist, OwnedItem, RequiredItem};

    fn sample_report() -> CategoryReport {
        let checklist = Checklist {
            key: CategoryKey::Plankrun,
            name: "Plankrun Pages".to_string(),
            tab: "plankrun".to_string(),
            tag: "general".to_string(),
            items: vec![
                RequiredItem::new("161", "dojo_torn_page", "Plankrun's Dojo Notes", "d.gif"),
                RequiredItem::new("160", "back_cover_torn_page", "Plankrun's Journal Back Cover", "b.gif"),
            ],
        };
        let owned = [
            OwnedItem::new("dojo_torn_page", 2),
            OwnedItem::new("mystery_torn_page", 1).with_name("Mystery Page"),
        ];
        CategoryReport::build(&checklist, &owned)
    }

    fn render(
        f: fn(&mut Vec<u8>, &[CategoryReport], ListingOptions) -> Result<()>,
        reports: &[CategoryReport],
        options: ListingOptions,
    ) -> String {
        let mut buf = Vec::new();
        f(&mut buf, reports, options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn console_report_lists_progress_and_overall() {
        let text = render(generate_console_report, &[sample_report()], ListingOptions::default());
        assert!(text.contains("Plankrun Pages"));
        assert!(text.contains("1 of 2 (+1 LE)"));
        assert!(text.contains("1 to go"));
        assert!(text.contains("Overall: 0 of 1 categories complete"));
        assert!(!text.contains("Mystery Page"));
    }

    #[test]
    fn console_report_omits_remaining_for_complete_categories() {
        let checklist = Checklist {
            key: CategoryKey::Plankrun,
            name: "Plankrun Pages".to_string(),
            tab: "plankrun".to_string(),
            tag: "general".to_string(),
            items: vec![RequiredItem::new("161", "dojo_torn_page", "Plankrun's Dojo Notes", "d.gif")],
        };
        let report = CategoryReport::build(&checklist, &[OwnedItem::new("dojo_torn_page", 1)]);
        let text = render(generate_console_report, &[report], ListingOptions::default());
        assert!(text.contains("1 of 1"));
        assert!(!text.contains("to go"));
        assert!(text.contains("Overall: 1 of 1 categories complete"));
    }

    #[test]
    fn console_report_missing_only_lists_unowned_checklist_items() {
        let options = ListingOptions {
            verbose: false,
            missing_only: true,
        };
        let text = render(generate_console_report, &[sample_report()], options);
        assert!(text.contains("Plankrun's Journal Back Cover"));
        assert!(!text.contains("Plankrun's Dojo Notes"));
        assert!(!text.contains("Mystery Page"));
    }

    #[test]
    fn console_report_handles_no_categories() {
        let text = render(generate_console_report, &[], ListingOptions::default());
        assert!(text.contains("No categories selected."));
    }

    #[test]
    fn json_report_carries_summary_and_items() {
        let text = render(generate_json_report, &[sample_report()], ListingOptions::default());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let category = &value["categories"][0];
        assert_eq!(category["key"], "plankrun");
        assert_eq!(category["label"], "1 of 2 (+1 LE)");
        assert_eq!(category["progress"]["completed"], 1);
        assert_eq!(category["progress"]["le"], 1);
        assert_eq!(category["items"].as_array().unwrap().len(), 3);
        assert_eq!(category["fingerprint"].as_str().unwrap().len(), 16);
        assert_eq!(value["complete"], 0);
    }

    #[test]
    fn markdown_report_renders_table_and_checkboxes() {
        let options = ListingOptions {
            verbose: true,
            missing_only: false,
        };
        let text = render(generate_markdown_report, &[sample_report()], options);
        assert!(text.contains("| Plankrun Pages | 1 of 2 (+1 LE) | ❌ |"));
        assert!(text.contains("- [x] Plankrun's Dojo Notes (2)"));
        assert!(text.contains("- [ ] Plankrun's Journal Back Cover"));
        assert!(text.contains("- [x] Mystery Page (1) _LE_"));
    }

    #[test]
    fn markdown_report_handles_no_categories() {
        let text = render(generate_markdown_report, &[], ListingOptions::default());
        assert!(text.contains("_No categories selected._"));
    }
}
