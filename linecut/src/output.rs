//! Human-readable console output.

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

use crate::append::AppendReport;
use crate::blocks::{Block, BlockScan, DuplicateScan};
use crate::fix::RemovedLine;
use crate::remover::RemovalReport;

/// Write `value` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn print_json<T: Serialize>(writer: &mut impl Write, value: &T) -> anyhow::Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Print the outcome of a range removal.
///
/// Dry runs list every line that would go, prefixed by its line number.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_removal(writer: &mut impl Write, report: &RemovalReport) -> std::io::Result<()> {
    if report.dry_run {
        writeln!(
            writer,
            "{}",
            "[DRY-RUN] Lines that would be removed:".yellow()
        )?;
        print_removed_lines(writer, &report.preview)?;
    }

    let label = if report.dry_run {
        "Would remove:".yellow().bold()
    } else {
        "Removed:".green().bold()
    };
    let applied = report
        .applied
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(
        writer,
        "{} {} of {} lines from {} [{}], {} kept",
        label,
        report.stats.removed_lines.to_string().bold(),
        report.stats.original_lines,
        report.path.cyan(),
        if applied.is_empty() { "-" } else { applied.as_str() },
        report.stats.kept_lines
    )?;
    Ok(())
}

fn print_removed_lines(writer: &mut impl Write, lines: &[RemovedLine]) -> std::io::Result<()> {
    let width = lines.last().map_or(1, |l| l.line.to_string().len());
    for removed in lines {
        writeln!(
            writer,
            "  {} {} {}",
            format!("{:>width$}", removed.line).dimmed(),
            "-".red(),
            removed.text.red()
        )?;
    }
    Ok(())
}

/// Print the outcome of an append.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_append(writer: &mut impl Write, report: &AppendReport) -> std::io::Result<()> {
    write!(
        writer,
        "{} {} bytes to {}",
        "Appended:".green().bold(),
        report.bytes_appended.to_string().bold(),
        report.path.cyan()
    )?;
    if report.created {
        write!(writer, " {}", "(created)".dimmed())?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Print located blocks as a table, followed by any names not found.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_blocks(writer: &mut impl Write, path: &str, scan: &BlockScan) -> std::io::Result<()> {
    writeln!(
        writer,
        "{} {} ({} locator)",
        "Blocks in".bold(),
        path.cyan(),
        scan.locator
    )?;

    if scan.blocks.is_empty() {
        writeln!(writer, "  No matching functions.")?;
    } else {
        writeln!(writer, "{}", blocks_table(&scan.blocks))?;
    }
    print_missing(writer, &scan.missing)
}

fn blocks_table(blocks: &[Block]) -> Table {
    let mut table = create_table(vec!["Name", "Signature", "Lines", "Count"]);
    for block in blocks {
        table.add_row(vec![
            Cell::new(&block.name).add_attribute(Attribute::Bold),
            Cell::new(block.signature_line),
            Cell::new(block.range.to_string()).fg(Color::Cyan),
            Cell::new(block.range.len()),
        ]);
    }
    table
}

/// Print duplicated function names with every line that defines them.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_duplicates(
    writer: &mut impl Write,
    path: &str,
    scan: &DuplicateScan,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "{} {} ({} functions, {} locator)",
        "Duplicates in".bold(),
        path.cyan(),
        scan.functions,
        scan.locator
    )?;

    if scan.duplicates.is_empty() {
        writeln!(writer, "  {}", "No duplicated function names.".green())?;
        return Ok(());
    }

    let mut table = create_table(vec!["Name", "Definitions", "Lines"]);
    for duplicate in &scan.duplicates {
        let lines = duplicate
            .lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&duplicate.name).add_attribute(Attribute::Bold),
            Cell::new(duplicate.lines.len()).fg(Color::Yellow),
            Cell::new(lines).fg(Color::Cyan),
        ]);
    }
    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print names that matched no function.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_missing(writer: &mut impl Write, missing: &[String]) -> std::io::Result<()> {
    if missing.is_empty() {
        return Ok(());
    }
    writeln!(
        writer,
        "{} {}",
        "Not found:".yellow().bold(),
        missing.join(", ")
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::LineRange;
    use crate::remover::RemovalStats;

    fn report(dry_run: bool) -> RemovalReport {
        RemovalReport {
            path: "lib.rs".to_owned(),
            stats: RemovalStats {
                original_lines: 5,
                removed_lines: 2,
                kept_lines: 3,
            },
            applied: vec![LineRange::new(2, 3)],
            dry_run,
            preview: if dry_run {
                vec![
                    RemovedLine {
                        line: 2,
                        text: "two".to_owned(),
                    },
                    RemovedLine {
                        line: 3,
                        text: "three".to_owned(),
                    },
                ]
            } else {
                Vec::new()
            },
        }
    }

    #[test]
    fn test_print_removal_applied() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        print_removal(&mut out, &report(false)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Removed: 2 of 5 lines from lib.rs [2-3], 3 kept\n");
    }

    #[test]
    fn test_print_removal_dry_run_lists_lines() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        print_removal(&mut out, &report(true)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("[DRY-RUN]"));
        assert!(text.contains("  2 - two\n"));
        assert!(text.contains("  3 - three\n"));
        assert!(text.contains("Would remove: 2 of 5"));
    }

    #[test]
    fn test_print_blocks_table() {
        colored::control::set_override(false);
        let scan = BlockScan {
            blocks: vec![Block {
                name: "get_product_list".to_owned(),
                signature_line: 4,
                range: LineRange::new(3, 6),
            }],
            missing: vec!["gone".to_owned()],
            locator: "cst",
        };
        let mut out = Vec::new();
        print_blocks(&mut out, "lib.rs", &scan).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("get_product_list"));
        assert!(text.contains("3-6"));
        assert!(text.contains("Not found: gone"));
    }

    #[test]
    fn test_print_duplicates() {
        colored::control::set_override(false);
        let scan = DuplicateScan {
            duplicates: vec![crate::blocks::Duplicate {
                name: "get_products".to_owned(),
                lines: vec![2, 10],
            }],
            functions: 3,
            locator: "scanner",
        };
        let mut out = Vec::new();
        print_duplicates(&mut out, "lib.rs", &scan).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Duplicates in lib.rs (3 functions, scanner locator)\n"));
        assert!(text.contains("get_products"));
        assert!(text.contains("2, 10"));

        let mut out = Vec::new();
        print_duplicates(&mut out, "lib.rs", &DuplicateScan::default()).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No duplicated function names."));
    }
}
