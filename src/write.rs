use crate::{compute::Totals, data::Error};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

const SEPARATOR_LEN: usize = 35;

/// Console summary: one line per group, or a notice when there is nothing to show.
pub(crate) fn write_summary<W: Write>(
    mut writer: W,
    totals: &Totals,
    currency: &str,
) -> std::io::Result<()> {
    if totals.is_empty() {
        return writeln!(writer, "No expenses found.");
    }
    write_lines(&mut writer, totals, currency)
}

fn write_lines<W: Write>(writer: &mut W, totals: &Totals, currency: &str) -> std::io::Result<()> {
    for (key, total) in totals {
        writeln!(writer, "{key}: {currency}{total}")?;
    }
    Ok(())
}

pub(crate) fn report_file_name(month: &str) -> String {
    format!("expense_report_{month}.txt")
}

pub(crate) fn write_report<W: Write>(
    mut writer: W,
    month: &str,
    totals: &Totals,
    currency: &str,
) -> std::io::Result<()> {
    writeln!(writer, "Expense Report for {month}")?;
    writeln!(writer, "{}", "-".repeat(SEPARATOR_LEN))?;
    write_lines(&mut writer, totals, currency)?;
    writer.flush()
}

/// Writes the monthly report into `dir`, replacing any previous report for the
/// same month. Returns `None` without creating anything when `totals` is empty.
pub(crate) fn export_report(
    dir: &Path,
    month: &str,
    totals: &Totals,
    currency: &str,
) -> Result<Option<PathBuf>, Error> {
    if totals.is_empty() {
        return Ok(None);
    }
    let path = dir.join(report_file_name(month));
    let file = std::io::BufWriter::new(std::fs::File::create(&path)?);
    write_report(file, month, totals, currency)?;
    info!("Exported report for {month} to {}", path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn totals() -> Totals {
        Totals::from([
            (String::from("Food"), dec!(150.5)),
            (String::from("Travel"), dec!(200)),
        ])
    }

    #[test]
    fn summary_lines_in_order() {
        let mut out = Vec::new();
        write_summary(&mut out, &totals(), "₹").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Food: ₹150.5\nTravel: ₹200\n"
        );
    }

    #[test]
    fn summary_empty_notice() {
        let mut out = Vec::new();
        write_summary(&mut out, &Totals::new(), "$").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No expenses found.\n");
    }

    #[test]
    fn report_layout() {
        let mut out = Vec::new();
        write_report(&mut out, "2024-01", &totals(), "$").unwrap();
        let report = String::from_utf8(out).unwrap();
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(
            lines,
            [
                "Expense Report for 2024-01",
                "-----------------------------------",
                "Food: $150.5",
                "Travel: $200",
            ]
        );
        assert_eq!(lines[1].len(), 35);
    }

    #[test]
    fn export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_report(dir.path(), "2024-01", &totals(), "₹")
            .unwrap()
            .unwrap();
        assert_eq!(path, dir.path().join("expense_report_2024-01.txt"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Expense Report for 2024-01\n"));
        assert!(content.ends_with("Travel: ₹200\n"));
    }

    #[test]
    fn export_overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(report_file_name("2024-01"));
        std::fs::write(&path, "stale line from an older report\n".repeat(10)).unwrap();
        let single = Totals::from([(String::from("Bills"), dec!(9))]);
        export_report(dir.path(), "2024-01", &single, "₹").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Expense Report for 2024-01\n-----------------------------------\nBills: ₹9\n"
        );
    }

    #[test]
    fn export_nothing_for_empty_month() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export_report(dir.path(), "2030-12", &Totals::new(), "₹")
            .unwrap()
            .is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
