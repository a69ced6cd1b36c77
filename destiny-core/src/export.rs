//! CSV export of a ranked session.

use crate::error::ExportError;
use crate::factor::Factor;
use crate::leaderboard::Leaderboard;
use std::io::Write;

const UTF8_BOM: &str = "\u{FEFF}";

/// Leading columns; the ten factor columns follow in display order.
pub const LEADING_COLUMNS: [&str; 8] = [
    "Rank",
    "Display Name",
    "Contact",
    "Final Destiny",
    "Balance",
    "Impact",
    "Efficiency",
    "Archetype",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Prefix the output with a UTF-8 byte order mark so spreadsheet tools
    /// pick the right encoding.
    pub byte_order_mark: bool,
    pub delimiter: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            byte_order_mark: true,
            delimiter: b',',
        }
    }
}

pub fn header() -> Vec<&'static str> {
    LEADING_COLUMNS
        .iter()
        .copied()
        .chain(Factor::ALL.iter().map(|factor| factor.label()))
        .collect()
}

/// Write one header row and one row per ranked participant.
pub fn write_csv<W: Write>(
    board: &Leaderboard,
    mut out: W,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    if options.byte_order_mark {
        out.write_all(UTF8_BOM.as_bytes())?;
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(out);

    writer.write_record(header())?;

    for entry in board.entries() {
        let report = &entry.report;
        let mut row = vec![
            entry.rank.to_string(),
            entry.participant.display_name.clone(),
            entry.participant.contact.clone(),
            report.final_destiny.to_string(),
            report.balance_index.to_string(),
            report.impact_index.to_string(),
            report.efficiency_index.to_string(),
            report.archetype.info().name.to_string(),
        ];
        row.extend(report.lifetime.iter().map(|(_, total)| total.to_string()));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn to_csv_string(board: &Leaderboard, options: &ExportOptions) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(board, &mut buffer, options)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
