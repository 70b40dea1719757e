//! Sales CSV rendering

use chrono::NaiveDate;
use shared::models::SalesRecord;

use crate::directory::Directory;

/// UTF-8 byte-order mark, lets spreadsheet software detect the encoding
const BOM: &str = "\u{FEFF}";

const HEADER: [&str; 3] = ["年月", "テナント名", "売上金額"];

/// Render records as CSV bytes, one row per record in the given order
///
/// Tenant names are looked up in the directory; records of deleted
/// tenants get an empty name.
pub fn sales_csv(records: &[SalesRecord], directory: &Directory) -> Vec<u8> {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(join_row(HEADER.iter().copied()));

    for record in records {
        let period = record.period.display_ja();
        let tenant_name = directory
            .get_tenant(&record.tenant_id)
            .map(|t| t.name.as_str())
            .unwrap_or("");
        let amount = record.amount.to_string();
        lines.push(join_row([period.as_str(), tenant_name, amount.as_str()]));
    }

    let mut out = String::from(BOM);
    out.push_str(&lines.join("\n"));
    out.into_bytes()
}

/// Download file name for an export made on `date`
pub fn export_filename(date: NaiveDate) -> String {
    format!("sales-data_{}.csv", date.format("%Y-%m-%d"))
}

fn join_row<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields
        .into_iter()
        .map(escape_field)
        .collect::<Vec<_>>()
        .join(",")
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
