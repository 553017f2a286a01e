//! CSV export of the retained alert feed.
//!
//! Fixed header `id,time,type,risk,entity,handled`; every field is
//! double-quoted with internal quotes doubled; `time` is UTC ISO-8601
//! with milliseconds. Rows are written in insertion (oldest-first)
//! order, one per retained alert.

use crate::alert::AlertStore;
use crate::error::MonitorResult;
use crate::types::TimestampMs;
use chrono::{SecondsFormat, TimeZone, Utc};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Default export filename.
pub const EXPORT_FILE_NAME: &str = "corepay-alerts.csv";

const HEADER: [&str; 6] = ["id", "time", "type", "risk", "entity", "handled"];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn iso_utc(ts: TimestampMs) -> String {
    match Utc.timestamp_millis_opt(ts).single() {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => ts.to_string(),
    }
}

/// Write the feed as CSV. Returns the number of data rows.
pub fn write_csv<W: Write>(alerts: &AlertStore, out: &mut W) -> MonitorResult<usize> {
    let header: Vec<String> = HEADER.iter().map(|h| quote(h)).collect();
    writeln!(out, "{}", header.join(","))?;

    let mut rows = 0;
    for alert in alerts.iter_chronological() {
        let fields = [
            quote(&alert.id),
            quote(&iso_utc(alert.time)),
            quote(alert.category.name()),
            quote(&alert.risk.to_string()),
            quote(&alert.entity),
            quote(&alert.handled.to_string()),
        ];
        writeln!(out, "{}", fields.join(","))?;
        rows += 1;
    }
    Ok(rows)
}

/// Write the feed to a file on disk. Returns the number of data rows.
pub fn export_to_file(alerts: &AlertStore, path: &Path) -> MonitorResult<usize> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let rows = write_csv(alerts, &mut writer)?;
    writer.flush()?;
    Ok(rows)
}
