use std::io::Write;

use chrono::SecondsFormat;
use serde::Serialize;

use super::domain::Profile;
use super::matching::MatchResult;

/// One line of the tabular export, in ranked order.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    title: &'a str,
    bu: &'a str,
    location: String,
    availability_percent: u8,
    last_updated: String,
    score: u8,
}

impl<'a> ExportRow<'a> {
    fn new(profile: &'a Profile, result: MatchResult) -> Self {
        Self {
            name: &profile.full_name,
            title: profile.job_title.as_deref().unwrap_or(""),
            bu: profile.business_unit.as_deref().unwrap_or(""),
            location: profile.location_label(),
            availability_percent: profile.availability(),
            last_updated: profile
                .last_updated
                .map(|updated| updated.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default(),
            score: result.score,
        }
    }
}

/// Write ranked results as CSV with a header row, preserving the given order.
pub fn write_csv<'a, W, I>(writer: W, results: I) -> Result<(), ExportError>
where
    W: Write,
    I: IntoIterator<Item = (&'a Profile, MatchResult)>,
{
    let mut csv_writer = csv::WriterBuilder::new().has_headers(true).from_writer(writer);

    let mut rows = 0usize;
    for (profile, result) in results {
        csv_writer.serialize(ExportRow::new(profile, result))?;
        rows += 1;
    }

    if rows == 0 {
        csv_writer.write_record([
            "name",
            "title",
            "bu",
            "location",
            "availability_percent",
            "last_updated",
            "score",
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Convenience wrapper returning the CSV document as a string.
pub fn to_csv_string<'a, I>(results: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = (&'a Profile, MatchResult)>,
{
    let mut buffer = Vec::new();
    write_csv(&mut buffer, results)?;
    String::from_utf8(buffer).map_err(|err| ExportError::Encoding(err.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(String),
}
