use crate::dataset::passage::SampleRow;
use crate::error::Result;
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const REPORT_HEADER: [&str; 4] = ["Text", "Name", "Gender", "Race"];

/// Write generated samples as CSV, one row per sample, preceded by [`REPORT_HEADER`].
pub fn write_report<W: Write>(rows: &[SampleRow], writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(REPORT_HEADER)?;
    for row in rows {
        csv_writer.write_record([
            row.text.as_str(),
            row.name.as_str(),
            row.gender.as_str(),
            row.race.as_str(),
        ])?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Write generated samples to `path`, replacing any existing file.
pub fn write_report_file<P: AsRef<Path>>(rows: &[SampleRow], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_report(rows, std::io::BufWriter::new(file))?;
    info!(rows = rows.len(), path = %path.display(), "wrote sample report");
    Ok(())
}
