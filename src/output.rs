use crate::models::ListingRecord;
use crate::scrapers::ListingSink;
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column header of the CSV output, in row order
pub const CSV_HEADER: [&str; 11] = [
    "Linkedin Job ID",
    "Job Title",
    "Company",
    "Date Posted",
    "Salary",
    "Location",
    "Easy Apply",
    "Hiring status",
    "Job Link",
    "Company Profile",
    "Job Desc",
];

/// Writes listings as CSV with a fixed header row
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    pub fn create(path: &Path) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush CSV output: {}", e.error()))
    }
}

impl<W: Write> ListingSink for CsvSink<W> {
    fn write(&mut self, records: &[ListingRecord]) -> Result<()> {
        self.writer.write_record(CSV_HEADER)?;
        for r in records {
            let easy_apply = r.easy_apply.to_string();
            self.writer.write_record([
                r.id.as_str(),
                r.title.as_str(),
                r.company.as_str(),
                r.date_posted.as_str(),
                r.salary.as_str(),
                r.location.as_str(),
                easy_apply.as_str(),
                r.hiring_status.as_str(),
                r.job_url.as_str(),
                r.company_url.as_str(),
                r.snippet.as_str(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes listings as a pretty-printed JSON array
pub struct JsonSink<W: Write> {
    writer: W,
}

impl JsonSink<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> JsonSink<W> {
    pub fn from_writer(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ListingSink for JsonSink<W> {
    fn write(&mut self, records: &[ListingRecord]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
