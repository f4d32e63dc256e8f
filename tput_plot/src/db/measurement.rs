use crate::db::Throughputs;
use crate::key::GroupKey;
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

// column of each field in a measurement row
const ELAPSED_MS_COLUMN: usize = 0;
const BYTES_COLUMN: usize = 1;
const WINDOW_COLUMN: usize = 2;
const MIN_FIELDS: usize = 3;

// everything after this byte, up to the end of the line, is ignored
const COMMENT: u8 = b'#';

/// A single row of a measurement log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub elapsed_ms: f64,
    pub bytes: f64,
    pub window: f64,
}

impl Measurement {
    pub fn new(elapsed_ms: f64, bytes: f64, window: f64) -> Self {
        Self {
            elapsed_ms,
            bytes,
            window,
        }
    }

    /// Throughput in kbps: bits per millisecond.
    pub fn throughput(&self) -> Result<f64, Report> {
        if self.elapsed_ms == 0f64 {
            eyre::bail!("elapsed time is zero (bytes = {})", self.bytes);
        }
        let throughput = self.bytes * 8f64 / self.elapsed_ms;
        if !throughput.is_finite() {
            eyre::bail!(
                "throughput of {} bytes in {} ms is not finite",
                self.bytes,
                self.elapsed_ms
            );
        }
        Ok(throughput)
    }

    pub fn window_key(&self) -> GroupKey {
        GroupKey::numeric(self.window)
    }

    fn from_record(record: &StringRecord) -> Result<Self, Report> {
        let record = strip_comment(record);
        let record = &record;
        if record.len() < MIN_FIELDS {
            eyre::bail!(
                "expected at least {} fields, found {}",
                MIN_FIELDS,
                record.len()
            );
        }
        let elapsed_ms =
            parse_field(record, ELAPSED_MS_COLUMN, "elapsed time")?;
        let bytes = parse_field(record, BYTES_COLUMN, "bytes")?;
        let window = parse_field(record, WINDOW_COLUMN, "window size")?;
        if !window.is_finite() {
            eyre::bail!("window size {} is not finite", window);
        }
        Ok(Self::new(elapsed_ms, bytes, window))
    }
}

// Drops a trailing comment: the fields after the one where it starts, and the
// part of that field after the comment byte.
fn strip_comment(record: &StringRecord) -> StringRecord {
    let mut stripped = StringRecord::with_capacity(record.as_slice().len(), 0);
    for field in record.iter() {
        match field.find(COMMENT as char) {
            Some(start) => {
                let field = field[..start].trim();
                if !field.is_empty() {
                    stripped.push_field(field);
                }
                break;
            }
            None => stripped.push_field(field),
        }
    }
    stripped
}

fn parse_field(
    record: &StringRecord,
    column: usize,
    what: &str,
) -> Result<f64, Report> {
    let field = record.get(column).unwrap_or_default();
    field.parse::<f64>().wrap_err_with(|| {
        format!("{} in column {} is not a number: {:?}", what, column, field)
    })
}

/// Loads a tab-separated measurement log and groups the throughput of its rows
/// by window size.
pub fn load_throughputs(path: impl AsRef<Path>) -> Result<Throughputs, Report> {
    let path = path.as_ref();
    let file = File::open(path)
        .wrap_err_with(|| format!("open measurement log {}", path.display()))?;
    let throughputs = load_from_reader(file)
        .wrap_err_with(|| format!("load measurement log {}", path.display()))?;
    tracing::info!(
        "loaded {} samples in {} windows from {}",
        throughputs.sample_count(),
        throughputs.len(),
        path.display()
    );
    for (window, samples) in &throughputs {
        tracing::debug!("window {}: {} samples", window, samples.len());
    }
    Ok(throughputs)
}

/// Same as `load_throughputs` but from any reader. The first line is a header
/// and is skipped.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Throughputs, Report> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        // rows may carry more columns than the ones we need
        .flexible(true)
        .comment(Some(COMMENT))
        .trim(Trim::All)
        .from_reader(reader);

    let mut throughputs = Throughputs::new();
    for record in reader.records() {
        let record = record.wrap_err("read measurement row")?;
        // csv lines are 1-based and include the header
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or_default();
        let measurement = Measurement::from_record(&record)
            .wrap_err_with(|| format!("invalid measurement at line {}", line))?;
        let throughput = measurement
            .throughput()
            .wrap_err_with(|| format!("invalid measurement at line {}", line))?;
        tracing::trace!(
            "line {}: window = {} throughput = {}",
            line,
            measurement.window,
            throughput
        );
        throughputs.push(measurement.window_key(), throughput);
    }
    Ok(throughputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(content: &str) -> Result<Throughputs, Report> {
        load_from_reader(content.as_bytes())
    }

    #[test]
    fn throughput_in_kbps() {
        let measurement = Measurement::new(1000f64, 1000f64, 1f64);
        assert_eq!(measurement.throughput().unwrap(), 8f64);
    }

    #[test]
    fn group_by_window() {
        let content = "time\tbytes\twindow\n\
                       1000\t1000\t1\n\
                       500\t1000\t4\n\
                       2000\t1000\t1\n";
        let throughputs = load(content).unwrap();
        assert_eq!(throughputs.len(), 2);
        assert_eq!(throughputs.get(&1f64.into()), Some(&vec![8f64, 4f64]));
        assert_eq!(throughputs.get(&4f64.into()), Some(&vec![16f64]));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let content = "time\tbytes\twindow\tnote\n1000\t1000\t2\tfoo\n";
        let throughputs = load(content).unwrap();
        assert_eq!(throughputs.get(&2f64.into()), Some(&vec![8f64]));
    }

    #[test]
    fn header_only() {
        let throughputs = load("time\tbytes\twindow\n").unwrap();
        assert!(throughputs.is_empty());
        assert!(load("").unwrap().is_empty());
    }

    #[test]
    fn missing_fields_name_the_line() {
        let content = "time\tbytes\twindow\n1000\t1000\t1\n1000\t1000\n";
        let error = format!("{:?}", load(content).unwrap_err());
        assert!(error.contains("line 3"), "{}", error);
    }

    #[test]
    fn non_numeric_field_names_the_line() {
        let content = "time\tbytes\twindow\nfast\t1000\t1\n";
        let error = format!("{:?}", load(content).unwrap_err());
        assert!(error.contains("line 2"), "{}", error);
        assert!(error.contains("elapsed time"), "{}", error);
    }

    #[test]
    fn zero_elapsed_time_names_the_line() {
        let content = "time\tbytes\twindow\n1000\t1000\t1\n0\t1000\t1\n";
        let error = format!("{:?}", load(content).unwrap_err());
        assert!(error.contains("line 3"), "{}", error);
        assert!(error.contains("elapsed time is zero"), "{}", error);
    }

    #[test]
    fn comment_lines_are_skipped() {
        let content = "time\tbytes\twindow\n\
                       # warmup\n\
                       1000\t1000\t1\n\
                       1000\t1000\n";
        let error = format!("{:?}", load(content).unwrap_err());
        // the comment still counts as a line
        assert!(error.contains("line 4"), "{}", error);

        let content = "time\tbytes\twindow\n# warmup\n1000\t1000\t1\n";
        let throughputs = load(content).unwrap();
        assert_eq!(throughputs.get(&1f64.into()), Some(&vec![8f64]));
    }

    #[test]
    fn trailing_comments_are_ignored() {
        let content = "time\tbytes\twindow\n\
                       1000\t1000\t1 # slow start\n\
                       1000\t2000\t1\t# retransmit\textra\n";
        let throughputs = load(content).unwrap();
        assert_eq!(throughputs.get(&1f64.into()), Some(&vec![8f64, 16f64]));

        // a comment can't stand in for a missing field
        let content = "time\tbytes\twindow\n1000\t1000\t#1\n";
        let error = format!("{:?}", load(content).unwrap_err());
        assert!(error.contains("expected at least 3 fields"), "{}", error);
    }

    #[test]
    fn missing_file() {
        assert!(load_throughputs("/this/file/does/not/exist.tsv").is_err());
    }
}
