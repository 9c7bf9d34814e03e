//! Delimited price file loader.
//!
//! Parses a headered, comma-delimited text file into a date-sorted bar
//! series. Column matching is case-insensitive; `Time` and `OI` columns
//! (present in some exporter dialects) are tolerated and ignored. Embedded
//! time-of-day components on the date field are discarded.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::Bar;

/// Structured error types for the loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{path}' as delimited text: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column '{name}' (have: {found})")]
    MissingColumn { name: &'static str, found: String },

    #[error("line {line}: unrecognized date '{value}'")]
    BadDate { line: u64, value: String },

    #[error("line {line}: column '{column}' has non-numeric value '{value}'")]
    BadNumber {
        column: &'static str,
        line: u64,
        value: String,
    },

    #[error("'{path}' contains a header but no data rows")]
    Empty { path: String },
}

/// A loaded bar series plus non-fatal data-quality warnings.
#[derive(Debug)]
pub struct LoadedSeries {
    /// Bars sorted ascending by date.
    pub bars: Vec<Bar>,
    /// Human-readable quality warnings (e.g. inconsistent OHLC rows).
    pub warnings: Vec<String>,
}

/// Column indices resolved from the header row.
struct ColumnMap {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };

        let missing = |name: &'static str| LoadError::MissingColumn {
            name,
            found: headers.iter().collect::<Vec<_>>().join(", "),
        };

        Ok(Self {
            date: find(&["date"]).ok_or_else(|| missing("date"))?,
            open: find(&["open"]).ok_or_else(|| missing("open"))?,
            high: find(&["high"]).ok_or_else(|| missing("high"))?,
            low: find(&["low"]).ok_or_else(|| missing("low"))?,
            close: find(&["close"]).ok_or_else(|| missing("close"))?,
            volume: find(&["vol", "volume"]).ok_or_else(|| missing("volume"))?,
        })
    }
}

/// Load a price series from a delimited file with a header row.
///
/// Returns bars sorted ascending by date. Fails on missing required
/// columns, unparsable date/numeric fields, or zero data rows. Rows with
/// internally inconsistent OHLC values are kept but reported in
/// `LoadedSeries::warnings`.
pub fn load_series(path: &Path) -> Result<LoadedSeries, LoadError> {
    let display = path.display().to_string();

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: display.clone(),
            source,
        })?
        .clone();
    let columns = ColumnMap::resolve(&headers)?;

    let mut bars = Vec::new();
    let mut insane_rows = 0usize;

    for record in reader.records() {
        let record = record.map_err(|source| LoadError::Csv {
            path: display.clone(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        // Trailing blank lines come through as a single empty field.
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let bar = parse_record(&record, &columns, line)?;
        if !bar.is_sane() {
            insane_rows += 1;
        }
        bars.push(bar);
    }

    if bars.is_empty() {
        return Err(LoadError::Empty { path: display });
    }

    // Stable sort: same-date rows keep file order.
    bars.sort_by_key(|b| b.date);

    let mut warnings = Vec::new();
    if insane_rows > 0 {
        warnings.push(format!(
            "{insane_rows} row(s) with inconsistent OHLC values (high/low outside the open/close range)"
        ));
    }

    Ok(LoadedSeries { bars, warnings })
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    line: u64,
) -> Result<Bar, LoadError> {
    let field = |idx: usize| record.get(idx).unwrap_or("");

    let date = parse_date(field(columns.date)).ok_or_else(|| LoadError::BadDate {
        line,
        value: field(columns.date).to_string(),
    })?;

    let number = |column: &'static str, idx: usize| -> Result<f64, LoadError> {
        let raw = field(idx);
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| LoadError::BadNumber {
                column,
                line,
                value: raw.to_string(),
            })
    };

    Ok(Bar {
        date,
        open: number("open", columns.open)?,
        high: number("high", columns.high)?,
        low: number("low", columns.low)?,
        close: number("close", columns.close)?,
        volume: parse_volume(field(columns.volume)).ok_or_else(|| LoadError::BadNumber {
            column: "volume",
            line,
            value: field(columns.volume).to_string(),
        })?,
    })
}

/// Parse a calendar date, discarding any embedded time-of-day component.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y"];

    let token = raw
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(raw);

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

/// Parse a volume field. Accepts integer and fractional representations
/// (some exporters write volume as a float); fractions truncate.
fn parse_volume(raw: &str) -> Option<u64> {
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u64)
}
