//! CSV encoding and decoding of expense records
//!
//! Files carry a `date,category,description,amount` header followed by one
//! row per record. Decoding is row-tolerant: a bad row is counted and
//! skipped, never fatal.

use std::collections::HashMap;
use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{ExpenseError, ExpenseResult, ValidationError};
use crate::models::expense::{self, ExpenseRecord};

/// Column names, in the order they are written
pub const HEADER: [&str; 4] = ["date", "category", "description", "amount"];

/// Why a row was left out of a decode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("row has no amount field")]
    MissingAmount,

    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("unreadable row: {0}")]
    Unreadable(String),
}

/// A row that was skipped during decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based data row number (the header is not counted)
    pub row: usize,
    pub reason: SkipReason,
}

/// Records recovered from a payload plus load/skip counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub records: Vec<ExpenseRecord>,
    pub loaded: usize,
    pub skipped: usize,
    pub skipped_rows: Vec<SkippedRow>,
}

/// Header positions of the known columns
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: Option<usize>,
    category: Option<usize>,
    description: Option<usize>,
    amount: usize,
}

impl Columns {
    /// Locate columns by name (trimmed, case-insensitive); the first match wins
    fn from_headers(headers: &StringRecord) -> ExpenseResult<Self> {
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ExpenseError::MalformedPayload(
                "payload is empty or has no header row".into(),
            ));
        }

        let mut positions: HashMap<String, usize> = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            let name = header.trim_start_matches('\u{feff}').trim().to_lowercase();
            positions.entry(name).or_insert(idx);
        }

        let amount = positions.get("amount").copied().ok_or_else(|| {
            ExpenseError::MalformedPayload(format!(
                "header has no 'amount' column (found: {})",
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })?;

        Ok(Self {
            date: positions.get("date").copied(),
            category: positions.get("category").copied(),
            description: positions.get("description").copied(),
            amount,
        })
    }
}

/// Encode records as CSV text
///
/// Output is deterministic: the same records always give the same bytes.
pub fn encode(records: &[ExpenseRecord]) -> ExpenseResult<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for record in records {
        let date = record.date_string();
        let amount = record.amount().to_plain_string();
        writer.write_record([
            date.as_str(),
            record.category(),
            record.description(),
            amount.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExpenseError::Csv(format!("Failed to flush CSV output: {}", e.error())))?;
    String::from_utf8(bytes).map_err(|e| ExpenseError::Csv(e.to_string()))
}

/// Decode CSV text into records, using today's local date for blank dates
pub fn decode(payload: &str) -> ExpenseResult<DecodeOutcome> {
    decode_from_reader(payload.as_bytes(), expense::today())
}

/// Decode CSV text with an explicit date for rows whose date is blank
pub fn decode_as_of(payload: &str, today: NaiveDate) -> ExpenseResult<DecodeOutcome> {
    decode_from_reader(payload.as_bytes(), today)
}

/// Decode CSV from any reader
///
/// Fails only when the payload has no usable header; every per-row problem
/// is recorded in [`DecodeOutcome::skipped_rows`].
pub fn decode_from_reader<R: Read>(source: R, today: NaiveDate) -> ExpenseResult<DecodeOutcome> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers().map_err(header_error)?.clone();
    let columns = Columns::from_headers(&headers)?;
    debug!(?columns, "decoding expense rows");

    let mut outcome = DecodeOutcome::default();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let parsed = match result {
            Ok(record) => decode_row(&record, &columns, today),
            Err(e) if e.is_io_error() => {
                return Err(ExpenseError::Io(format!("Failed to read row {}: {}", row, e)))
            }
            Err(e) => Err(SkipReason::Unreadable(e.to_string())),
        };

        match parsed {
            Ok(record) => {
                outcome.records.push(record);
                outcome.loaded += 1;
            }
            Err(reason) => {
                warn!(row, %reason, "skipping expense row");
                outcome.skipped += 1;
                outcome.skipped_rows.push(SkippedRow { row, reason });
            }
        }
    }

    Ok(outcome)
}

fn decode_row(
    record: &StringRecord,
    columns: &Columns,
    today: NaiveDate,
) -> Result<ExpenseRecord, SkipReason> {
    let field = |col: Option<usize>| col.and_then(|i| record.get(i)).unwrap_or("");
    let amount = record.get(columns.amount).ok_or(SkipReason::MissingAmount)?;

    Ok(ExpenseRecord::parse(
        field(columns.date),
        field(columns.category),
        field(columns.description),
        amount,
        today,
    )?)
}

fn header_error(err: csv::Error) -> ExpenseError {
    if err.is_io_error() {
        ExpenseError::Io(format!("Failed to read header: {}", err))
    } else {
        ExpenseError::MalformedPayload(format!("unreadable header: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, UNCATEGORIZED};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, category: &str, description: &str, cents: i64) -> ExpenseRecord {
        ExpenseRecord::new(date, category, description, Money::from_cents(cents)).unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let records = vec![
            record(day(2025, 1, 15), "Food", "lunch", 725),
            record(day(2025, 1, 16), "Bills", "", 100_000),
        ];

        let text = encode(&records).unwrap();
        assert_eq!(
            text,
            "date,category,description,amount\n\
             2025-01-15,Food,lunch,7.25\n\
             2025-01-16,Bills,,1000.00\n"
        );
    }

    #[test]
    fn test_encode_empty_is_header_only() {
        assert_eq!(encode(&[]).unwrap(), "date,category,description,amount\n");
    }

    #[test]
    fn test_encode_quotes_special_fields() {
        let records = vec![record(
            day(2025, 1, 15),
            "Food, drink",
            "the \"good\" cafe",
            450,
        )];

        let text = encode(&records).unwrap();
        assert!(text.contains("\"Food, drink\",\"the \"\"good\"\" cafe\",4.50"));
    }

    #[test]
    fn test_round_trip() {
        let records = vec![
            record(day(2025, 1, 15), "Food", "lunch", 725),
            record(day(2024, 2, 29), "Food, drink", "multi\nline \"quoted\"", 1),
            record(day(2023, 12, 31), UNCATEGORIZED, "", 0),
            record(day(2025, 6, 1), "Rent", "June", 123_456_789),
        ];

        let outcome = decode_as_of(&encode(&records).unwrap(), day(2000, 1, 1)).unwrap();
        assert_eq!(outcome.loaded, records.len());
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.records, records);
    }

    #[test]
    fn test_repeated_round_trips_are_stable() {
        let records = vec![record(day(2025, 1, 15), "Food", "coffee", 10)];
        let first = encode(&records).unwrap();

        let mut text = first.clone();
        for _ in 0..10 {
            let outcome = decode_as_of(&text, day(2000, 1, 1)).unwrap();
            text = encode(&outcome.records).unwrap();
        }
        assert_eq!(text, first);
    }

    #[test]
    fn test_bad_amount_rows_are_skipped() {
        let payload = "date,category,description,amount\n\
                       2025-01-01,Food,a,1.00\n\
                       2025-01-02,Food,b,abc\n\
                       2025-01-03,Food,c,2.00\n\
                       2025-01-04,Food,d,\n\
                       2025-01-05,Food,e,3.00\n\
                       2025-01-06,Food,f,-4.00\n";

        let outcome = decode_as_of(payload, day(2026, 10, 18)).unwrap();
        assert_eq!(outcome.loaded, 3);
        assert_eq!(outcome.skipped, 3);
        let descriptions: Vec<_> = outcome.records.iter().map(|r| r.description()).collect();
        assert_eq!(descriptions, vec!["a", "c", "e"]);

        let rows: Vec<_> = outcome.skipped_rows.iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![2, 4, 6]);
        assert!(matches!(
            outcome.skipped_rows[2].reason,
            SkipReason::Invalid(ValidationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_exponent_amounts_load() {
        let payload = "date,category,description,amount\n\
                       2025-01-01,Rent,june,1.2e3\n\
                       2025-01-02,Food,,2.5E-1\n";

        let outcome = decode_as_of(payload, day(2026, 10, 18)).unwrap();
        assert_eq!(outcome.skipped, 0);
        let amounts: Vec<_> = outcome.records.iter().map(|r| r.amount().cents()).collect();
        assert_eq!(amounts, vec![120_000, 25]);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let payload = "date,category,description,amount\n\
                       2025-01-01,Food\n\
                       2025-01-02,Food,ok,5\n";

        let outcome = decode_as_of(payload, day(2026, 10, 18)).unwrap();
        assert_eq!(outcome.loaded, 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.skipped_rows[0].reason, SkipReason::MissingAmount);
    }

    #[test]
    fn test_defaults_for_blank_fields() {
        let today = day(2026, 10, 18);
        let payload = "date,category,description,amount\n\
                       ,,,9.99\n\
                       2025-01-02,  ,  spaced  ,1\n";

        let outcome = decode_as_of(payload, today).unwrap();
        assert_eq!(outcome.loaded, 2);

        let first = &outcome.records[0];
        assert_eq!(first.date(), today);
        assert_eq!(first.category(), UNCATEGORIZED);
        assert_eq!(first.description(), "");

        let second = &outcome.records[1];
        assert_eq!(second.category(), UNCATEGORIZED);
        assert_eq!(second.description(), "spaced");
    }

    #[test]
    fn test_columns_found_by_name() {
        let payload = "Amount, Description ,DATE,note\n12.5,taxi,2025-03-04,ignored\n";

        let outcome = decode_as_of(payload, day(2026, 10, 18)).unwrap();
        assert_eq!(outcome.loaded, 1);
        let record = &outcome.records[0];
        assert_eq!(record.amount(), Money::from_cents(1250));
        assert_eq!(record.description(), "taxi");
        assert_eq!(record.date(), day(2025, 3, 4));
        assert_eq!(record.category(), UNCATEGORIZED);
    }

    #[test]
    fn test_invalid_date_row_is_skipped() {
        let payload = "date,category,description,amount\n\
                       2025-02-30,Food,,1\n\
                       2025-02-28,Food,,1\n";

        let outcome = decode_as_of(payload, day(2026, 10, 18)).unwrap();
        assert_eq!(outcome.loaded, 1);
        assert_eq!(outcome.skipped, 1);
        assert!(matches!(
            outcome.skipped_rows[0].reason,
            SkipReason::Invalid(ValidationError::BadDate(_))
        ));
    }

    #[test]
    fn test_header_only_payload() {
        let outcome = decode_as_of("date,category,description,amount\n", day(2026, 10, 18)).unwrap();
        assert_eq!(outcome, DecodeOutcome::default());
    }

    #[test]
    fn test_empty_payload_is_malformed() {
        let err = decode("").unwrap_err();
        assert!(matches!(err, ExpenseError::MalformedPayload(_)));
    }

    #[test]
    fn test_missing_amount_header_is_malformed() {
        let err = decode("2025-01-01,Food,lunch,7.25\n").unwrap_err();
        assert!(matches!(err, ExpenseError::MalformedPayload(_)));
    }

    #[test]
    fn test_reader_skips_invalid_utf8_rows() {
        let mut payload = b"date,category,description,amount\n2025-01-01,Food,".to_vec();
        payload.extend_from_slice(&[0xff, 0xfe]);
        payload.extend_from_slice(b",1.00\n2025-01-02,Food,ok,2.00\n");

        let outcome = decode_from_reader(payload.as_slice(), day(2026, 10, 18)).unwrap();
        assert_eq!(outcome.loaded, 1);
        assert_eq!(outcome.skipped, 1);
        assert!(matches!(
            outcome.skipped_rows[0].reason,
            SkipReason::Unreadable(_)
        ));
    }
}
