//! Turns a purchase log into transactions.
//!
//! A purchase log is a CSV file whose first three columns are the member
//! number, the purchase date and the purchased item. All purchases of one
//! member on one date form a single basket. Baskets are emitted sorted by
//! member then date, which fixes their tids.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::construct::{ItemKeeper, Transaction};
use crate::error::{MiningError, Result};

pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Text encoding of a purchase log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Every byte is one character, so decoding never fails.
    #[default]
    Latin1,
    Utf8,
}

impl Encoding {
    fn decode(self, field: &[u8], line: u64) -> Result<String> {
        match self {
            Encoding::Latin1 => Ok(field.iter().map(|&b| char::from(b)).collect()),
            Encoding::Utf8 => std::str::from_utf8(field)
                .map(str::to_string)
                .map_err(|e| MiningError::malformed(format!("line {line} is not valid UTF-8: {e}"), None)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogOptions {
    pub has_headers: bool,
    pub date_format: String,
    pub encoding: Encoding,
}
impl Default for LogOptions {
    fn default() -> Self {
        Self {
            has_headers: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            encoding: Encoding::default(),
        }
    }
}

/// One line of a purchase log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseRecord {
    pub member: String,
    pub date: NaiveDate,
    pub item: String,
}

pub fn read_purchase_log<P: AsRef<Path>>(path: P, options: &LogOptions) -> Result<Vec<PurchaseRecord>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading purchase log");
    let file = File::open(path)?;
    parse_purchase_log(file, options)
}

/// Parses purchase records from any reader.
///
/// Fields are decoded with `options.encoding`. Rows without an item are
/// skipped. Rows with fewer than three fields or an unparseable date are
/// rejected.
pub fn parse_purchase_log<R: Read>(reader: R, options: &LogOptions) -> Result<Vec<PurchaseRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.byte_records() {
        let row = result?;
        let line = row.position().map_or(0, csv::Position::line);
        let (member, date, item) = match (row.get(0), row.get(1), row.get(2)) {
            (Some(member), Some(date), Some(item)) => (member, date, item),
            _ => {
                return Err(MiningError::malformed(
                    format!("line {line} has {} fields, expected member, date and item", row.len()),
                    None,
                ));
            }
        };
        if item.is_empty() {
            warn!(line, "skipping purchase without an item");
            continue;
        }
        let date = options.encoding.decode(date, line)?;
        let date = NaiveDate::parse_from_str(&date, &options.date_format).map_err(|e| {
            MiningError::malformed(format!("line {line}: cannot parse date '{date}': {e}"), None)
        })?;
        records.push(PurchaseRecord {
            member: options.encoding.decode(member, line)?,
            date,
            item: options.encoding.decode(item, line)?,
        });
    }
    Ok(records)
}

/// Groups purchases into one duplicate-free, sorted basket per member and
/// date.
pub fn build_transactions(mut records: Vec<PurchaseRecord>) -> Vec<Transaction> {
    records.sort_unstable_by(|a, b| (&a.member, a.date, &a.item).cmp(&(&b.member, b.date, &b.item)));
    let mut keeper = ItemKeeper::new();
    let transactions: Vec<Transaction> = records
        .chunk_by(|a, b| a.member == b.member && a.date == b.date)
        .map(|basket| {
            let mut items: Vec<_> = basket.iter().map(|record| keeper.keep(&record.item)).collect();
            // already sorted by item
            items.dedup();
            Transaction::new(items)
        })
        .collect();
    debug!(
        purchases = records.len(),
        transactions = transactions.len(),
        items = keeper.len(),
        "built transactions"
    );
    transactions
}
