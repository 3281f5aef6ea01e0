use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{LedgerError, LedgerResult};

/// Timestamp layout used in the ledger file, e.g. `2024-01-05 10:00`.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column header, always the first line of the ledger file.
pub(crate) const HEADER: [&str; 4] = ["Date", "Description", "Amount", "Category"];

/// One ledger row, kept as the text that is (or will be) on disk.
///
/// Typed views are parsed on demand so a malformed row can still be listed,
/// matched and deleted even though aggregations skip it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Expense {
    pub(crate) timestamp: String,
    pub(crate) description: String,
    pub(crate) amount: String,
    pub(crate) category: String,
}

impl Expense {
    pub(crate) fn new(
        timestamp: NaiveDateTime,
        description: String,
        amount: Decimal,
        category: String,
    ) -> Self {
        Self {
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            description,
            amount: amount.to_string(),
            category,
        }
    }

    /// Build from raw stored fields. Returns `None` unless there are exactly four.
    pub(crate) fn from_fields<'a, I>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut it = fields.into_iter();
        let expense = Self {
            timestamp: it.next()?.to_string(),
            description: it.next()?.to_string(),
            amount: it.next()?.to_string(),
            category: it.next()?.to_string(),
        };
        if it.next().is_some() {
            return None;
        }
        Some(expense)
    }

    pub(crate) fn fields(&self) -> [&str; 4] {
        [
            &self.timestamp,
            &self.description,
            &self.amount,
            &self.category,
        ]
    }

    pub(crate) fn amount_value(&self) -> LedgerResult<Decimal> {
        parse_decimal(&self.amount)
            .ok_or_else(|| LedgerError::Parse(format!("amount '{}'", self.amount)))
    }

    pub(crate) fn timestamp_value(&self) -> LedgerResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.timestamp.trim(), TIMESTAMP_FORMAT)
            .map_err(|_| LedgerError::Parse(format!("timestamp '{}'", self.timestamp)))
    }

    /// Date portion of the timestamp; the time of day is ignored.
    pub(crate) fn date(&self) -> LedgerResult<NaiveDate> {
        let date_part = self.timestamp.split_whitespace().next().unwrap_or("");
        NaiveDate::parse_from_str(date_part, DATE_FORMAT)
            .map_err(|_| LedgerError::Parse(format!("date '{}'", self.timestamp)))
    }

    /// Full-tuple equality as used for deletion. Amounts also match when both
    /// sides parse to the same value, so `500` and `500.0` are the same row.
    pub(crate) fn matches(&self, other: &Expense) -> bool {
        self.timestamp == other.timestamp
            && self.description == other.description
            && self.category == other.category
            && (self.amount == other.amount
                || matches!(
                    (parse_decimal(&self.amount), parse_decimal(&other.amount)),
                    (Some(a), Some(b)) if a == b
                ))
    }
}

/// Parse user or stored numeric text. Accepts plain and scientific notation.
pub(crate) fn parse_decimal(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}
