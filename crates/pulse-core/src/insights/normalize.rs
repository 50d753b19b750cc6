//! Feed Normalizer
//!
//! Turns raw transactions into feed entries the analyzers can bucket:
//! - a canonical merchant label
//! - a category tone from an explicit lookup table
//! - the date parsed into the user's local offset
//!
//! Records with a negative amount or an unreadable date are dropped here and
//! reported back as [`SkippedRecord`]s; they take no part in any aggregation.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use regex::Regex;

use crate::models::Transaction;

use super::types::{SkipReason, SkippedRecord, Tone};

/// Merchant label when a transaction has neither description nor category
pub const UNKNOWN_MERCHANT: &str = "Unknown";

/// Built-in category keyword -> tone table
const BUILTIN_TONES: &[(&str, Tone)] = &[
    ("groceries", Tone::Emerald),
    ("food", Tone::Emerald),
    ("savings", Tone::Emerald),
    ("dining", Tone::Rose),
    ("health", Tone::Rose),
    ("entertainment", Tone::Violet),
    ("education", Tone::Violet),
    ("shopping", Tone::Violet),
    ("transport", Tone::Sky),
    ("travel", Tone::Sky),
];

/// Full weekday names, Monday first
const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_monday() as usize]
}

/// Lower-cased keyword -> tone lookup
#[derive(Debug, Clone, PartialEq)]
pub struct ToneTable {
    entries: BTreeMap<String, Tone>,
}

impl Default for ToneTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ToneTable {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_TONES
                .iter()
                .map(|(keyword, tone)| (keyword.to_string(), *tone))
                .collect(),
        }
    }

    /// Built-in table with extra entries layered on top (extras win)
    pub fn with_extra(extra: &BTreeMap<String, Tone>) -> Self {
        let mut table = Self::builtin();
        for (keyword, tone) in extra {
            table.entries.insert(keyword.to_lowercase(), *tone);
        }
        table
    }

    pub fn lookup(&self, keyword: &str) -> Option<Tone> {
        self.entries.get(&keyword.to_lowercase()).copied()
    }

    /// Category first, then merchant label, else emerald
    pub fn tone_for(&self, category: &str, merchant: &str) -> Tone {
        self.lookup(category)
            .or_else(|| self.lookup(merchant))
            .unwrap_or(Tone::Emerald)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn whitespace_re() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Canonical merchant label: description, else category, else "Unknown",
/// trimmed with internal whitespace collapsed
pub fn merchant_label(tx: &Transaction) -> String {
    let raw = tx
        .description()
        .or_else(|| tx.category())
        .unwrap_or(UNKNOWN_MERCHANT);
    whitespace_re().replace_all(raw.trim(), " ").into_owned()
}

/// Parse a transaction date into `offset`.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` (taken as local)
/// and bare `YYYY-MM-DD` (local midnight).
pub fn parse_date(raw: &str, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(offset));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    offset.from_local_datetime(&naive).single()
}

/// A transaction that passed validation, with its derived fields
#[derive(Debug, Clone)]
pub struct FeedEntry<'a> {
    /// Position in the input feed
    pub index: usize,
    pub tx: &'a Transaction,
    pub merchant: String,
    /// Category with "Uncategorized" default applied
    pub category: &'a str,
    pub tone: Tone,
    /// Local date; `None` when the record carried no date
    pub date: Option<DateTime<FixedOffset>>,
}

impl FeedEntry<'_> {
    pub fn weekday(&self) -> Option<&'static str> {
        self.date.map(|d| weekday_name(d.weekday()))
    }
}

/// Validated feed in input order
#[derive(Debug, Clone, Default)]
pub struct NormalizedFeed<'a> {
    pub entries: Vec<FeedEntry<'a>>,
    pub skipped: Vec<SkippedRecord>,
}

impl<'a> NormalizedFeed<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn expenses(&self) -> impl Iterator<Item = &FeedEntry<'a>> {
        self.entries.iter().filter(|e| e.tx.is_expense())
    }
}

/// Validates and labels transactions for one analysis run
pub struct FeedNormalizer<'t> {
    tones: &'t ToneTable,
    offset: FixedOffset,
}

impl<'t> FeedNormalizer<'t> {
    pub fn new(tones: &'t ToneTable, offset: FixedOffset) -> Self {
        Self { tones, offset }
    }

    pub fn normalize<'a>(&self, transactions: &'a [Transaction]) -> NormalizedFeed<'a> {
        let mut feed = NormalizedFeed::default();

        for (index, tx) in transactions.iter().enumerate() {
            match self.normalize_one(index, tx) {
                Ok(entry) => feed.entries.push(entry),
                Err(reason) => feed.skipped.push(SkippedRecord {
                    index,
                    id: tx.id.clone(),
                    reason,
                    detail: None,
                }),
            }
        }

        tracing::debug!(
            accepted = feed.entries.len(),
            skipped = feed.skipped.len(),
            "Feed normalized"
        );

        feed
    }

    fn normalize_one<'a>(
        &self,
        index: usize,
        tx: &'a Transaction,
    ) -> std::result::Result<FeedEntry<'a>, SkipReason> {
        if !tx.amount.is_finite() {
            return Err(SkipReason::NonFiniteAmount);
        }
        if tx.amount < 0.0 {
            return Err(SkipReason::NegativeAmount);
        }

        let date = match tx.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_date(raw, &self.offset).ok_or(SkipReason::MalformedDate)?),
        };

        let merchant = merchant_label(tx);
        let category = tx.category_or_default();
        let tone = self.tones.tone_for(category, &merchant);

        Ok(FeedEntry {
            index,
            tx,
            merchant,
            category,
            tone,
            date,
        })
    }
}
