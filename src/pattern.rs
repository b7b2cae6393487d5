use std::num::NonZero;

use {
    anyhow::Context,
    bstr::ByteSlice,
    jiff::{ToSpan, civil::Date},
};

use crate::{
    args::{Usage, flags},
    error::ScheduleError,
    parse::{BytesExt, FromBytes},
    rule::{Frequency, Rule},
};

/// What every description falls back to when there's nothing to describe.
pub const DOES_NOT_REPEAT: &str = "Does not repeat";

/// A normalized recurring schedule.
///
/// This is the thing that gets persisted. It is never mutated once built.
/// Changing any part of a schedule means building a new pattern.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecurrencePattern {
    rule: Rule,
    data_range: DataRange,
}

impl RecurrencePattern {
    pub const ARG: Usage = Usage::arg(
        "<pattern>",
        "A recurrence rule, e.g., `FREQ=WEEKLY;BYDAY=FR`, or a JSON record.",
        r#"
A recurring schedule.

This is either an RFC 5545 recurrence rule, or a JSON record as emitted by
`cadence rule build --json`.

The recurrence rules understood are:

`FREQ=WEEKLY;BYDAY=FR` for every Friday.

`FREQ=MONTHLY;BYDAY=2MO` for the second Monday of each month. The weekday
number may be 1, 2, 3 or -1 (for the last such weekday of the month).

`FREQ=MONTHLY;BYMONTH=1,4,7,10;BYDAY=-1TH` for the last Thursday of each
quarter.

An optional `RRULE:` prefix is accepted, and `BYDAY=MO;BYSETPOS=2` may be used
in place of `BYDAY=2MO`. A rule without a `BYDAY` part only names a frequency,
and no dates can be computed from it.

A JSON record looks like
`{"rrule":"FREQ=WEEKLY;BYDAY=FR","frequency":"weekly","dataRangeDays":30}`.
"#,
    );

    /// Builds a pattern for the given frequency.
    ///
    /// When an anchor date is given, the pattern fires on that date's
    /// weekday, and for monthly or quarterly frequencies, on the same
    /// ordinal occurrence of that weekday within the month. Without an
    /// anchor, the pattern only names its frequency.
    ///
    /// The data range defaults to 30 days.
    pub fn build(freq: Frequency, anchor: Option<Date>) -> RecurrencePattern {
        let rule = match anchor {
            None => Rule::unanchored(freq),
            Some(date) => Rule::anchored(freq, date),
        };
        RecurrencePattern { rule, data_range: DataRange::default() }
    }

    /// Wrap an already parsed rule with a default data range.
    pub fn from_rule(rule: Rule) -> RecurrencePattern {
        RecurrencePattern { rule, data_range: DataRange::default() }
    }

    /// Converts a persisted record back into a pattern.
    ///
    /// The record's frequency must agree with its rule.
    pub fn from_record(
        record: &PatternRecord,
    ) -> Result<RecurrencePattern, ScheduleError> {
        let freq = record.frequency.parse::<Frequency>()?;
        let rule = record.rrule.parse::<Rule>()?;
        if rule.frequency() != freq {
            return Err(ScheduleError::malformed(
                &record.rrule,
                format!(
                    "rule is {rule_freq}, but the record says {freq}",
                    rule_freq = rule.frequency(),
                ),
            ));
        }
        let data_range = DataRange::new(record.data_range_days)
            .map_err(|err| ScheduleError::malformed(&record.rrule, err))?;
        Ok(RecurrencePattern { rule, data_range })
    }

    /// Returns a copy of this pattern with a different data range.
    pub fn with_data_range(self, data_range: DataRange) -> RecurrencePattern {
        RecurrencePattern { data_range, ..self }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn frequency(&self) -> Frequency {
        self.rule.frequency()
    }

    pub fn data_range(&self) -> DataRange {
        self.data_range
    }

    /// Returns the record that should be persisted for this pattern.
    pub fn to_record(&self) -> PatternRecord {
        PatternRecord {
            rrule: self.rule.to_string(),
            frequency: self.frequency().as_str().to_string(),
            data_range_days: self.data_range.days(),
        }
    }

    /// Returns the inclusive range of days whose data an occurrence on the
    /// given date covers.
    ///
    /// The window is the `data_range` days immediately preceding the
    /// occurrence. The occurrence itself isn't included.
    pub fn data_window(
        &self,
        occurrence: Date,
    ) -> Result<(Date, Date), ScheduleError> {
        let days = i32::from(self.data_range.days());
        let out_of_range = |_| ScheduleError::OutOfRange { date: occurrence };
        let start = occurrence.checked_sub(days.days()).map_err(out_of_range)?;
        let end = occurrence.yesterday().map_err(out_of_range)?;
        Ok((start, end))
    }
}

impl FromBytes for RecurrencePattern {
    type Err = anyhow::Error;

    fn from_bytes(s: &[u8]) -> anyhow::Result<RecurrencePattern> {
        let s = s.trim_ascii();
        if s.starts_with(b"{") {
            let record: PatternRecord = serde_json::from_slice(s)
                .context("invalid JSON schedule record")?;
            return Ok(RecurrencePattern::from_record(&record)?);
        }
        let s = s.to_str().with_context(|| {
            format!("recurrence rule `{}` is not valid UTF-8", s.as_bstr())
        })?;
        Ok(RecurrencePattern::from_rule(s.parse()?))
    }
}

impl std::fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.rule, f)
    }
}

/// The persisted form of a `RecurrencePattern`.
///
/// Storage treats every field as opaque and hands it back unchanged. The
/// frequency is kept as a plain string so that records written by older
/// or buggier clients (for example, with `"none"`) can still be read and
/// described.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecord {
    pub rrule: String,
    pub frequency: String,
    pub data_range_days: u16,
}

/// Renders a pattern as a short sentence.
///
/// This never fails. Anything that isn't an anchored pattern is described
/// as "Does not repeat."
pub fn describe(pattern: Option<&RecurrencePattern>) -> String {
    let Some(pattern) = pattern else { return DOES_NOT_REPEAT.to_string() };
    let rule = pattern.rule();
    let Some(anchor) = rule.anchor() else {
        return DOES_NOT_REPEAT.to_string();
    };
    let weekday = flags::Weekday::from(anchor.weekday);
    match (rule.frequency(), anchor.ordinal) {
        (Frequency::Weekly, _) => format!("Every {weekday}"),
        (freq, Some(ordinal)) => format!(
            "The {ordinal} {weekday} of each {noun}",
            noun = freq.period_noun(),
        ),
        (_, None) => DOES_NOT_REPEAT.to_string(),
    }
}

/// Like `describe`, but for a raw persisted record.
///
/// Records that can't be interpreted at all, including ones with a
/// frequency of `"none"`, are described as "Does not repeat."
pub fn describe_record(record: &PatternRecord) -> String {
    match RecurrencePattern::from_record(record) {
        Ok(pattern) => describe(Some(&pattern)),
        Err(err) => {
            log::debug!("describing uninterpretable record: {err}");
            DOES_NOT_REPEAT.to_string()
        }
    }
}

/// Like `describe`, but for arbitrary user input.
///
/// The input may be a rule or a JSON record. Nothing about the input is
/// required to be valid.
pub fn describe_bytes(input: &[u8]) -> String {
    let input = input.trim_ascii();
    if input.starts_with(b"{") {
        return match serde_json::from_slice::<PatternRecord>(input) {
            Ok(record) => describe_record(&record),
            Err(err) => {
                log::debug!("describing unparseable JSON record: {err}");
                DOES_NOT_REPEAT.to_string()
            }
        };
    }
    match input.parse::<RecurrencePattern>() {
        Ok(pattern) => describe(Some(&pattern)),
        Err(err) => {
            log::debug!("describing unparseable rule: {err:#}");
            DOES_NOT_REPEAT.to_string()
        }
    }
}

/// One choice in a "repeat" selector.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct RepeatOption {
    /// `None` means "does not repeat."
    pub frequency: Option<Frequency>,
    pub label: String,
}

/// Returns the repeat choices to offer for a selected date.
///
/// Without a date, the choices are generic. With a date, each choice is
/// labeled with the description of the pattern it would build.
pub fn repeat_options(anchor: Option<Date>) -> Vec<RepeatOption> {
    let mut options = vec![RepeatOption {
        frequency: None,
        label: DOES_NOT_REPEAT.to_string(),
    }];
    for freq in Frequency::ALL {
        let label = match anchor {
            None => format!("Every {}", freq.period_noun()),
            Some(date) => {
                describe(Some(&RecurrencePattern::build(freq, Some(date))))
            }
        };
        options.push(RepeatOption { frequency: Some(freq), label });
    }
    options
}

/// The number of trailing days of data each occurrence covers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DataRange(NonZero<u16>);

impl DataRange {
    pub const USAGE: Usage = Usage::flag(
        "-r/--data-range <days>",
        "The number of days of data each occurrence covers (default: 30).",
        r#"
The number of days of data each occurrence covers.

This must be a positive number of days. The data covered by an occurrence is
always the given number of days immediately preceding it. The default is 30.

Use `cadence rule ranges` to see the commonly offered choices.
"#,
    );

    /// The data ranges commonly offered to users, with their labels.
    pub const PRESETS: [(u16, &'static str); 6] = [
        (7, "Data from the previous week"),
        (30, "Data from the previous month"),
        (60, "Data from the previous 2 months"),
        (90, "Data from the previous quarter"),
        (180, "Data from the previous 2 quarters"),
        (365, "Data from the previous year"),
    ];

    const DEFAULT_DAYS: NonZero<u16> = NonZero::new(30).unwrap();

    pub fn new(days: u16) -> Result<DataRange, String> {
        NonZero::new(days)
            .map(DataRange)
            .ok_or_else(|| "data range must be at least 1 day".to_string())
    }

    pub fn days(&self) -> u16 {
        self.0.get()
    }

    /// Returns the preset label for this range, if it is a preset.
    pub fn label(&self) -> Option<&'static str> {
        DataRange::PRESETS
            .iter()
            .find(|&&(days, _)| days == self.days())
            .map(|&(_, label)| label)
    }
}

impl Default for DataRange {
    fn default() -> DataRange {
        DataRange(DataRange::DEFAULT_DAYS)
    }
}

impl std::str::FromStr for DataRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<DataRange> {
        let days = s.parse::<u16>().with_context(|| {
            format!("failed to parse `{s}` as a number of days")
        })?;
        DataRange::new(days).map_err(anyhow::Error::msg)
    }
}

impl std::fmt::Display for DataRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.days())
    }
}
