use jiff::civil::{Date, Weekday};

use crate::{
    args::{Usage, flags},
    error::ScheduleError,
};

/// How often a schedule repeats.
///
/// Quarterly schedules are always aligned to calendar quarters. That is,
/// they only ever fire in January, April, July and October.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
}

impl Frequency {
    pub const USAGE: Usage = Usage::arg(
        "<frequency>",
        "How often the schedule repeats: weekly, monthly or quarterly.",
        r#"
How often the schedule repeats.

Valid values are (without regard for case):

weekly, week, wk, w

monthly, month, mo

quarterly, quarter, qtr, q

Quarterly schedules are aligned to calendar quarters. That is, they only
occur in January, April, July and October.
"#,
    );

    /// All frequencies, in the order they are offered to users.
    pub const ALL: [Frequency; 3] =
        [Frequency::Weekly, Frequency::Monthly, Frequency::Quarterly];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
        }
    }

    /// The number of months between occurrences.
    ///
    /// Weekly schedules aren't measured in months, so this returns `None`
    /// for them.
    pub fn months(&self) -> Option<i32> {
        match *self {
            Frequency::Weekly => None,
            Frequency::Monthly => Some(1),
            Frequency::Quarterly => Some(3),
        }
    }

    /// The noun used when describing one period of this frequency.
    pub fn period_noun(&self) -> &'static str {
        match *self {
            Frequency::Weekly => "week",
            Frequency::Monthly => "month",
            Frequency::Quarterly => "quarter",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Frequency, ScheduleError> {
        use self::Frequency::*;

        let freq = match &*s.to_lowercase() {
            "weekly" | "week" | "wk" | "w" => Weekly,
            "monthly" | "month" | "mo" => Monthly,
            "quarterly" | "quarter" | "qtr" | "q" => Quarterly,
            _ => {
                return Err(ScheduleError::InvalidFrequency {
                    given: s.to_string(),
                });
            }
        };
        Ok(freq)
    }
}

impl serde::Serialize for Frequency {
    fn serialize<S: serde::Serializer>(
        &self,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which occurrence of a weekday within its month a date is.
///
/// There is deliberately no "fourth" or "fifth." Any date past the 21st of
/// a month is treated as the last occurrence of its weekday.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Ordinal {
    First,
    Second,
    Third,
    Last,
}

impl Ordinal {
    /// Returns the ordinal for the given day of the month.
    ///
    /// This is `ceil(day / 7)`, where everything after the third week is
    /// mapped to `Last`.
    pub fn of_day(day: i8) -> Ordinal {
        match (day + 6) / 7 {
            0 | 1 => Ordinal::First,
            2 => Ordinal::Second,
            3 => Ordinal::Third,
            _ => Ordinal::Last,
        }
    }

    /// Returns this ordinal as an RFC 5545 weekday number. `Last` is `-1`.
    pub fn nth(&self) -> i8 {
        match *self {
            Ordinal::First => 1,
            Ordinal::Second => 2,
            Ordinal::Third => 3,
            Ordinal::Last => -1,
        }
    }

    fn from_nth(nth: i8) -> Option<Ordinal> {
        match nth {
            1 => Some(Ordinal::First),
            2 => Some(Ordinal::Second),
            3 => Some(Ordinal::Third),
            -1 => Some(Ordinal::Last),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Ordinal::First => "first",
            Ordinal::Second => "second",
            Ordinal::Third => "third",
            Ordinal::Last => "last",
        }
    }
}

impl std::fmt::Display for Ordinal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recurrence rule in the small subset of RFC 5545 that schedules use.
///
/// The canonical encodings are:
///
/// * `FREQ=WEEKLY;BYDAY=FR`
/// * `FREQ=MONTHLY;BYDAY=2MO` (`-1MO` for the last Monday)
/// * `FREQ=MONTHLY;BYMONTH=1,4,7,10;BYDAY=-1TH` for quarterly rules
///
/// Without a `BYDAY` part, a rule is "unanchored." It only names a
/// frequency.
///
/// Weekly rules never carry an ordinal. A monthly or quarterly rule may be
/// parsed with a weekday but no ordinal, in which case it is treated as
/// unanchored too.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Rule {
    freq: Frequency,
    weekday: Option<Weekday>,
    ordinal: Option<Ordinal>,
}

/// The concrete day a rule fires on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Anchor {
    pub weekday: Weekday,
    /// Always `None` for weekly rules and always `Some` otherwise.
    pub ordinal: Option<Ordinal>,
}

impl Rule {
    /// A rule naming only a frequency.
    pub fn unanchored(freq: Frequency) -> Rule {
        Rule { freq, weekday: None, ordinal: None }
    }

    /// A rule whose weekday (and, for monthly or quarterly rules, ordinal)
    /// is derived from the given date.
    pub fn anchored(freq: Frequency, date: Date) -> Rule {
        let ordinal = match freq {
            Frequency::Weekly => None,
            Frequency::Monthly | Frequency::Quarterly => {
                Some(Ordinal::of_day(date.day()))
            }
        };
        Rule { freq, weekday: Some(date.weekday()), ordinal }
    }

    pub fn frequency(&self) -> Frequency {
        self.freq
    }

    /// Returns the day this rule fires on, if it has one.
    pub fn anchor(&self) -> Option<Anchor> {
        let weekday = self.weekday?;
        match self.freq {
            Frequency::Weekly => Some(Anchor { weekday, ordinal: None }),
            Frequency::Monthly | Frequency::Quarterly => {
                let ordinal = self.ordinal?;
                Some(Anchor { weekday, ordinal: Some(ordinal) })
            }
        }
    }

    /// Like `anchor`, but returns an error when this rule isn't anchored.
    pub fn require_anchor(&self) -> Result<Anchor, ScheduleError> {
        self.anchor().ok_or_else(|| ScheduleError::PatternNotAnchored {
            rule: self.to_string(),
        })
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.freq {
            Frequency::Weekly => f.write_str("FREQ=WEEKLY")?,
            Frequency::Monthly => f.write_str("FREQ=MONTHLY")?,
            Frequency::Quarterly => {
                f.write_str("FREQ=MONTHLY;BYMONTH=1,4,7,10")?
            }
        }
        let Some(weekday) = self.weekday else { return Ok(()) };
        f.write_str(";BYDAY=")?;
        if let Some(ordinal) = self.ordinal {
            write!(f, "{}", ordinal.nth())?;
        }
        f.write_str(weekday_code(weekday))
    }
}

impl std::str::FromStr for Rule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Rule, ScheduleError> {
        let mut parts = RuleParts::default();
        let mut body = None;
        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if strip_prefix_ignore_case(line, "DTSTART").is_some() {
                ensure(
                    s,
                    parts.dtstart.is_none(),
                    "DTSTART is given more than once",
                )?;
                parts.dtstart = Some(parse_dtstart(s, line)?);
                continue;
            }
            ensure(s, body.is_none(), "expected exactly one RRULE line")?;
            body =
                Some(strip_prefix_ignore_case(line, "RRULE:").unwrap_or(line));
        }
        let body = body.unwrap_or("");

        for part in body.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let Some((key, value)) = part.split_once('=') else {
                return Err(ScheduleError::malformed(
                    s,
                    format!("expected `KEY=VALUE`, but found `{part}`"),
                ));
            };
            let value = value.trim();
            let key = key.trim().to_ascii_uppercase();
            let duplicate = match &*key {
                "FREQ" => parts.freq.replace(parse_freq(s, value)?).is_some(),
                "INTERVAL" => {
                    let interval = match value {
                        "1" => 1,
                        "3" => 3,
                        _ => {
                            return Err(ScheduleError::malformed(
                                s,
                                format!(
                                    "interval `{value}` is not supported \
                                     (expected 1, or 3 for quarterly rules)"
                                ),
                            ));
                        }
                    };
                    parts.interval.replace(interval).is_some()
                }
                "BYMONTH" => {
                    parts.by_month.replace(parse_by_month(s, value)?).is_some()
                }
                "BYDAY" => {
                    parts.by_day.replace(parse_by_day(s, value)?).is_some()
                }
                "BYSETPOS" => {
                    let pos = value.parse::<i8>().map_err(|_| {
                        ScheduleError::malformed(
                            s,
                            format!("invalid BYSETPOS value `{value}`"),
                        )
                    })?;
                    parts.by_set_pos.replace(pos).is_some()
                }
                "BYMONTHDAY" => {
                    return Err(ScheduleError::malformed(
                        s,
                        "day-of-month rules (BYMONTHDAY) are not supported, \
                         only weekday rules are",
                    ));
                }
                unk => {
                    return Err(ScheduleError::malformed(
                        s,
                        format!("unsupported rule part `{unk}`"),
                    ));
                }
            };
            ensure(
                s,
                !duplicate,
                format!("rule part `{key}` is given more than once"),
            )?;
        }
        parts.into_rule(s)
    }
}

/// The pieces of a rule as they were parsed, before they're checked for
/// consistency with one another.
#[derive(Debug, Default)]
struct RuleParts {
    /// `true` means `FREQ=MONTHLY`.
    freq: Option<bool>,
    /// Either 1 or 3. The latter is another way of writing a quarterly rule.
    interval: Option<u8>,
    /// Only `BYMONTH=1,4,7,10` is accepted.
    by_month: Option<()>,
    by_day: Option<(Option<i8>, Weekday)>,
    by_set_pos: Option<i8>,
    /// Only used to check that `INTERVAL=3` lines up with calendar quarters.
    dtstart: Option<Date>,
}

impl RuleParts {
    fn into_rule(self, s: &str) -> Result<Rule, ScheduleError> {
        let Some(monthly) = self.freq else {
            return Err(ScheduleError::malformed(s, "missing FREQ"));
        };
        let (nth, weekday) = match self.by_day {
            None => (None, None),
            Some((nth, weekday)) => (nth, Some(weekday)),
        };
        if !monthly {
            ensure(
                s,
                self.by_month.is_none(),
                "BYMONTH requires FREQ=MONTHLY",
            )?;
            ensure(
                s,
                self.by_set_pos.is_none(),
                "BYSETPOS requires FREQ=MONTHLY",
            )?;
            ensure(
                s,
                nth.is_none(),
                "numbered weekdays require FREQ=MONTHLY",
            )?;
            ensure(
                s,
                self.interval != Some(3),
                "INTERVAL=3 requires FREQ=MONTHLY",
            )?;
            return Ok(Rule { freq: Frequency::Weekly, weekday, ordinal: None });
        }

        if let (Some(3), Some(start)) = (self.interval, self.dtstart) {
            ensure(
                s,
                start.month() % 3 == 1,
                format!(
                    "INTERVAL=3 rules starting on {start} are not \
                     supported (quarterly rules fire in January, April, \
                     July and October)"
                ),
            )?;
        }
        let freq = if self.by_month.is_some() || self.interval == Some(3) {
            Frequency::Quarterly
        } else {
            Frequency::Monthly
        };
        let nth = match (nth, self.by_set_pos) {
            (Some(_), Some(_)) => {
                return Err(ScheduleError::malformed(
                    s,
                    "a numbered weekday cannot be combined with BYSETPOS",
                ));
            }
            (None, Some(_)) if weekday.is_none() => {
                return Err(ScheduleError::malformed(
                    s,
                    "BYSETPOS requires BYDAY",
                ));
            }
            (Some(nth), None) | (None, Some(nth)) => Some(nth),
            (None, None) => None,
        };
        let ordinal = match nth {
            None => None,
            Some(nth) => Some(Ordinal::from_nth(nth).ok_or_else(|| {
                ScheduleError::malformed(
                    s,
                    format!(
                        "weekday number `{nth}` is not supported \
                         (expected 1, 2, 3 or -1)"
                    ),
                )
            })?),
        };
        Ok(Rule { freq, weekday, ordinal })
    }
}

/// Parses the date in a line like `DTSTART:20240101T000000Z`.
///
/// Parameters such as `TZID` are ignored, along with the time of day.
fn parse_dtstart(s: &str, line: &str) -> Result<Date, ScheduleError> {
    let Some((_, value)) = line.rsplit_once(':') else {
        return Err(ScheduleError::malformed(
            s,
            format!("expected `DTSTART:VALUE`, but found `{line}`"),
        ));
    };
    let value = value.trim();
    let ymd = value.get(..8).unwrap_or(value);
    Date::strptime("%Y%m%d", ymd).map_err(|err| {
        ScheduleError::malformed(
            s,
            format!("invalid DTSTART value `{value}`: {err}"),
        )
    })
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    Some(&s[prefix.len()..])
}

fn parse_freq(s: &str, value: &str) -> Result<bool, ScheduleError> {
    match &*value.to_ascii_uppercase() {
        "WEEKLY" => Ok(false),
        "MONTHLY" => Ok(true),
        unk => Err(ScheduleError::malformed(
            s,
            format!("unsupported frequency `{unk}` (expected WEEKLY or MONTHLY)"),
        )),
    }
}

fn parse_by_month(s: &str, value: &str) -> Result<(), ScheduleError> {
    let mut months = vec![];
    for month in value.split(',') {
        let month = month.trim().parse::<i8>().map_err(|_| {
            ScheduleError::malformed(
                s,
                format!("invalid BYMONTH value `{month}`"),
            )
        })?;
        months.push(month);
    }
    months.sort();
    months.dedup();
    ensure(
        s,
        months == [1, 4, 7, 10],
        format!(
            "BYMONTH `{value}` is not supported \
             (only calendar quarters, 1,4,7,10, are)"
        ),
    )
}

fn parse_by_day(
    s: &str,
    value: &str,
) -> Result<(Option<i8>, Weekday), ScheduleError> {
    ensure(
        s,
        !value.contains(','),
        format!("BYDAY `{value}` must name exactly one weekday"),
    )?;
    let split = value.len().checked_sub(2).and_then(|at| {
        Some((value.get(..at)?, value.get(at..)?))
    });
    let Some((nth, code)) = split else {
        return Err(ScheduleError::malformed(
            s,
            format!("invalid BYDAY value `{value}`"),
        ));
    };
    let weekday = code
        .parse::<flags::Weekday>()
        .map_err(|err| ScheduleError::malformed(s, err.to_string()))?
        .get();
    if nth.is_empty() {
        return Ok((None, weekday));
    }
    let nth = nth.trim_start_matches('+').parse::<i8>().map_err(|_| {
        ScheduleError::malformed(
            s,
            format!("invalid weekday number `{nth}` in BYDAY `{value}`"),
        )
    })?;
    Ok((Some(nth), weekday))
}

/// Returns a malformed rule error with the given reason when `ok` is false.
fn ensure(
    s: &str,
    ok: bool,
    reason: impl Into<String>,
) -> Result<(), ScheduleError> {
    if ok { Ok(()) } else { Err(ScheduleError::malformed(s, reason)) }
}

/// Returns the RFC 5545 two letter code for a weekday.
fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => "SU",
        Weekday::Monday => "MO",
        Weekday::Tuesday => "TU",
        Weekday::Wednesday => "WE",
        Weekday::Thursday => "TH",
        Weekday::Friday => "FR",
        Weekday::Saturday => "SA",
    }
}
