use {
    bstr::{BStr, ByteSlice},
    jiff::{Zoned, civil::Date, fmt},
};

use crate::{
    NOW, TZ,
    args::{Usage, flags::Weekday},
    parse::{BytesExt, FromBytes},
};

static TEMPORAL_PARSER: fmt::temporal::DateTimeParser =
    fmt::temporal::DateTimeParser::new();

/// A calendar day parsed from user input.
///
/// Schedules only ever deal in civil dates. When a full datetime is given,
/// only its date in the system time zone (or in its own time zone, when it
/// carries one) is kept.
///
/// Days relative to "today" are computed against `NOW`, which may be
/// overridden with the `CADENCE_NOW` environment variable.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Day {
    date: Date,
}

impl Day {
    pub const ARG: Usage = Usage::arg(
        "<date>",
        "A date, e.g., `today`, `next fri` or `2024-07-19` (default: today).",
        r#"
A single date. When absent, today's date is used.

Cadence accepts a number of different formats for a date:

A subset of ISO 8601, e.g., `2024-07-19`.

RFC 9557, e.g., `2024-07-19T10:23:00-04:00[America/New_York]`. The date in the
datetime's own time zone is used.

RFC 3339, e.g., `2024-07-19T14:23:00Z`. The timestamp is converted to your
system's configured time zone (which may be overridden by the `TZ` environment
variable), and the date in that time zone is used.

Some special strings are supported as well:

`today` (or `now`) refers to the current date. It is computed once when
Cadence starts, or if the `CADENCE_NOW` environment variable is set, that time
is used instead.

`yesterday` refers to the day before today.

`tomorrow` refers to the day after today.

`this thurs` (or just `thurs`) refers to today (if it's a Thursday) or the
soonest date that falls on a Thursday.

`next saturday` refers to the next Saturday, up to 1 week in the future (if
today is a Saturday).

`last FRIDAY` refers to the previous Friday, up to 1 week in the past (if
today is a Friday).
"#,
    );

    /// Returns the current date in the system time zone.
    pub fn today() -> Day {
        Day { date: NOW.date() }
    }

    pub fn get(&self) -> Date {
        self.date
    }

    /// Parses a day, where relative days are interpreted relative to the
    /// zoned datetime given.
    ///
    /// The `FromBytes` impl is equivalent to calling this routine with
    /// `&crate::NOW`.
    pub fn parse_relative(relative: &Zoned, s: &[u8]) -> anyhow::Result<Day> {
        let s = s.trim_ascii();
        let temporal_parse_err = match TEMPORAL_PARSER.parse_zoned(s) {
            Err(err) => err,
            Ok(zdt) => return Ok(Day::from(zdt.date())),
        };
        if let Ok(ts) = TEMPORAL_PARSER.parse_timestamp(s) {
            return Ok(Day::from(ts.to_zoned(TZ.clone()).date()));
        }
        if let Ok(date) = TEMPORAL_PARSER.parse_date(s) {
            return Ok(Day::from(date));
        }
        if let Some(date) = parse_relative(relative.date(), s.as_bstr())? {
            return Ok(Day::from(date));
        }
        log::debug!(
            "failed to parse `{s}` as a zoned datetime: {temporal_parse_err}",
            s = s.as_bstr(),
        );
        anyhow::bail!("unrecognized date `{s}`", s = BStr::new(s))
    }
}

impl Default for Day {
    fn default() -> Day {
        Day::today()
    }
}

impl From<Date> for Day {
    fn from(date: Date) -> Day {
        Day { date }
    }
}

impl From<Day> for Date {
    fn from(day: Day) -> Date {
        day.date
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.date, f)
    }
}

impl std::str::FromStr for Day {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Day> {
        s.as_bytes().parse()
    }
}

impl FromBytes for Day {
    type Err = anyhow::Error;

    fn from_bytes(s: &[u8]) -> anyhow::Result<Day> {
        Day::parse_relative(&NOW, s)
    }
}

/// Tries to parse a day in `s` relative to the date given.
///
/// If one could not be found, then `None` is returned. If one is
/// definitively found, but it couldn't be computed (because it falls outside
/// of the supported range of dates), then an error is returned.
fn parse_relative(today: Date, s: &BStr) -> anyhow::Result<Option<Date>> {
    let lower = s.to_ascii_lowercase();
    match &*lower {
        b"now" | b"today" => return Ok(Some(today)),
        b"yesterday" => return Ok(Some(today.yesterday()?)),
        b"tomorrow" => return Ok(Some(today.tomorrow()?)),
        _ => {}
    }
    let (multiplier, weekday) = match lower.split_once_str(" ") {
        None => (0, lower.as_slice()),
        Some((first, rest)) => {
            let multiplier = match first {
                b"this" => 0,
                b"next" => 1,
                b"last" => -1,
                _ => return Ok(None),
            };
            (multiplier, rest.trim_ascii())
        }
    };
    let Ok(weekday) = weekday.parse::<Weekday>() else { return Ok(None) };
    relative_weekday(today, multiplier, weekday).map(Some)
}

/// Finds the next/previous weekday relative to the date given.
///
/// A zero multiplier returns `today` unchanged when it already falls on the
/// given weekday.
fn relative_weekday(
    today: Date,
    mut multiplier: i32,
    weekday: Weekday,
) -> anyhow::Result<Date> {
    if multiplier == 0 {
        if today.weekday() == weekday.get() {
            return Ok(today);
        }
        multiplier = 1;
    }
    Ok(today.nth_weekday(multiplier, weekday.get())?)
}
