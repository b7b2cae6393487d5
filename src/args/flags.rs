use std::num::NonZero;

use {
    anyhow::Context,
    bstr::ByteSlice,
    jiff::{civil, fmt::strtime},
};

use crate::{args::Usage, parse::FromBytes};

/// Provides formatting for the dates Cadence prints.
#[derive(Clone, Debug, Default)]
pub enum Format {
    /// `YYYY-MM-DD`. This is also how dates are keyed in calendar grids.
    #[default]
    Key,
    /// A friendly long form, e.g., `July 26, 2024`.
    Display,
    /// Formats via `strftime`.
    Strtime(Box<str>),
}

impl Format {
    pub const USAGE: Usage = Usage::flag(
        "-f/--format <kind>",
        "Print dates in this format.",
        r#"
Print dates in this format.

The legal values for this flag are: `key` (default), `display` or a
`strftime`-style string.

Here are some examples of each type of format:

key: `2024-07-26`

display: `July 26, 2024`

Otherwise, an `strftime`-style format string may be given. For example,
`%a %b %-d` prints `Fri Jul 26`. Only conversion specifiers that apply to a
date (not a time or a time zone) may be used.
"#,
    );

    pub fn format(&self, date: civil::Date) -> anyhow::Result<String> {
        match *self {
            Format::Key => Ok(date.to_string()),
            Format::Display => Ok(strtime::format("%B %-d, %Y", date)?),
            Format::Strtime(ref fmt) => {
                strtime::format(&**fmt, date).with_context(|| {
                    format!("formatting date `{date}` for format {self} failed")
                })
            }
        }
    }
}

impl std::str::FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Format> {
        Ok(match s {
            "key" => Format::Key,
            "display" => Format::Display,
            unk => {
                if unk.contains('%') {
                    Format::Strtime(unk.into())
                } else {
                    anyhow::bail!("unrecognized format `{}`", unk)
                }
            }
        })
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Format::Key => write!(f, "key"),
            Format::Display => write!(f, "display"),
            Format::Strtime(ref fmt) => write!(f, "`{fmt}`"),
        }
    }
}

/// Provides parsing for Jiff's civil `Weekday` type.
///
/// This accepts full English names, common abbreviations and the two letter
/// codes used by RFC 5545.
#[derive(Clone, Copy, Debug)]
pub struct Weekday {
    weekday: civil::Weekday,
}

impl Weekday {
    /// Return the parsed weekday.
    pub fn get(&self) -> civil::Weekday {
        self.weekday
    }
}

impl From<civil::Weekday> for Weekday {
    fn from(weekday: civil::Weekday) -> Weekday {
        Weekday { weekday }
    }
}

impl std::str::FromStr for Weekday {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Weekday> {
        Weekday::from_bytes(s.as_bytes())
    }
}

impl FromBytes for Weekday {
    type Err = anyhow::Error;

    fn from_bytes(s: &[u8]) -> anyhow::Result<Weekday> {
        use jiff::civil::Weekday::*;

        let weekday = match &*s.to_ascii_lowercase() {
            b"sunday" | b"sun" | b"su" => Sunday,
            b"monday" | b"mon" | b"mo" => Monday,
            b"tuesday" | b"tues" | b"tue" | b"tu" => Tuesday,
            b"wednesday" | b"wed" | b"we" => Wednesday,
            b"thursday" | b"thurs" | b"thu" | b"th" => Thursday,
            b"friday" | b"fri" | b"fr" => Friday,
            b"saturday" | b"sat" | b"sa" => Saturday,
            unk => anyhow::bail!(
                "unrecognized weekday: `{unk}`",
                unk = unk.as_bstr()
            ),
        };
        Ok(Weekday { weekday })
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use jiff::civil::Weekday::*;

        let label = match self.get() {
            Sunday => "Sunday",
            Monday => "Monday",
            Tuesday => "Tuesday",
            Wednesday => "Wednesday",
            Thursday => "Thursday",
            Friday => "Friday",
            Saturday => "Saturday",
        };
        f.write_str(label)
    }
}

/// The maximum number of dates a command should print.
#[derive(Clone, Copy, Debug)]
pub struct Count {
    count: NonZero<usize>,
}

impl Count {
    pub const USAGE: Usage = Usage::flag(
        "-c/--count <number>",
        "Print at most this many occurrences (default: 12).",
        r#"
Print at most this many occurrences (default: 12).

The count must be greater than zero.

This flag cannot be combined with `-u/--until`.
"#,
    );

    const DEFAULT: NonZero<usize> = NonZero::new(12).unwrap();

    pub fn get(&self) -> NonZero<usize> {
        self.count
    }
}

impl Default for Count {
    fn default() -> Count {
        Count { count: Count::DEFAULT }
    }
}

impl std::str::FromStr for Count {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Count> {
        let count: usize = s
            .parse()
            .with_context(|| format!("failed to parse `{s}` as an integer"))?;
        let count = NonZero::new(count).ok_or_else(|| {
            anyhow::anyhow!("number of occurrences must be greater than 0")
        })?;
        Ok(Count { count })
    }
}
