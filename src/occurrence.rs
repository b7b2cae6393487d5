use std::num::NonZero;

use jiff::{
    ToSpan,
    civil::{Date, Weekday},
};

use crate::{
    error::ScheduleError,
    pattern::RecurrencePattern,
    rule::{Anchor, Frequency, Ordinal},
};

/// Returns the first date on or after `reference` that the given pattern
/// fires on.
///
/// Weekly patterns fire on the nearest date with the pattern's weekday,
/// including `reference` itself. Monthly patterns fire on the ordinal
/// weekday of the reference month, or of the next month when that date has
/// already passed. Quarterly patterns work the same way, except that only
/// the first month of each calendar quarter is considered.
///
/// This returns an error when the pattern isn't anchored to a particular
/// day, or when the result would fall outside the range of dates that Jiff
/// supports.
pub fn next_occurrence(
    pattern: &RecurrencePattern,
    reference: Date,
) -> Result<Date, ScheduleError> {
    let anchor = pattern.rule().require_anchor()?;
    first_on_or_after(pattern.frequency(), anchor, reference)
}

/// Returns at most `max_count` occurrences of the given pattern, starting
/// with `next_occurrence(pattern, start)`.
///
/// The sequence is lazy and can be cloned to restart it. Each element is
/// an error only when calendar arithmetic runs off the end of the
/// supported range of dates, after which the sequence stops.
pub fn expand(
    pattern: &RecurrencePattern,
    start: Date,
    max_count: NonZero<usize>,
) -> Result<std::iter::Take<Occurrences>, ScheduleError> {
    Ok(Occurrences::new(pattern, start)?.take(max_count.get()))
}

/// A sequence of the dates a pattern fires on.
///
/// This is unbounded unless `Occurrences::until` is used. Otherwise, callers
/// are expected to bound it themselves, for example, with `Iterator::take`.
///
/// Each date is computed only when it is asked for.
#[derive(Clone, Debug)]
pub struct Occurrences {
    freq: Frequency,
    anchor: Anchor,
    state: State,
    until: Option<Date>,
}

#[derive(Clone, Copy, Debug)]
enum State {
    First(Date),
    After(Date),
    Done,
}

impl Occurrences {
    /// Creates a sequence whose first element is the first occurrence on or
    /// after `start`.
    pub fn new(
        pattern: &RecurrencePattern,
        start: Date,
    ) -> Result<Occurrences, ScheduleError> {
        let freq = pattern.frequency();
        let anchor = pattern.rule().require_anchor()?;
        let first = first_on_or_after(freq, anchor, start)?;
        Ok(Occurrences {
            freq,
            anchor,
            state: State::First(first),
            until: None,
        })
    }

    /// Stops this sequence after the last occurrence on or before `until`.
    ///
    /// A bounded sequence never yields an error. An occurrence that can't be
    /// computed is past the end of the supported range of dates, and thus
    /// also past `until`.
    pub fn until(self, until: Date) -> Occurrences {
        Occurrences { until: Some(until), ..self }
    }

    /// Returns the occurrence one period after the one given.
    fn after(&self, date: Date) -> Result<Date, ScheduleError> {
        let out_of_range = |_| ScheduleError::OutOfRange { date };
        let Some(months) = self.freq.months() else {
            return date.checked_add(1.week()).map_err(out_of_range);
        };
        let month = date
            .first_of_month()
            .checked_add(months.months())
            .map_err(out_of_range)?;
        in_month(month, self.anchor)
    }
}

impl Iterator for Occurrences {
    type Item = Result<Date, ScheduleError>;

    fn next(&mut self) -> Option<Result<Date, ScheduleError>> {
        let date = match std::mem::replace(&mut self.state, State::Done) {
            State::Done => return None,
            State::First(date) => date,
            State::After(prev) => match self.after(prev) {
                Ok(date) => date,
                Err(_) if self.until.is_some() => return None,
                Err(err) => return Some(Err(err)),
            },
        };
        if self.until.is_some_and(|until| date > until) {
            return None;
        }
        self.state = State::After(date);
        Some(Ok(date))
    }
}

impl std::iter::FusedIterator for Occurrences {}

fn first_on_or_after(
    freq: Frequency,
    anchor: Anchor,
    reference: Date,
) -> Result<Date, ScheduleError> {
    let out_of_range = |_| ScheduleError::OutOfRange { date: reference };
    let Some(months) = freq.months() else {
        return on_or_after(reference, anchor.weekday);
    };
    let period_start = match freq {
        Frequency::Quarterly => {
            let month = (reference.month() - 1) / 3 * 3 + 1;
            Date::new(reference.year(), month, 1).map_err(out_of_range)?
        }
        _ => reference.first_of_month(),
    };
    let candidate = in_month(period_start, anchor)?;
    if candidate >= reference {
        return Ok(candidate);
    }
    let next_period =
        period_start.checked_add(months.months()).map_err(out_of_range)?;
    in_month(next_period, anchor)
}

/// Returns the nearest date on or after `date` that falls on `weekday`.
fn on_or_after(date: Date, weekday: Weekday) -> Result<Date, ScheduleError> {
    if date.weekday() == weekday {
        return Ok(date);
    }
    date.nth_weekday(1, weekday)
        .map_err(|_| ScheduleError::OutOfRange { date })
}

/// Returns the anchor's day within the month containing `date`.
///
/// `Ordinal::Last` is the actual last occurrence of the weekday, which may be
/// the fourth or fifth one.
fn in_month(date: Date, anchor: Anchor) -> Result<Date, ScheduleError> {
    let nth = anchor.ordinal.unwrap_or(Ordinal::First).nth();
    date.nth_weekday_of_month(nth, anchor.weekday)
        .map_err(|_| ScheduleError::OutOfRange { date })
}
