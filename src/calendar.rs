use jiff::{ToSpan, civil::Date};

use crate::error::ScheduleError;

/// The column headers of a month grid, starting on Sunday.
pub fn weekday_labels() -> [&'static str; 7] {
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
}

/// A single day in a month grid.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: Date,
    /// Always `YYYY-MM-DD`.
    pub date_key: String,
    pub in_current_month: bool,
    pub is_today: bool,
}

/// Six full weeks covering a month, suitable for display as a calendar.
///
/// The grid starts on the Sunday on or before the first of the month, so it
/// usually includes some trailing days of the previous month and some
/// leading days of the next one.
#[derive(Clone, Debug)]
pub struct MonthGrid {
    first: Date,
    cells: Vec<CalendarCell>,
}

impl MonthGrid {
    /// The number of cells in every grid.
    pub const LEN: usize = 42;

    pub fn first_of_month(&self) -> Date {
        self.first
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    /// Returns the grid's rows, each of which has exactly 7 cells starting on
    /// a Sunday.
    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarCell> {
        self.cells.chunks(7)
    }
}

/// Builds the month grid for the month containing `reference`.
///
/// `today` is only used to mark the cell for the current day, if it's in
/// the grid at all.
pub fn month_grid(
    reference: Date,
    today: Date,
) -> Result<MonthGrid, ScheduleError> {
    let out_of_range = |_| ScheduleError::OutOfRange { date: reference };
    let first = reference.first_of_month();
    let back = i32::from(first.weekday().to_sunday_zero_offset());
    let start = first.checked_sub(back.days()).map_err(out_of_range)?;
    let cells: Vec<CalendarCell> = start
        .series(1.day())
        .take(MonthGrid::LEN)
        .map(|date| CalendarCell {
            date,
            date_key: date.to_string(),
            in_current_month: date.year() == first.year()
                && date.month() == first.month(),
            is_today: date == today,
        })
        .collect();
    if cells.len() != MonthGrid::LEN {
        return Err(ScheduleError::OutOfRange { date: reference });
    }
    Ok(MonthGrid { first, cells })
}
