use jiff::civil::Date;

/// The errors that schedule computations can report.
///
/// Every variant is local to a single call and recoverable by the caller.
/// Rendering a description never produces one of these. See
/// `pattern::describe`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// A frequency outside of weekly, monthly and quarterly was given.
    InvalidFrequency { given: String },
    /// Concrete dates were requested from a pattern that doesn't encode a
    /// weekday (and, for monthly or quarterly patterns, an ordinal).
    PatternNotAnchored { rule: String },
    /// A persisted rule string couldn't be interpreted.
    MalformedRule { rule: String, reason: String },
    /// Calendar arithmetic went past the range of dates Jiff supports.
    OutOfRange { date: Date },
}

impl ScheduleError {
    pub(crate) fn malformed(
        rule: &str,
        reason: impl Into<String>,
    ) -> ScheduleError {
        ScheduleError::MalformedRule {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ScheduleError::InvalidFrequency { ref given } => write!(
                f,
                "unrecognized frequency `{given}` \
                 (expected weekly, monthly or quarterly)",
            ),
            ScheduleError::PatternNotAnchored { ref rule } => write!(
                f,
                "recurrence rule `{rule}` has no anchor day, so no \
                 concrete dates can be computed from it \
                 (build it from an anchor date first)",
            ),
            ScheduleError::MalformedRule { ref rule, ref reason } => {
                write!(f, "malformed recurrence rule `{rule}`: {reason}")
            }
            ScheduleError::OutOfRange { date } => write!(
                f,
                "calendar arithmetic starting at {date} went outside \
                 the supported range of dates",
            ),
        }
    }
}

impl std::error::Error for ScheduleError {}
