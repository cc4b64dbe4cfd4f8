//! age.rs
//!
//! Calendar-aware interval breakdowns, rendered as:
//!     "X years, Y months and Z days"
//!
//! Chrono does not provide a built-in year/month/day diff (unlike Python's
//! relativedelta), so the breakdown walks the calendar by hand: whole years
//! first, then whole months from the advanced instant, then the remaining
//! flat day count.
//!
//! Month arithmetic clamps to the end of the target month, so this handles:
//!   • month-end anchors (Jan 31 + 1 month = Feb 28/29)
//!   • leap years
//!   • varying month lengths

use std::fmt;

use chrono::{DateTime, Datelike, Months, Utc};

/// Years, months and days between two instants, as non-negative magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntervalBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u64,
}

impl IntervalBreakdown {
    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// Human phrase, empty when every component is zero.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for IntervalBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.years > 0 {
            write!(f, "{} year{}", self.years, plural(self.years as u64))?;
        }

        if self.months > 0 {
            if self.years > 0 {
                f.write_str(if self.days > 0 { ", " } else { " and " })?;
            }
            write!(f, "{} month{}", self.months, plural(self.months as u64))?;
        }

        if self.days > 0 {
            if self.years > 0 || self.months > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{} day{}", self.days, plural(self.days))?;
        }

        Ok(())
    }
}

/// Breaks the gap between `later` and `earlier` into years, months and days.
///
/// The arguments may come in either order. Each component is computed with
/// its sign and only made absolute at the end, so when `earlier` is actually
/// the later instant the parts may not recombine to the exact gap across a
/// month-end.
pub fn compute_interval(later: DateTime<Utc>, earlier: DateTime<Utc>) -> IntervalBreakdown {
    let years = whole_months_between(later, earlier) / 12;
    let earlier = shift_months(earlier, years * 12);

    let months = whole_months_between(later, earlier);
    let earlier = shift_months(earlier, months);

    let days = (later - earlier).num_days();

    IntervalBreakdown {
        years: years.unsigned_abs(),
        months: months.unsigned_abs(),
        days: days.unsigned_abs(),
    }
}

/// Whole years from `earlier` to `later`, truncated toward zero.
pub fn whole_years_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i32 {
    whole_months_between(later, earlier) / 12
}

/// Next date sharing `reference`'s month and day, in `now`'s year or the one
/// after. A reference falling on today counts as today.
pub fn next_occurrence(reference: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let already_passed = reference.month() < now.month()
        || (reference.month() == now.month() && reference.day() < now.day());

    let year = if already_passed {
        now.year() + 1
    } else {
        now.year()
    };

    // Shifting by whole years keeps the time of day and turns Feb 29 into
    // Feb 28 when the target year is not a leap year.
    shift_months(reference, (year - reference.year()) * 12)
}

/// Whole calendar months from `earlier` to `later`, truncated toward zero.
/// Negative when `earlier` is after `later`.
///
/// The instant with the larger day of month is the one shifted, so month-end
/// clamping gives the same magnitude whichever way round the pair comes.
fn whole_months_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i32 {
    if later.day() < earlier.day() {
        return -months_back_to(earlier, later);
    }
    months_back_to(later, earlier)
}

/// Whole months to step `from` back to reach `to` without passing it,
/// truncated toward zero. Negative when `to` is after `from`.
fn months_back_to(from: DateTime<Utc>, to: DateTime<Utc>) -> i32 {
    let mut months =
        (from.year() - to.year()) * 12 + (from.month() as i32 - to.month() as i32);

    let anchor = shift_months(from, -months);
    if from >= to {
        if anchor < to {
            months -= 1;
        }
    } else if anchor > to {
        months += 1;
    }

    months
}

/// Moves `dt` by a signed number of calendar months, saturating at the ends
/// of chrono's range.
fn shift_months(dt: DateTime<Utc>, months: i32) -> DateTime<Utc> {
    let step = Months::new(months.unsigned_abs());
    if months >= 0 {
        dt.checked_add_months(step).unwrap_or(DateTime::<Utc>::MAX_UTC)
    } else {
        dt.checked_sub_months(step).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

fn plural(n: u64) -> &'static str {
    if n > 1 { "s" } else { "" }
}
