use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::calendar::{MonthCalendar, next_month};
use crate::scheduler::{GridWeek, MonthGrid};
use crate::{MealPlanError, MealPlanResult};

/// A week picked out of a month grid, used to build that week's shopping list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSelection {
    pub year: i32,
    pub month: u32,
    pub week_index: usize,
}

impl WeekSelection {
    /// The week containing `date`.
    pub fn current(date: NaiveDate, first_weekday: Weekday) -> MealPlanResult<Self> {
        let calendar = MonthCalendar::new(date.year(), date.month(), first_weekday)?;

        Ok(Self {
            year: date.year(),
            month: date.month(),
            week_index: calendar.week_index_of_day(date.day())?,
        })
    }

    /// The week containing the day seven days after `date`.
    pub fn next(date: NaiveDate, first_weekday: Weekday) -> MealPlanResult<Self> {
        let later = date
            .checked_add_days(Days::new(7))
            .ok_or(MealPlanError::InvalidDay {
                year: date.year(),
                month: date.month(),
                day: date.day(),
            })?;

        Self::current(later, first_weekday)
    }

    /// Month whose first week fills in the days past the end of this one.
    pub fn following_month(&self) -> (i32, u32) {
        next_month(self.year, self.month)
    }

    /// The selected week of `grid` and the first week of `following`.
    ///
    /// `grid` must be this selection's month and `following` the month after.
    pub fn resolve<'a>(
        &self,
        grid: &'a MonthGrid,
        following: &'a MonthGrid,
    ) -> MealPlanResult<(&'a GridWeek, &'a GridWeek)> {
        let (year, month) = self.following_month();
        if (grid.year(), grid.month()) != (self.year, self.month)
            || (following.year(), following.month()) != (year, month)
        {
            return Err(MealPlanError::GridMismatch(format!(
                "grids {}-{:02} and {}-{:02} do not match selection {}-{:02}",
                grid.year(),
                grid.month(),
                following.year(),
                following.month(),
                self.year,
                self.month
            )));
        }

        let week = grid
            .week(self.week_index)
            .ok_or(MealPlanError::WeekOutOfRange {
                year: self.year,
                month: self.month,
                week: self.week_index,
            })?;
        let fallback = following.first_week().ok_or(MealPlanError::InvalidMonth { year, month })?;

        Ok((week, fallback))
    }
}
