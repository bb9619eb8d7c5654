use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::{MealPlanError, MealPlanResult};

/// One row of a month calendar; `None` marks a day outside the month.
pub type CalendarWeek = [Option<u32>; 7];

/// Week/day skeleton of a single month.
///
/// Weeks always have seven columns starting at `first_weekday`. Leading and
/// trailing columns that fall in the neighbouring months are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    year: i32,
    month: u32,
    first_weekday: Weekday,
    weeks: Vec<CalendarWeek>,
}

impl MonthCalendar {
    pub fn new(year: i32, month: u32, first_weekday: Weekday) -> MealPlanResult<Self> {
        let first = first_of_month(year, month)?;
        let days = days_in_month(year, month)?;

        let mut weeks = Vec::new();
        let mut week: CalendarWeek = [None; 7];
        let mut column = column_of(first_weekday, first.weekday());

        for day in 1..=days {
            week[column] = Some(day);
            column += 1;

            if column == 7 {
                weeks.push(week);
                week = [None; 7];
                column = 0;
            }
        }

        if column != 0 {
            weeks.push(week);
        }

        Ok(Self {
            year,
            month,
            first_weekday,
            weeks,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    pub fn weeks(&self) -> &[CalendarWeek] {
        &self.weeks
    }

    pub fn days_in_month(&self) -> u32 {
        self.weeks.iter().flatten().flatten().count() as u32
    }

    pub fn first_weekday_of_month(&self) -> Weekday {
        self.weekday_at(self.column_of_first())
    }

    /// Weekday of the given column (0..7).
    pub fn weekday_at(&self, column: usize) -> Weekday {
        weekday_at(self.first_weekday, column)
    }

    pub fn weekday_of(&self, day: u32) -> MealPlanResult<Weekday> {
        Ok(self.date_of(day)?.weekday())
    }

    pub fn date_of(&self, day: u32) -> MealPlanResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day).ok_or(MealPlanError::InvalidDay {
            year: self.year,
            month: self.month,
            day,
        })
    }

    /// Row of the calendar the given day falls in.
    pub fn week_index_of_day(&self, day: u32) -> MealPlanResult<usize> {
        self.date_of(day)?;
        Ok((day as usize - 1 + self.column_of_first()) / 7)
    }

    fn column_of_first(&self) -> usize {
        self.weeks
            .first()
            .and_then(|week| week.iter().position(Option::is_some))
            .unwrap_or_default()
    }
}

impl fmt::Display for MonthCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = (0..7)
            .map(|column| {
                let name = self.weekday_at(column).to_string();
                name.chars().take(2).collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "{header}")?;

        for week in &self.weeks {
            let line = week
                .iter()
                .map(|day| match day {
                    Some(day) => format!("{day:2}"),
                    None => "  ".to_owned(),
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

/// Column a weekday occupies in a week that starts on `first_weekday`.
pub fn column_of(first_weekday: Weekday, weekday: Weekday) -> usize {
    ((7 + weekday.num_days_from_monday() - first_weekday.num_days_from_monday()) % 7) as usize
}

pub fn weekday_at(first_weekday: Weekday, column: usize) -> Weekday {
    (0..column % 7).fold(first_weekday, |weekday, _| weekday.succ())
}

/// The month after `(year, month)`, rolling December over into January.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn days_in_month(year: i32, month: u32) -> MealPlanResult<u32> {
    let (next_year, next) = next_month(year, month);
    first_of_month(year, month)?;

    first_of_month(next_year, next)?
        .pred_opt()
        .map(|last| last.day())
        .ok_or(MealPlanError::InvalidMonth { year, month })
}

fn first_of_month(year: i32, month: u32) -> MealPlanResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(MealPlanError::InvalidMonth { year, month })
}
