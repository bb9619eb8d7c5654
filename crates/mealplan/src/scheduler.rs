use chrono::Weekday;
use mealcal_recipe::{REPEATABLE_CATEGORY, RecipeBook, RecipeGroup, RecipeItem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::calendar::MonthCalendar;
use crate::pool::{GroupId, RecipePool};
use crate::{MealPlanError, MealPlanResult};

/// A weekday that always gets a fixed label instead of a drawn recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedDay {
    pub weekday: Weekday,
    pub label: String,
}

impl FixedDay {
    pub fn new(weekday: Weekday, label: impl Into<String>) -> Self {
        Self {
            weekday,
            label: label.into(),
        }
    }
}

/// When a repeatable group that was just served goes straight back into the draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmissionPolicy {
    /// Groups with this category are eligible.
    pub category: String,
    /// A roll at or below this value re-admits.
    pub threshold: u32,
    /// Rolls are uniform over `0..=roll_max`.
    pub roll_max: u32,
    /// Minimum number of active groups left for re-admission to happen.
    pub min_pool: usize,
}

impl Default for ReadmissionPolicy {
    fn default() -> Self {
        Self {
            category: REPEATABLE_CATEGORY.to_owned(),
            threshold: 40,
            roll_max: 100,
            min_pool: 3,
        }
    }
}

impl ReadmissionPolicy {
    /// Decides whether `group` goes back into the pool.
    ///
    /// Other categories never consume a roll. Neither does a group emptied by
    /// the draw that just happened: it is retired without rolling, so the
    /// random stream skips the roll a roll-first ordering would spend there.
    pub fn should_readmit<R: Rng + ?Sized>(
        &self,
        group: &RecipeGroup,
        remaining: usize,
        rng: &mut R,
    ) -> bool {
        if group.is_exhausted() || !group.is_category(&self.category) {
            return false;
        }

        let roll = rng.random_range(0..=self.roll_max);
        roll <= self.threshold && remaining >= self.min_pool
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub first_weekday: Weekday,
    pub fixed_days: Vec<FixedDay>,
    pub readmission: ReadmissionPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Sun,
            fixed_days: vec![
                FixedDay::new(Weekday::Thu, "Leftovers"),
                FixedDay::new(Weekday::Fri, "Out"),
            ],
            readmission: ReadmissionPolicy::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn fixed_label(&self, weekday: Weekday) -> Option<&str> {
        self.fixed_days
            .iter()
            .find(|fixed| fixed.weekday == weekday)
            .map(|fixed| fixed.label.as_str())
    }
}

/// What a single calendar cell holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DayCell {
    /// Day outside the month.
    #[default]
    Blank,
    Fixed(String),
    Meal(RecipeItem),
}

impl DayCell {
    pub fn is_blank(&self) -> bool {
        matches!(self, DayCell::Blank)
    }

    pub fn meal(&self) -> Option<&RecipeItem> {
        match self {
            DayCell::Meal(item) => Some(item),
            _ => None,
        }
    }

    /// Display name; `None` for blank days.
    pub fn name(&self) -> Option<&str> {
        match self {
            DayCell::Blank => None,
            DayCell::Fixed(label) => Some(label.as_str()),
            DayCell::Meal(item) => Some(item.name.as_str()),
        }
    }
}

pub type GridWeek = [DayCell; 7];

/// A month's calendar with a cell assigned to every day.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    calendar: MonthCalendar,
    weeks: Vec<GridWeek>,
}

impl MonthGrid {
    pub fn calendar(&self) -> &MonthCalendar {
        &self.calendar
    }

    pub fn year(&self) -> i32 {
        self.calendar.year()
    }

    pub fn month(&self) -> u32 {
        self.calendar.month()
    }

    pub fn weeks(&self) -> &[GridWeek] {
        &self.weeks
    }

    pub fn week(&self, index: usize) -> Option<&GridWeek> {
        self.weeks.get(index)
    }

    pub fn first_week(&self) -> Option<&GridWeek> {
        self.weeks.first()
    }

    pub fn cell(&self, day: u32) -> Option<&DayCell> {
        self.days().find(|(d, _)| *d == day).map(|(_, cell)| cell)
    }

    /// In-month days with their cells, in calendar order.
    pub fn days(&self) -> impl Iterator<Item = (u32, &DayCell)> {
        self.calendar
            .weeks()
            .iter()
            .zip(&self.weeks)
            .flat_map(|(days, cells)| days.iter().zip(cells.iter()))
            .filter_map(|(day, cell)| day.map(|day| (day, cell)))
    }

    /// Drawn meals with their day of month.
    pub fn meals(&self) -> impl Iterator<Item = (u32, &RecipeItem)> {
        self.days()
            .filter_map(|(day, cell)| cell.meal().map(|item| (day, item)))
    }
}

/// Outcome of one draw from the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub group: GroupId,
    pub item: RecipeItem,
    pub readmitted: bool,
}

/// Fills a month's calendar with meals drawn from a recipe pool.
///
/// Each call to [`generate`](Self::generate) works on a fresh pool copied from
/// the scheduler's groups, and seeds its RNG from the month and year, so the
/// same inputs always produce the same grid.
#[derive(Debug, Clone)]
pub struct MonthScheduler {
    groups: Vec<RecipeGroup>,
    config: SchedulerConfig,
}

impl MonthScheduler {
    pub fn new(groups: Vec<RecipeGroup>, config: SchedulerConfig) -> Self {
        Self { groups, config }
    }

    pub fn from_book(book: RecipeBook, config: SchedulerConfig) -> Self {
        Self::new(book.into_groups(), config)
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn groups(&self) -> &[RecipeGroup] {
        &self.groups
    }

    pub fn generate(&self, month: u32, year: i32) -> MealPlanResult<MonthGrid> {
        let mut rng = StdRng::seed_from_u64(seed_for(year, month));
        self.generate_with_rng(month, year, &mut rng)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        month: u32,
        year: i32,
        rng: &mut R,
    ) -> MealPlanResult<MonthGrid> {
        let calendar = MonthCalendar::new(year, month, self.config.first_weekday)?;
        let mut pool = RecipePool::new(self.groups.clone());
        pool.shuffle(rng);

        let mut weeks = Vec::with_capacity(calendar.weeks().len());
        let mut drawn = 0usize;
        let mut readmitted = 0usize;

        for days in calendar.weeks() {
            let mut cells = GridWeek::default();

            for (column, day) in days.iter().enumerate() {
                let Some(day) = *day else {
                    continue;
                };

                if let Some(label) = self.config.fixed_label(calendar.weekday_at(column)) {
                    cells[column] = DayCell::Fixed(label.to_owned());
                    continue;
                }

                let draw = self
                    .draw(&mut pool, rng)?
                    .ok_or(MealPlanError::RecipesExhausted { year, month, day })?;

                drawn += 1;
                if draw.readmitted {
                    readmitted += 1;
                }

                cells[column] = DayCell::Meal(draw.item);
            }

            weeks.push(cells);
        }

        tracing::info!(year, month, drawn, readmitted, "generated month meal plan");

        Ok(MonthGrid { calendar, weeks })
    }

    /// Draws the next meal, resetting the pool first when it has run dry.
    ///
    /// Returns `Ok(None)` when every group is exhausted.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        pool: &mut RecipePool,
        rng: &mut R,
    ) -> MealPlanResult<Option<Draw>> {
        if pool.is_empty() {
            let retired = pool.reset();
            if retired > 0 {
                tracing::warn!(retired, "retired recipe groups with no items left");
            }
            pool.shuffle(rng);
        }

        let Some(group) = pool.pop_group() else {
            return Ok(None);
        };

        let item = pool.take_item(group).ok_or_else(|| {
            MealPlanError::PoolInvariant(format!(
                "group '{}' was active with no items",
                pool.group(group).category
            ))
        })?;

        let readmitted = self
            .config
            .readmission
            .should_readmit(pool.group(group), pool.len(), rng);

        if readmitted {
            tracing::debug!(
                category = %pool.group(group).category,
                meal = %item.name,
                "re-admitting repeatable group"
            );
            pool.readmit(group, true);
            pool.shuffle(rng);
        }

        Ok(Some(Draw {
            group,
            item,
            readmitted,
        }))
    }
}

/// RNG seed for a month; distinct for every `(year, month)` pair.
pub fn seed_for(year: i32, month: u32) -> u64 {
    (i64::from(year) * 100 + i64::from(month)) as u64
}
