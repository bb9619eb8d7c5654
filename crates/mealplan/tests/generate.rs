use std::collections::HashSet;

use chrono::{Datelike, Weekday};
use mealcal_mealplan::{
    DayCell, MealPlanError, MonthScheduler, ReadmissionPolicy, RecipePool, SchedulerConfig,
};
use mealcal_recipe::{REPEATABLE_CATEGORY, RecipeGroup, RecipeItem};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn group(category: &str, count: usize) -> RecipeGroup {
    RecipeGroup::new(
        category,
        (0..count)
            .map(|i| RecipeItem::new(format!("{category} #{i}")))
            .collect(),
    )
}

fn recipe_groups() -> Vec<RecipeGroup> {
    let mut groups: Vec<RecipeGroup> = [
        "Pasta", "Soup", "Tacos", "Curry", "Salad", "Stir Fry", "Pizza",
    ]
    .iter()
    .map(|category| group(category, 6))
    .collect();
    groups.push(group(REPEATABLE_CATEGORY, 6));
    groups
}

fn scheduler(groups: Vec<RecipeGroup>) -> MonthScheduler {
    MonthScheduler::new(groups, SchedulerConfig::default())
}

#[test]
fn every_day_gets_exactly_one_entry() -> anyhow::Result<()> {
    let scheduler = scheduler(recipe_groups());

    for month in 1..=12 {
        let grid = scheduler.generate(month, 2026)?;
        let calendar = grid.calendar();
        let mut seen_days = 0;
        let mut names = HashSet::new();

        for (days, cells) in calendar.weeks().iter().zip(grid.weeks()) {
            for (column, (day, cell)) in days.iter().zip(cells.iter()).enumerate() {
                let Some(day) = day else {
                    assert_eq!(cell, &DayCell::Blank);
                    continue;
                };
                seen_days += 1;

                match calendar.weekday_at(column) {
                    Weekday::Thu => assert_eq!(cell, &DayCell::Fixed("Leftovers".to_owned())),
                    Weekday::Fri => assert_eq!(cell, &DayCell::Fixed("Out".to_owned())),
                    weekday => {
                        let meal = cell.meal().unwrap_or_else(|| {
                            panic!("{month}/{day} ({weekday}) has no meal: {cell:?}")
                        });
                        // popped items never go back into the pool
                        assert!(names.insert(meal.name.clone()), "{} served twice", meal.name);
                    }
                }
            }
        }

        assert_eq!(seen_days, calendar.days_in_month());
        assert_eq!(grid.meals().count(), names.len());
    }

    Ok(())
}

#[test]
fn same_month_same_grid() -> anyhow::Result<()> {
    let scheduler = scheduler(recipe_groups());

    let first = scheduler.generate(10, 2026)?;
    let second = scheduler.generate(10, 2026)?;

    assert_eq!(first, second);

    let november: Vec<_> = scheduler
        .generate(11, 2026)?
        .meals()
        .map(|(_, item)| item.name.clone())
        .collect();
    let october: Vec<_> = first.meals().map(|(_, item)| item.name.clone()).collect();
    assert_ne!(october, november);

    Ok(())
}

#[test]
fn generation_leaves_scheduler_groups_untouched() -> anyhow::Result<()> {
    let groups = recipe_groups();
    let scheduler = scheduler(groups.clone());

    scheduler.generate(3, 2026)?;

    assert_eq!(scheduler.groups(), groups.as_slice());

    Ok(())
}

#[test]
fn small_pool_resets_mid_month() -> anyhow::Result<()> {
    let scheduler = scheduler(vec![group("Pasta", 20), group("Soup", 20)]);

    let grid = scheduler.generate(1, 2026)?;
    let meals: Vec<_> = grid.meals().collect();

    assert!(meals.len() > 2);
    // with two groups and no re-admission every pair of draws covers both
    for pair in meals.chunks(2).filter(|pair| pair.len() == 2) {
        let a = pair[0].1.name.split(" #").next();
        let b = pair[1].1.name.split(" #").next();
        assert_ne!(a, b);
    }

    Ok(())
}

#[test]
fn running_out_of_items_is_an_error() {
    let scheduler = scheduler(vec![group("Pasta", 3)]);

    let result = scheduler.generate(1, 2026);

    assert!(matches!(
        result,
        Err(MealPlanError::RecipesExhausted {
            year: 2026,
            month: 1,
            ..
        })
    ));
}

#[test]
fn invalid_month_is_an_error() {
    let scheduler = scheduler(recipe_groups());

    assert!(matches!(
        scheduler.generate(13, 2026),
        Err(MealPlanError::InvalidMonth { month: 13, .. })
    ));
}

#[test]
fn monday_first_calendar_moves_fixed_days() -> anyhow::Result<()> {
    let config = SchedulerConfig {
        first_weekday: Weekday::Mon,
        ..SchedulerConfig::default()
    };
    let scheduler = MonthScheduler::new(recipe_groups(), config);

    let grid = scheduler.generate(10, 2026)?;

    for (day, cell) in grid.days() {
        let weekday = grid.calendar().weekday_of(day)?;
        let fixed = matches!(weekday, Weekday::Thu | Weekday::Fri);
        assert_eq!(matches!(cell, DayCell::Fixed(_)), fixed, "day {day}");
    }
    assert_eq!(grid.calendar().weekday_at(0), Weekday::Mon);

    Ok(())
}

#[test]
fn no_group_repeats_within_a_cycle() -> anyhow::Result<()> {
    let scheduler = scheduler(vec![]);
    let groups: Vec<_> = ["A", "B", "C", "D", "E", "F"]
        .iter()
        .map(|c| group(c, 5))
        .collect();

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool = RecipePool::new(groups.clone());
        pool.shuffle(&mut rng);

        for _cycle in 0..4 {
            let mut drawn = HashSet::new();
            for _ in 0..groups.len() {
                let draw = scheduler.draw(&mut pool, &mut rng)?.expect("items left");
                assert!(drawn.insert(draw.group), "group drawn twice in a cycle");
            }
            assert!(pool.is_empty());
            assert_eq!(pool.scratch_len(), groups.len());
        }
    }

    Ok(())
}

#[test]
fn readmission_rate_is_about_forty_percent() -> anyhow::Result<()> {
    let scheduler = scheduler(vec![]);
    let mut groups: Vec<_> = ["A", "B", "C", "D"].iter().map(|c| group(c, 3)).collect();
    // last group is drawn first from an unshuffled pool
    groups.push(group(REPEATABLE_CATEGORY, 10));

    let trials = 5000;
    let mut readmitted = 0;

    for seed in 0..trials {
        let mut pool = RecipePool::new(groups.clone());
        let mut rng = StdRng::seed_from_u64(seed);

        let draw = scheduler.draw(&mut pool, &mut rng)?.expect("items left");
        assert_eq!(pool.group(draw.group).category, REPEATABLE_CATEGORY);

        if draw.readmitted {
            readmitted += 1;
            assert!(pool.is_active(draw.group));
            assert_eq!(pool.scratch_len(), 0);
            assert_eq!(pool.len(), 5);
        } else {
            assert!(!pool.is_active(draw.group));
            assert_eq!(pool.scratch_len(), 1);
        }
    }

    // rolls 0..=40 out of 0..=100
    let rate = readmitted as f64 / trials as f64;
    assert!((0.37..=0.44).contains(&rate), "re-admission rate {rate}");

    Ok(())
}

#[test]
fn emptied_repeatable_group_is_retired() -> anyhow::Result<()> {
    let config = SchedulerConfig {
        readmission: ReadmissionPolicy {
            threshold: 100,
            ..ReadmissionPolicy::default()
        },
        ..SchedulerConfig::default()
    };
    let scheduler = MonthScheduler::new(vec![], config);
    let mut groups: Vec<_> = ["A", "B", "C", "D"].iter().map(|c| group(c, 10)).collect();
    groups.push(group(REPEATABLE_CATEGORY, 1));

    let mut pool = RecipePool::new(groups);
    let mut rng = StdRng::seed_from_u64(11);

    let draw = scheduler.draw(&mut pool, &mut rng)?.expect("items left");
    assert_eq!(pool.group(draw.group).category, REPEATABLE_CATEGORY);
    assert!(!draw.readmitted);
    assert!(!pool.is_active(draw.group));

    for _ in 0..30 {
        let next = scheduler.draw(&mut pool, &mut rng)?.expect("items left");
        assert_ne!(next.group, draw.group);
        assert!(!pool.is_active(draw.group));
    }

    Ok(())
}

#[test]
fn repeatable_group_can_serve_twice_in_a_month() -> anyhow::Result<()> {
    let config = SchedulerConfig {
        fixed_days: vec![],
        readmission: ReadmissionPolicy {
            threshold: 100,
            ..ReadmissionPolicy::default()
        },
        ..SchedulerConfig::default()
    };
    let scheduler = MonthScheduler::new(recipe_groups(), config);

    let grid = scheduler.generate(7, 2026)?;
    let takeout = grid
        .meals()
        .filter(|(_, item)| item.name.starts_with(REPEATABLE_CATEGORY))
        .count();

    // always re-admitted, so it keeps competing until its six items are gone
    assert!(takeout > 1, "repeatable group served {takeout} times");
    assert_eq!(grid.calendar().date_of(1)?.month(), 7);

    Ok(())
}
