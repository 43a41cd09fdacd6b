//! Random draw helpers shared by the generator stages.

use std::collections::HashSet;

use chrono::{Days, Months, NaiveDate, NaiveDateTime, TimeDelta};
use rand::Rng;
use tracing::debug;

use crate::errors::GenerationError;

/// Pick one value from `(value, weight)` pairs proportionally to weight.
///
/// Weights need not sum to one; the last entry absorbs floating point slack.
pub fn weighted_pick<T: Copy, R: Rng + ?Sized>(choices: &[(T, f64)], rng: &mut R) -> T {
    let total: f64 = choices.iter().map(|(_, weight)| *weight).sum();
    let mut roll = rng.random_range(0.0..total);
    for (value, weight) in choices {
        if roll < *weight {
            return *value;
        }
        roll -= weight;
    }
    choices[choices.len() - 1].0
}

/// Uniform pick from a fixed, non-empty catalog.
pub fn pick<'a, T, R: Rng + ?Sized>(values: &'a [T], rng: &mut R) -> &'a T {
    &values[rng.random_range(0..values.len())]
}

/// Uniform date in `[start, end)`; returns `start` when the range is empty.
pub fn date_between<R: Rng + ?Sized>(start: NaiveDate, end: NaiveDate, rng: &mut R) -> NaiveDate {
    let span = (end - start).num_days();
    if span <= 0 {
        return start;
    }
    let offset = rng.random_range(0..span) as u64;
    start.checked_add_days(Days::new(offset)).unwrap_or(start)
}

/// Uniform datetime with second resolution in `[start, end)`.
pub fn datetime_between<R: Rng + ?Sized>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    rng: &mut R,
) -> NaiveDateTime {
    let span = (end - start).num_seconds();
    if span <= 0 {
        return start;
    }
    let offset = rng.random_range(0..span);
    start + TimeDelta::seconds(offset)
}

pub fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years * 12))
        .unwrap_or(date)
}

pub fn years_after(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_add_months(Months::new(years * 12))
        .unwrap_or(date)
}

/// Rejection-sample a value not yet present in `seen` and record it.
///
/// Fails immediately when `capacity` shows the candidate space is already
/// used up, otherwise after `max_attempts` consecutive collisions. Returns the
/// fresh value and the number of rejected candidates.
pub fn draw_unique<F>(
    seen: &mut HashSet<String>,
    what: &'static str,
    capacity: Option<u64>,
    max_attempts: u32,
    mut draw: F,
) -> Result<(String, u64), GenerationError>
where
    F: FnMut() -> String,
{
    let exhausted = |attempts, taken| GenerationError::Exhausted {
        what,
        attempts,
        taken,
        capacity,
    };

    if capacity.is_some_and(|capacity| seen.len() as u64 >= capacity) {
        return Err(exhausted(0, seen.len()));
    }

    for attempt in 0..max_attempts {
        let candidate = draw();
        if !seen.contains(&candidate) {
            seen.insert(candidate.clone());
            return Ok((candidate, u64::from(attempt)));
        }
        debug!(what, attempt, "rejected duplicate candidate");
    }

    Err(exhausted(max_attempts, seen.len()))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn date_between_stays_in_half_open_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let start = date(2024, 1, 1);
        let end = date(2024, 1, 3);
        for _ in 0..200 {
            let value = date_between(start, end, &mut rng);
            assert!(value >= start && value < end);
        }
    }

    #[test]
    fn datetime_between_excludes_end() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let start = date(2024, 1, 1).and_hms_opt(0, 0, 0).expect("time");
        let end = start + TimeDelta::seconds(2);
        for _ in 0..100 {
            let value = datetime_between(start, end, &mut rng);
            assert!(value >= start && value < end);
        }
    }

    #[test]
    fn weighted_pick_never_returns_zero_weight() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let choices = [("never", 0.0), ("always", 1.0)];
        for _ in 0..100 {
            assert_eq!(weighted_pick(&choices, &mut rng), "always");
        }
    }

    #[test]
    fn draw_unique_fails_when_capacity_is_used_up() {
        let mut seen = HashSet::new();
        let first = draw_unique(&mut seen, "ssn", Some(1), 10, || "000-00-0001".to_string());
        assert!(first.is_ok());

        let second = draw_unique(&mut seen, "ssn", Some(1), 10, || "000-00-0001".to_string());
        assert!(matches!(
            second,
            Err(GenerationError::Exhausted { attempts: 0, .. })
        ));
    }

    #[test]
    fn draw_unique_is_bounded_without_capacity() {
        let mut seen = HashSet::from(["taken".to_string()]);
        let mut draws = 0;
        let result = draw_unique(&mut seen, "medication name", None, 25, || {
            draws += 1;
            "taken".to_string()
        });
        assert!(matches!(
            result,
            Err(GenerationError::Exhausted { attempts: 25, .. })
        ));
        assert_eq!(draws, 25);
    }
}
