//! The tracked year and its ten-day blocks.

use crate::date_key::DateKey;
use crate::error::{YearPlanError, YearPlanResult};

pub const DEFAULT_YEAR: i32 = 2026;

/// Days per row of the heatmap grid.
pub const BLOCK_DAYS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Year(i32);

impl Default for Year {
    fn default() -> Self {
        Year(DEFAULT_YEAR)
    }
}

impl Year {
    pub fn new(year: i32) -> YearPlanResult<Self> {
        // Both ends must be representable dates.
        DateKey::from_ymd(year, 1, 1).map_err(|_| YearPlanError::InvalidYear(year))?;
        DateKey::from_ymd(year, 12, 31).map_err(|_| YearPlanError::InvalidYear(year))?;
        Ok(Year(year))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn first_day(&self) -> DateKey {
        DateKey::from_ymd(self.0, 1, 1).expect("validated in Year::new")
    }

    pub fn contains(&self, date: &DateKey) -> bool {
        date.year() == self.0
    }

    /// Every day from Jan 1 to Dec 31, in order.
    pub fn days(&self) -> Vec<DateKey> {
        let mut days = Vec::with_capacity(366);
        let mut current = Some(self.first_day());
        while let Some(day) = current.filter(|d| self.contains(d)) {
            days.push(day);
            current = day.succ();
        }
        days
    }

    /// The year split into consecutive blocks of ten days; the last one is short.
    pub fn blocks(&self) -> Vec<Vec<DateKey>> {
        self.days()
            .chunks(BLOCK_DAYS)
            .map(|chunk| chunk.to_vec())
            .collect()
    }
}
