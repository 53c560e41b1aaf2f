//! # Business-Day & Calendar-Day Arithmetic
//!
//! Date arithmetic primitives for statutory deadlines. Chilean labor-law
//! deadlines run in *administrative business days* (Ley 19.880: Monday
//! through Friday, excluding legal holidays), while a few run in
//! calendar days ("días corridos"). The two are deliberately separate
//! named operations — never one function with a boolean flag — so a
//! call site always states which arithmetic it means.
//!
//! All operations are deterministic and side-effect-free.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Which non-working days a business-day computation skips.
///
/// Always an explicit parameter at the call site, never a hidden
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarType {
    /// Skips Saturdays and Sundays only.
    Standard,
    /// Administrative business days (Ley 19.880): skips weekends plus
    /// the configured legal-holiday set.
    Administrative,
}

/// A working-day calendar: a holiday set plus the skip rules of
/// [`CalendarType`].
///
/// The holiday set only affects [`CalendarType::Administrative`]
/// computations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    holidays: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// A calendar with no holidays. Weekend skipping still applies.
    pub fn empty() -> Self {
        Self {
            holidays: BTreeSet::new(),
        }
    }

    /// A calendar with a custom holiday set.
    pub fn with_holidays(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    /// The built-in Chilean national-holiday calendar, 2024 through 2026.
    ///
    /// Covers the statutory holidays of Ley 2.977 and its amendments,
    /// including the movable ones at their observed dates. Regional
    /// holidays are not included.
    pub fn chilean() -> Self {
        let dates = [
            // 2024
            (2024, 1, 1),   // Año Nuevo
            (2024, 3, 29),  // Viernes Santo
            (2024, 3, 30),  // Sábado Santo
            (2024, 5, 1),   // Día del Trabajo
            (2024, 5, 21),  // Glorias Navales
            (2024, 6, 20),  // Día de los Pueblos Indígenas
            (2024, 6, 29),  // San Pedro y San Pablo
            (2024, 7, 16),  // Virgen del Carmen
            (2024, 8, 15),  // Asunción de la Virgen
            (2024, 9, 18),  // Independencia Nacional
            (2024, 9, 19),  // Glorias del Ejército
            (2024, 9, 20),  // Feriado adicional
            (2024, 10, 12), // Encuentro de Dos Mundos
            (2024, 10, 31), // Iglesias Evangélicas
            (2024, 11, 1),  // Todos los Santos
            (2024, 12, 8),  // Inmaculada Concepción
            (2024, 12, 25), // Navidad
            // 2025
            (2025, 1, 1),
            (2025, 4, 18),
            (2025, 4, 19),
            (2025, 5, 1),
            (2025, 5, 21),
            (2025, 6, 20),
            (2025, 6, 29),
            (2025, 7, 16),
            (2025, 8, 15),
            (2025, 9, 18),
            (2025, 9, 19),
            (2025, 10, 12),
            (2025, 10, 31),
            (2025, 11, 1),
            (2025, 12, 8),
            (2025, 12, 25),
            // 2026
            (2026, 1, 1),
            (2026, 4, 3),
            (2026, 4, 4),
            (2026, 5, 1),
            (2026, 5, 21),
            (2026, 6, 21),
            (2026, 6, 29),
            (2026, 7, 16),
            (2026, 8, 15),
            (2026, 9, 18),
            (2026, 9, 19),
            (2026, 10, 12),
            (2026, 10, 31),
            (2026, 11, 1),
            (2026, 12, 8),
            (2026, 12, 25),
        ];
        Self {
            holidays: dates
                .iter()
                .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
                .collect(),
        }
    }

    /// Whether a date is in the holiday set.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Whether a date is a working day under the given calendar type.
    pub fn is_working_day(&self, date: NaiveDate, calendar_type: CalendarType) -> bool {
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        match calendar_type {
            CalendarType::Standard => !weekend,
            CalendarType::Administrative => !weekend && !self.is_holiday(date),
        }
    }

    /// Add `n` business days to `date` under the given calendar type.
    ///
    /// Adding 0 days returns the input unchanged, even when the input
    /// falls on a non-working day — there is no rounding to the next
    /// business day.
    pub fn add_business_days(
        &self,
        date: NaiveDate,
        n: u32,
        calendar_type: CalendarType,
    ) -> NaiveDate {
        let mut current = date;
        let mut remaining = n;
        while remaining > 0 {
            current = next_day(current);
            if self.is_working_day(current, calendar_type) {
                remaining -= 1;
            }
        }
        current
    }

    /// Add `n` calendar days ("días corridos") to `date`.
    pub fn add_calendar_days(&self, date: NaiveDate, n: u32) -> NaiveDate {
        date.checked_add_days(Days::new(u64::from(n)))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::chilean()
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)
}
