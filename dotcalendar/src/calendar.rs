//! Date range, color coding and per-day values of the heat-map

use chrono::{Datelike, Days, Months, NaiveDate};

/// Value thresholds, highest first. A value takes the color of the first
/// threshold it exceeds.
pub const COLOR_CODING: [(f64, u32); 5] = [
    (8.0, 0xFF1F_6823),
    (6.0, 0xFF45_A340),
    (4.0, 0xFF8C_C665),
    (2.0, 0xFFD6_E685),
    (0.0, 0xFFEE_EEEE),
];

pub const EMPTY_COLOR: u32 = 0xFFEE_EEEE;
pub const DAYS_PER_WEEK: usize = 7;
pub const MONTH_LABELS: usize = 13;

pub fn color_for(value: f64) -> u32 {
    COLOR_CODING
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map_or(EMPTY_COLOR, |&(_, color)| color)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Roughly one year of days ending on the last day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Range ending on the last day of `today`'s month. It starts one year
    /// earlier, minus the length of that month in the previous year, plus
    /// one day.
    pub fn ending_in_month_of(today: NaiveDate) -> Option<Self> {
        let (year, month) = (today.year(), today.month());
        let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)?;
        let prev_len = days_in_month(year - 1, month)?;
        let start = end
            .checked_sub_months(Months::new(12))?
            .checked_sub_days(Days::new(u64::from(prev_len)))?
            .checked_add_days(Days::new(1))?;
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Days from start to end, end excluded.
    pub fn days(&self) -> usize {
        self.end.signed_duration_since(self.start).num_days().max(0) as usize
    }

    /// Matrix columns needed to show the range one week per column.
    pub fn weeks(&self) -> usize {
        self.days().div_ceil(DAYS_PER_WEEK)
    }

    /// Date shown by cell `(week, weekday)`.
    pub fn date_at(&self, week: usize, weekday: usize) -> Option<NaiveDate> {
        self.start
            .checked_add_days(Days::new((week * DAYS_PER_WEEK + weekday) as u64))
    }

    /// Abbreviated month names starting at the range's first month.
    pub fn month_labels(&self) -> Vec<String> {
        (0..MONTH_LABELS as u32)
            .filter_map(|i| self.start.checked_add_months(Months::new(i)))
            .map(|d| d.format("%b").to_string())
            .collect()
    }

    /// Abbreviated weekday names for rows 0 to 6.
    pub fn weekday_labels(&self) -> Vec<String> {
        (0..DAYS_PER_WEEK as u64)
            .filter_map(|i| self.start.checked_add_days(Days::new(i)))
            .map(|d| d.format("%a").to_string())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayValue {
    pub x: usize,
    pub y: usize,
    pub value: f64,
    pub date: NaiveDate,
}

impl DayValue {
    pub fn color(&self) -> u32 {
        color_for(self.value)
    }

    /// Two-line tooltip text, e.g. `Date : 05.03.2024\nValue: 7.3`.
    pub fn tooltip(&self) -> String {
        format!("Date : {}\nValue: {:.1}", self.date.format("%d.%m.%Y"), self.value)
    }
}

/// One value per cell of a `weeks × 7` grid.
#[derive(Debug, Clone)]
pub struct HeatMap {
    range: DateRange,
    days: Vec<DayValue>,
}

impl HeatMap {
    /// Fill every cell with a value from `next_value`, column by column.
    pub fn generate(range: DateRange, mut next_value: impl FnMut() -> f64) -> Self {
        let mut days = Vec::with_capacity(range.weeks() * DAYS_PER_WEEK);
        for x in 0..range.weeks() {
            for y in 0..DAYS_PER_WEEK {
                let Some(date) = range.date_at(x, y) else { continue };
                days.push(DayValue { x, y, value: next_value(), date });
            }
        }
        Self { range, days }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn days(&self) -> &[DayValue] {
        &self.days
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&DayValue> {
        self.days.iter().find(|d| d.x == x && d.y == y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_color_thresholds() {
        assert_eq!(color_for(9.5), 0xFF1F_6823);
        assert_eq!(color_for(8.0), 0xFF45_A340);
        assert_eq!(color_for(6.1), 0xFF45_A340);
        assert_eq!(color_for(4.5), 0xFF8C_C665);
        assert_eq!(color_for(2.01), 0xFFD6_E685);
        assert_eq!(color_for(2.0), EMPTY_COLOR);
        assert_eq!(color_for(0.0), EMPTY_COLOR);
    }

    #[test]
    fn test_range_leap_year() {
        let range = DateRange::ending_in_month_of(date(2024, 3, 15)).unwrap();
        assert_eq!(range.end(), date(2024, 3, 31));
        assert_eq!(range.start(), date(2023, 3, 1));
        assert_eq!(range.days(), 396);
        assert_eq!(range.weeks(), 57);
    }

    #[test]
    fn test_range_february_end() {
        let range = DateRange::ending_in_month_of(date(2023, 2, 1)).unwrap();
        assert_eq!(range.end(), date(2023, 2, 28));
        // 2022-02-28 minus 28 days plus one
        assert_eq!(range.start(), date(2022, 2, 1));
    }

    #[test]
    fn test_labels() {
        let range = DateRange::ending_in_month_of(date(2024, 3, 15)).unwrap();
        let months = range.month_labels();
        assert_eq!(months.len(), 13);
        assert_eq!(months[0], "Mar");
        assert_eq!(months[12], "Mar");
        // 2023-03-01 was a Wednesday
        assert_eq!(range.weekday_labels()[0], "Wed");
        assert_eq!(range.weekday_labels().len(), 7);
    }

    #[test]
    fn test_heat_map_cells() {
        let range = DateRange::ending_in_month_of(date(2024, 3, 15)).unwrap();
        let mut n = 0.0;
        let map = HeatMap::generate(range, || {
            n += 0.5;
            n
        });
        assert_eq!(map.days().len(), 57 * 7);
        let day = map.get(1, 2).unwrap();
        assert_eq!(day.date, date(2023, 3, 10));
        assert_eq!(day.value, 5.0);
        assert_eq!(day.tooltip(), "Date : 10.03.2023\nValue: 5.0");
        assert!(map.get(57, 0).is_none());
    }
}
