//! Due-date input initialization
//!
//! When a task form loads, its `due_date` input starts at today and refuses
//! earlier dates.

use chrono::{Local, NaiveDate};

/// Element id of the due-date input
pub const DUE_DATE_ID: &str = "due_date";

/// Date format used by the input's `value` and `min` attributes
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A `<input type="date">` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateInput {
    pub value: Option<NaiveDate>,
    pub min: Option<NaiveDate>,
}

impl DateInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both the value and the lower bound to `today`
    pub fn initialize(&mut self, today: NaiveDate) {
        self.value = Some(today);
        self.min = Some(today);
    }

    /// True when `date` is not before the input's lower bound
    pub fn accepts(&self, date: NaiveDate) -> bool {
        self.min.map_or(true, |min| date >= min)
    }

    pub fn value_attr(&self) -> String {
        self.value.map(format_date).unwrap_or_default()
    }

    pub fn min_attr(&self) -> String {
        self.min.map(format_date).unwrap_or_default()
    }

    pub fn to_html(&self) -> String {
        format!(
            "<input type=\"date\" id=\"{}\" name=\"{}\" value=\"{}\" min=\"{}\">",
            DUE_DATE_ID,
            DUE_DATE_ID,
            self.value_attr(),
            self.min_attr()
        )
    }
}

/// Today in the local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A due-date input initialized to the local date
pub fn due_date_input() -> DateInput {
    let mut input = DateInput::new();
    input.initialize(today());
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_initialize_sets_value_and_min() {
        let mut input = DateInput::new();
        input.initialize(day(2024, 3, 7));

        assert_eq!(input.value_attr(), "2024-03-07");
        assert_eq!(input.min_attr(), "2024-03-07");
        assert_eq!(
            input.to_html(),
            "<input type=\"date\" id=\"due_date\" name=\"due_date\" value=\"2024-03-07\" min=\"2024-03-07\">"
        );
    }

    #[test]
    fn test_accepts_today_and_later_only() {
        let mut input = DateInput::new();
        assert!(input.accepts(day(1999, 1, 1)));

        input.initialize(day(2024, 3, 7));
        assert!(input.accepts(day(2024, 3, 7)));
        assert!(input.accepts(day(2025, 1, 1)));
        assert!(!input.accepts(day(2024, 3, 6)));
    }

    #[test]
    fn test_due_date_input_uses_today() {
        let input = due_date_input();
        assert_eq!(input.value, input.min);
        assert!(input.value.is_some());
    }
}
