//! Time and date answers, and the time-of-day greeting

use chrono::{Local, NaiveDateTime, Timelike};

/// Which clock question was asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeQuery {
    /// "what time is it"
    Time,
    /// "what day is it"
    Day,
    /// "what is the date"
    Date,
    /// "what year is it"
    Year,
}

/// Answer a clock question for the given local time
#[must_use]
pub fn describe(query: TimeQuery, now: &NaiveDateTime) -> String {
    match query {
        TimeQuery::Time => format!("The time is {}.", now.format("%H:%M:%S")),
        TimeQuery::Day => format!("Today is {}.", now.format("%A")),
        TimeQuery::Date => format!("Today's date is {}.", now.format("%d %B %Y")),
        TimeQuery::Year => format!("It is {}.", now.format("%Y")),
    }
}

/// Answer a clock question for the current local time
#[must_use]
pub fn describe_now(query: TimeQuery) -> String {
    describe(query, &Local::now().naive_local())
}

/// Greeting for an hour of the day (0-23)
#[must_use]
pub const fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning!",
        12..=17 => "Good afternoon!",
        18..=20 => "Good evening!",
        _ => "Good night!",
    }
}

/// Greeting for the current local hour
#[must_use]
pub fn greeting() -> &'static str {
    greeting_for_hour(Local::now().hour())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn moment() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 7, 3)
            .unwrap()
    }

    #[test]
    fn test_describe() {
        let now = moment();
        assert_eq!(describe(TimeQuery::Time, &now), "The time is 09:07:03.");
        assert_eq!(describe(TimeQuery::Day, &now), "Today is Tuesday.");
        assert_eq!(describe(TimeQuery::Date, &now), "Today's date is 05 March 2024.");
        assert_eq!(describe(TimeQuery::Year, &now), "It is 2024.");
    }

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting_for_hour(0), "Good morning!");
        assert_eq!(greeting_for_hour(11), "Good morning!");
        assert_eq!(greeting_for_hour(12), "Good afternoon!");
        assert_eq!(greeting_for_hour(17), "Good afternoon!");
        assert_eq!(greeting_for_hour(18), "Good evening!");
        assert_eq!(greeting_for_hour(20), "Good evening!");
        assert_eq!(greeting_for_hour(21), "Good night!");
        assert_eq!(greeting_for_hour(23), "Good night!");
    }
}
