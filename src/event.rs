//! Calendar events shown as scrolling text on their day.

use core::fmt::Write as _;

use heapless::String;
use time::{Date, Month};

use crate::color::Color;
use crate::{Error, Result};

/// Bytes a feed text can hold.
pub const FEED_CAPACITY: usize = 64;

/// Text of one scrolling feed.
pub type FeedText = String<FEED_CAPACITY>;

/// A yearly calendar entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    /// Month of the entry.
    pub month: Month,
    /// Day of the month.
    pub day: u8,
    /// Text to scroll.
    pub text: &'static str,
    /// Year of origin; the age is appended to the text. `0` disables the age.
    pub year: u16,
    /// Text color.
    pub color: Color,
}

/// Events shipped with the firmware.
pub const EVENTS: [Event; 3] = [
    Event::new(Month::January, 1, "Happy New Year!", 0, Color::Yellow25),
    Event::new(Month::March, 14, "Albert Einsteins birthday!", 1879, Color::Magenta),
    Event::new(Month::December, 24, "Merry Christmas!", 0, Color::Red),
];

impl Event {
    /// Create an entry.
    #[must_use]
    pub const fn new(month: Month, day: u8, text: &'static str, year: u16, color: Color) -> Self {
        Self {
            month,
            day,
            text,
            year,
            color,
        }
    }

    /// Whether the entry falls on `date`, any year.
    #[must_use]
    pub fn matches(&self, date: Date) -> bool {
        date.month() == self.month && date.day() == self.day
    }

    /// Feed text for the entry in `current_year`, with the age appended when known.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FeedTooLong`] if the text does not fit [`FEED_CAPACITY`].
    pub fn feed_text(&self, current_year: i32) -> Result<FeedText> {
        let mut text = FeedText::new();
        text.push_str(self.text).map_err(|()| Error::FeedTooLong)?;
        let age = current_year - i32::from(self.year);
        if self.year != 0 && age >= 0 {
            write!(text, " {age}").map_err(|_| Error::FeedTooLong)?;
        }
        Ok(text)
    }
}

/// The first entry in `events` that falls on `date`.
#[must_use]
pub fn find(events: &[Event], date: Date) -> Option<&Event> {
    events.iter().find(|event| event.matches(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_is_appended_when_a_year_is_set() {
        let einstein = EVENTS[1];
        assert_eq!(einstein.feed_text(2024).expect("fits"), "Albert Einsteins birthday! 145");
        assert_eq!(EVENTS[0].feed_text(2024).expect("fits"), "Happy New Year!");
    }

    #[test]
    fn first_match_wins() {
        let events = [
            Event::new(Month::May, 4, "first", 0, Color::Red),
            Event::new(Month::May, 4, "second", 0, Color::Blue),
        ];
        let date = Date::from_calendar_date(2030, Month::May, 4).expect("date");
        assert_eq!(find(&events, date).map(|event| event.text), Some("first"));
    }

    #[test]
    fn overlong_text_is_rejected() {
        let text = "0123456789012345678901234567890123456789012345678901234567890123456789";
        let event = Event::new(Month::May, 4, text, 0, Color::Red);
        assert!(matches!(event.feed_text(2030), Err(Error::FeedTooLong)));
    }
}
