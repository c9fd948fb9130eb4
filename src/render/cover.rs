//! Front covers: which letters of the grid spell a time.

use heapless::Vec;
use time::Weekday;

use crate::layout::ROWS;

/// A run of lit letters on one grid row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Word {
    /// Grid row.
    pub row: u8,
    /// First column.
    pub col: u8,
    /// Letters in the word.
    pub len: u8,
}

impl Word {
    const fn new(row: u8, col: u8, len: u8) -> Self {
        Self { row, col, len }
    }

    /// Grid cells covered by the word, left to right.
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        let row = usize::from(self.row);
        let col = usize::from(self.col);
        (col..col + usize::from(self.len)).map(move |col| (row, col))
    }
}

/// Maximum words one phrase lights.
pub const MAX_WORDS: usize = 8;

/// Words lit for one time of day.
pub type Words = Vec<Word, MAX_WORDS>;

/// A printed letter grid and the rules for reading a time from it.
pub trait FrontCover {
    /// Words to light for `hour` (0..24) and `minute` (0..60).
    ///
    /// The minute is read in five-minute steps; the remainder is shown on the corner
    /// LEDs by the renderer. `it_is` asks for the "IT IS" prefix at every step.
    fn time_words(&self, hour: u8, minute: u8, it_is: bool) -> Words;

    /// Two-letter abbreviation of `weekday`.
    fn weekday_abbreviation(&self, weekday: Weekday) -> &'static str;

    /// The printed letters, one string per row.
    fn letters(&self) -> &'static [&'static str; ROWS];
}

/// The English cover.
///
/// ```text
/// ITLISASAMPM
/// ACQUARTERDC
/// TWENTYFIVEX
/// HALFSTENFTO
/// PASTERUNINE
/// ONESIXTHREE
/// FOURFIVETWO
/// EIGHTELEVEN
/// SEVENTWELVE
/// TENSEOCLOCK
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct English;

impl English {
    /// "IT"
    pub const IT: Word = Word::new(0, 0, 2);
    /// "IS"
    pub const IS: Word = Word::new(0, 3, 2);
    /// "AM"
    pub const AM: Word = Word::new(0, 7, 2);
    /// "PM"
    pub const PM: Word = Word::new(0, 9, 2);
    /// "QUARTER"
    pub const QUARTER: Word = Word::new(1, 2, 7);
    /// "TWENTY"
    pub const TWENTY: Word = Word::new(2, 0, 6);
    /// "FIVE" (minutes)
    pub const FIVE_MINUTES: Word = Word::new(2, 6, 4);
    /// "HALF"
    pub const HALF: Word = Word::new(3, 0, 4);
    /// "TEN" (minutes)
    pub const TEN_MINUTES: Word = Word::new(3, 5, 3);
    /// "TO"
    pub const TO: Word = Word::new(3, 9, 2);
    /// "PAST"
    pub const PAST: Word = Word::new(4, 0, 4);
    /// "O'CLOCK"
    pub const OCLOCK: Word = Word::new(9, 5, 6);

    /// Hour words, index 0 is TWELVE.
    pub const HOURS: [Word; 12] = [
        Word::new(8, 5, 6),  // TWELVE
        Word::new(5, 0, 3),  // ONE
        Word::new(6, 8, 3),  // TWO
        Word::new(5, 6, 5),  // THREE
        Word::new(6, 0, 4),  // FOUR
        Word::new(6, 4, 4),  // FIVE
        Word::new(5, 3, 3),  // SIX
        Word::new(8, 0, 5),  // SEVEN
        Word::new(7, 0, 5),  // EIGHT
        Word::new(4, 7, 4),  // NINE
        Word::new(9, 0, 3),  // TEN
        Word::new(7, 5, 6),  // ELEVEN
    ];

    const LETTERS: [&'static str; ROWS] = [
        "ITLISASAMPM",
        "ACQUARTERDC",
        "TWENTYFIVEX",
        "HALFSTENFTO",
        "PASTERUNINE",
        "ONESIXTHREE",
        "FOURFIVETWO",
        "EIGHTELEVEN",
        "SEVENTWELVE",
        "TENSEOCLOCK",
    ];
}

impl FrontCover for English {
    fn time_words(&self, hour: u8, minute: u8, it_is: bool) -> Words {
        let step = (minute % 60) / 5;
        let mut words = Words::new();
        let mut push = |word: Word| {
            // MAX_WORDS covers the longest phrase: IT IS TWENTY FIVE PAST/TO <hour>.
            let _ = words.push(word);
        };

        if it_is || step == 0 || step == 6 {
            push(Self::IT);
            push(Self::IS);
        }
        match step {
            1 | 11 => push(Self::FIVE_MINUTES),
            2 | 10 => push(Self::TEN_MINUTES),
            3 | 9 => push(Self::QUARTER),
            4 | 8 => push(Self::TWENTY),
            5 | 7 => {
                push(Self::TWENTY);
                push(Self::FIVE_MINUTES);
            }
            6 => push(Self::HALF),
            _ => {}
        }
        match step {
            0 => {}
            1..=6 => push(Self::PAST),
            _ => push(Self::TO),
        }

        let shown_hour = if step >= 7 { hour.wrapping_add(1) } else { hour };
        if let Some(word) = Self::HOURS.get(usize::from(shown_hour % 12)) {
            push(*word);
        }
        if step == 0 {
            push(Self::OCLOCK);
        }
        words
    }

    fn weekday_abbreviation(&self, weekday: Weekday) -> &'static str {
        match weekday {
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TH",
            Weekday::Friday => "FR",
            Weekday::Saturday => "SA",
            Weekday::Sunday => "SU",
        }
    }

    fn letters(&self) -> &'static [&'static str; ROWS] {
        &Self::LETTERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(words: &Words) -> Vec<&'static str, MAX_WORDS> {
        words
            .iter()
            .filter_map(|word| {
                let row = English::LETTERS.get(usize::from(word.row))?;
                let start = usize::from(word.col);
                row.get(start..start + usize::from(word.len))
            })
            .collect()
    }

    #[test]
    fn quarter_past_two() {
        let words = English.time_words(14, 15, true);
        assert_eq!(spell(&words), ["IT", "IS", "QUARTER", "PAST", "TWO"]);
    }

    #[test]
    fn twenty_five_to_reads_the_next_hour() {
        let words = English.time_words(11, 37, false);
        assert_eq!(spell(&words), ["TWENTY", "FIVE", "TO", "TWELVE"]);
    }

    #[test]
    fn full_and_half_hour_always_say_it_is() {
        assert_eq!(spell(&English.time_words(0, 2, false)), ["IT", "IS", "TWELVE", "OCLOCK"]);
        assert_eq!(spell(&English.time_words(9, 30, false)), ["IT", "IS", "HALF", "PAST", "NINE"]);
    }

    #[test]
    fn words_match_the_printed_letters() {
        for (word, text) in [
            (English::QUARTER, "QUARTER"),
            (English::TWENTY, "TWENTY"),
            (English::HOURS[3], "THREE"),
            (English::HOURS[11], "ELEVEN"),
            (English::HOURS[9], "NINE"),
        ] {
            let mut words = Words::new();
            words.push(word).expect("room");
            assert_eq!(spell(&words), [text]);
        }
    }
}
