//! Menu entries and choice parsing.

use std::fmt::{Display, Formatter};

/// One numbered menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    List,
    Add,
    Delete,
    Update,
    Stats,
    Random,
    Search,
    SortByRating,
    SortByYear,
    Histogram,
    Filter,
    Website,
}

const ENTRIES: [(MenuChoice, &str); 13] = [
    (MenuChoice::Exit, "Exit"),
    (MenuChoice::List, "List movies"),
    (MenuChoice::Add, "Add movie"),
    (MenuChoice::Delete, "Delete movie"),
    (MenuChoice::Update, "Update movie"),
    (MenuChoice::Stats, "Stats"),
    (MenuChoice::Random, "Random movie"),
    (MenuChoice::Search, "Search movie"),
    (MenuChoice::SortByRating, "Movies sorted by rating"),
    (MenuChoice::SortByYear, "Movies sorted by year"),
    (MenuChoice::Histogram, "Create rating histogram"),
    (MenuChoice::Filter, "Filter movies"),
    (MenuChoice::Website, "Generate website"),
];

/// Highest selectable number.
pub const MAX_CHOICE: usize = ENTRIES.len() - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    NotANumber(String),
    OutOfRange(i64),
}

impl Display for MenuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber(raw) => write!(f, "Command `{raw}` was not a number!"),
            Self::OutOfRange(value) => write!(
                f,
                "Not supported number for a command: {value} (choose 0-{MAX_CHOICE})"
            ),
        }
    }
}

impl std::error::Error for MenuError {}

/// Parses a raw menu answer.
pub fn parse_choice(raw: &str) -> Result<MenuChoice, MenuError> {
    let trimmed = raw.trim();
    let number = trimmed
        .parse::<i64>()
        .map_err(|_| MenuError::NotANumber(trimmed.to_string()))?;
    usize::try_from(number)
        .ok()
        .and_then(|index| ENTRIES.get(index))
        .map(|(choice, _)| *choice)
        .ok_or(MenuError::OutOfRange(number))
}

/// Renders the numbered menu.
pub fn menu_text() -> String {
    let mut text = String::from("Menu:\n");
    for (index, (_, label)) in ENTRIES.iter().enumerate() {
        text.push_str(&format!("{index}. {label}\n"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::{menu_text, parse_choice, MenuChoice, MenuError, MAX_CHOICE};

    #[test]
    fn numbers_map_to_entries() {
        assert_eq!(parse_choice("0").unwrap(), MenuChoice::Exit);
        assert_eq!(parse_choice(" 7 ").unwrap(), MenuChoice::Search);
        assert_eq!(parse_choice("12").unwrap(), MenuChoice::Website);
        assert_eq!(MAX_CHOICE, 12);
    }

    #[test]
    fn out_of_range_and_garbage_are_reported() {
        assert_eq!(parse_choice("13"), Err(MenuError::OutOfRange(13)));
        assert_eq!(parse_choice("-1"), Err(MenuError::OutOfRange(-1)));
        assert_eq!(
            parse_choice("list"),
            Err(MenuError::NotANumber("list".to_string()))
        );
    }

    #[test]
    fn menu_lists_every_entry() {
        let text = menu_text();
        assert!(text.contains("0. Exit"));
        assert!(text.contains("12. Generate website"));
    }
}
