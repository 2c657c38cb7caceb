//! Sort engine.
//!
//! Orders rows by one column. Number columns compare numerically, string
//! columns compare with an ICU collator so that e.g. Cyrillic titles sort the
//! way a reader of that locale expects. The sort is stable: rows with equal
//! keys keep their relative order in both directions.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use icu::collator::Collator;
use icu::collator::CollatorBorrowed;
use icu::locale::Locale;

use crate::model::Column;
use crate::model::Row;
use crate::model::SortType;
use crate::model::Value;
use crate::query::Direction;

/// Locale-aware string comparison.
///
/// Falls back to plain code point order when the locale cannot be parsed or
/// has no collation data.
pub struct Collation {
    locale: String,
    collator: Option<CollatorBorrowed<'static>>,
}

impl Collation {
    /// Creates a collation for a BCP 47 locale identifier.
    pub fn new(locale: &str) -> Self {
        let collator = locale
            .parse::<Locale>()
            .ok()
            .and_then(|l| Collator::try_new(l.into(), Default::default()).ok());

        if collator.is_none() {
            log::warn!("No collation for locale {:?}, using code point order", locale);
        }

        Self {
            locale: locale.to_string(),
            collator,
        }
    }

    /// Returns the locale this collation was built for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Compares two strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation")
            .field("locale", &self.locale)
            .field("icu", &self.collator.is_some())
            .finish()
    }
}

/// Compares rows by a single column.
#[derive(Debug, Clone, Copy)]
pub struct RowComparator<'a> {
    column: &'a Column,
    direction: Direction,
    collation: &'a Collation,
}

impl<'a> RowComparator<'a> {
    /// Creates a comparator for a column and direction.
    pub fn new(column: &'a Column, direction: Direction, collation: &'a Collation) -> Self {
        Self {
            column,
            direction,
            collation,
        }
    }

    /// Compares two rows.
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        let a = a.value(&self.column.id);
        let b = b.value(&self.column.id);

        let ordering = match self.column.sort_type {
            SortType::Number => compare_numbers(a, b),
            SortType::String => self.collation.compare(&text(a), &text(b)),
        };

        self.direction.apply(ordering)
    }
}

/// Values without a numeric meaning order after every number.
fn compare_numbers(a: &Value, b: &Value) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn text(value: &Value) -> Cow<'_, str> {
    match value.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(value.to_string()),
    }
}

/// Sorts rows in place, stably, by one column.
pub fn sort_rows(rows: &mut [Row], column: &Column, direction: Direction, collation: &Collation) {
    let comparator = RowComparator::new(column, direction, collation);
    rows.sort_by(|a, b| comparator.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(rows: &[Row], field: &str) -> Vec<i64> {
        rows.iter()
            .map(|r| match r.value(field) {
                Value::Int(v) => *v,
                other => panic!("unexpected value {:?}", other),
            })
            .collect()
    }

    fn rows_of(values: &[i64]) -> Vec<Row> {
        values.iter().map(|v| Row::new().set("n", *v)).collect()
    }

    #[test]
    fn test_number_directions() {
        let column = Column::number("n", "N").sortable();
        let collation = Collation::new("en");

        let mut rows = rows_of(&[3, 1, 2]);
        sort_rows(&mut rows, &column, Direction::Asc, &collation);
        assert_eq!(numbers(&rows, "n"), vec![1, 2, 3]);

        sort_rows(&mut rows, &column, Direction::Desc, &collation);
        assert_eq!(numbers(&rows, "n"), vec![3, 2, 1]);
    }

    #[test]
    fn test_numeric_strings_compare_as_numbers() {
        let column = Column::number("n", "N").sortable();
        let collation = Collation::new("en");

        let mut rows = vec![
            Row::new().set("n", "10"),
            Row::new().set("n", "9"),
            Row::new().set("n", 9.5),
        ];
        sort_rows(&mut rows, &column, Direction::Asc, &collation);

        let order: Vec<String> = rows.iter().map(|r| r.value("n").to_string()).collect();
        assert_eq!(order, vec!["9", "9.5", "10"]);
    }

    #[test]
    fn test_non_numeric_values_go_last_ascending() {
        let column = Column::number("n", "N").sortable();
        let collation = Collation::new("en");

        let mut rows = vec![
            Row::new().set("id", 1).set("n", "n/a"),
            Row::new().set("id", 2).set("n", 5),
            Row::new().set("id", 3),
        ];
        sort_rows(&mut rows, &column, Direction::Asc, &collation);
        assert_eq!(numbers(&rows, "id"), vec![2, 1, 3]);

        sort_rows(&mut rows, &column, Direction::Desc, &collation);
        assert_eq!(numbers(&rows, "id"), vec![1, 3, 2]);
    }

    #[test]
    fn test_stable_ties_in_both_directions() {
        let column = Column::number("n", "N").sortable();
        let collation = Collation::new("en");

        let mut rows = vec![
            Row::new().set("id", 1).set("n", 2),
            Row::new().set("id", 2).set("n", 1),
            Row::new().set("id", 3).set("n", 2),
            Row::new().set("id", 4).set("n", 1),
        ];

        sort_rows(&mut rows, &column, Direction::Asc, &collation);
        assert_eq!(numbers(&rows, "id"), vec![2, 4, 1, 3]);

        sort_rows(&mut rows, &column, Direction::Desc, &collation);
        assert_eq!(numbers(&rows, "id"), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_collated_strings() {
        let column = Column::string("title", "Title").sortable();
        let collation = Collation::new("ru");

        let mut rows = vec![
            Row::new().set("title", "яблоко"),
            Row::new().set("title", "Банан"),
            Row::new().set("title", "абрикос"),
        ];
        sort_rows(&mut rows, &column, Direction::Asc, &collation);

        let titles: Vec<String> = rows.iter().map(|r| r.value("title").to_string()).collect();
        assert_eq!(titles, vec!["абрикос", "Банан", "яблоко"]);
    }

    #[test]
    fn test_invalid_locale_falls_back() {
        let collation = Collation::new("!!not a locale!!");
        assert_eq!(collation.compare("a", "b"), Ordering::Less);
        assert_eq!(collation.locale(), "!!not a locale!!");
    }
}
