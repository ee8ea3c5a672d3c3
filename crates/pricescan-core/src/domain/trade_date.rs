use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const PARSE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day padding:none]-[month padding:none]-[year]");
const RENDER_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[day]-[month]-[year]");

/// Calendar date of a price observation, written `dd-mm-yyyy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate(Date);

impl TradeDate {
    /// Parse a `day-month-year` date. Single-digit day and month are accepted.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), PARSE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidTradeDate {
                value: input.to_owned(),
            })
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    /// Render as zero-padded `dd-mm-yyyy`.
    pub fn format_dmy(self) -> String {
        self.0
            .format(RENDER_FORMAT)
            .expect("calendar dates are always formattable as dd-mm-yyyy")
    }
}

impl Display for TradeDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_dmy())
    }
}

impl Serialize for TradeDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_dmy())
    }
}

impl<'de> Deserialize<'de> for TradeDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;

    #[test]
    fn parses_day_month_year() {
        let parsed = TradeDate::parse("03-09-2023").expect("must parse");
        let expected = Date::from_calendar_date(2023, Month::September, 3).expect("valid date");
        assert_eq!(parsed.into_inner(), expected);
        assert_eq!(parsed.format_dmy(), "03-09-2023");
    }

    #[test]
    fn accepts_unpadded_day_and_month() {
        let parsed = TradeDate::parse("3-9-2023").expect("must parse");
        assert_eq!(parsed.to_string(), "03-09-2023");
    }

    #[test]
    fn rejects_iso_dates() {
        let err = TradeDate::parse("2023-09-03").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTradeDate { .. }));
    }

    #[test]
    fn rejects_impossible_dates() {
        let err = TradeDate::parse("31-02-2023").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTradeDate { .. }));
    }

    #[test]
    fn orders_chronologically() {
        let earlier = TradeDate::parse("31-12-2022").expect("valid");
        let later = TradeDate::parse("01-01-2023").expect("valid");
        assert!(earlier < later);
    }
}
