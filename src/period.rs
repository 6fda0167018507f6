use std::fmt;

/// Period filter for aggregate stats. The backend consumes the encoded
/// string literally; the grammar is `current-year | YYYY | YYYY-MM |
/// last-N-months` and must not be reinterpreted client-side.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PeriodFilter {
    CurrentYear,
    Year(i32),
    Month { year: i32, month: u32 },
    LastMonths(u32),
}

impl PeriodFilter {
    pub fn encode(&self) -> String {
        match self {
            PeriodFilter::CurrentYear => "current-year".to_string(),
            PeriodFilter::Year(year) => year.to_string(),
            PeriodFilter::Month { year, month } => format!("{}-{:02}", year, month),
            PeriodFilter::LastMonths(months) => format!("last-{}-months", months),
        }
    }
}

impl fmt::Display for PeriodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_every_grammar_production() {
        assert_eq!(PeriodFilter::CurrentYear.encode(), "current-year");
        assert_eq!(PeriodFilter::Year(2024).encode(), "2024");
        assert_eq!(
            PeriodFilter::Month { year: 2024, month: 3 }.encode(),
            "2024-03"
        );
        assert_eq!(
            PeriodFilter::Month { year: 2025, month: 11 }.encode(),
            "2025-11"
        );
        assert_eq!(PeriodFilter::LastMonths(3).encode(), "last-3-months");
        assert_eq!(PeriodFilter::LastMonths(12).encode(), "last-12-months");
    }

    #[test]
    fn display_matches_encode() {
        assert_eq!(PeriodFilter::CurrentYear.to_string(), "current-year");
    }
}
