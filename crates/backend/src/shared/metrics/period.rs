use crate::shared::error::MetricsError;
use chrono::NaiveDate;

/// Concrete date range of a logical month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Resolve a logical month token ("YYYY-MM") to the first and last calendar
/// day of that month. Callers reject a bad token here, before any query.
pub fn resolve_month(token: &str) -> Result<MonthRange, MetricsError> {
    let bad = || MetricsError::InvalidPeriodFormat(token.to_string());

    let (year_part, month_part) = token.split_once('-').ok_or_else(bad)?;
    if year_part.len() != 4 || month_part.len() != 2 {
        return Err(bad());
    }
    let year: i32 = year_part.parse().map_err(|_| bad())?;
    let month: u32 = month_part.parse().map_err(|_| bad())?;

    let period_start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(bad)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(bad)?;
    let period_end = next_month.pred_opt().ok_or_else(bad)?;

    Ok(MonthRange {
        period_start,
        period_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolves_month_bounds() {
        let range = resolve_month("2025-09").unwrap();
        assert_eq!(range.period_start, date(2025, 9, 1));
        assert_eq!(range.period_end, date(2025, 9, 30));

        let range = resolve_month("2025-12").unwrap();
        assert_eq!(range.period_end, date(2025, 12, 31));
    }

    #[test]
    fn test_leap_year_february() {
        assert_eq!(
            resolve_month("2024-02").unwrap().period_end,
            date(2024, 2, 29)
        );
        assert_eq!(
            resolve_month("2025-02").unwrap().period_end,
            date(2025, 2, 28)
        );
        // Century rule
        assert_eq!(
            resolve_month("2000-02").unwrap().period_end,
            date(2000, 2, 29)
        );
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        for token in ["2025", "2025-13", "2025-00", "25-09", "2025-9", "2025/09", "abcd-ef", ""] {
            assert!(
                matches!(
                    resolve_month(token),
                    Err(MetricsError::InvalidPeriodFormat(_))
                ),
                "token {:?} should be rejected",
                token
            );
        }
    }

}
