use serde::{Deserialize, Serialize};

/// Trend of a period-over-period delta. Direction is polarity-agnostic:
/// whether "up" is good belongs to the indicator, not to the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Flat => "flat",
        }
    }
}

/// Relative change of a current value against a prior-period value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    /// Full precision, kept for downstream arithmetic
    pub percentage: f64,
    pub direction: Direction,
}

impl Comparison {
    /// One-decimal rendering for display only
    pub fn display(&self) -> String {
        format!("{:.1}", self.percentage)
    }
}

/// Compare a current value against a prior-period value.
///
/// Returns None when there is nothing sound to compare against: a missing or
/// zero previous value. The division is never performed in that case.
pub fn compare(current: f64, previous: Option<f64>) -> Option<Comparison> {
    let previous = previous?;
    if previous == 0.0 {
        return None;
    }

    let percentage = (current - previous) / previous * 100.0;
    let direction = if percentage > 0.0 {
        Direction::Up
    } else if percentage < 0.0 {
        Direction::Down
    } else {
        Direction::Flat
    };

    Some(Comparison {
        percentage,
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase() {
        let c = compare(90.0, Some(85.0)).unwrap();
        assert!((c.percentage - 5.882352941176471).abs() < 1e-12);
        assert_eq!(c.display(), "5.9");
        assert_eq!(c.direction, Direction::Up);
    }

    #[test]
    fn test_decrease() {
        let c = compare(80.0, Some(100.0)).unwrap();
        assert_eq!(c.percentage, -20.0);
        assert_eq!(c.display(), "-20.0");
        assert_eq!(c.direction, Direction::Down);
    }

    #[test]
    fn test_flat() {
        let c = compare(50.0, Some(50.0)).unwrap();
        assert_eq!(c.percentage, 0.0);
        assert_eq!(c.direction, Direction::Flat);
    }

    #[test]
    fn test_zero_previous_has_no_comparison() {
        assert!(compare(42.0, Some(0.0)).is_none());
        assert!(compare(0.0, Some(0.0)).is_none());
    }

    #[test]
    fn test_missing_previous_has_no_comparison() {
        assert!(compare(42.0, None).is_none());
    }
}
