use contracts::domain::a002_indicator_value::aggregate::{IndicatorValue, ValueStatus};
use serde::{Deserialize, Serialize};

/// Aggregate health of the whole dashboard for the active filter.
///
/// Note the vocabulary shift: per-value statuses are writer-supplied
/// critical/warning/excellent/neutral tags; the rollup speaks in
/// critical/attention/success/neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Critical,
    Attention,
    Success,
    Neutral,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Critical => "critical",
            OverallStatus::Attention => "attention",
            OverallStatus::Success => "success",
            OverallStatus::Neutral => "neutral",
        }
    }
}

/// Fixed policy constant: more than this many warnings flips the dashboard
/// to "attention". Deliberately not configurable.
const WARNING_ATTENTION_THRESHOLD: usize = 2;

/// Roll the per-value statuses up into one dashboard-level verdict.
///
/// Any critical value dominates. Otherwise more than two warnings demand
/// attention; otherwise excellents outnumbering warnings count as success;
/// anything else, including an empty set, stays neutral.
pub fn classify_overall(values: &[IndicatorValue]) -> OverallStatus {
    let mut critical = 0usize;
    let mut warning = 0usize;
    let mut excellent = 0usize;

    for value in values {
        match value.status {
            ValueStatus::Critical => critical += 1,
            ValueStatus::Warning => warning += 1,
            ValueStatus::Excellent => excellent += 1,
            ValueStatus::Neutral => {}
        }
    }

    if critical > 0 {
        OverallStatus::Critical
    } else if warning > WARNING_ATTENTION_THRESHOLD {
        OverallStatus::Attention
    } else if excellent > warning {
        OverallStatus::Success
    } else {
        OverallStatus::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_indicator::aggregate::IndicatorId;
    use contracts::domain::a002_indicator_value::aggregate::{
        IndicatorValueId, PeriodType, ValueSource,
    };
    use contracts::domain::common::EntityMetadata;
    use chrono::NaiveDate;

    fn value_with_status(status: ValueStatus) -> IndicatorValue {
        IndicatorValue {
            id: IndicatorValueId::new_v4(),
            indicator_id: IndicatorId::new_v4(),
            value: Some(1.0),
            text_value: None,
            period_type: PeriodType::Mensal,
            period_start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            squad_id: None,
            product_name: None,
            comparison_value: None,
            comparison_percentage: None,
            status,
            source: ValueSource::Manual,
            import_batch_id: None,
            metadata: EntityMetadata::new(),
            indicator: None,
        }
    }

    fn values(statuses: &[ValueStatus]) -> Vec<IndicatorValue> {
        statuses.iter().map(|s| value_with_status(*s)).collect()
    }

    #[test]
    fn test_empty_is_neutral() {
        assert_eq!(classify_overall(&[]), OverallStatus::Neutral);
    }

    #[test]
    fn test_any_critical_dominates() {
        use ValueStatus::*;
        let vs = values(&[Excellent, Warning, Critical, Neutral]);
        assert_eq!(classify_overall(&vs), OverallStatus::Critical);
        // Position does not matter
        let vs = values(&[Critical, Excellent, Excellent]);
        assert_eq!(classify_overall(&vs), OverallStatus::Critical);
    }

    #[test]
    fn test_three_warnings_is_attention() {
        use ValueStatus::*;
        let vs = values(&[Warning, Warning, Warning]);
        assert_eq!(classify_overall(&vs), OverallStatus::Attention);
    }

    #[test]
    fn test_two_warnings_is_not_attention() {
        use ValueStatus::*;
        // Falls through to the excellent/warning comparison
        let vs = values(&[Warning, Warning]);
        assert_eq!(classify_overall(&vs), OverallStatus::Neutral);
        let vs = values(&[Warning, Warning, Excellent, Excellent, Excellent]);
        assert_eq!(classify_overall(&vs), OverallStatus::Success);
    }

    #[test]
    fn test_excellent_majority_is_success() {
        use ValueStatus::*;
        let vs = values(&[Excellent, Neutral]);
        assert_eq!(classify_overall(&vs), OverallStatus::Success);
        // Tie is not a majority
        let vs = values(&[Excellent, Warning]);
        assert_eq!(classify_overall(&vs), OverallStatus::Neutral);
    }
}
