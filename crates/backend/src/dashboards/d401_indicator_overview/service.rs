use crate::domain::{a001_indicator, a002_indicator_value};
use crate::shared::error::MetricsError;
use crate::shared::metrics::comparison::{self, Direction};
use crate::shared::metrics::grouping::group_by_category;
use crate::shared::metrics::period::resolve_month;
use crate::shared::metrics::status::classify_overall;
use contracts::dashboards::d401_indicator_overview::{
    CategorySection, ComparisonDto, IndicatorPanel, OverviewRequest, OverviewResponse,
};
use contracts::domain::a001_indicator::aggregate::Indicator;
use contracts::domain::a002_indicator_value::aggregate::{IndicatorValue, ValueFilter};
use std::collections::BTreeMap;

/// Period-over-period delta for one value. The precomputed percentage wins;
/// when it is absent the delta is derived from comparison_value on the spot,
/// and a value with nothing sound to compare against gets no comparison.
fn derive_comparison(value: &IndicatorValue) -> Option<ComparisonDto> {
    if let Some(percentage) = value.comparison_percentage {
        let direction = if percentage > 0.0 {
            Direction::Up
        } else if percentage < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        };
        return Some(ComparisonDto {
            percentage,
            display: format!("{:.1}", percentage),
            direction: direction.as_str().to_string(),
        });
    }

    let current = value.value?;
    let compared = comparison::compare(current, value.comparison_value)?;
    Some(ComparisonDto {
        percentage: compared.percentage,
        display: compared.display(),
        direction: compared.direction.as_str().to_string(),
    })
}

/// Assemble the category sections: every active indicator appears in its
/// group, carrying the most recent matching value. Values arrive newest
/// period first, so the representative value is the first match; rows are
/// never averaged together.
fn build_sections(
    grouped: BTreeMap<String, Vec<Indicator>>,
    values: &[IndicatorValue],
    compare_with_previous: bool,
) -> Vec<CategorySection> {
    grouped
        .into_iter()
        .map(|(category, indicators)| CategorySection {
            category,
            indicators: indicators
                .into_iter()
                .map(|indicator| {
                    let latest_value = values
                        .iter()
                        .find(|v| v.indicator_id == indicator.id)
                        .cloned();
                    let comparison = if compare_with_previous {
                        latest_value.as_ref().and_then(derive_comparison)
                    } else {
                        None
                    };
                    IndicatorPanel {
                        indicator,
                        latest_value,
                        comparison,
                    }
                })
                .collect(),
        })
        .collect()
}

/// Build the dashboard overview for a month and optional squad
pub async fn get_overview(request: OverviewRequest) -> Result<OverviewResponse, MetricsError> {
    let range = resolve_month(&request.month)?;

    let filter = ValueFilter {
        indicator_id: None,
        squad_id: request.squad_id.clone(),
        period_start_min: Some(range.period_start),
        period_end_max: Some(range.period_end),
    };

    let db = crate::shared::data::db::get_connection();
    let values = a002_indicator_value::repository::list(db, &filter).await?;
    let indicators = a001_indicator::repository::list_all(db, true).await?;

    let overall_status = classify_overall(&values);
    let indicator_count = indicators.len();
    let value_count = values.len();

    let sections = build_sections(
        group_by_category(indicators),
        &values,
        request.compare_with_previous,
    );

    Ok(OverviewResponse {
        period: request.month,
        period_start: range.period_start,
        period_end: range.period_end,
        overall_status: overall_status.as_str().to_string(),
        indicator_count,
        value_count,
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a001_indicator::aggregate::{IndicatorFormData, IndicatorId};
    use contracts::domain::a002_indicator_value::aggregate::{
        IndicatorValueId, PeriodType, ValueSource, ValueStatus,
    };
    use contracts::domain::common::EntityMetadata;

    fn indicator(acronym: &str, category: &str, priority: i32) -> Indicator {
        Indicator::new_for_insert(IndicatorFormData {
            is_active: true,
            is_kr: false,
            priority,
            name: format!("Indicator {}", acronym),
            acronym: acronym.to_string(),
            indicator_type: None,
            category: category.to_string(),
            description: None,
            objective: None,
            calculation_formula: None,
            action_when_bad: None,
            result_when_good: None,
            suggested_target: None,
            default_granularity: None,
            segmentation: None,
            integration_source: None,
            base_query: None,
        })
    }

    fn value_for(
        indicator_id: IndicatorId,
        period_start: &str,
        value: Option<f64>,
    ) -> IndicatorValue {
        let start = NaiveDate::parse_from_str(period_start, "%Y-%m-%d").unwrap();
        IndicatorValue {
            id: IndicatorValueId::new_v4(),
            indicator_id,
            value,
            text_value: None,
            period_type: PeriodType::Mensal,
            period_start: start,
            period_end: start,
            squad_id: None,
            product_name: None,
            comparison_value: None,
            comparison_percentage: None,
            status: ValueStatus::Neutral,
            source: ValueSource::Manual,
            import_batch_id: None,
            metadata: EntityMetadata::new(),
            indicator: None,
        }
    }

    #[test]
    fn test_precomputed_percentage_wins() {
        let mut v = value_for(IndicatorId::new_v4(), "2025-01-01", Some(90.0));
        v.comparison_value = Some(85.0);
        v.comparison_percentage = Some(-3.25);

        let dto = derive_comparison(&v).unwrap();
        assert_eq!(dto.percentage, -3.25);
        assert_eq!(dto.display, "-3.2");
        assert_eq!(dto.direction, "down");
    }

    #[test]
    fn test_missing_percentage_is_derived_from_comparison_value() {
        let mut v = value_for(IndicatorId::new_v4(), "2025-01-01", Some(90.0));
        v.comparison_value = Some(85.0);

        let dto = derive_comparison(&v).unwrap();
        assert_eq!(dto.display, "5.9");
        assert_eq!(dto.direction, "up");
    }

    #[test]
    fn test_zero_comparison_value_yields_no_comparison() {
        let mut v = value_for(IndicatorId::new_v4(), "2025-01-01", Some(90.0));
        v.comparison_value = Some(0.0);
        assert!(derive_comparison(&v).is_none());

        let v = value_for(IndicatorId::new_v4(), "2025-01-01", Some(90.0));
        assert!(derive_comparison(&v).is_none());
    }

    #[test]
    fn test_latest_value_is_first_match_in_desc_order() {
        let ind = indicator("LT", "Entrega", 5);
        // Repository order: period_start descending
        let values = vec![
            value_for(ind.id, "2025-03-01", Some(3.0)),
            value_for(ind.id, "2025-02-01", Some(2.0)),
            value_for(ind.id, "2025-01-01", Some(1.0)),
        ];

        let sections = build_sections(group_by_category(vec![ind]), &values, false);
        assert_eq!(sections.len(), 1);
        let panel = &sections[0].indicators[0];
        assert_eq!(panel.latest_value.as_ref().unwrap().value, Some(3.0));
        assert!(panel.comparison.is_none());
    }

    #[test]
    fn test_indicator_without_values_still_gets_a_panel() {
        let sections = build_sections(
            group_by_category(vec![indicator("LT", "Entrega", 0)]),
            &[],
            true,
        );
        let panel = &sections[0].indicators[0];
        assert!(panel.latest_value.is_none());
        assert!(panel.comparison.is_none());
    }
}
