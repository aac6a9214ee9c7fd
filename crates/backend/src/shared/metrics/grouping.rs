use contracts::domain::a001_indicator::aggregate::Indicator;
use std::collections::BTreeMap;

/// Grouping key used for indicators without a category
pub const FALLBACK_CATEGORY: &str = "Outros";

/// Partition indicators by category label and order them for display.
///
/// Category keys iterate lexicographically (BTreeMap order). Inside a group
/// indicators sort by priority descending; the sort is stable, so ties keep
/// their input order. Grouping an already-grouped flattening changes nothing.
pub fn group_by_category(indicators: Vec<Indicator>) -> BTreeMap<String, Vec<Indicator>> {
    let mut grouped: BTreeMap<String, Vec<Indicator>> = BTreeMap::new();

    for indicator in indicators {
        let category = if indicator.category.trim().is_empty() {
            FALLBACK_CATEGORY.to_string()
        } else {
            indicator.category.clone()
        };
        grouped.entry(category).or_default().push(indicator);
    }

    for group in grouped.values_mut() {
        group.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_indicator::aggregate::{IndicatorFormData, IndicatorId};
    use contracts::domain::common::AggregateId;

    fn indicator(name: &str, category: &str, priority: i32) -> Indicator {
        Indicator::new_for_insert(IndicatorFormData {
            is_active: true,
            is_kr: false,
            priority,
            name: name.to_string(),
            acronym: name.to_string(),
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

    #[test]
    fn test_categories_sort_lexicographically() {
        let grouped = group_by_category(vec![
            indicator("a", "Qualidade", 0),
            indicator("b", "Entrega", 0),
            indicator("c", "Pessoas", 0),
        ]);
        let keys: Vec<_> = grouped.keys().cloned().collect();
        assert_eq!(keys, ["Entrega", "Pessoas", "Qualidade"]);
    }

    #[test]
    fn test_priority_descending_with_stable_ties() {
        let grouped = group_by_category(vec![
            indicator("low", "Entrega", 1),
            indicator("first-tie", "Entrega", 5),
            indicator("second-tie", "Entrega", 5),
            indicator("high", "Entrega", 9),
        ]);
        let names: Vec<_> = grouped["Entrega"].iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["high", "first-tie", "second-tie", "low"]);
    }

    #[test]
    fn test_missing_category_falls_back() {
        let grouped = group_by_category(vec![indicator("a", "", 0), indicator("b", "  ", 0)]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[FALLBACK_CATEGORY].len(), 2);
    }

    #[test]
    fn test_partition_is_complete_and_duplicate_free() {
        let input = vec![
            indicator("a", "Entrega", 2),
            indicator("b", "", 1),
            indicator("c", "Qualidade", 3),
            indicator("d", "Entrega", 7),
        ];
        let ids: Vec<IndicatorId> = input.iter().map(|i| i.id).collect();

        let grouped = group_by_category(input);
        let mut regrouped_ids: Vec<IndicatorId> = grouped
            .values()
            .flatten()
            .map(|i| i.id)
            .collect();
        assert_eq!(regrouped_ids.len(), ids.len());
        regrouped_ids.sort_by_key(|id| id.as_string());
        let mut sorted_ids = ids.clone();
        sorted_ids.sort_by_key(|id| id.as_string());
        assert_eq!(regrouped_ids, sorted_ids);
    }

    #[test]
    fn test_idempotent_under_regrouping() {
        let input = vec![
            indicator("a", "Entrega", 2),
            indicator("b", "Entrega", 5),
            indicator("c", "Qualidade", 1),
        ];
        let once = group_by_category(input);
        let flattened: Vec<Indicator> = once.values().flatten().cloned().collect();
        let twice = group_by_category(flattened);

        let shape =
            |g: &BTreeMap<String, Vec<Indicator>>| -> Vec<(String, Vec<String>)> {
                g.iter()
                    .map(|(k, v)| (k.clone(), v.iter().map(|i| i.name.clone()).collect()))
                    .collect()
            };
        assert_eq!(shape(&once), shape(&twice));
    }
}
