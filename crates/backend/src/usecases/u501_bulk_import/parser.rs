//! Line-based parser for the bulk value import format.
//!
//! The format is deliberately simple: comma-separated cells, no quoting and
//! no escaping, so a comma inside a text cell splits it. Downstream templates
//! assume this exact shape; do not swap in a quoting CSV reader.

use contracts::domain::a001_indicator::aggregate::Indicator;
use contracts::domain::a002_indicator_value::aggregate::{
    IndicatorValueFormData, PeriodType, ValueSource, ValueStatus,
};
use contracts::domain::common::AggregateId;
use std::collections::HashMap;

/// Result of one parse run. Partial success is the normal contract: rows that
/// resolve become records, rows that do not become error strings, and both
/// come back together.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<IndicatorValueFormData>,
    pub errors: Vec<String>,
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn cell<'a>(fields: &'a HashMap<&str, &str>, name: &str) -> &'a str {
    fields.get(name).copied().unwrap_or("")
}

fn optional_text(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

// Unparseable numbers are treated like empty cells
fn optional_number(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok()
}

/// Parse raw import text against the known indicator set.
///
/// Blank lines and `#` comment lines are stripped first; the first surviving
/// line is the header and data rows are numbered from there (header = row 1).
/// Rows with fewer cells than the header are skipped silently. A row whose
/// acronym matches no known indicator is reported in `errors` and produces no
/// record. An input that is empty after stripping yields zero records and
/// zero errors; distinguishing that from success is the caller's job.
pub fn parse(raw_text: &str, known_indicators: &[Indicator]) -> ParseOutcome {
    let lines: Vec<&str> = raw_text
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty() && !is_comment(line))
        .collect();

    let mut outcome = ParseOutcome::default();

    let Some(header_line) = lines.first() else {
        return outcome;
    };
    let headers: Vec<&str> = header_line.split(',').map(|h| h.trim()).collect();

    for (row_index, line) in lines.iter().enumerate().skip(1) {
        let cells: Vec<&str> = line.split(',').map(|c| c.trim()).collect();
        if cells.len() < headers.len() {
            continue;
        }

        let fields: HashMap<&str, &str> = headers
            .iter()
            .copied()
            .zip(cells.iter().copied())
            .collect();

        let acronym = cell(&fields, "indicator_acronym");
        let Some(indicator) = known_indicators
            .iter()
            .find(|ind| ind.acronym.eq_ignore_ascii_case(acronym))
        else {
            outcome.errors.push(format!(
                "Row {}: indicator '{}' not found",
                row_index + 1,
                acronym
            ));
            continue;
        };

        let period_type_raw = cell(&fields, "period_type");
        let Ok(period_type) = PeriodType::from_str(period_type_raw) else {
            outcome.errors.push(format!(
                "Row {}: invalid period_type '{}'",
                row_index + 1,
                period_type_raw
            ));
            continue;
        };

        let status_raw = cell(&fields, "status");
        let status = if status_raw.is_empty() {
            ValueStatus::Neutral
        } else {
            // Unknown tags fall back rather than dropping the row
            ValueStatus::from_str(status_raw).unwrap_or(ValueStatus::Neutral)
        };

        outcome.records.push(IndicatorValueFormData {
            indicator_id: indicator.id.as_string(),
            value: optional_number(cell(&fields, "value")),
            text_value: optional_text(cell(&fields, "text_value")),
            period_type,
            period_start: cell(&fields, "period_start").to_string(),
            period_end: cell(&fields, "period_end").to_string(),
            squad_id: None,
            squad_name: optional_text(cell(&fields, "squad_name")),
            product_name: optional_text(cell(&fields, "product_name")),
            comparison_value: optional_number(cell(&fields, "comparison_value")),
            comparison_percentage: None,
            status,
            // Imports always self-identify, whatever the file says
            source: ValueSource::Import,
            import_batch_id: None,
        });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_indicator::aggregate::IndicatorFormData;

    fn indicator(acronym: &str) -> Indicator {
        Indicator::new_for_insert(IndicatorFormData {
            is_active: true,
            is_kr: false,
            priority: 0,
            name: format!("Indicator {}", acronym),
            acronym: acronym.to_string(),
            indicator_type: None,
            category: "Qualidade".to_string(),
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

    const HEADER: &str = "indicator_acronym,period_type,period_start,period_end,value";

    #[test]
    fn test_matched_and_unmatched_rows() {
        let known = vec![indicator("LT")];
        let text = format!(
            "{}\nLT,mensal,2024-01-01,2024-01-31,4.5\nXX,mensal,2024-01-01,2024-01-31,9.9\n",
            HEADER
        );
        let outcome = parse(&text, &known);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
        // Header is row 1, so the bad data row is row 3
        assert_eq!(outcome.errors[0], "Row 3: indicator 'XX' not found");
        assert_eq!(outcome.records[0].value, Some(4.5));
        assert_eq!(outcome.records[0].source, ValueSource::Import);
    }

    #[test]
    fn test_acronym_match_is_case_insensitive() {
        let known = vec![indicator("LT")];
        let text = format!("{}\nlt,mensal,2024-01-01,2024-01-31,1\n", HEADER);
        let outcome = parse(&text, &known);
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_comment_lines_are_invisible_to_row_numbering() {
        let known = vec![indicator("LT")];
        let text = format!(
            "{}\nLT,mensal,2024-01-01,2024-01-31,1\n# a comment between rows\n  # indented comment\nXX,mensal,2024-02-01,2024-02-28,2\n",
            HEADER
        );
        let outcome = parse(&text, &known);
        assert_eq!(outcome.records.len(), 1);
        // Comments do not advance the counter: the XX row is still row 3
        assert_eq!(outcome.errors, vec!["Row 3: indicator 'XX' not found"]);
    }

    #[test]
    fn test_short_rows_are_skipped_silently() {
        let known = vec![indicator("LT")];
        let text = format!("{}\nLT,mensal\nLT,mensal,2024-01-01,2024-01-31,1\n", HEADER);
        let outcome = parse(&text, &known);
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let known = vec![indicator("LT")];
        for text in ["", "\n\n", "# only comments\n# here\n"] {
            let outcome = parse(text, &known);
            assert!(outcome.records.is_empty());
            assert!(outcome.errors.is_empty());
        }
        // A lone header also produces no records and no errors
        let outcome = parse(HEADER, &known);
        assert!(outcome.records.is_empty());
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_status_defaults_to_neutral() {
        let known = vec![indicator("LT")];
        let header = "indicator_acronym,period_type,period_start,period_end,value,status";
        let text = format!(
            "{}\nLT,mensal,2024-01-01,2024-01-31,1,\nLT,mensal,2024-02-01,2024-02-28,2,excellent\n",
            header
        );
        let outcome = parse(&text, &known);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].status, ValueStatus::Neutral);
        assert_eq!(outcome.records[1].status, ValueStatus::Excellent);
    }

    #[test]
    fn test_source_is_forced_to_import() {
        let known = vec![indicator("LT")];
        let header = "indicator_acronym,period_type,period_start,period_end,value,source";
        let text = format!("{}\nLT,mensal,2024-01-01,2024-01-31,1,manual\n", header);
        let outcome = parse(&text, &known);
        assert_eq!(outcome.records[0].source, ValueSource::Import);
    }

    #[test]
    fn test_text_and_numeric_cells_stay_separate() {
        let known = vec![indicator("LT")];
        let header =
            "indicator_acronym,period_type,period_start,period_end,value,text_value,squad_name";
        let text = format!(
            "{}\nLT,trimestral,2024-01-01,2024-03-31,,on track,Squad Alpha\n",
            header
        );
        let outcome = parse(&text, &known);
        let record = &outcome.records[0];
        assert_eq!(record.value, None);
        assert_eq!(record.text_value.as_deref(), Some("on track"));
        assert_eq!(record.squad_name.as_deref(), Some("Squad Alpha"));
        assert_eq!(record.period_type, PeriodType::Trimestral);
    }

    #[test]
    fn test_invalid_period_type_is_a_row_error() {
        let known = vec![indicator("LT")];
        let text = format!("{}\nLT,weekly,2024-01-01,2024-01-07,1\n", HEADER);
        let outcome = parse(&text, &known);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.errors, vec!["Row 2: invalid period_type 'weekly'"]);
    }

    #[test]
    fn test_embedded_comma_splits_the_cell() {
        // Documented limitation: no quoting, the comma wins
        let known = vec![indicator("LT")];
        let header = "indicator_acronym,period_type,period_start,period_end,value,text_value";
        let text = format!(
            "{}\nLT,mensal,2024-01-01,2024-01-31,1,\"stable, mostly\"\n",
            header
        );
        let outcome = parse(&text, &known);
        assert_eq!(outcome.records.len(), 1);
        // The quote is not interpreted; the cell ends at the comma
        assert_eq!(outcome.records[0].text_value.as_deref(), Some("\"stable"));
    }
}
