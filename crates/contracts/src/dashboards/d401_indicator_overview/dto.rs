use crate::domain::a001_indicator::aggregate::Indicator;
use crate::domain::a002_indicator_value::aggregate::IndicatorValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request for the indicator dashboard overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewRequest {
    /// Logical month token, "YYYY-MM"
    pub month: String,
    /// Narrow to one squad; absent means all
    pub squad_id: Option<String>,
    /// Attach period-over-period comparisons to each panel
    #[serde(default = "default_true")]
    pub compare_with_previous: bool,
}

fn default_true() -> bool {
    true
}

/// Period-over-period delta for one panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonDto {
    /// Full-precision relative change
    pub percentage: f64,
    /// One-decimal rendering, e.g. "5.9"
    pub display: String,
    /// "up" | "down" | "flat"
    pub direction: String,
}

/// One indicator card with its representative value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorPanel {
    pub indicator: Indicator,
    /// Most recent matching value by period_start, when any
    pub latest_value: Option<IndicatorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonDto>,
}

/// One dashboard section: a category and its ordered indicators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySection {
    pub category: String,
    pub indicators: Vec<IndicatorPanel>,
}

/// Response for the indicator dashboard overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewResponse {
    /// Echo of the month token
    pub period: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// "critical" | "attention" | "success" | "neutral"
    pub overall_status: String,
    pub indicator_count: usize,
    pub value_count: usize,
    /// Sections in lexicographic category order
    pub sections: Vec<CategorySection>,
}
