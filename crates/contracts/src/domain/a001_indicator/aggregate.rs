use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id type for the Indicator aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorId(pub Uuid);

impl IndicatorId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for IndicatorId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(IndicatorId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// IndicatorType
// ============================================================================

/// Leading/lagging classification of a metric
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IndicatorType {
    Upstream,
    Downstream,
}

impl IndicatorType {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "Upstream" => Ok(IndicatorType::Upstream),
            "Downstream" => Ok(IndicatorType::Downstream),
            _ => Err(format!("Unknown indicator type: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorType::Upstream => "Upstream",
            IndicatorType::Downstream => "Downstream",
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Indicator aggregate
///
/// One aggregate = one named metric definition. Values recorded against it
/// live in the a002_indicator_value collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicator {
    pub id: IndicatorId,

    /// Disabled indicators stay in storage but drop off the dashboard
    pub is_active: bool,
    /// Marks the indicator as a key result
    pub is_kr: bool,
    /// Higher priority sorts first inside a category
    pub priority: i32,

    pub name: String,
    /// Short mnemonic used on cards and in bulk-import files
    pub acronym: String,
    #[serde(rename = "type")]
    pub indicator_type: Option<IndicatorType>,
    /// Free-text grouping key for dashboard sections
    pub category: String,

    pub description: Option<String>,
    pub objective: Option<String>,
    pub calculation_formula: Option<String>,
    pub action_when_bad: Option<String>,
    pub result_when_good: Option<String>,
    pub suggested_target: Option<String>,
    pub default_granularity: Option<String>,
    pub segmentation: Option<String>,
    /// Hint for the (future) external sync integration
    pub integration_source: Option<String>,
    pub base_query: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Indicator {
    pub fn new_for_insert(form: IndicatorFormData) -> Self {
        Self {
            id: IndicatorId::new_v4(),
            is_active: form.is_active,
            is_kr: form.is_kr,
            priority: form.priority,
            name: form.name,
            acronym: form.acronym,
            indicator_type: form.indicator_type,
            category: form.category,
            description: form.description,
            objective: form.objective,
            calculation_formula: form.calculation_formula,
            action_when_bad: form.action_when_bad,
            result_when_good: form.result_when_good,
            suggested_target: form.suggested_target,
            default_granularity: form.default_granularity,
            segmentation: form.segmentation,
            integration_source: form.integration_source,
            base_query: form.base_query,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Apply editable fields from a form
    pub fn apply(&mut self, form: IndicatorFormData) {
        self.is_active = form.is_active;
        self.is_kr = form.is_kr;
        self.priority = form.priority;
        self.name = form.name;
        self.acronym = form.acronym;
        self.indicator_type = form.indicator_type;
        self.category = form.category;
        self.description = form.description;
        self.objective = form.objective;
        self.calculation_formula = form.calculation_formula;
        self.action_when_bad = form.action_when_bad;
        self.result_when_good = form.result_when_good;
        self.suggested_target = form.suggested_target;
        self.default_granularity = form.default_granularity;
        self.segmentation = form.segmentation;
        self.integration_source = form.integration_source;
        self.base_query = form.base_query;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Indicator name must not be empty".into());
        }
        if self.acronym.trim().is_empty() {
            return Err("Indicator acronym must not be empty".into());
        }
        if self.category.trim().is_empty() {
            return Err("Indicator category must not be empty".into());
        }
        Ok(())
    }

    pub fn touch_updated(&mut self) {
        self.metadata.touch();
    }
}

impl AggregateRoot for Indicator {
    type Id = IndicatorId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "indicator"
    }

    fn element_name() -> &'static str {
        "Indicator"
    }

    fn list_name() -> &'static str {
        "Indicators"
    }
}

// ============================================================================
// Form data
// ============================================================================

/// Editable fields of an Indicator, as submitted by the admin form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorFormData {
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_kr: bool,
    #[serde(default)]
    pub priority: i32,
    pub name: String,
    pub acronym: String,
    #[serde(rename = "type")]
    pub indicator_type: Option<IndicatorType>,
    pub category: String,
    pub description: Option<String>,
    pub objective: Option<String>,
    pub calculation_formula: Option<String>,
    pub action_when_bad: Option<String>,
    pub result_when_good: Option<String>,
    pub suggested_target: Option<String>,
    pub default_granularity: Option<String>,
    pub segmentation: Option<String>,
    pub integration_source: Option<String>,
    pub base_query: Option<String>,
}

fn default_true() -> bool {
    true
}
