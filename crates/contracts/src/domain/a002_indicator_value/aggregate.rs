use crate::domain::a001_indicator::aggregate::{Indicator, IndicatorId};
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id type for the IndicatorValue aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorValueId(pub Uuid);

impl IndicatorValueId {
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

impl AggregateId for IndicatorValueId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(IndicatorValueId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Granularity of the reporting window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Sprint,
    Mensal,
    Trimestral,
    Anual,
}

impl PeriodType {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "sprint" => Ok(PeriodType::Sprint),
            "mensal" => Ok(PeriodType::Mensal),
            "trimestral" => Ok(PeriodType::Trimestral),
            "anual" => Ok(PeriodType::Anual),
            _ => Err(format!("Unknown period type: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Sprint => "sprint",
            PeriodType::Mensal => "mensal",
            PeriodType::Trimestral => "trimestral",
            PeriodType::Anual => "anual",
        }
    }
}

/// Writer-supplied health tag. Never derived from thresholds by this system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueStatus {
    Critical,
    Warning,
    Excellent,
    Neutral,
}

impl ValueStatus {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "critical" => Ok(ValueStatus::Critical),
            "warning" => Ok(ValueStatus::Warning),
            "excellent" => Ok(ValueStatus::Excellent),
            "neutral" => Ok(ValueStatus::Neutral),
            _ => Err(format!("Unknown value status: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueStatus::Critical => "critical",
            ValueStatus::Warning => "warning",
            ValueStatus::Excellent => "excellent",
            ValueStatus::Neutral => "neutral",
        }
    }
}

/// How the observation entered the system
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    Manual,
    Import,
    Api,
    AzureDevops,
}

impl ValueSource {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "manual" => Ok(ValueSource::Manual),
            "import" => Ok(ValueSource::Import),
            "api" => Ok(ValueSource::Api),
            "azure_devops" => Ok(ValueSource::AzureDevops),
            _ => Err(format!("Unknown value source: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueSource::Manual => "manual",
            ValueSource::Import => "import",
            ValueSource::Api => "api",
            ValueSource::AzureDevops => "azure_devops",
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// IndicatorValue aggregate
///
/// One observation of an Indicator for a reporting window, optionally scoped
/// to a squad and/or product. Belongs to exactly one Indicator; the owning
/// reference is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub id: IndicatorValueId,
    pub indicator_id: IndicatorId,

    /// Numeric observation, when the metric is numeric
    pub value: Option<f64>,
    /// Free-text observation, when the metric is not
    pub text_value: Option<String>,

    pub period_type: PeriodType,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,

    pub squad_id: Option<String>,
    pub product_name: Option<String>,

    /// Prior-period value captured at write time
    pub comparison_value: Option<f64>,
    /// Precomputed delta; when absent it is derived from comparison_value at
    /// consumption time, never rewritten into the row
    pub comparison_percentage: Option<f64>,

    pub status: ValueStatus,
    pub source: ValueSource,
    pub import_batch_id: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,

    /// Owning indicator, populated by the joined list read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<Indicator>,
}

impl IndicatorValue {
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.metadata.touch();
    }
}

impl AggregateRoot for IndicatorValue {
    type Id = IndicatorValueId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "indicator_value"
    }

    fn element_name() -> &'static str {
        "Indicator value"
    }

    fn list_name() -> &'static str {
        "Indicator values"
    }
}

// ============================================================================
// Form data
// ============================================================================

/// Fields accepted when recording an observation, by hand or from a bulk
/// import row. Dates stay strings here; they are validated when the record is
/// written, so a parsed import row carries its cells through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValueFormData {
    pub indicator_id: String,
    pub value: Option<f64>,
    pub text_value: Option<String>,
    pub period_type: PeriodType,
    pub period_start: String,
    pub period_end: String,
    pub squad_id: Option<String>,
    /// Squad by display name, as written in import files; resolved against
    /// the squad collection before insert
    pub squad_name: Option<String>,
    pub product_name: Option<String>,
    pub comparison_value: Option<f64>,
    pub comparison_percentage: Option<f64>,
    #[serde(default = "default_status")]
    pub status: ValueStatus,
    pub source: ValueSource,
    pub import_batch_id: Option<String>,
}

fn default_status() -> ValueStatus {
    ValueStatus::Neutral
}

// ============================================================================
// Filter
// ============================================================================

/// AND-combined narrowing filter for the value list read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueFilter {
    pub indicator_id: Option<String>,
    pub squad_id: Option<String>,
    /// Lower bound on period_start (inclusive)
    pub period_start_min: Option<NaiveDate>,
    /// Upper bound on period_end (inclusive)
    pub period_end_max: Option<NaiveDate>,
}
