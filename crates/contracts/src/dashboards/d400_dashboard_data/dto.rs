use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed key of the single dashboard document row
pub const DASHBOARD_CONFIG_KEY: &str = "dashboard-config";

// ============================================================================
// Chart series
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisEntry {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrProjectsEntry {
    pub month: String,
    /// Progress per squad name, 0..=1
    pub values: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrProjects {
    pub squads: Vec<String>,
    pub data: Vec<IrProjectsEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrackingEntry {
    pub month: String,
    pub bugs: i64,
    pub issues: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportBugEntry {
    pub month: String,
    pub score0: i64,
    pub score1: i64,
    pub score2: i64,
    pub score3: i64,
    pub score4: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub crisis_management: Vec<CrisisEntry>,
    pub ir_projects: IrProjects,
    pub monthly_tracking: Vec<MonthlyTrackingEntry>,
    pub support_bugs: Vec<SupportBugEntry>,
}

// ============================================================================
// Cards
// ============================================================================

/// One KPI card of the manual dashboard. `value` is display text, already
/// formatted by whoever edited the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardCard {
    pub value: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

impl DashboardCard {
    fn new(value: &str, subtitle: &str) -> Self {
        Self {
            value: value.to_string(),
            subtitle: subtitle.to_string(),
            goal: None,
            trend: None,
            progress: None,
        }
    }

    fn goal(mut self, goal: &str) -> Self {
        self.goal = Some(goal.to_string());
        self
    }

    fn trend(mut self, trend: &str) -> Self {
        self.trend = Some(trend.to_string());
        self
    }

    fn progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCards {
    pub critical_bugs: DashboardCard,
    pub bug_retention: DashboardCard,
    pub bugs_per_user: DashboardCard,
    pub efficiency: DashboardCard,
    pub refined_backlog: DashboardCard,
    pub code_coverage: DashboardCard,
    pub availability: DashboardCard,
    pub mttr: DashboardCard,
    pub technical_initiatives: DashboardCard,
}

// ============================================================================
// Document
// ============================================================================

/// The manual-dashboard document stored at DASHBOARD_CONFIG_KEY. Writes
/// replace the whole payload; reads fall back to the embedded default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub cards: DashboardCards,
    pub charts: DashboardCharts,
}

impl DashboardData {
    /// Embedded default document served when no stored row can be reached
    pub fn default_document() -> Self {
        Self {
            cards: DashboardCards {
                critical_bugs: DashboardCard::new("27", "26% do total em setembro"),
                bug_retention: DashboardCard::new("42%", "Agosto: 32%"),
                bugs_per_user: DashboardCard::new("0,28", "2024: 0,31")
                    .goal("0,26")
                    .trend("-9% YoY"),
                efficiency: DashboardCard::new("86%", "Meta: 85%")
                    .goal("85%")
                    .trend("+1%")
                    .progress(86.0),
                refined_backlog: DashboardCard::new("98%", "Meta: 50%")
                    .goal("50%")
                    .progress(98.0),
                code_coverage: DashboardCard::new("99,77%", "Meta: 100%")
                    .goal("100%")
                    .trend("-0,23%")
                    .progress(99.77),
                availability: DashboardCard::new("99,9%", "Meta: 99,9%").progress(100.0),
                mttr: DashboardCard::new("18 min", "Mean Time To Recovery"),
                technical_initiatives: DashboardCard::new("9,25%", "Meta: 7,5%")
                    .goal("7,5%")
                    .trend("+23%")
                    .progress(123.0),
            },
            charts: DashboardCharts {
                crisis_management: [
                    ("Jan", 6),
                    ("Fev", 4),
                    ("Mar", 9),
                    ("Abr", 3),
                    ("Mai", 15),
                    ("Jun", 2),
                    ("Jul", 3),
                    ("Ago", 2),
                    ("Set", 8),
                ]
                .into_iter()
                .map(|(month, count)| CrisisEntry {
                    month: month.to_string(),
                    count,
                })
                .collect(),
                ir_projects: IrProjects {
                    squads: vec![
                        "Controladoria".to_string(),
                        "RH".to_string(),
                        "Empresarial".to_string(),
                    ],
                    data: [
                        ("01 Ago", 0.57, 0.2, 0.2),
                        ("08 Ago", 0.65, 0.22, 0.24),
                        ("15 Ago", 0.75, 0.25, 0.26),
                        ("22 Ago", 0.85, 0.28, 0.28),
                        ("01 Set", 1.0, 0.3, 0.3),
                    ]
                    .into_iter()
                    .map(|(month, controladoria, rh, empresarial)| IrProjectsEntry {
                        month: month.to_string(),
                        values: BTreeMap::from([
                            ("Controladoria".to_string(), controladoria),
                            ("RH".to_string(), rh),
                            ("Empresarial".to_string(), empresarial),
                        ]),
                    })
                    .collect(),
                },
                monthly_tracking: [
                    ("Jan", 120, 45),
                    ("Fev", 115, 50),
                    ("Mar", 108, 42),
                    ("Abr", 125, 38),
                    ("Mai", 95, 55),
                    ("Jun", 130, 48),
                    ("Jul", 85, 52),
                    ("Ago", 98, 45),
                    ("Set", 88, 40),
                ]
                .into_iter()
                .map(|(month, bugs, issues)| MonthlyTrackingEntry {
                    month: month.to_string(),
                    bugs,
                    issues,
                })
                .collect(),
                support_bugs: [
                    ("Jan", 21, 34, 28, 18),
                    ("Fev", 26, 38, 30, 22),
                    ("Mar", 24, 36, 32, 20),
                    ("Abr", 28, 40, 34, 24),
                    ("Mai", 22, 32, 28, 18),
                    ("Jun", 30, 48, 38, 28),
                    ("Jul", 26, 42, 36, 24),
                    ("Ago", 28, 44, 38, 26),
                    ("Set", 24, 40, 34, 22),
                ]
                .into_iter()
                .map(|(month, score1, score2, score3, score4)| SupportBugEntry {
                    month: month.to_string(),
                    score0: 0,
                    score1,
                    score2,
                    score3,
                    score4,
                })
                .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_roundtrips() {
        let doc = DashboardData::default_document();
        let json = serde_json::to_string(&doc).unwrap();
        let back: DashboardData = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_default_document_wire_names() {
        let doc = DashboardData::default_document();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["cards"]["criticalBugs"]["value"].is_string());
        assert!(json["charts"]["crisisManagement"].is_array());
        assert_eq!(json["charts"]["irProjects"]["squads"][0], "Controladoria");
    }
}
