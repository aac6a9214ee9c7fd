use super::strategies::{
    BlobStrategy, DirectTableStrategy, EdgeFunctionStrategy, RpcStrategy, RPC_FETCH_FN,
    RPC_SAVE_FN,
};
use crate::shared::error::MetricsError;
use contracts::dashboards::d400_dashboard_data::DashboardData;

/// Failure signature of a backend whose procedures have not been migrated in
/// yet: the error names the missing procedure, or the platform complains
/// about a stale schema cache. Matched case-insensitively, injected into the
/// chain once rather than re-derived per call site.
pub fn is_missing_schema_error(err: &MetricsError) -> bool {
    let msg = err.to_string().to_lowercase();
    msg.contains(RPC_FETCH_FN)
        || msg.contains(RPC_SAVE_FN)
        || msg.contains("schema cache")
}

fn default_strategies() -> Vec<Box<dyn BlobStrategy>> {
    let endpoint_url = crate::shared::config::get().dashboard.endpoint_url.clone();
    vec![
        Box::new(RpcStrategy),
        Box::new(EdgeFunctionStrategy::new(endpoint_url)),
        Box::new(DirectTableStrategy),
    ]
}

/// Walk the fetch chain. The first strategy only falls through on the
/// missing-schema signature; later strategies fall through on any failure.
/// The read path is best-effort: when nothing works the embedded default
/// document comes back, never an error.
pub async fn fetch_with(
    strategies: &[Box<dyn BlobStrategy>],
    is_missing_schema: impl Fn(&MetricsError) -> bool,
) -> DashboardData {
    for (tier, strategy) in strategies.iter().enumerate() {
        match strategy.fetch().await {
            Ok(data) => return data,
            Err(err) => {
                if tier == 0 && !is_missing_schema(&err) {
                    tracing::warn!(
                        "dashboard fetch via {} failed, serving default: {}",
                        strategy.name(),
                        err
                    );
                    return DashboardData::default_document();
                }
                tracing::warn!("dashboard fetch via {} failed: {}", strategy.name(), err);
            }
        }
    }
    DashboardData::default_document()
}

/// Walk the save chain. Same fall-through rules as fetch, but there is no
/// silent degradation on the write path: exhausting the chain, or a tier-1
/// failure that is not the missing-schema signature, is a persistence error.
pub async fn save_with(
    strategies: &[Box<dyn BlobStrategy>],
    is_missing_schema: impl Fn(&MetricsError) -> bool,
    data: &DashboardData,
) -> Result<DashboardData, MetricsError> {
    let mut last_error: Option<MetricsError> = None;

    for (tier, strategy) in strategies.iter().enumerate() {
        match strategy.save(data).await {
            Ok(saved) => return Ok(saved),
            Err(err) => {
                if tier == 0 && !is_missing_schema(&err) {
                    return Err(MetricsError::Persistence(err.to_string()));
                }
                tracing::warn!("dashboard save via {} failed: {}", strategy.name(), err);
                last_error = Some(err);
            }
        }
    }

    Err(MetricsError::Persistence(format!(
        "dashboard save exhausted every strategy: {}",
        last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no strategies configured".to_string())
    )))
}

pub async fn fetch() -> DashboardData {
    fetch_with(&default_strategies(), is_missing_schema_error).await
}

pub async fn save(data: &DashboardData) -> Result<DashboardData, MetricsError> {
    save_with(&default_strategies(), is_missing_schema_error, data).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    enum Behavior {
        Succeed,
        FailMissingSchema,
        FailOther,
    }

    struct MockStrategy {
        name: &'static str,
        behavior: Behavior,
        calls: Arc<AtomicUsize>,
    }

    impl MockStrategy {
        fn boxed(
            name: &'static str,
            behavior: Behavior,
            calls: &Arc<AtomicUsize>,
        ) -> Box<dyn BlobStrategy> {
            Box::new(Self {
                name,
                behavior,
                calls: Arc::clone(calls),
            })
        }

        fn run(&self) -> Result<DashboardData, MetricsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Succeed => Ok(DashboardData::default_document()),
                Behavior::FailMissingSchema => Err(MetricsError::Persistence(
                    "Could not find function get_dashboard_data in the SCHEMA CACHE".to_string(),
                )),
                Behavior::FailOther => {
                    Err(MetricsError::Persistence("connection reset".to_string()))
                }
            }
        }
    }

    #[async_trait]
    impl BlobStrategy for MockStrategy {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self) -> Result<DashboardData, MetricsError> {
            self.run()
        }

        async fn save(&self, _data: &DashboardData) -> Result<DashboardData, MetricsError> {
            self.run()
        }
    }

    fn counters() -> (Arc<AtomicUsize>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (
            Arc::new(AtomicUsize::new(0)),
            Arc::new(AtomicUsize::new(0)),
            Arc::new(AtomicUsize::new(0)),
        )
    }

    #[tokio::test]
    async fn test_fetch_missing_schema_walks_the_chain_in_order() {
        let (c1, c2, c3) = counters();
        let strategies = vec![
            MockStrategy::boxed("rpc", Behavior::FailMissingSchema, &c1),
            MockStrategy::boxed("edge", Behavior::FailOther, &c2),
            MockStrategy::boxed("direct", Behavior::Succeed, &c3),
        ];

        let data = fetch_with(&strategies, is_missing_schema_error).await;
        assert_eq!(data, DashboardData::default_document());
        // Second strategy ran exactly once before the third
        assert_eq!(c1.load(Ordering::SeqCst), 1);
        assert_eq!(c2.load(Ordering::SeqCst), 1);
        assert_eq!(c3.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_failing_serves_the_default() {
        let (c1, c2, c3) = counters();
        let strategies = vec![
            MockStrategy::boxed("rpc", Behavior::FailMissingSchema, &c1),
            MockStrategy::boxed("edge", Behavior::FailOther, &c2),
            MockStrategy::boxed("direct", Behavior::FailOther, &c3),
        ];

        let data = fetch_with(&strategies, is_missing_schema_error).await;
        assert_eq!(data, DashboardData::default_document());
        assert_eq!(c3.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_other_tier1_failure_short_circuits_to_default() {
        let (c1, c2, c3) = counters();
        let strategies = vec![
            MockStrategy::boxed("rpc", Behavior::FailOther, &c1),
            MockStrategy::boxed("edge", Behavior::Succeed, &c2),
            MockStrategy::boxed("direct", Behavior::Succeed, &c3),
        ];

        let data = fetch_with(&strategies, is_missing_schema_error).await;
        assert_eq!(data, DashboardData::default_document());
        // Read path is best-effort: no chain walk on a non-schema failure
        assert_eq!(c2.load(Ordering::SeqCst), 0);
        assert_eq!(c3.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_first_success_stops_the_chain() {
        let (c1, c2, c3) = counters();
        let strategies = vec![
            MockStrategy::boxed("rpc", Behavior::Succeed, &c1),
            MockStrategy::boxed("edge", Behavior::Succeed, &c2),
            MockStrategy::boxed("direct", Behavior::Succeed, &c3),
        ];

        fetch_with(&strategies, is_missing_schema_error).await;
        assert_eq!(c1.load(Ordering::SeqCst), 1);
        assert_eq!(c2.load(Ordering::SeqCst), 0);
        assert_eq!(c3.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_save_never_degrades_silently() {
        let (c1, c2, c3) = counters();
        let strategies = vec![
            MockStrategy::boxed("rpc", Behavior::FailMissingSchema, &c1),
            MockStrategy::boxed("edge", Behavior::FailOther, &c2),
            MockStrategy::boxed("direct", Behavior::FailOther, &c3),
        ];

        let result = save_with(
            &strategies,
            is_missing_schema_error,
            &DashboardData::default_document(),
        )
        .await;
        assert!(matches!(result, Err(MetricsError::Persistence(_))));
        assert_eq!(c2.load(Ordering::SeqCst), 1);
        assert_eq!(c3.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_save_non_schema_tier1_failure_aborts() {
        let (c1, c2, c3) = counters();
        let strategies = vec![
            MockStrategy::boxed("rpc", Behavior::FailOther, &c1),
            MockStrategy::boxed("edge", Behavior::Succeed, &c2),
            MockStrategy::boxed("direct", Behavior::Succeed, &c3),
        ];

        let result = save_with(
            &strategies,
            is_missing_schema_error,
            &DashboardData::default_document(),
        )
        .await;
        assert!(matches!(result, Err(MetricsError::Persistence(_))));
        assert_eq!(c2.load(Ordering::SeqCst), 0);
        assert_eq!(c3.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_schema_predicate_is_case_insensitive() {
        let err = MetricsError::Persistence("stale Schema Cache, retry later".to_string());
        assert!(is_missing_schema_error(&err));
        let err = MetricsError::Persistence("no such function: GET_DASHBOARD_DATA".to_string());
        assert!(is_missing_schema_error(&err));
        let err = MetricsError::Persistence("connection reset".to_string());
        assert!(!is_missing_schema_error(&err));
    }
}
