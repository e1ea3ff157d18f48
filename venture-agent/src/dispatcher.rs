//! Concurrent fan-out of the three domain analysts.
//!
//! Pure concurrency/aggregation boundary: the dispatcher launches all three
//! tasks together, bounds each with a timeout, waits for every slot to reach a
//! terminal outcome, and never inspects outcome content.

use crate::analyst::Analyst;
use std::sync::Arc;
use std::time::Duration;
use venture_core::{AnalysisBundle, AnalysisDomain, BusinessQuery, FailureKind, ModelClient, TaskOutcome};

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Upper bound on each analysis task, including its model call. Elapsed
    /// timeout becomes `Failure(Timeout)` for that task only.
    pub task_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { task_timeout: Duration::from_secs(90) }
    }
}

/// Run all three analysts concurrently and return once every outcome is
/// terminal. No task's failure cancels a sibling; the `join!` barrier
/// guarantees the bundle is never partially populated.
pub async fn dispatch(
    model: Arc<dyn ModelClient>,
    query: &BusinessQuery,
    config: &DispatchConfig,
) -> AnalysisBundle {
    let run = |domain: AnalysisDomain| {
        let model = model.clone();
        let timeout = config.task_timeout;
        async move {
            let analyst = Analyst::new(domain, model);
            match tokio::time::timeout(timeout, analyst.run(query)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::warn!(domain = %domain, ?timeout, "analysis task timed out");
                    TaskOutcome::failure(
                        FailureKind::Timeout,
                        format!("{domain} analysis produced no outcome within {timeout:?}"),
                    )
                }
            }
        }
    };

    let (market, competitive, financial) = tokio::join!(
        run(AnalysisDomain::Market),
        run(AnalysisDomain::Competitive),
        run(AnalysisDomain::Financial),
    );

    AnalysisBundle { market, competitive, financial }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venture_core::ModelError;
    use venture_model::MockModel;

    fn query() -> BusinessQuery {
        BusinessQuery::new("a specialty coffee shop", "Austin", "coffee shop")
    }

    fn analysis_json(domain: AnalysisDomain) -> String {
        let fields: Vec<String> =
            domain.section_keys().iter().map(|k| format!("\"{k}\": \"data\"")).collect();
        format!("{{{}}}", fields.join(","))
    }

    /// Routed mock covering all three analysts; prompts are distinguished by
    /// the per-domain instruction text.
    fn all_success_mock() -> MockModel {
        MockModel::new("mock")
            .route("market research analyst", analysis_json(AnalysisDomain::Market))
            .route("competitive", analysis_json(AnalysisDomain::Competitive))
            .route("financial analyst", analysis_json(AnalysisDomain::Financial))
    }

    #[tokio::test]
    async fn all_three_tasks_settle_successfully() {
        let bundle = dispatch(Arc::new(all_success_mock()), &query(), &DispatchConfig::default()).await;

        assert!(bundle.market.is_success());
        assert!(bundle.competitive.is_success());
        assert!(bundle.financial.is_success());
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_siblings() {
        let mock = MockModel::new("mock")
            .route("market research analyst", analysis_json(AnalysisDomain::Market))
            .route_error("competitive", ModelError::Unavailable("HTTP 503".into()))
            .route("financial analyst", analysis_json(AnalysisDomain::Financial));

        let bundle = dispatch(Arc::new(mock), &query(), &DispatchConfig::default()).await;

        assert!(bundle.market.is_success());
        assert!(!bundle.competitive.is_success());
        assert!(bundle.financial.is_success());
        assert_eq!(bundle.failures()[0].1, FailureKind::Unavailable);
    }

    #[tokio::test(start_paused = true)]
    async fn dispatch_latency_is_max_not_sum_of_task_latencies() {
        // Three tasks, 200ms of model latency each: concurrent dispatch
        // completes in ~200ms, sequential would need ~600ms.
        let mock = all_success_mock().with_delay(Duration::from_millis(200));

        let started = tokio::time::Instant::now();
        let bundle = dispatch(Arc::new(mock), &query(), &DispatchConfig::default()).await;
        let elapsed = started.elapsed();

        assert!(bundle.market.is_success());
        assert!(bundle.financial.is_success());
        assert!(
            elapsed < Duration::from_millis(400),
            "tasks appear to have run sequentially: {elapsed:?}"
        );
        assert!(elapsed >= Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_task_times_out_without_delaying_or_failing_siblings() {
        // The competitive analyst answers long after the budget; the other two
        // answer instantly. The whole dispatch is bounded by the timeout.
        let mock = MockModel::new("mock")
            .route("market research analyst", analysis_json(AnalysisDomain::Market))
            .route_delayed(
                "competitive",
                Duration::from_millis(500),
                analysis_json(AnalysisDomain::Competitive),
            )
            .route("financial analyst", analysis_json(AnalysisDomain::Financial));

        let config = DispatchConfig { task_timeout: Duration::from_millis(100) };
        let started = tokio::time::Instant::now();
        let bundle = dispatch(Arc::new(mock), &query(), &config).await;
        let elapsed = started.elapsed();

        assert!(bundle.market.is_success());
        assert!(bundle.financial.is_success());
        match &bundle.competitive {
            TaskOutcome::Failure { kind, .. } => assert_eq!(*kind, FailureKind::Timeout),
            TaskOutcome::Success { .. } => panic!("competitive task should have timed out"),
        }
        assert!(elapsed < Duration::from_millis(300), "siblings were delayed: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_produces_timeout_failure() {
        // All calls take 500ms against a 100ms budget.
        let mock = all_success_mock().with_delay(Duration::from_millis(500));
        let config = DispatchConfig { task_timeout: Duration::from_millis(100) };

        let started = tokio::time::Instant::now();
        let bundle = dispatch(Arc::new(mock), &query(), &config).await;
        let elapsed = started.elapsed();

        for (_, kind, message) in bundle.failures() {
            assert_eq!(kind, FailureKind::Timeout);
            assert!(message.contains("no outcome within"));
        }
        assert!(bundle.all_failed());
        // Timeouts also overlap: the whole dispatch is bounded by one budget.
        assert!(elapsed < Duration::from_millis(300), "timeouts did not overlap: {elapsed:?}");
    }
}
