//! Scriptable model client for tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use venture_core::{CompletionRequest, ModelClient, ModelError, ModelResult};

#[derive(Debug)]
struct Scripted {
    result: ModelResult<String>,
    delay: Option<Duration>,
}

/// A model client that replays scripted responses.
///
/// Responses can be scripted two ways:
/// - FIFO via [`with_response`](Self::with_response) / [`with_error`](Self::with_error);
/// - routed by prompt substring via [`route`](Self::route) / [`route_error`](Self::route_error),
///   which wins over the FIFO queue and makes concurrent callers order-independent.
///
/// Every received request is recorded for assertions. Latency is simulated
/// per entry ([`route_delayed`](Self::route_delayed)) or globally
/// ([`with_delay`](Self::with_delay)); pair with
/// `#[tokio::test(start_paused = true)]` for deterministic timing.
pub struct MockModel {
    name: String,
    queue: Mutex<VecDeque<Scripted>>,
    routes: Mutex<Vec<(String, VecDeque<Scripted>)>>,
    calls: Mutex<Vec<CompletionRequest>>,
    delay: Option<Duration>,
}

impl MockModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            queue: Mutex::new(VecDeque::new()),
            routes: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    #[must_use]
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.queue
            .lock()
            .unwrap()
            .push_back(Scripted { result: Ok(response.into()), delay: None });
        self
    }

    #[must_use]
    pub fn with_error(self, error: ModelError) -> Self {
        self.queue.lock().unwrap().push_back(Scripted { result: Err(error), delay: None });
        self
    }

    /// Script a response for any prompt containing `needle`.
    #[must_use]
    pub fn route(self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.push_route(needle.into(), Scripted { result: Ok(response.into()), delay: None });
        self
    }

    /// Script a response for any prompt containing `needle`, answered only
    /// after `delay`.
    #[must_use]
    pub fn route_delayed(
        self,
        needle: impl Into<String>,
        delay: Duration,
        response: impl Into<String>,
    ) -> Self {
        self.push_route(
            needle.into(),
            Scripted { result: Ok(response.into()), delay: Some(delay) },
        );
        self
    }

    /// Script an error for any prompt containing `needle`.
    #[must_use]
    pub fn route_error(self, needle: impl Into<String>, error: ModelError) -> Self {
        self.push_route(needle.into(), Scripted { result: Err(error), delay: None });
        self
    }

    /// Delay every call without its own delay by `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn push_route(&self, needle: String, entry: Scripted) {
        let mut routes = self.routes.lock().unwrap();
        if let Some((_, queue)) = routes.iter_mut().find(|(n, _)| *n == needle) {
            queue.push_back(entry);
        } else {
            routes.push((needle, VecDeque::from([entry])));
        }
    }

    /// All requests received so far, in arrival order.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next_for(&self, prompt: &str) -> Scripted {
        {
            let mut routes = self.routes.lock().unwrap();
            if let Some((_, queue)) = routes
                .iter_mut()
                .find(|(needle, queue)| prompt.contains(needle.as_str()) && !queue.is_empty())
            {
                return queue.pop_front().unwrap();
            }
        }
        self.queue.lock().unwrap().pop_front().unwrap_or(Scripted {
            result: Err(ModelError::Unavailable("mock has no scripted response".into())),
            delay: None,
        })
    }
}

#[async_trait]
impl ModelClient for MockModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, req: CompletionRequest) -> ModelResult<String> {
        // Pop before sleeping so concurrent callers consume the FIFO queue in
        // poll order, deterministically.
        self.calls.lock().unwrap().push(req.clone());
        let entry = self.next_for(&req.prompt);
        if let Some(delay) = entry.delay.or(self.delay) {
            tokio::time::sleep(delay).await;
        }
        entry.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fifo_responses_replay_in_order() {
        let mock = MockModel::new("test").with_response("first").with_response("second");

        assert_eq!(mock.complete(CompletionRequest::new("a")).await.unwrap(), "first");
        assert_eq!(mock.complete(CompletionRequest::new("b")).await.unwrap(), "second");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn routed_responses_match_on_prompt_substring() {
        let mock = MockModel::new("test")
            .route("market research", r#"{"market_overview": "big"}"#)
            .route_error("financial", ModelError::RateLimited("429".into()))
            .with_response("fallback");

        let market = mock
            .complete(CompletionRequest::new("do market research for a bakery"))
            .await
            .unwrap();
        assert!(market.contains("market_overview"));

        let err = mock
            .complete(CompletionRequest::new("run the financial analysis"))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::RateLimited(_)));

        assert_eq!(mock.complete(CompletionRequest::new("other")).await.unwrap(), "fallback");
    }

    #[tokio::test]
    async fn exhausted_mock_reports_unavailable() {
        let mock = MockModel::new("test");
        let err = mock.complete(CompletionRequest::new("a")).await.unwrap_err();
        assert!(matches!(err, ModelError::Unavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn per_route_delay_overrides_global_delay() {
        let mock = MockModel::new("test")
            .with_delay(Duration::from_millis(10))
            .route_delayed("slow", Duration::from_millis(100), "slow answer")
            .route("fast", "fast answer");

        let started = tokio::time::Instant::now();
        mock.complete(CompletionRequest::new("the slow one")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(100));

        let started = tokio::time::Instant::now();
        mock.complete(CompletionRequest::new("the fast one")).await.unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(10) && elapsed < Duration::from_millis(100));
    }
}
