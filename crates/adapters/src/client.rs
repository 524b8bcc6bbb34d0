//! Shared HTTP client for provider adapters
//!
//! Wraps reqwest with transient-failure retry and a per-provider circuit
//! breaker, so a flapping upstream is retried briefly and a dead one is
//! skipped outright until its cooldown expires.

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

use bridge_types::{AdapterError, AdapterResult};

/// Join a path onto a base endpoint, tolerating bases with and without a
/// trailing slash.
pub fn build_url(base_url: &str, path: &str) -> AdapterResult<String> {
	let mut base = Url::parse(base_url).map_err(|e| AdapterError::ConfigError {
		reason: format!("Invalid base URL '{}': {}", base_url, e),
	})?;

	// Ensure the base URL is treated as a directory so the last path
	// segment is not replaced by the join.
	if !base.path().ends_with('/') {
		base.set_path(&format!("{}/", base.path()));
	}

	let joined = base.join(path).map_err(|e| AdapterError::ConfigError {
		reason: format!(
			"Failed to join URL path '{}' to base '{}': {}",
			path, base_url, e
		),
	})?;

	Ok(joined.to_string())
}

/// Retry policy for transient provider failures
#[derive(Debug, Clone)]
pub struct RetryPolicy {
	/// Retries allowed after the initial attempt
	pub max_retries: u32,
	/// Delay before the first retry; doubles on each subsequent one
	pub backoff_base: Duration,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_retries: 2,
			backoff_base: Duration::from_millis(100),
		}
	}
}

/// Circuit breaker thresholds
#[derive(Debug, Clone)]
pub struct BreakerPolicy {
	/// Consecutive transient failures that open the circuit
	pub failure_threshold: u32,
	/// How long the circuit stays open before a probe is allowed
	pub cooldown: Duration,
}

impl Default for BreakerPolicy {
	fn default() -> Self {
		Self {
			failure_threshold: 5,
			cooldown: Duration::from_secs(30),
		}
	}
}

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
	/// Normal operation, requests flow through
	Closed,
	/// Provider considered down, requests fail fast
	Open,
	/// Cooldown elapsed, a single probe request is in flight
	HalfOpen,
}

#[derive(Debug)]
struct BreakerInner {
	state: CircuitState,
	consecutive_failures: u32,
	opened_at: Option<Instant>,
}

/// Consecutive-failure circuit breaker.
///
/// Opens after `failure_threshold` consecutive transient failures and
/// stays open for `cooldown`. The first admission after the cooldown is a
/// half-open probe: its success closes the circuit, its failure reopens
/// it.
#[derive(Debug)]
pub struct CircuitBreaker {
	policy: BreakerPolicy,
	inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
	pub fn new(policy: BreakerPolicy) -> Self {
		Self {
			policy,
			inner: Mutex::new(BreakerInner {
				state: CircuitState::Closed,
				consecutive_failures: 0,
				opened_at: None,
			}),
		}
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, BreakerInner> {
		self.inner.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Whether a request may go out right now.
	///
	/// Transitions Open to HalfOpen once the cooldown has elapsed; the
	/// caller that observes the transition owns the probe.
	pub fn try_acquire(&self) -> bool {
		let mut inner = self.lock();

		match inner.state {
			CircuitState::Closed => true,
			CircuitState::HalfOpen => false,
			CircuitState::Open => {
				let cooled_down = inner
					.opened_at
					.map(|at| at.elapsed() >= self.policy.cooldown)
					.unwrap_or(true);

				if cooled_down {
					inner.state = CircuitState::HalfOpen;
					true
				} else {
					false
				}
			},
		}
	}

	/// Records a response that proves the provider is alive.
	pub fn record_success(&self) {
		let mut inner = self.lock();
		inner.state = CircuitState::Closed;
		inner.consecutive_failures = 0;
		inner.opened_at = None;
	}

	/// Records a transient failure, opening the circuit at the threshold.
	pub fn record_failure(&self) {
		let mut inner = self.lock();

		match inner.state {
			CircuitState::HalfOpen => {
				inner.state = CircuitState::Open;
				inner.opened_at = Some(Instant::now());
			},
			CircuitState::Closed => {
				inner.consecutive_failures += 1;
				if inner.consecutive_failures >= self.policy.failure_threshold {
					inner.state = CircuitState::Open;
					inner.opened_at = Some(Instant::now());
				}
			},
			CircuitState::Open => {},
		}
	}

	pub fn state(&self) -> CircuitState {
		self.lock().state
	}
}

/// HTTP client shared by the built-in provider adapters
#[derive(Debug)]
pub struct ProviderClient {
	provider: String,
	http: reqwest::Client,
	retry: RetryPolicy,
	breaker: CircuitBreaker,
}

impl ProviderClient {
	/// Create a client with default retry and breaker policies
	pub fn new(provider: impl Into<String>) -> AdapterResult<Self> {
		Self::with_policies(provider, RetryPolicy::default(), BreakerPolicy::default())
	}

	/// Create a client with explicit policies
	pub fn with_policies(
		provider: impl Into<String>,
		retry: RetryPolicy,
		breaker: BreakerPolicy,
	) -> AdapterResult<Self> {
		let mut headers = HeaderMap::new();
		headers.insert("Content-Type", HeaderValue::from_static("application/json"));
		headers.insert("Accept", HeaderValue::from_static("application/json"));
		headers.insert(
			"User-Agent",
			HeaderValue::from_static("bridge-aggregator/0.1"),
		);

		let http = reqwest::Client::builder()
			.default_headers(headers)
			.build()
			.map_err(AdapterError::HttpError)?;

		Ok(Self {
			provider: provider.into(),
			http,
			retry,
			breaker: CircuitBreaker::new(breaker),
		})
	}

	pub fn provider(&self) -> &str {
		&self.provider
	}

	pub fn breaker_state(&self) -> CircuitState {
		self.breaker.state()
	}

	/// GET `url` and decode the JSON body
	pub async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> AdapterResult<T>
	where
		T: DeserializeOwned,
	{
		self.execute_json(|| self.http.get(url).query(query)).await
	}

	/// POST `body` to `url` and decode the JSON response
	pub async fn post_json<T, B>(&self, url: &str, body: &B) -> AdapterResult<T>
	where
		T: DeserializeOwned,
		B: Serialize + ?Sized,
	{
		self.execute_json(|| self.http.post(url).json(body)).await
	}

	/// POST with an extra header, for providers that take API keys
	pub async fn post_json_with_header<T, B>(
		&self,
		url: &str,
		header_name: &'static str,
		header_value: &str,
		body: &B,
	) -> AdapterResult<T>
	where
		T: DeserializeOwned,
		B: Serialize + ?Sized,
	{
		let value =
			HeaderValue::from_str(header_value).map_err(|_| AdapterError::ConfigError {
				reason: format!("invalid {} header value", header_name),
			})?;

		self.execute_json(|| self.http.post(url).header(header_name, value.clone()).json(body))
			.await
	}

	/// Runs a request through breaker admission and transient retry.
	async fn execute_json<T, F>(&self, build: F) -> AdapterResult<T>
	where
		T: DeserializeOwned,
		F: Fn() -> reqwest::RequestBuilder,
	{
		if !self.breaker.try_acquire() {
			return Err(AdapterError::CircuitOpen {
				provider: self.provider.clone(),
			});
		}

		let mut attempt = 0u32;
		loop {
			match self.send_once::<T>(build()).await {
				Ok(value) => {
					self.breaker.record_success();
					return Ok(value);
				},
				Err(err) if err.is_transient() && attempt < self.retry.max_retries => {
					attempt += 1;
					let delay = self.retry.backoff_base * 2u32.saturating_pow(attempt - 1);
					debug!(
						"Transient failure from provider {} (attempt {}/{}): {}; retrying in {:?}",
						self.provider, attempt, self.retry.max_retries, err, delay
					);
					tokio::time::sleep(delay).await;
				},
				Err(err) => {
					if err.is_transient() {
						self.breaker.record_failure();
					} else {
						// The provider answered; the request itself was bad.
						self.breaker.record_success();
					}

					warn!("Request to provider {} failed: {}", self.provider, err);
					return Err(err);
				},
			}
		}
	}

	async fn send_once<T>(&self, request: reqwest::RequestBuilder) -> AdapterResult<T>
	where
		T: DeserializeOwned,
	{
		let response = request.send().await.map_err(AdapterError::HttpError)?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::from_http_failure(status.as_u16()));
		}

		// A failure while reading the body is a transport error, not a
		// malformed response.
		let body = response.text().await.map_err(AdapterError::HttpError)?;
		serde_json::from_str(&body).map_err(|e| AdapterError::InvalidResponse {
			reason: format!("Failed to parse {} response: {}", self.provider, e),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Arc;
	use tokio::io::{AsyncReadExt, AsyncWriteExt};
	use tokio::net::TcpListener;

	fn instant_cooldown_breaker(threshold: u32) -> CircuitBreaker {
		CircuitBreaker::new(BreakerPolicy {
			failure_threshold: threshold,
			cooldown: Duration::from_millis(0),
		})
	}

	fn http_reply(status: u16, reason: &str, body: &str) -> String {
		format!(
			"HTTP/1.1 {} {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
			status,
			reason,
			body.len(),
			body
		)
	}

	// Declares more body than it sends, then the socket closes.
	fn truncated_reply() -> String {
		"HTTP/1.1 200 OK\r\ncontent-length: 64\r\nconnection: close\r\n\r\n{\"cut".to_string()
	}

	/// Serves the canned replies to sequential connections, repeating the
	/// last one, and counts the connections served.
	async fn spawn_upstream(replies: Vec<String>) -> (String, Arc<AtomicUsize>) {
		let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test port");
		let addr = listener.local_addr().expect("local addr");
		let hits = Arc::new(AtomicUsize::new(0));

		let served = hits.clone();
		tokio::spawn(async move {
			loop {
				let Ok((mut socket, _)) = listener.accept().await else {
					return;
				};

				let index = served.fetch_add(1, Ordering::Relaxed);
				let reply = replies
					.get(index)
					.or_else(|| replies.last())
					.cloned()
					.unwrap_or_default();

				let mut request = [0u8; 1024];
				let _ = socket.read(&mut request).await;
				let _ = socket.write_all(reply.as_bytes()).await;
				let _ = socket.shutdown().await;
			}
		});

		(format!("http://{}/quote", addr), hits)
	}

	fn fast_retry(max_retries: u32) -> RetryPolicy {
		RetryPolicy {
			max_retries,
			backoff_base: Duration::from_millis(1),
		}
	}

	#[test]
	fn test_breaker_opens_at_threshold() {
		let breaker = CircuitBreaker::new(BreakerPolicy {
			failure_threshold: 3,
			cooldown: Duration::from_secs(30),
		});

		assert_eq!(breaker.state(), CircuitState::Closed);
		breaker.record_failure();
		breaker.record_failure();
		assert_eq!(breaker.state(), CircuitState::Closed);

		breaker.record_failure();
		assert_eq!(breaker.state(), CircuitState::Open);
		assert!(!breaker.try_acquire());
	}

	#[test]
	fn test_breaker_success_resets_failure_count() {
		let breaker = CircuitBreaker::new(BreakerPolicy {
			failure_threshold: 2,
			cooldown: Duration::from_secs(30),
		});

		breaker.record_failure();
		breaker.record_success();
		breaker.record_failure();
		assert_eq!(breaker.state(), CircuitState::Closed);
	}

	#[test]
	fn test_breaker_half_open_probe_closes_on_success() {
		let breaker = instant_cooldown_breaker(1);
		breaker.record_failure();
		assert_eq!(breaker.state(), CircuitState::Open);

		// Cooldown of zero: the next acquire is the probe.
		assert!(breaker.try_acquire());
		assert_eq!(breaker.state(), CircuitState::HalfOpen);
		assert!(!breaker.try_acquire());

		breaker.record_success();
		assert_eq!(breaker.state(), CircuitState::Closed);
		assert!(breaker.try_acquire());
	}

	#[test]
	fn test_breaker_half_open_probe_reopens_on_failure() {
		let breaker = instant_cooldown_breaker(1);
		breaker.record_failure();

		assert!(breaker.try_acquire());
		breaker.record_failure();
		assert_eq!(breaker.state(), CircuitState::Open);
	}

	#[test]
	fn test_build_url_joins_paths() {
		assert_eq!(
			build_url("https://api.hop.exchange/v1", "quote").unwrap(),
			"https://api.hop.exchange/v1/quote"
		);
		assert_eq!(
			build_url("https://api.hop.exchange/v1/", "quote").unwrap(),
			"https://api.hop.exchange/v1/quote"
		);
		assert!(build_url("not a url", "quote").is_err());
	}

	#[test]
	fn test_default_policies() {
		let retry = RetryPolicy::default();
		assert_eq!(retry.max_retries, 2);
		assert_eq!(retry.backoff_base, Duration::from_millis(100));

		let breaker = BreakerPolicy::default();
		assert_eq!(breaker.failure_threshold, 5);
		assert_eq!(breaker.cooldown, Duration::from_secs(30));
	}

	#[tokio::test]
	async fn test_transient_failure_retried_with_backoff() {
		let reply = http_reply(503, "Service Unavailable", "{}");
		let (url, hits) = spawn_upstream(vec![reply]).await;

		let client = ProviderClient::with_policies(
			"hop",
			RetryPolicy {
				max_retries: 2,
				backoff_base: Duration::from_millis(20),
			},
			BreakerPolicy::default(),
		)
		.unwrap();

		let started = Instant::now();
		let err = client
			.get_json::<serde_json::Value>(&url, &[])
			.await
			.unwrap_err();

		assert_eq!(err.status_code(), Some(503));
		// One initial attempt plus two retries.
		assert_eq!(hits.load(Ordering::Relaxed), 3);
		// Backoff doubles: 20ms before the first retry, 40ms before the second.
		assert!(started.elapsed() >= Duration::from_millis(60));
	}

	#[tokio::test]
	async fn test_non_transient_failure_is_not_retried() {
		let reply = http_reply(400, "Bad Request", "{}");
		let (url, hits) = spawn_upstream(vec![reply]).await;

		let client = ProviderClient::new("hop").unwrap();
		let err = client
			.get_json::<serde_json::Value>(&url, &[])
			.await
			.unwrap_err();

		assert_eq!(err.status_code(), Some(400));
		assert_eq!(hits.load(Ordering::Relaxed), 1);
		// The provider answered; the breaker stays closed.
		assert_eq!(client.breaker_state(), CircuitState::Closed);
	}

	#[tokio::test]
	async fn test_recovery_mid_retry_returns_the_body() {
		let (url, hits) = spawn_upstream(vec![
			http_reply(503, "Service Unavailable", "{}"),
			http_reply(200, "OK", r#"{"ok":true}"#),
		])
		.await;

		let client =
			ProviderClient::with_policies("hop", fast_retry(2), BreakerPolicy::default())
				.unwrap();

		let value: serde_json::Value = client.get_json(&url, &[]).await.unwrap();
		assert_eq!(value["ok"], serde_json::Value::Bool(true));
		assert_eq!(hits.load(Ordering::Relaxed), 2);
		assert_eq!(client.breaker_state(), CircuitState::Closed);
	}

	#[tokio::test]
	async fn test_exhausted_retries_open_the_breaker() {
		let reply = http_reply(503, "Service Unavailable", "{}");
		let (url, hits) = spawn_upstream(vec![reply]).await;

		let client = ProviderClient::with_policies(
			"hop",
			fast_retry(0),
			BreakerPolicy {
				failure_threshold: 2,
				cooldown: Duration::from_secs(30),
			},
		)
		.unwrap();

		for _ in 0..2 {
			let err = client
				.get_json::<serde_json::Value>(&url, &[])
				.await
				.unwrap_err();
			assert_eq!(err.status_code(), Some(503));
		}
		assert_eq!(client.breaker_state(), CircuitState::Open);

		// The open circuit fails fast without touching the upstream.
		let err = client
			.get_json::<serde_json::Value>(&url, &[])
			.await
			.unwrap_err();
		assert!(matches!(err, AdapterError::CircuitOpen { .. }));
		assert_eq!(hits.load(Ordering::Relaxed), 2);
	}

	#[tokio::test]
	async fn test_mid_body_disconnect_is_transient() {
		let (url, hits) = spawn_upstream(vec![
			truncated_reply(),
			http_reply(200, "OK", r#"{"ok":true}"#),
		])
		.await;

		let client =
			ProviderClient::with_policies("hop", fast_retry(1), BreakerPolicy::default())
				.unwrap();

		// The first reply dies mid-body; the retry completes the call.
		let value: serde_json::Value = client.get_json(&url, &[]).await.unwrap();
		assert_eq!(value["ok"], serde_json::Value::Bool(true));
		assert_eq!(hits.load(Ordering::Relaxed), 2);
	}
}
