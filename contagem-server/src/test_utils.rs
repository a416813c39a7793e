use crate::config::Settings;
use crate::create_app;
use crate::state::AppState;
use axum::body::{Body, Bytes};
use axum::Router;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use log::LevelFilter;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tower::ServiceExt;

/// Test fixture for exercising the full router in-process.
///
/// The fixture builds the application from [`Settings::for_test`], keeps a handle on
/// the shared state so tests can inspect the counter directly, and provides helper
/// methods for making requests.
///
/// # Examples
///
/// ```rust
/// #[tokio::test]
/// async fn test_endpoint() {
///     let fixture = TestFixture::new().await;
///
///     // Log in with one of the seeded users
///     let token = fixture.login("alice", "correct").await;
///
///     // Call a protected route with the issued token
///     let response = fixture.get_with_token("/contador", &token).await;
///
///     response.assert_ok();
///     let counter = response.json_as::<CounterResponse>();
///     assert_eq!(counter.current_value, 1);
/// }
/// ```
pub struct TestFixture {
    /// The application router
    pub app: Router,
    /// Configuration settings
    pub settings: Settings,
    /// Shared state behind the router
    pub state: AppState,
}

impl TestFixture {
    /// Creates a new test fixture with a fresh counter and the test user seed.
    pub async fn new() -> Self {
        Self::setup_logger(LevelFilter::Debug);

        let settings = Settings::for_test();
        let state = AppState::new(settings.clone()).expect("Failed to create test state");
        let app = create_app(state.clone()).await;

        Self {
            app,
            settings,
            state,
        }
    }

    /// Initializes the test logger with the given level.
    ///
    /// Called by [`TestFixture::new`] with `Debug`; only the first call in a
    /// test binary takes effect.
    pub fn setup_logger(level: LevelFilter) {
        let _ = env_logger::builder()
            .filter_level(level)
            .is_test(true)
            .try_init();
    }

    /// Creates a request builder with a JSON content type and no credentials.
    pub fn request_builder(&self, method: Method, uri: impl AsRef<str>) -> http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri.as_ref())
            .header("Content-Type", "application/json")
    }

    /// Sends an unauthenticated GET request to the specified URI.
    pub async fn get(&self, uri: impl AsRef<str>) -> TestResponse {
        let request = self
            .request_builder(Method::GET, uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a GET request carrying `Authorization: Bearer <token>`.
    pub async fn get_with_token(&self, uri: impl AsRef<str>, token: &str) -> TestResponse {
        let request = self
            .request_builder(Method::GET, uri)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a POST request with a JSON body to the specified URI.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let response = fixture
    ///     .post("/login", &json!({ "UserID": "alice", "Password": "correct" }))
    ///     .await;
    ///
    /// response.assert_ok();
    /// let token = response.json_as::<TokenResponse>();
    /// assert_eq!(token.token_type, "Bearer");
    /// ```
    pub async fn post<T: Serialize>(&self, uri: impl AsRef<str>, body: &T) -> TestResponse {
        let json_body = serde_json::to_vec(body).expect("Failed to serialize body to JSON");
        let request = self
            .request_builder(Method::POST, uri)
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Logs in through `POST /login` and returns the issued access token.
    ///
    /// # Panics
    ///
    /// Panics if the login is rejected.
    pub async fn login(&self, user_id: &str, password: &str) -> String {
        let response = self
            .post(
                "/login",
                &serde_json::json!({ "UserID": user_id, "Password": password }),
            )
            .await;
        response.assert_ok();

        response.json["accessToken"]
            .as_str()
            .expect("Login response carries an access token")
            .to_string()
    }

    /// Sends a request and returns a TestResponse.
    ///
    /// Lower-level than `get()` and `post()`; use it when the request needs
    /// headers or a body the helpers do not produce.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        // Try to parse as JSON, defaulting to empty object if parsing fails or empty body
        let json = if !body.is_empty() {
            serde_json::from_slice(&body).unwrap_or_else(|_| serde_json::json!({}))
        } else {
            serde_json::json!({})
        };

        TestResponse { status, body, json }
    }
}

/// Response from a test request that provides convenient access to status and body.
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Raw response body
    pub body: Bytes,
    /// Response body as JSON (if present and valid JSON)
    pub json: Value,
}

impl TestResponse {
    /// Checks if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Asserts that the response has the expected status code.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match the expected value.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {} with body: {}",
            expected,
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// Asserts that the response status is OK (200).
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }

    /// Converts the response body to the specified type.
    ///
    /// # Panics
    ///
    /// Panics if deserialization fails.
    pub fn json_as<T: DeserializeOwned>(&self) -> T {
        serde_json::from_value(self.json.clone()).expect("Failed to deserialize response JSON")
    }
}
