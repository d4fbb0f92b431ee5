use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Client;
use reqwest::redirect::Policy;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use promptboard::config::{
    AppConfig, DatabaseConfig, ImageLabConfig, SecurityConfig, ServerConfig,
};
use promptboard::gateway::{GatewayError, GeneratedImage, GenerationRequest, ImageGenerator};
use promptboard::models::submission::SubmissionRecord;
use promptboard::state::AppState;
use promptboard::storage;

pub mod routes {
    pub const FEED: &str = "/";
    pub const SUBMIT: &str = "/submit";
    pub const DELETE: &str = "/delete";
    pub const IMAGE_LAB: &str = "/image-lab";
    pub const IMAGE_LAB_GENERATE: &str = "/image-lab/generate";
    pub const CAPTURE_JS: &str = "/static/capture.js";
    pub const HEALTH: &str = "/healthz";

    pub fn feed_for(workshop: &str) -> String {
        format!("/?w={workshop}")
    }
}

/// Image generator that answers by prompt keyword:
/// `fail` → service error, `empty` → no image, anything else → a PNG.
#[derive(Default)]
pub struct FakeGenerator {
    pub calls: Mutex<Vec<FakeCall>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeCall {
    pub prompt: String,
    pub api_key: Option<String>,
    pub reference_mime: Option<String>,
}

#[async_trait]
impl ImageGenerator for FakeGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> Result<Option<GeneratedImage>, GatewayError> {
        self.calls.lock().unwrap().push(FakeCall {
            prompt: request.prompt.to_string(),
            api_key: request.api_key.map(str::to_string),
            reference_mime: request.reference.map(|r| r.mime_type.clone()),
        });

        if request.prompt.contains("fail") {
            return Err(GatewayError::Service {
                status: 503,
                message: "model overloaded".into(),
            });
        }
        if request.prompt.contains("empty") {
            return Ok(None);
        }
        Ok(Some(GeneratedImage {
            mime_type: "image/png".into(),
            bytes: b"png-bytes".to_vec(),
        }))
    }
}

/// A running test server backed by a throwaway SQLite file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    pub generator: Arc<FakeGenerator>,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// `Location` header, for redirects.
    pub location: Option<String>,
    pub text: String,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let location = res
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = res.text().await.unwrap_or_default();
        Self {
            status,
            location,
            text,
        }
    }

    /// Assert this is a redirect back to the feed at `location`.
    pub fn assert_redirect(&self, location: &str) {
        assert_eq!(self.status, 303, "expected redirect, got body: {}", self.text);
        assert_eq!(self.location.as_deref(), Some(location));
    }
}

pub fn test_config(db_url: String) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: db_url,
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 8,
            sqlx_logging: false,
        },
        security: SecurityConfig::default(),
        image_lab: ImageLabConfig::default(),
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    pub async fn spawn_with(configure: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("promptboard.db");
        let mut config = test_config(format!("sqlite://{}?mode=rwc", db_path.display()));
        configure(&mut config);

        let db = promptboard::database::init_db(&config.database)
            .await
            .expect("Failed to initialize test database");

        let generator = Arc::new(FakeGenerator::default());
        let state = AppState::new(db.clone(), config, generator.clone());
        let app = promptboard::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            addr,
            client,
            db,
            generator,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    /// Submit a text-only entry through the form endpoint.
    pub async fn submit(
        &self,
        name: &str,
        prompt: &str,
        result: &str,
        workshop: &str,
    ) -> TestResponse {
        self.post_form(
            routes::SUBMIT,
            &[
                ("name", name),
                ("prompt", prompt),
                ("result", result),
                ("workshop", workshop),
                ("image_url", ""),
            ],
        )
        .await
    }

    pub async fn count(&self, workshop: Option<&str>) -> u64 {
        storage::count_submissions(&self.db, workshop)
            .await
            .expect("Failed to count submissions")
    }

    pub async fn list(&self, workshop: Option<&str>) -> Vec<SubmissionRecord> {
        storage::list_submissions(&self.db, workshop, 100)
            .await
            .expect("Failed to list submissions")
    }

    /// Id of the newest submission.
    pub async fn latest_id(&self) -> i32 {
        self.list(None)
            .await
            .first()
            .map(|s| s.id)
            .expect("Expected at least one submission")
    }
}
