//! Configuration system (layered: code > env > `.env` file).

use std::fmt;

/// Default Vertex AI region.
pub const DEFAULT_LOCATION: &str = "us-central1";

/// Default Gemini model used by the demos.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Layered configuration for the Gemini backend.
///
/// Values set in code win over values read from the environment, which in
/// turn win over a `.env` file in the working directory.
#[derive(Clone, Default)]
pub struct AdkConfig {
    api_key: Option<String>,
    project: Option<String>,
    location: Option<String>,
    use_vertex: bool,
    access_token: Option<String>,
    base_url: Option<String>,
}

impl fmt::Debug for AdkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdkConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("project", &self.project)
            .field("location", &self.location)
            .field("use_vertex", &self.use_vertex)
            .field("access_token", &self.access_token.as_ref().map(|_| ".."))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AdkConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = ["GOOGLE_API_KEY", "GEMINI_API_KEY", "GOOGLE_GENAI_API_KEY"]
            .iter()
            .find_map(|key| non_empty(key));

        let use_vertex = non_empty("GOOGLE_GENAI_USE_VERTEXAI")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            api_key,
            project: non_empty("GOOGLE_CLOUD_PROJECT"),
            location: non_empty("GOOGLE_CLOUD_LOCATION"),
            use_vertex,
            access_token: non_empty("GOOGLE_CLOUD_ACCESS_TOKEN"),
            base_url: non_empty("GOOGLE_GEMINI_BASE_URL"),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the cloud project; a project switches the backend to Vertex AI.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self.use_vertex = true;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Vertex region, falling back to [`DEFAULT_LOCATION`].
    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Whether requests should go to Vertex AI instead of the Gemini API.
    pub fn uses_vertex(&self) -> bool {
        self.use_vertex && self.project.is_some()
    }
}
