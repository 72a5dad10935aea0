use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::error::AutofillError;
use crate::profile::profile_model::UserData;

/// Load `UserData` from a local file or, for `http(s)://` sources, from the
/// backend API.
pub fn load_profile(source: &str, token: Option<&str>) -> Result<UserData, AutofillError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        ProfileClient::new(source, token).fetch()
    } else {
        load_profile_file(source)
    }
}

/// Read a profile from disk. `.yaml`/`.yml` files are parsed as YAML,
/// everything else as JSON.
pub fn load_profile_file(path: &str) -> Result<UserData, AutofillError> {
    let content = std::fs::read_to_string(path).map_err(|e| AutofillError::ProfileIO {
        path: path.to_string(),
        source: e,
    })?;

    let is_yaml = Path::new(path)
        .extension()
        .is_some_and(|e| e == "yaml" || e == "yml");

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| AutofillError::ProfileFormat {
            path: path.to_string(),
            error: e.to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| AutofillError::JsonParse {
            context: format!("profile file {}", path),
            source: e,
        })
    }
}

/// Blocking client for the profile endpoint of the backend.
pub struct ProfileClient {
    endpoint: String,
    token: Option<String>,
    timeout: Duration,
}

impl ProfileClient {
    pub fn new(endpoint: &str, token: Option<&str>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            token: token.map(str::to_string),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the profile as JSON.
    pub fn fetch(&self) -> Result<UserData, AutofillError> {
        let http_error = |e: reqwest::Error| AutofillError::ProfileHttp {
            url: self.endpoint.clone(),
            error: e.to_string(),
        };

        info!(endpoint = %self.endpoint, "fetching profile");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(http_error)?;

        let mut request = client.get(&self.endpoint);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(http_error)?;
        if !response.status().is_success() {
            return Err(AutofillError::ProfileHttp {
                url: self.endpoint.clone(),
                error: format!("HTTP {}", response.status()),
            });
        }

        response.json::<UserData>().map_err(http_error)
    }
}
