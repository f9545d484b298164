use std::time::Duration;

use reqwest::{
    Client,
    Response,
    Url,
};

use crate::core::DatacleanError;

const CLIENT_USER_AGENT: &str = concat!("dataclean/", env!("CARGO_PKG_VERSION"), " (+reqwest)");

/// Builds the shared client. Without a timeout a hung request keeps its
/// controller busy until the service answers.
pub fn http_client(timeout: Option<Duration>) -> Result<Client, DatacleanError> {
    let mut builder = Client::builder().user_agent(CLIENT_USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| DatacleanError::Custom(format!("HTTP client build failed: {e}")))
}

/// Resolves `path` beneath `base`, keeping any path prefix the base carries
/// (`http://host/api` + `/speak` is `http://host/api/speak`).
pub fn endpoint(base: &str, path: &str) -> Result<Url, DatacleanError> {
    let mut base =
        Url::parse(base).map_err(|e| DatacleanError::InvalidUrl(format!("{base}: {e}")))?;
    if !base.path().ends_with('/') {
        let directory = format!("{}/", base.path());
        base.set_path(&directory);
    }
    let relative = path.trim_start_matches('/');
    base.join(relative).map_err(|e| DatacleanError::InvalidUrl(format!("{path}: {e}")))
}

pub fn ensure_success(resp: &Response) -> Result<(), DatacleanError> {
    if !resp.status().is_success() {
        return Err(DatacleanError::HttpStatus {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}
