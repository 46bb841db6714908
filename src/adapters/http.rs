use crate::config::ClientConfig;
use crate::domain::ports::HttpGateway;
use crate::utils::error::{MccError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use url::Url;

/// `HttpGateway` backed by a configured `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    tag: &'static str,
    base_url: Url,
    client: Client,
}

impl ReqwestGateway {
    pub fn new(tag: &'static str, config: &ClientConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let headers = build_headers(tag, config)?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .default_headers(headers)
            .build()?;

        tracing::debug!(
            "Built '{}' HTTP client for {} (timeout {:?})",
            tag,
            base_url,
            config.timeout()
        );

        Ok(Self {
            tag,
            base_url,
            client,
        })
    }
}

/// 確保 base URL 以 `/` 結尾，讓相對路徑接在其下
fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn build_headers(tag: &'static str, config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let Some(configured) = &config.headers else {
        return Ok(headers);
    };

    for (name, value) in configured {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            MccError::InvalidConfigValueError {
                field: format!("clients.{}.headers", tag),
                value: name.clone(),
                reason: format!("Invalid header name: {}", e),
            }
        })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| MccError::InvalidConfigValueError {
                field: format!("clients.{}.headers.{}", tag, name),
                value: value.clone(),
                reason: format!("Invalid header value: {}", e),
            })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

#[async_trait]
impl HttpGateway for ReqwestGateway {
    fn tag(&self) -> &'static str {
        self.tag
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;

        tracing::debug!("[{}] GET {}", self.tag, url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("[{}] response status: {}", self.tag, status);

        if !status.is_success() {
            tracing::warn!("[{}] upstream returned {} for {}", self.tag, status, url);
            return Err(MccError::UpstreamStatus {
                client: self.tag,
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // 先取原文再解析，解析失敗歸類為 SerializationError
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
