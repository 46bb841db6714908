use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

/// An HTTP client for one upstream service, selected by capability tag.
#[async_trait]
pub trait HttpGateway: Send + Sync {
    fn tag(&self) -> &'static str;
    fn base_url(&self) -> &Url;
    async fn get_json(&self, path: &str) -> Result<serde_json::Value>;
}
