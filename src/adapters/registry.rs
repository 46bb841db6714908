use crate::adapters::http::ReqwestGateway;
use crate::config::ClientsConfig;
use crate::domain::clients::{ClientTag, DrafthouseClient, FeedsClient, Tagged};
use crate::domain::ports::HttpGateway;
use crate::utils::error::{MccError, Result};
use rudi::{Context, ContextOptions};
use std::borrow::Cow;
use std::sync::Arc;

type GatewayRef = Arc<dyn HttpGateway>;

/// Startup wiring from capability tag to concrete HTTP client.
///
/// Each gateway is a named singleton `Arc<dyn HttpGateway>` in a rudi
/// [`Context`], keyed by the tag's `NAME`. The context never allows overrides.
pub struct ClientRegistry {
    cx: Context,
}

/// Collects bindings before the context is created.
pub struct ClientRegistryBuilder {
    options: ContextOptions,
    bound: Vec<&'static str>,
}

impl Default for ClientRegistryBuilder {
    fn default() -> Self {
        Self {
            options: Context::options().allow_override(false),
            bound: Vec::new(),
        }
    }
}

impl ClientRegistryBuilder {
    pub fn bind<C: ClientTag>(mut self, gateway: GatewayRef) -> Result<Self> {
        if self.bound.contains(&C::NAME) {
            return Err(MccError::DuplicateBinding { tag: C::NAME });
        }

        // 網關自帶的標籤必須與綁定的標籤一致
        if gateway.tag() != C::NAME {
            return Err(MccError::InvalidConfigValueError {
                field: format!("clients.{}", C::NAME),
                value: gateway.tag().to_string(),
                reason: format!("Gateway built for '{}' cannot serve '{}'", gateway.tag(), C::NAME),
            });
        }

        tracing::info!("Bound '{}' client -> {}", C::NAME, gateway.base_url());
        self.options = self.options.singleton_with_name(gateway, C::NAME);
        self.bound.push(C::NAME);
        Ok(self)
    }

    pub fn build(self) -> ClientRegistry {
        if self.bound.is_empty() {
            tracing::warn!("No HTTP clients bound; registry is empty");
        }

        ClientRegistry {
            cx: self.options.create(Vec::new()),
        }
    }
}

impl ClientRegistry {
    pub fn builder() -> ClientRegistryBuilder {
        ClientRegistryBuilder::default()
    }

    /// 依配置建立並綁定所有已設定的客戶端
    pub fn from_config(config: &ClientsConfig) -> Result<Self> {
        let mut builder = Self::builder();

        if let Some(drafthouse) = &config.drafthouse {
            let gateway = ReqwestGateway::new(DrafthouseClient::NAME, drafthouse)?;
            builder = builder.bind::<DrafthouseClient>(Arc::new(gateway))?;
        }

        if let Some(feeds) = &config.feeds {
            let gateway = ReqwestGateway::new(FeedsClient::NAME, feeds)?;
            builder = builder.bind::<FeedsClient>(Arc::new(gateway))?;
        }

        Ok(builder.build())
    }

    pub fn resolve<C: ClientTag>(&self) -> Result<Tagged<C>> {
        self.cx
            .get_single_option_with_name::<GatewayRef>(C::NAME)
            .map(|gateway| Tagged::new(Arc::clone(gateway)))
            .ok_or(MccError::MissingBinding { tag: C::NAME })
    }

    pub fn is_bound<C: ClientTag>(&self) -> bool {
        self.cx.contains_single_with_name::<GatewayRef>(C::NAME)
    }

    pub fn bound_tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self
            .cx
            .get_singles_by_type::<GatewayRef>()
            .into_iter()
            .map(|gateway| gateway.tag())
            .collect();
        tags.sort_unstable();
        tags
    }

    /// Looks a gateway up by configuration key, for diagnostics only.
    pub fn gateway_by_name(&self, name: &str) -> Result<GatewayRef> {
        self.cx
            .get_single_option_with_name::<GatewayRef>(Cow::Owned(name.to_string()))
            .map(Arc::clone)
            .ok_or_else(|| MccError::InvalidConfigValueError {
                field: "client tag".to_string(),
                value: name.to_string(),
                reason: format!("Bound tags: {}", self.bound_tags().join(", ")),
            })
    }
}
