//! Capability tags that pick which HTTP client a consumer receives.
//!
//! A consumer asks for `Tagged<DrafthouseClient>` or `Tagged<FeedsClient>`
//! rather than for "an HTTP client". The two handle types are distinct, so one
//! can never be passed where the other is expected.

use crate::domain::ports::HttpGateway;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

pub trait ClientTag: Send + Sync + 'static {
    /// Configuration key, e.g. `[clients.drafthouse]`.
    const NAME: &'static str;
    const DESCRIPTION: &'static str;
}

/// The drafthouse.com HTTP client used for EE and Mother endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DrafthouseClient;

impl ClientTag for DrafthouseClient {
    const NAME: &'static str = "drafthouse";
    const DESCRIPTION: &'static str = "drafthouse.com HTTP client for EE and Mother endpoints";
}

/// The Market feed HTTP client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeedsClient;

impl ClientTag for FeedsClient {
    const NAME: &'static str = "feeds";
    const DESCRIPTION: &'static str = "Market feed HTTP client";
}

pub struct Tagged<C: ClientTag> {
    gateway: Arc<dyn HttpGateway>,
    _tag: PhantomData<fn() -> C>,
}

impl<C: ClientTag> Tagged<C> {
    pub(crate) fn new(gateway: Arc<dyn HttpGateway>) -> Self {
        Self {
            gateway,
            _tag: PhantomData,
        }
    }

    pub fn tag_name(&self) -> &'static str {
        C::NAME
    }

    pub fn gateway(&self) -> Arc<dyn HttpGateway> {
        Arc::clone(&self.gateway)
    }
}

impl<C: ClientTag> Clone for Tagged<C> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.gateway))
    }
}

impl<C: ClientTag> Deref for Tagged<C> {
    type Target = dyn HttpGateway;

    fn deref(&self) -> &Self::Target {
        self.gateway.as_ref()
    }
}

impl<C: ClientTag> fmt::Debug for Tagged<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tagged")
            .field("tag", &C::NAME)
            .field("base_url", &self.gateway.base_url().as_str())
            .finish()
    }
}
