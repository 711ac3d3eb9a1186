use crate::domain::model::{ColorIdentityMode, ResolvedCard};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Looks up canonical card data by (possibly fuzzy) name.
///
/// Implementations return `AssistError::CardNotFound` when the name matches nothing and
/// `AssistError::TransientError` for timeouts and upstream outages. They never retry.
#[async_trait]
pub trait CardResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<ResolvedCard>;
}

#[async_trait]
impl<R: CardResolver + ?Sized> CardResolver for Arc<R> {
    async fn resolve(&self, name: &str) -> Result<ResolvedCard> {
        (**self).resolve(name).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn resolver_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn color_identity_mode(&self) -> ColorIdentityMode;
    fn max_concurrent_resolutions(&self) -> usize;
    fn deadline(&self) -> Option<Duration>;
}
