//! Cloud project port.

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait CloudPlatform: Send + Sync {
    /// Project configured as the CLI default, if any.
    async fn active_project(&self) -> Result<Option<String>>;

    /// Reserved global static address `name` in `project`, or `None` if absent.
    async fn static_address(&self, project: &str, name: &str) -> Result<Option<String>>;
}
