//! Container image build port.

use async_trait::async_trait;

use crate::domain::{BuildStrategy, ImageReference, ImageSpec};
use crate::error::Result;

#[async_trait]
pub trait ImageBuilder: Send + Sync {
    fn strategy(&self) -> BuildStrategy;

    /// One-time setup before the first build (registry credentials and the like).
    async fn prepare(&self, registry: &str) -> Result<()>;

    /// Build `spec` and leave it pushed at `reference`.
    async fn build_and_push(&self, spec: &ImageSpec, reference: &ImageReference) -> Result<()>;
}

/// Picks an [`ImageBuilder`] once the strategy and project are known.
pub trait BuilderFactory: Send + Sync {
    fn builder(&self, strategy: BuildStrategy, project: &str) -> Box<dyn ImageBuilder>;
}
