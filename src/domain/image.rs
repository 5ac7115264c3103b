use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// `registry/project-path/name:tag`. The project path may span several
/// segments (Artifact Registry uses `project/repository`).
static REFERENCE_PATTERN: LazyLock<std::result::Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<registry>[a-z0-9][a-z0-9.-]*(?::\d+)?)/(?P<project>[a-z0-9][a-z0-9./_-]*?)/(?P<name>[a-z0-9][a-z0-9._-]*):(?P<tag>[A-Za-z0-9_][A-Za-z0-9_.-]{0,127})$",
    )
});

/// Which tier of the application an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    Frontend,
    Backend,
}

impl ImageRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ImageRole::Frontend => "frontend",
            ImageRole::Backend => "backend",
        }
    }
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where images get built before being pushed to the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStrategy {
    /// Remote build service; sources are uploaded and built in the cloud.
    #[default]
    Remote,
    /// Local container engine, then push.
    Local,
}

impl fmt::Display for BuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStrategy::Remote => f.write_str("remote"),
            BuildStrategy::Local => f.write_str("local"),
        }
    }
}

/// How one image is built: its name in the registry and where its sources live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSpec {
    pub role: ImageRole,
    pub name: String,
    pub context: PathBuf,
    pub dockerfile: PathBuf,
}

impl ImageSpec {
    /// Reference this image resolves to for the given registry, project and tag.
    pub fn reference(&self, registry: &str, project: &str, tag: &str) -> Result<ImageReference> {
        ImageReference::new(registry, project, &self.name, tag)
    }
}

/// A fully-qualified container image reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImageReference {
    registry: String,
    project: String,
    name: String,
    tag: String,
}

impl ImageReference {
    /// Build a reference, rejecting anything the reference pattern does not match.
    pub fn new(registry: &str, project: &str, name: &str, tag: &str) -> Result<Self> {
        format!("{registry}/{project}/{name}:{tag}").parse()
    }

    #[must_use]
    pub fn registry(&self) -> &str {
        &self.registry
    }

    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl FromStr for ImageReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let pattern = REFERENCE_PATTERN.as_ref().map_err(|err| Error::Pattern(err.clone()))?;
        let caps = pattern
            .captures(s)
            .ok_or_else(|| Error::ImageReference(s.to_string()))?;
        Ok(Self {
            registry: caps["registry"].to_string(),
            project: caps["project"].to_string(),
            name: caps["name"].to_string(),
            tag: caps["tag"].to_string(),
        })
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}:{}", self.registry, self.project, self.name, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_registry_path() {
        let reference = ImageReference::new("gcr.io", "demo-123", "apartment-backend", "prod")
            .expect("valid reference");
        assert_eq!(reference.to_string(), "gcr.io/demo-123/apartment-backend:prod");
    }

    #[test]
    fn parses_multi_segment_project_path() {
        let reference: ImageReference = "europe-docker.pkg.dev/demo/apps/frontend:v1.2"
            .parse()
            .expect("valid reference");
        assert_eq!(reference.registry(), "europe-docker.pkg.dev");
        assert_eq!(reference.project(), "demo/apps");
        assert_eq!(reference.name(), "frontend");
        assert_eq!(reference.tag(), "v1.2");
    }

    #[test]
    fn rejects_missing_tag() {
        assert!("gcr.io/demo/frontend".parse::<ImageReference>().is_err());
    }

    #[test]
    fn rejects_uppercase_project() {
        assert!(ImageReference::new("gcr.io", "Demo", "frontend", "prod").is_err());
    }

    #[test]
    fn rejects_tag_with_spaces() {
        assert!(ImageReference::new("gcr.io", "demo", "frontend", "two words").is_err());
    }

    #[test]
    fn spec_reference_uses_image_name() {
        let spec = ImageSpec {
            role: ImageRole::Frontend,
            name: "apartment-frontend".into(),
            context: "frontend".into(),
            dockerfile: "frontend/Dockerfile".into(),
        };
        let reference = spec.reference("gcr.io", "demo", "prod").expect("valid");
        assert_eq!(reference.name(), "apartment-frontend");
    }
}
