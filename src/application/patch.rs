//! Manifest image patching.
//!
//! Rewrites the `image:` field of container specs that refer to a given
//! image name so it points at the resolved registry path and tag. The
//! rewrite is textual: comments, ordering and formatting of the rest of the
//! manifest are untouched.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::domain::{ImageReference, PatchOutcome};
use crate::error::Result;

/// Pattern matching an `image:` field whose value names `image`.
///
/// Accepts an optional list dash, optional quoting, any registry/path prefix,
/// an optional tag, an optional digest and a trailing comment.
fn image_field_pattern(image: &str) -> Result<Regex> {
    let pattern = format!(
        r#"(?m)^(?P<lead>[ \t]*(?:-[ \t]+)?image:[ \t]*)(?P<quote>["']?)(?:[^\s"'#]*/)?{name}(?::[^\s"'@#]+)?(?:@sha256:[0-9a-f]{{64}})?["']?(?P<trail>[ \t]*(?:#[^\r\n]*)?\r?)$"#,
        name = regex::escape(image)
    );
    Ok(Regex::new(&pattern)?)
}

/// Patch manifest text in memory; returns the new text and the match count.
pub fn patch_text(text: &str, reference: &ImageReference) -> Result<(String, usize)> {
    let pattern = image_field_pattern(reference.name())?;
    let replaced = pattern.find_iter(text).count();
    if replaced == 0 {
        return Ok((text.to_string(), 0));
    }
    let replacement = format!("${{lead}}${{quote}}{reference}${{quote}}${{trail}}");
    let patched = pattern.replace_all(text, replacement.as_str()).into_owned();
    Ok((patched, replaced))
}

/// Patch one manifest file in place. The file is only written when its
/// content changes.
pub fn patch_file(path: &Path, reference: &ImageReference) -> Result<PatchOutcome> {
    let original = fs::read_to_string(path)?;
    let (patched, replaced) = patch_text(&original, reference)?;
    let changed = patched != original;
    if changed {
        fs::write(path, &patched)?;
    }
    debug!(manifest = %path.display(), image = %reference, replaced, changed, "Patched");
    Ok(PatchOutcome {
        path: path.to_path_buf(),
        replaced,
        changed,
    })
}

/// Points every manifest of a workload at one image reference.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestPatcher;

impl ManifestPatcher {
    /// Patch each of `manifests`; stops at the first unreadable file.
    pub fn patch(&self, manifests: &[PathBuf], reference: &ImageReference) -> Result<Vec<PatchOutcome>> {
        manifests
            .iter()
            .map(|path| patch_file(path, reference))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(tag: &str) -> ImageReference {
        ImageReference::new("gcr.io", "demo-123", "apartment-backend", tag).expect("valid")
    }

    const DEPLOYMENT: &str = "\
apiVersion: apps/v1
kind: Deployment
spec:
  template:
    spec:
      containers:
        - name: backend
          image: gcr.io/PROJECT_ID/apartment-backend:latest
          ports:
            - containerPort: 8080
";

    #[test]
    fn replaces_placeholder_project_and_tag() {
        let (patched, replaced) = patch_text(DEPLOYMENT, &reference("prod")).expect("patched");
        assert_eq!(replaced, 1);
        assert!(patched.contains("          image: gcr.io/demo-123/apartment-backend:prod\n"));
        assert!(patched.contains("containerPort: 8080"));
    }

    #[test]
    fn patching_twice_equals_patching_once() {
        let (once, _) = patch_text(DEPLOYMENT, &reference("prod")).expect("patched");
        let (twice, replaced) = patch_text(&once, &reference("prod")).expect("patched");
        assert_eq!(once, twice);
        assert_eq!(replaced, 1);
    }

    #[test]
    fn list_item_image_keeps_dash() {
        let text = "containers:\n  - image: apartment-backend\n    name: api\n";
        let (patched, replaced) = patch_text(text, &reference("prod")).expect("patched");
        assert_eq!(replaced, 1);
        assert_eq!(
            patched,
            "containers:\n  - image: gcr.io/demo-123/apartment-backend:prod\n    name: api\n"
        );
    }

    #[test]
    fn quoting_and_comment_are_preserved() {
        let text = "    image: \"gcr.io/old/apartment-backend:v1\" # pinned\n";
        let (patched, _) = patch_text(text, &reference("prod")).expect("patched");
        assert_eq!(
            patched,
            "    image: \"gcr.io/demo-123/apartment-backend:prod\" # pinned\n"
        );
    }

    #[test]
    fn digest_is_replaced() {
        let digest = "a".repeat(64);
        let text = format!("image: gcr.io/old/apartment-backend@sha256:{digest}\n");
        let (patched, replaced) = patch_text(&text, &reference("prod")).expect("patched");
        assert_eq!(replaced, 1);
        assert_eq!(patched, "image: gcr.io/demo-123/apartment-backend:prod\n");
    }

    #[test]
    fn other_images_are_untouched() {
        let text = "\
        - image: gcr.io/demo/apartment-backend-worker:1
        - image: postgres:16
";
        let (patched, replaced) = patch_text(text, &reference("prod")).expect("patched");
        assert_eq!(replaced, 0);
        assert_eq!(patched, text);
    }

    #[test]
    fn crlf_line_endings_survive() {
        let text = "image: gcr.io/x/apartment-backend:old\r\nname: api\r\n";
        let (patched, replaced) = patch_text(text, &reference("prod")).expect("patched");
        assert_eq!(replaced, 1);
        assert_eq!(patched, "image: gcr.io/demo-123/apartment-backend:prod\r\nname: api\r\n");
    }

    #[test]
    fn multiple_containers_are_all_patched() {
        let text = "\
      initContainers:
        - image: gcr.io/x/apartment-backend:old
      containers:
        - image: gcr.io/y/apartment-backend:older
";
        let (patched, replaced) = patch_text(text, &reference("prod")).expect("patched");
        assert_eq!(replaced, 2);
        assert_eq!(patched.matches("gcr.io/demo-123/apartment-backend:prod").count(), 2);
    }
}
