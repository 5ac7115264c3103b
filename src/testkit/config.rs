//! Canonical test configuration and manifest fixtures.
//!
//! Single source of truth for the config used across tests, so every test
//! agrees on namespace, selectors and manifest names.

use std::fs;
use std::io;
use std::path::Path;

use crate::infrastructure::config::Config;

/// Project identifier used by [`config`].
pub const PROJECT: &str = "demo-project";

/// Static address reported by fixtures.
pub const STATIC_ADDRESS: &str = "34.120.10.20";

/// Default configuration anchored at `base`, with the project pinned and a
/// short readiness timeout.
pub fn config(base: &Path) -> Config {
    let mut config = Config::default();
    config.target.project_id = Some(PROJECT.to_string());
    config.readiness.timeout_secs = 5;
    config.status.settle_secs = 0;
    config.base_dir = base.to_path_buf();
    config
}

/// Backend manifest as it sits in a fresh checkout.
pub const BACKEND_MANIFEST: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: backend
  namespace: apartment
spec:
  template:
    spec:
      containers:
        - name: backend
          image: gcr.io/PROJECT_ID/apartment-backend:latest
          ports:
            - containerPort: 8080
";

/// Frontend manifest as it sits in a fresh checkout.
pub const FRONTEND_MANIFEST: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: frontend
  namespace: apartment
spec:
  template:
    spec:
      containers:
        - name: frontend
          image: \"gcr.io/PROJECT_ID/apartment-frontend:latest\" # pinned by deploy
";

/// Write the default manifest set under `base/k8s`.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be written.
pub fn write_manifests(base: &Path) -> io::Result<()> {
    let dir = base.join("k8s");
    fs::create_dir_all(&dir)?;
    fs::write(
        dir.join("namespace.yaml"),
        "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: apartment\n",
    )?;
    fs::write(
        dir.join("postgres.yaml"),
        "apiVersion: apps/v1\nkind: StatefulSet\nmetadata:\n  name: postgres\nspec:\n  template:\n    spec:\n      containers:\n        - name: postgres\n          image: postgres:16\n",
    )?;
    fs::write(dir.join("backend-deployment.yaml"), BACKEND_MANIFEST)?;
    fs::write(dir.join("frontend-deployment.yaml"), FRONTEND_MANIFEST)?;
    fs::write(
        dir.join("managed-certificate.yaml"),
        "apiVersion: networking.gke.io/v1\nkind: ManagedCertificate\nmetadata:\n  name: apartment-cert\n",
    )?;
    fs::write(
        dir.join("ingress.yaml"),
        "apiVersion: networking.k8s.io/v1\nkind: Ingress\nmetadata:\n  name: apartment-ingress\n",
    )?;
    Ok(())
}
