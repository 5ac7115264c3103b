//! Adapters connecting the application to the outside world.
//!
//! - [`inbound`] - The `deployctl` command line
//! - [`outbound`] - `gcloud`, `kubectl`, `docker` and the process runner
//!   behind the ports

pub mod inbound;
pub mod outbound;
