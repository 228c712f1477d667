//! # taraang-site-api
//!
//! HTTP endpoints behind the public landing page.
//!
//! | Route                     | Purpose                                  |
//! |---------------------------|------------------------------------------|
//! | `POST /api/contact`       | Screen, store and forward a submission   |
//! | `GET /api/gallery/layout` | Grid spans for the gallery section       |
//! | `GET /api/health`         | Liveness plus database check             |

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

pub use config::{ConfigError, SiteConfig};
pub use error::{SiteError, UpstreamError, UpstreamResult};
pub use routes::router;
pub use state::AppState;
