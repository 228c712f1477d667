//! Upstream collaborators: the hosted language model and the mail relay.
//!
//! Each concern sits behind a trait so the HTTP layer can be exercised with
//! fakes.

pub mod gallery;
pub mod llm;
pub mod mail;
pub mod screening;

pub use gallery::{GalleryLayoutService, LlmGalleryLayout};
pub use llm::LlmClient;
pub use mail::{Mailer, RelayMailer};
pub use screening::{ContactScreener, LlmScreener};
