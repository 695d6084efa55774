//! VLOEX SDK - video generation as a computing primitive
//!
//! ```no_run
//! use vloex::{CreateOptions, PollOptions, Vloex, VideoStatus};
//!
//! # async fn example() -> Result<(), vloex::VloexError> {
//! let vloex = Vloex::from_env()?;
//! let video = vloex.videos().create("Hello world", &CreateOptions::default()).await?;
//!
//! let done = vloex
//!     .videos()
//!     .wait_for_completion(&video.id, &PollOptions::default(), |_| {})
//!     .await?;
//! if done.status == VideoStatus::Completed {
//!     println!("{}", done.url.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod error_severity;
pub mod webhook;

pub use api::auth::ApiKey;
pub use api::error::{ErrorKind, VloexError};
pub use api::types::{CreateOptions, Video, VideoStatus};
pub use api::videos::{PollOptions, VideoResource};
pub use api::vloex::{ClientConfig, Vloex, VloexBuilder};
pub use webhook::{WebhookError, WebhookEvent, WebhookPayload, WebhookVerifier};
