// VLOEX API client module
//
// - auth:    API key handling (Bearer header, masking)
// - client:  reqwest transport and status-code to error mapping
// - error:   VloexError
// - types:   Video / VideoStatus / CreateOptions and raw response shapes
// - videos:  create / retrieve / wait_for_completion
// - vloex:   the SDK entry point and its builder
// - github:  latest-release lookup used by the release workflow

pub mod auth;
pub mod client;
pub mod error;
pub mod github;
pub mod types;
pub mod videos;
pub mod vloex;
