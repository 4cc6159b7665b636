//! # gac-core
//!
//! Decision logic for committing a single file whenever it is saved.
//!
//! A save event flows through four gates before anything is written:
//! no repository may have staged changes, the saved path must match an
//! unstaged change, that change's status must classify as one of
//! [`ChangeKind`], and the kind must be enabled in the configuration.
//! Only then does the [`AutoCommitCoordinator`] stage, commit and
//! synchronize through the injected [`gac_vcs::VcsProvider`].
//!
//! ## Key components
//!
//! - [`classify`]: total mapping from raw [`gac_vcs::Status`] to [`ChangeKind`].
//! - [`AutoCommitCoordinator`]: the per-save gate and stage → commit → sync chain.
//! - [`ConfigSource`]: where enabled kinds come from. [`FileConfigSource`]
//!   re-reads `.gac/config.toml` on every save.

pub mod classifier;
pub mod config;
pub mod coordinator;
pub mod error;

pub use classifier::{classify, classify_code, ChangeKind};
pub use config::{AutoCommitConfig, ConfigSource, EventsConfig, FileConfigSource, WatchConfig};
pub use coordinator::{commit_message, find_change, AutoCommitCoordinator, SaveOutcome, SkipReason};
pub use error::CoreError;
