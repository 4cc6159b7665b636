//! # gac-vcs
//!
//! Version-control provider seam for git-auto-commit.
//!
//! The decision logic in `gac-core` never talks to git directly. It reads
//! repository state and issues stage/commit/sync requests through the
//! [`VcsProvider`] trait, so the live state always belongs to the provider.
//!
//! ## Key components
//!
//! - [`Status`]: closed enumeration of raw file states, mirroring the
//!   editor git provider's vocabulary and numeric codes.
//! - [`Change`], [`RepositoryState`], [`Repository`]: per-call snapshots of
//!   what the provider currently reports.
//! - [`VcsProvider`]: async trait over {list repositories, stage, commit, sync}.
//! - [`GitProvider`]: implementation backed by the `git` executable.

pub mod config;
pub mod error;
pub mod git;
pub mod porcelain;
pub mod provider;
pub mod status;

pub use config::SyncConfig;
pub use error::{Result, VcsError};
pub use git::GitProvider;
pub use provider::{CommitResult, SyncResult, VcsProvider};
pub use status::{Change, Repository, RepositoryState, Status};
