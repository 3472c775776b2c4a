//! # reap-git
//!
//! Repository access layer for reap. Resolves the base branch from HEAD,
//! lists local branches through git2-rs and runs the `git` executable
//! for every operation that mutates the working tree.

mod error;
mod gateway;
mod head;
mod repository;

pub use error::{Error, Result};
pub use gateway::{GitCommand, ProcessGateway, ProcessResult};
pub use head::{HEAD_READ_LIMIT, parse_head_ref, resolve_head};
pub use repository::Repository;
