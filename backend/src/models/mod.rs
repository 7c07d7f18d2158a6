//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for frontend consumption.
//! - `commit`: Commit, GitOptions, PaginatedCommits
//! - `diff`: DiffFile for the per-file diff view
//! - `blame`: BlameLine for per-line author attribution

pub mod blame;
pub mod commit;
pub mod diff;

pub use blame::*;
pub use commit::*;
pub use diff::*;
