pub mod blame;
pub mod client;
pub mod command_client;
pub mod diff;
pub mod history;
pub mod pagination;
pub mod refs;
pub mod repository;

#[cfg(test)]
pub mod testing;

pub use client::LogQuery;
pub use repository::{GitRepository, SharedRepo};
