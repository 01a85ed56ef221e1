//! Core library for soranks
//!
//! This crate is the **Functional Core** of soranks: everything that decides
//! *what* the ranking looks like lives here, while everything that talks to the
//! network or the filesystem lives in the `soranks` binary crate.
//!
//! # Module Organization
//!
//! - [`users`]: Stack Exchange `users` payload types (User Record, Page)
//! - [`ranks`]: Rank Entry and the reputation/location Rank Filter
//! - [`pagination`]: Page cursor with retry counting and stop decisions
//! - [`stackexchange`]: Request query construction and API key parsing
//! - [`report`]: JSON and Markdown rendering of the ranked list
//! - [`github`]: Request model for publishing a file through the GitHub contents API
//!
//! Every function in this crate is deterministic and free of I/O, so the tests
//! use plain fixture data.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use soranks_core::ranks::RankFilter;
//! use soranks_core::users::UsersPage;
//!
//! let page: UsersPage = serde_json::from_str(payload)?;
//! let mut filter = RankFilter::new(500, "spain", 20)?;
//!
//! if filter.apply(&page).should_continue() {
//!     // fetch the next page
//! }
//!
//! let markdown = soranks_core::report::render_markdown(filter.ranks(), "spain");
//! ```

pub mod github;
pub mod pagination;
pub mod ranks;
pub mod report;
pub mod stackexchange;
pub mod users;
