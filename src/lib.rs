//! # DocIndexer
//!
//! A configurable file discovery, filtering, and cataloguing engine.
//!
//! DocIndexer discovers files under a configured source (a directory tree,
//! a single file, or a previously saved catalogue), narrows them through
//! composable predicate filters, orders them by a configurable key, and can
//! persist the result as a reusable catalogue document.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐   ┌──────────┐   ┌───────┐   ┌────────┐
//! │  Discovery     │──▶│ Composite │──▶│ Sort  │──▶│ Limit  │
//! │ dir/file/cat  │   │  filter   │   │       │   │        │
//! └───────────────┘   └──────────┘   └───┬───┘   └───┬────┘
//!                                        │           │
//!                               ┌────────┴───┐   ┌───┴────────┐
//!                               │ FileIterator│──▶│ Catalogue  │
//!                               │ (lazy list) │   │  builder   │
//!                               └────────────┘   └────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`record`] | The `FileRecord` metadata snapshot |
//! | [`filter`] | Predicate filters and the composite factory |
//! | [`sort`] | Sort key resolution and ordering |
//! | [`discover`] | Discovery strategies (directory, file, catalogue) |
//! | [`iterator`] | The lazy, resumable `FileIterator` |
//! | [`catalogue`] | Catalogue documents and the builder |
//! | [`config`] | Layered configuration and the `Settings` snapshot |
//! | [`schema`] | Schema-driven option validation |
//! | [`error`] | Engine error taxonomy |

pub mod catalogue;
pub mod catalogue_cmd;
pub mod config;
pub mod config_cmd;
pub mod discover;
pub mod error;
pub mod filter;
pub mod iterator;
pub mod list_cmd;
pub mod record;
pub mod schema;
pub mod schema_cmd;
pub mod sort;
