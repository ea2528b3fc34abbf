//! Data matching and filtering core for a god/item reference catalog.
//!
//! The library is pure functions over an immutable [`Catalog`]; the MCP
//! [`server`] only owns query parameters and calls into it.

pub mod assets;
pub mod config;
pub mod context;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod format;
pub mod leveling;
pub mod matching;
pub mod pins;
pub mod roles;
pub mod server;
pub mod stats;
pub mod storage;
pub mod tools;
pub mod tracing;

pub use config::Config;
pub use context::CodexContext;
pub use dataset::{Build, Catalog, CatalogState, God, Item, LoadStatus, Mechanic, flatten_any};
pub use error::{LoadError, Result, StorageError};
pub use leveling::{LevelingOrders, extract_orders};
pub use matching::{ItemIndex, MatchTier};
pub use roles::{CanonicalRole, RoleLabel, classify_build_role, classify_god_roles};
pub use server::CodexServer;
