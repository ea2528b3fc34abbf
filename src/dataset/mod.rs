//! The bundled dataset: raw shape, typed records, and the normalized catalog.

pub mod catalog;
pub mod flatten;
pub mod loader;
pub mod model;

pub use catalog::Catalog;
pub use flatten::{flatten_any, is_falsy};
pub use loader::{CatalogState, LoadStatus, read_catalog};
pub use model::{Ability, Build, God, Item, Mechanic, Skin, Tip, ability_key, slot_names};
