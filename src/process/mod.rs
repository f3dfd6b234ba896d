// src/process/mod.rs
pub mod convert;
pub mod matchups;
pub mod normalize;
pub mod raw_table;
pub mod resolve;
pub mod roster;

pub use matchups::expand;
pub use normalize::{
    normalize, normalize_as, CategoryFilter, FieldKind, FieldSpec, NormalizeError,
    NormalizedRecord, TableSpec,
};
pub use raw_table::RawTable;
pub use resolve::resolve;
pub use roster::RosterTeams;
