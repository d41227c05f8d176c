pub mod disambiguation;
pub mod entity;
pub mod invariants;
pub mod normalize;

pub use disambiguation::disambiguate;
pub use entity::{Category, MappingRow, PlannedRename, RawMappingRow};
pub use invariants::validate_mapping_row;
pub use normalize::{normalize_rows, NormalizationSummary, NormalizedMapping};
