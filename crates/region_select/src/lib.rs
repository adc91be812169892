//! Region selections: named sets of axis-aligned boxes with an origin point,
//! JSON persistence, and a file-backed selection store.

mod atomic_io;
pub mod config;
pub mod coords;
pub mod events;
pub mod placement;
pub mod record;
pub mod selection;
pub mod store;
pub mod sub_region;

pub use config::{ConfigError, StoreConfig, SELECTIONS_DIR_ENV_VAR};
pub use coords::{format_coordinates, Axis, BlockPos, Corner, Direction};
pub use events::{SelectionEventSink, SelectionMoved};
pub use placement::{PlacementSource, RequiredEnabled};
pub use record::{
    parse_selection_json, parse_selection_record, SelectionParseError, SelectionRecord,
};
pub use selection::{RegionSelection, DEFAULT_SELECTION_NAME};
pub use store::{SelectionStore, StoreError};
pub use sub_region::{SubRegionBox, SubRegionBoxRecord};
