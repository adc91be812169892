use crate::coords::BlockPos;
use crate::sub_region::SubRegionBox;

/// Which sub-regions of a placement to hand out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequiredEnabled {
    #[default]
    Any,
    PlacementEnabled,
    RenderingEnabled,
}

/// A placed schematic that a selection can be built from.
pub trait PlacementSource {
    fn name(&self) -> &str;
    fn origin(&self) -> BlockPos;
    fn sub_region_boxes(&self, filter: RequiredEnabled) -> Vec<SubRegionBox>;
}
