use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coords::{Axis, BlockPos, Corner};

/// A named axis-aligned box spanned by two optional corners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubRegionBox {
    name: String,
    pos1: Option<BlockPos>,
    pos2: Option<BlockPos>,
    selected_corner: Corner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRegionBoxRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos1: Option<BlockPos>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos2: Option<BlockPos>,
    #[serde(default, skip_serializing_if = "Corner::is_none")]
    pub selected_corner: Corner,
}

impl SubRegionBox {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_corners(name: impl Into<String>, pos1: BlockPos, pos2: BlockPos) -> Self {
        Self {
            name: name.into(),
            pos1: Some(pos1),
            pos2: Some(pos2),
            selected_corner: Corner::None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn pos1(&self) -> Option<BlockPos> {
        self.pos1
    }

    pub fn pos2(&self) -> Option<BlockPos> {
        self.pos2
    }

    pub fn set_pos1(&mut self, pos: Option<BlockPos>) {
        self.pos1 = pos;
    }

    pub fn set_pos2(&mut self, pos: Option<BlockPos>) {
        self.pos2 = pos;
    }

    pub fn selected_corner(&self) -> Corner {
        self.selected_corner
    }

    pub fn set_selected_corner(&mut self, corner: Corner) {
        self.selected_corner = corner;
    }

    /// `Corner::None` reads as the first corner.
    pub fn corner_pos(&self, corner: Corner) -> Option<BlockPos> {
        match corner {
            Corner::Corner2 => self.pos2,
            Corner::None | Corner::Corner1 => self.pos1,
        }
    }

    /// Returns false for `Corner::None`, which addresses no corner.
    pub fn set_corner_pos(&mut self, corner: Corner, pos: BlockPos) -> bool {
        match corner {
            Corner::Corner1 => self.pos1 = Some(pos),
            Corner::Corner2 => self.pos2 = Some(pos),
            Corner::None => return false,
        }
        true
    }

    /// Edits one axis of an existing corner. An absent corner is left absent.
    pub fn set_coordinate(&mut self, corner: Corner, axis: Axis, value: i32) -> bool {
        let slot = match corner {
            Corner::Corner1 => &mut self.pos1,
            Corner::Corner2 => &mut self.pos2,
            Corner::None => return false,
        };
        match slot {
            Some(pos) => {
                *pos = pos.with_axis(axis, value);
                true
            }
            None => false,
        }
    }

    /// Minimum and maximum corner, only when both corners are set.
    pub fn bounds(&self) -> Option<(BlockPos, BlockPos)> {
        match (self.pos1, self.pos2) {
            (Some(pos1), Some(pos2)) => Some((pos1.min(pos2), pos1.max(pos2))),
            _ => None,
        }
    }

    pub fn to_record(&self) -> SubRegionBoxRecord {
        SubRegionBoxRecord {
            name: self.name.clone(),
            pos1: self.pos1,
            pos2: self.pos2,
            selected_corner: self.selected_corner,
        }
    }

    pub fn from_record(record: SubRegionBoxRecord) -> Self {
        Self {
            name: record.name,
            pos1: record.pos1,
            pos2: record.pos2,
            selected_corner: record.selected_corner,
        }
    }

    /// Malformed entries yield `None` instead of an error.
    pub fn from_record_value(value: &Value) -> Option<Self> {
        SubRegionBoxRecord::deserialize(value)
            .ok()
            .map(Self::from_record)
    }
}
