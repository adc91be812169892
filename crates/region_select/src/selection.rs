use std::cell::Cell;
use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::coords::{Axis, BlockPos, Corner, Direction};
use crate::events::{SelectionEventSink, SelectionMoved};
use crate::placement::{PlacementSource, RequiredEnabled};
use crate::sub_region::SubRegionBox;

pub const DEFAULT_SELECTION_NAME: &str = "Unnamed";

/// A named set of sub-region boxes plus an origin point.
///
/// The origin is either set explicitly or derived from the minimum corner of
/// the volume enclosing every fully-defined box. The derived origin is cached
/// and recomputed on the first read after any corner or membership change.
#[derive(Debug, Clone)]
pub struct RegionSelection {
    pub(crate) name: String,
    pub(crate) sub_region_boxes: BTreeMap<String, SubRegionBox>,
    pub(crate) explicit_origin: Option<BlockPos>,
    pub(crate) current_box: Option<String>,
    origin_selected: bool,
    calculated_origin: Cell<BlockPos>,
    calculated_origin_dirty: Cell<bool>,
}

impl Default for RegionSelection {
    fn default() -> Self {
        Self {
            name: DEFAULT_SELECTION_NAME.to_string(),
            sub_region_boxes: BTreeMap::new(),
            explicit_origin: None,
            current_box: None,
            origin_selected: false,
            calculated_origin: Cell::new(BlockPos::ORIGIN),
            calculated_origin_dirty: Cell::new(true),
        }
    }
}

impl RegionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_placement<P: PlacementSource + ?Sized>(placement: &P) -> Self {
        let mut selection = Self::new();
        selection.set_explicit_origin(Some(placement.origin()));
        selection.name = placement.name().to_string();
        for sub_box in placement.sub_region_boxes(RequiredEnabled::Any) {
            selection.sub_region_boxes.insert(sub_box.name().to_string(), sub_box);
        }
        selection.mark_origin_dirty();
        selection
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn current_sub_region_box_name(&self) -> Option<&str> {
        self.current_box.as_deref()
    }

    /// `None` clears the active box. Unknown names leave the selection as it was.
    pub fn set_selected_sub_region_box(&mut self, name: Option<&str>) -> bool {
        match name {
            None => {
                self.current_box = None;
                true
            }
            Some(name) if self.sub_region_boxes.contains_key(name) => {
                self.current_box = Some(name.to_string());
                true
            }
            Some(_) => false,
        }
    }

    pub fn is_origin_selected(&self) -> bool {
        self.origin_selected
    }

    /// The origin can only become the edit target while an explicit origin exists.
    pub fn set_origin_selected(&mut self, selected: bool) -> bool {
        if selected && self.explicit_origin.is_none() {
            return false;
        }
        self.origin_selected = selected;
        true
    }

    pub fn effective_origin(&self) -> BlockPos {
        match self.explicit_origin {
            Some(origin) => origin,
            None => {
                if self.calculated_origin_dirty.get() {
                    self.update_calculated_origin();
                }
                self.calculated_origin.get()
            }
        }
    }

    pub fn explicit_origin(&self) -> Option<BlockPos> {
        self.explicit_origin
    }

    pub fn set_explicit_origin(&mut self, origin: Option<BlockPos>) {
        self.explicit_origin = origin;
        if origin.is_none() {
            self.origin_selected = false;
        }
    }

    pub(crate) fn update_calculated_origin(&self) {
        let origin = self
            .enclosing_area_corners()
            .map(|(min, _)| min)
            .unwrap_or(BlockPos::ORIGIN);
        self.calculated_origin.set(origin);
        self.calculated_origin_dirty.set(false);
    }

    /// Minimum and maximum corner over all boxes that have both corners set.
    pub fn enclosing_area_corners(&self) -> Option<(BlockPos, BlockPos)> {
        self.sub_region_boxes
            .values()
            .filter_map(SubRegionBox::bounds)
            .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
    }

    fn mark_origin_dirty(&mut self) {
        self.calculated_origin_dirty.set(true);
    }

    pub fn sub_region_box(&self, name: &str) -> Option<&SubRegionBox> {
        self.sub_region_boxes.get(name)
    }

    pub fn selected_sub_region_box(&self) -> Option<&SubRegionBox> {
        self.current_box
            .as_deref()
            .and_then(|name| self.sub_region_boxes.get(name))
    }

    fn selected_sub_region_box_mut(&mut self) -> Option<&mut SubRegionBox> {
        let name = self.current_box.as_deref()?;
        self.sub_region_boxes.get_mut(name)
    }

    pub fn all_sub_region_boxes(&self) -> impl Iterator<Item = &SubRegionBox> {
        self.sub_region_boxes.values()
    }

    pub fn sub_region_box_names(&self) -> impl Iterator<Item = &str> {
        self.sub_region_boxes.keys().map(String::as_str)
    }

    pub fn sub_region_box_count(&self) -> usize {
        self.sub_region_boxes.len()
    }

    /// Creates a box with its first corner at `pos1` and makes it the active box.
    /// Taken names get a `" 1"`, `" 2"`, ... suffix. Returns the name actually used.
    pub fn create_new_sub_region_box(&mut self, pos1: BlockPos, desired_name: &str) -> String {
        self.clear_current_selected_corner();
        self.origin_selected = false;

        let mut name = desired_name.to_string();
        let mut suffix = 1u32;
        while self.sub_region_boxes.contains_key(&name) {
            name = format!("{desired_name} {suffix}");
            suffix += 1;
        }

        let mut sub_box = SubRegionBox::new(name.clone());
        sub_box.set_selected_corner(Corner::Corner1);
        sub_box.set_corner_pos(Corner::Corner1, pos1);
        self.sub_region_boxes.insert(name.clone(), sub_box);
        self.current_box = Some(name.clone());
        self.mark_origin_dirty();

        debug!(
            selection = %self.name,
            box_name = %name,
            desired_name,
            "selection_box_created"
        );
        name
    }

    pub fn clear_current_selected_corner(&mut self) {
        if let Some(sub_box) = self.selected_sub_region_box_mut() {
            sub_box.set_selected_corner(Corner::None);
        }
    }

    /// Inserts `sub_box` unless a box with the same name exists and `replace` is false.
    pub fn add_sub_region_box(&mut self, sub_box: SubRegionBox, replace: bool) -> bool {
        if !replace && self.sub_region_boxes.contains_key(sub_box.name()) {
            return false;
        }
        self.sub_region_boxes.insert(sub_box.name().to_string(), sub_box);
        self.mark_origin_dirty();
        true
    }

    pub fn remove_all_sub_region_boxes(&mut self) {
        self.sub_region_boxes.clear();
        self.current_box = None;
        self.mark_origin_dirty();
    }

    pub fn remove_sub_region_box(&mut self, name: &str) -> bool {
        if self.sub_region_boxes.remove(name).is_none() {
            return false;
        }
        if self.current_box.as_deref() == Some(name) {
            self.current_box = None;
        }
        self.mark_origin_dirty();
        true
    }

    pub fn remove_selected_sub_region_box(&mut self) -> bool {
        let removed = match self.current_box.take() {
            Some(name) => self.sub_region_boxes.remove(&name).is_some(),
            None => false,
        };
        if removed {
            self.mark_origin_dirty();
        }
        removed
    }

    pub fn rename_sub_region_box(&mut self, old_name: &str, new_name: &str) -> bool {
        if self.sub_region_boxes.contains_key(new_name) {
            return false;
        }
        let Some(mut sub_box) = self.sub_region_boxes.remove(old_name) else {
            return false;
        };

        sub_box.set_name(new_name);
        self.sub_region_boxes.insert(new_name.to_string(), sub_box);
        if self.current_box.as_deref() == Some(old_name) {
            self.current_box = Some(new_name.to_string());
        }
        self.mark_origin_dirty();

        debug!(
            selection = %self.name,
            old_name,
            new_name,
            "selection_box_renamed"
        );
        true
    }

    /// Shifts every box so the effective origin lands on `new_origin`.
    pub fn move_entire_selection_to(
        &mut self,
        new_origin: BlockPos,
        announce: Option<&mut dyn SelectionEventSink>,
    ) {
        let old_origin = self.effective_origin();
        let diff = new_origin.sub(old_origin);

        for sub_box in self.sub_region_boxes.values_mut() {
            if let Some(pos1) = sub_box.pos1() {
                sub_box.set_corner_pos(Corner::Corner1, pos1.add(diff));
            }
            if let Some(pos2) = sub_box.pos2() {
                sub_box.set_corner_pos(Corner::Corner2, pos2.add(diff));
            }
        }
        self.mark_origin_dirty();

        if self.explicit_origin.is_some() {
            self.set_explicit_origin(Some(new_origin));
        }

        info!(
            selection = %self.name,
            old_origin = ?old_origin,
            new_origin = ?new_origin,
            box_count = self.sub_region_boxes.len(),
            "selection_moved"
        );

        if let Some(sink) = announce {
            sink.selection_moved(&SelectionMoved {
                old_origin,
                new_origin,
            });
        }
    }

    /// Moves the origin when it is the edit target, otherwise the active box.
    /// A box with no selected corner moves as a whole; a selected corner moves alone.
    pub fn move_selected_element(&mut self, direction: Direction, amount: i32) {
        if self.origin_selected {
            if let Some(origin) = self.explicit_origin {
                self.set_explicit_origin(Some(origin.offset(direction, amount)));
            }
            return;
        }

        let Some(sub_box) = self.selected_sub_region_box_mut() else {
            return;
        };
        let corner = sub_box.selected_corner();
        let mut moved = false;

        if matches!(corner, Corner::None | Corner::Corner1) {
            if let Some(pos1) = sub_box.pos1() {
                moved |= sub_box.set_corner_pos(Corner::Corner1, pos1.offset(direction, amount));
            }
        }
        if matches!(corner, Corner::None | Corner::Corner2) {
            if let Some(pos2) = sub_box.pos2() {
                moved |= sub_box.set_corner_pos(Corner::Corner2, pos2.offset(direction, amount));
            }
        }

        if moved {
            self.mark_origin_dirty();
        }
    }

    pub fn set_selected_sub_region_corner_pos(&mut self, pos: BlockPos, corner: Corner) -> bool {
        match self.current_box.clone() {
            Some(name) => self.set_sub_region_corner_pos(&name, corner, pos),
            None => false,
        }
    }

    pub fn set_sub_region_corner_pos(
        &mut self,
        box_name: &str,
        corner: Corner,
        pos: BlockPos,
    ) -> bool {
        let Some(sub_box) = self.sub_region_boxes.get_mut(box_name) else {
            return false;
        };
        if !sub_box.set_corner_pos(corner, pos) {
            return false;
        }
        self.mark_origin_dirty();
        true
    }

    /// Edits one axis of a box corner, or of the explicit origin when `corner`
    /// is `Corner::None`. Missing boxes, corners or origins make this a no-op.
    pub fn set_coordinate(
        &mut self,
        box_name: Option<&str>,
        corner: Corner,
        axis: Axis,
        value: i32,
    ) -> bool {
        if corner.is_none() {
            return match self.explicit_origin {
                Some(origin) => {
                    self.set_explicit_origin(Some(origin.with_axis(axis, value)));
                    true
                }
                None => false,
            };
        }

        let Some(sub_box) = box_name.and_then(|name| self.sub_region_boxes.get_mut(name)) else {
            return false;
        };
        if !sub_box.set_coordinate(corner, axis, value) {
            return false;
        }
        self.mark_origin_dirty();
        true
    }

    pub fn sub_region_corner_pos(&self, box_name: &str, corner: Corner) -> Option<BlockPos> {
        self.sub_region_boxes
            .get(box_name)
            .and_then(|sub_box| sub_box.corner_pos(corner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_box_selection() -> RegionSelection {
        let mut selection = RegionSelection::new();
        selection.add_sub_region_box(
            SubRegionBox::with_corners("a", BlockPos::new(0, 0, 0), BlockPos::new(2, 2, 2)),
            false,
        );
        selection.add_sub_region_box(
            SubRegionBox::with_corners("b", BlockPos::new(5, 1, 1), BlockPos::new(7, 3, 3)),
            false,
        );
        selection
    }

    struct FixedPlacement {
        boxes: Vec<SubRegionBox>,
    }

    impl PlacementSource for FixedPlacement {
        fn name(&self) -> &str {
            "castle"
        }

        fn origin(&self) -> BlockPos {
            BlockPos::new(100, 64, -20)
        }

        fn sub_region_boxes(&self, _filter: RequiredEnabled) -> Vec<SubRegionBox> {
            self.boxes.clone()
        }
    }

    #[test]
    fn new_selection_is_unnamed_and_empty() {
        let selection = RegionSelection::new();
        assert_eq!(selection.name(), "Unnamed");
        assert_eq!(selection.sub_region_box_count(), 0);
        assert_eq!(selection.effective_origin(), BlockPos::ORIGIN);
        assert_eq!(selection.current_sub_region_box_name(), None);
    }

    #[test]
    fn derived_origin_is_minimum_corner_of_enclosing_volume() {
        let selection = two_box_selection();
        assert_eq!(selection.effective_origin(), BlockPos::new(0, 0, 0));
        assert_eq!(
            selection.enclosing_area_corners(),
            Some((BlockPos::new(0, 0, 0), BlockPos::new(7, 3, 3)))
        );
    }

    #[test]
    fn explicit_origin_overrides_box_bounds() {
        let mut selection = two_box_selection();
        selection.set_explicit_origin(Some(BlockPos::new(-4, 9, 12)));
        assert_eq!(selection.effective_origin(), BlockPos::new(-4, 9, 12));

        selection.set_sub_region_corner_pos("a", Corner::Corner1, BlockPos::new(-50, -50, -50));
        assert_eq!(selection.effective_origin(), BlockPos::new(-4, 9, 12));
    }

    #[test]
    fn boxes_without_both_corners_do_not_contribute_to_origin() {
        let mut selection = RegionSelection::new();
        selection.create_new_sub_region_box(BlockPos::new(-10, -10, -10), "half");
        assert_eq!(selection.effective_origin(), BlockPos::ORIGIN);

        selection.add_sub_region_box(
            SubRegionBox::with_corners("full", BlockPos::new(3, 4, 5), BlockPos::new(6, 7, 8)),
            false,
        );
        assert_eq!(selection.effective_origin(), BlockPos::new(3, 4, 5));
    }

    #[test]
    fn corner_edit_invalidates_cached_origin() {
        let mut selection = two_box_selection();
        assert_eq!(selection.effective_origin(), BlockPos::new(0, 0, 0));

        assert!(selection.set_sub_region_corner_pos("b", Corner::Corner1, BlockPos::new(-3, 1, 1)));
        assert_eq!(selection.effective_origin(), BlockPos::new(-3, 0, 0));

        assert!(selection.set_coordinate(Some("a"), Corner::Corner1, Axis::Y, -8));
        assert_eq!(selection.effective_origin(), BlockPos::new(-3, -8, 0));
    }

    #[test]
    fn membership_changes_invalidate_cached_origin() {
        let mut selection = two_box_selection();
        assert_eq!(selection.effective_origin(), BlockPos::new(0, 0, 0));

        assert!(selection.remove_sub_region_box("a"));
        assert_eq!(selection.effective_origin(), BlockPos::new(5, 1, 1));

        selection.remove_all_sub_region_boxes();
        assert_eq!(selection.effective_origin(), BlockPos::ORIGIN);
    }

    #[test]
    fn create_new_box_resolves_name_collisions_in_order() {
        let mut selection = RegionSelection::new();
        let pos = BlockPos::new(1, 2, 3);
        assert_eq!(selection.create_new_sub_region_box(pos, "Box"), "Box");
        assert_eq!(selection.create_new_sub_region_box(pos, "Box"), "Box 1");
        assert_eq!(selection.create_new_sub_region_box(pos, "Box"), "Box 2");
        assert!(selection.rename_sub_region_box("Box 1", "Other"));
        assert_eq!(selection.create_new_sub_region_box(pos, "Box"), "Box 1");
        assert_eq!(selection.sub_region_box_count(), 4);
    }

    #[test]
    fn create_new_box_becomes_active_with_first_corner_selected() {
        let mut selection = two_box_selection();
        selection.set_explicit_origin(Some(BlockPos::ORIGIN));
        assert!(selection.set_origin_selected(true));
        assert!(selection.set_selected_sub_region_box(Some("a")));
        selection
            .sub_region_boxes
            .get_mut("a")
            .expect("a")
            .set_selected_corner(Corner::Corner2);

        let name = selection.create_new_sub_region_box(BlockPos::new(9, 9, 9), "new");

        assert_eq!(selection.current_sub_region_box_name(), Some(name.as_str()));
        assert!(!selection.is_origin_selected());
        assert_eq!(selection.sub_region_box("a").expect("a").selected_corner(), Corner::None);
        let created = selection.selected_sub_region_box().expect("created");
        assert_eq!(created.selected_corner(), Corner::Corner1);
        assert_eq!(created.pos1(), Some(BlockPos::new(9, 9, 9)));
        assert_eq!(created.pos2(), None);
    }

    #[test]
    fn add_box_respects_replace_flag() {
        let mut selection = two_box_selection();
        let replacement =
            SubRegionBox::with_corners("a", BlockPos::new(10, 10, 10), BlockPos::new(11, 11, 11));

        assert!(!selection.add_sub_region_box(replacement.clone(), false));
        assert_eq!(
            selection.sub_region_box("a").expect("a").pos1(),
            Some(BlockPos::new(0, 0, 0))
        );
        assert!(selection.add_sub_region_box(replacement, true));
        assert_eq!(
            selection.sub_region_box("a").expect("a").pos1(),
            Some(BlockPos::new(10, 10, 10))
        );
    }

    #[test]
    fn removing_boxes_clears_matching_current_box() {
        let mut selection = two_box_selection();
        assert!(selection.set_selected_sub_region_box(Some("a")));
        assert!(selection.remove_sub_region_box("b"));
        assert_eq!(selection.current_sub_region_box_name(), Some("a"));
        assert!(selection.remove_sub_region_box("a"));
        assert_eq!(selection.current_sub_region_box_name(), None);
        assert!(!selection.remove_sub_region_box("a"));
    }

    #[test]
    fn remove_selected_box_requires_active_box() {
        let mut selection = two_box_selection();
        assert!(!selection.remove_selected_sub_region_box());

        assert!(selection.set_selected_sub_region_box(Some("b")));
        assert!(selection.remove_selected_sub_region_box());
        assert_eq!(selection.current_sub_region_box_name(), None);
        assert!(selection.sub_region_box("b").is_none());
        assert_eq!(selection.sub_region_box_count(), 1);
    }

    #[test]
    fn rename_fails_without_mutation_on_collision_or_missing_source() {
        let mut selection = two_box_selection();
        assert!(selection.set_selected_sub_region_box(Some("a")));

        assert!(!selection.rename_sub_region_box("a", "b"));
        assert!(!selection.rename_sub_region_box("missing", "c"));

        let names = selection.sub_region_box_names().collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(selection.current_sub_region_box_name(), Some("a"));
    }

    #[test]
    fn rename_moves_entry_and_follows_current_box() {
        let mut selection = two_box_selection();
        assert!(selection.set_selected_sub_region_box(Some("a")));

        assert!(selection.rename_sub_region_box("a", "renamed"));

        assert!(selection.sub_region_box("a").is_none());
        let renamed = selection.sub_region_box("renamed").expect("renamed");
        assert_eq!(renamed.name(), "renamed");
        assert_eq!(renamed.pos2(), Some(BlockPos::new(2, 2, 2)));
        assert_eq!(selection.current_sub_region_box_name(), Some("renamed"));
    }

    #[test]
    fn selecting_unknown_box_keeps_previous_selection() {
        let mut selection = two_box_selection();
        assert!(selection.set_selected_sub_region_box(Some("b")));
        assert!(!selection.set_selected_sub_region_box(Some("nope")));
        assert_eq!(selection.current_sub_region_box_name(), Some("b"));
        assert!(selection.set_selected_sub_region_box(None));
        assert_eq!(selection.current_sub_region_box_name(), None);
    }

    #[test]
    fn clearing_explicit_origin_deselects_origin() {
        let mut selection = RegionSelection::new();
        assert!(!selection.set_origin_selected(true));

        selection.set_explicit_origin(Some(BlockPos::new(1, 1, 1)));
        assert!(selection.set_origin_selected(true));
        selection.set_explicit_origin(None);
        assert!(!selection.is_origin_selected());
    }

    #[test]
    fn corner_pos_edits_ignore_none_corner() {
        let mut selection = two_box_selection();
        assert!(!selection.set_sub_region_corner_pos("a", Corner::None, BlockPos::new(9, 9, 9)));
        assert!(!selection.set_sub_region_corner_pos("missing", Corner::Corner1, BlockPos::ORIGIN));
        assert_eq!(
            selection.sub_region_corner_pos("a", Corner::Corner1),
            Some(BlockPos::new(0, 0, 0))
        );
    }

    #[test]
    fn set_selected_corner_pos_targets_active_box() {
        let mut selection = two_box_selection();
        assert!(!selection.set_selected_sub_region_corner_pos(BlockPos::ORIGIN, Corner::Corner2));

        assert!(selection.set_selected_sub_region_box(Some("b")));
        assert!(
            selection.set_selected_sub_region_corner_pos(BlockPos::new(8, 8, 8), Corner::Corner2)
        );
        assert_eq!(
            selection.sub_region_corner_pos("b", Corner::Corner2),
            Some(BlockPos::new(8, 8, 8))
        );
    }

    #[test]
    fn set_coordinate_without_corner_edits_explicit_origin() {
        let mut selection = two_box_selection();
        assert!(!selection.set_coordinate(None, Corner::None, Axis::X, 5));
        assert_eq!(selection.explicit_origin(), None);

        selection.set_explicit_origin(Some(BlockPos::new(1, 2, 3)));
        assert!(selection.set_coordinate(Some("a"), Corner::None, Axis::Z, 30));
        assert_eq!(selection.explicit_origin(), Some(BlockPos::new(1, 2, 30)));
        assert_eq!(
            selection.sub_region_corner_pos("a", Corner::Corner1),
            Some(BlockPos::new(0, 0, 0))
        );
    }

    #[test]
    fn set_coordinate_on_absent_corner_is_noop() {
        let mut selection = RegionSelection::new();
        let name = selection.create_new_sub_region_box(BlockPos::new(1, 1, 1), "box");
        assert!(!selection.set_coordinate(Some(&name), Corner::Corner2, Axis::X, 4));
        assert_eq!(selection.sub_region_corner_pos(&name, Corner::Corner2), None);
        assert!(!selection.set_coordinate(Some("missing"), Corner::Corner1, Axis::X, 4));
    }

    #[test]
    fn move_selected_element_with_first_corner_moves_only_pos1() {
        let mut selection = two_box_selection();
        assert!(selection.set_selected_sub_region_box(Some("a")));
        selection
            .sub_region_boxes
            .get_mut("a")
            .expect("a")
            .set_selected_corner(Corner::Corner1);

        selection.move_selected_element(Direction::East, 3);

        let moved = selection.sub_region_box("a").expect("a");
        assert_eq!(moved.pos1(), Some(BlockPos::new(3, 0, 0)));
        assert_eq!(moved.pos2(), Some(BlockPos::new(2, 2, 2)));
    }

    #[test]
    fn move_selected_element_without_corner_moves_whole_box() {
        let mut selection = two_box_selection();
        assert!(selection.set_selected_sub_region_box(Some("b")));

        selection.move_selected_element(Direction::Down, 2);

        let moved = selection.sub_region_box("b").expect("b");
        assert_eq!(moved.pos1(), Some(BlockPos::new(5, -1, 1)));
        assert_eq!(moved.pos2(), Some(BlockPos::new(7, 1, 3)));
        assert_eq!(selection.effective_origin(), BlockPos::new(0, -1, 0));
    }

    #[test]
    fn move_selected_element_moves_origin_when_selected() {
        let mut selection = two_box_selection();
        assert!(selection.set_selected_sub_region_box(Some("a")));
        selection.set_explicit_origin(Some(BlockPos::new(1, 1, 1)));
        assert!(selection.set_origin_selected(true));

        selection.move_selected_element(Direction::North, 4);

        assert_eq!(selection.explicit_origin(), Some(BlockPos::new(1, 1, -3)));
        assert_eq!(
            selection.sub_region_corner_pos("a", Corner::Corner1),
            Some(BlockPos::new(0, 0, 0))
        );
    }

    #[test]
    fn move_entire_selection_shifts_boxes_by_origin_delta() {
        let mut selection = two_box_selection();
        let mut events: Vec<SelectionMoved> = Vec::new();

        selection.move_entire_selection_to(BlockPos::new(10, 20, 30), Some(&mut events));

        let a = selection.sub_region_box("a").expect("a");
        assert_eq!(a.pos1(), Some(BlockPos::new(10, 20, 30)));
        assert_eq!(a.pos2(), Some(BlockPos::new(12, 22, 32)));
        let b = selection.sub_region_box("b").expect("b");
        assert_eq!(b.pos1(), Some(BlockPos::new(15, 21, 31)));
        assert_eq!(b.pos2(), Some(BlockPos::new(17, 23, 33)));
        assert_eq!(selection.explicit_origin(), None);
        assert_eq!(selection.effective_origin(), BlockPos::new(10, 20, 30));
        assert_eq!(
            events,
            vec![SelectionMoved {
                old_origin: BlockPos::new(0, 0, 0),
                new_origin: BlockPos::new(10, 20, 30),
            }]
        );
    }

    #[test]
    fn move_entire_selection_replaces_explicit_origin() {
        let mut selection = two_box_selection();
        selection.set_explicit_origin(Some(BlockPos::new(-1, -1, -1)));

        selection.move_entire_selection_to(BlockPos::new(4, 4, 4), None);

        assert_eq!(selection.explicit_origin(), Some(BlockPos::new(4, 4, 4)));
        assert_eq!(
            selection.sub_region_corner_pos("a", Corner::Corner1),
            Some(BlockPos::new(5, 5, 5))
        );
    }

    #[test]
    fn moves_at_coordinate_limits_wrap_instead_of_panicking() {
        let mut selection = RegionSelection::new();
        selection.add_sub_region_box(
            SubRegionBox::with_corners("edge", BlockPos::new(-10, 0, 0), BlockPos::new(-5, 1, 1)),
            false,
        );

        selection.move_entire_selection_to(BlockPos::new(i32::MAX, 0, 0), None);
        assert_eq!(
            selection.sub_region_corner_pos("edge", Corner::Corner1),
            Some(BlockPos::new(i32::MAX, 0, 0))
        );
        assert_eq!(
            selection.sub_region_corner_pos("edge", Corner::Corner2),
            Some(BlockPos::new(i32::MIN + 4, 1, 1))
        );

        selection.set_explicit_origin(Some(BlockPos::new(i32::MAX, 0, 0)));
        assert!(selection.set_origin_selected(true));
        selection.move_selected_element(Direction::East, 1);
        assert_eq!(selection.explicit_origin(), Some(BlockPos::new(i32::MIN, 0, 0)));
    }

    #[test]
    fn move_entire_selection_keeps_absent_corners_absent() {
        let mut selection = RegionSelection::new();
        let name = selection.create_new_sub_region_box(BlockPos::new(2, 2, 2), "half");

        selection.move_entire_selection_to(BlockPos::new(1, 0, 0), None);

        assert_eq!(
            selection.sub_region_corner_pos(&name, Corner::Corner1),
            Some(BlockPos::new(3, 2, 2))
        );
        assert_eq!(selection.sub_region_corner_pos(&name, Corner::Corner2), None);
    }

    #[test]
    fn from_placement_copies_boxes_name_and_origin() {
        let placement = FixedPlacement {
            boxes: vec![
                SubRegionBox::with_corners(
                    "tower",
                    BlockPos::new(100, 64, -20),
                    BlockPos::new(104, 80, -16),
                ),
                SubRegionBox::with_corners(
                    "wall",
                    BlockPos::new(90, 64, -30),
                    BlockPos::new(110, 70, -29),
                ),
            ],
        };

        let selection = RegionSelection::from_placement(&placement);

        assert_eq!(selection.name(), "castle");
        assert_eq!(selection.explicit_origin(), Some(BlockPos::new(100, 64, -20)));
        assert_eq!(selection.sub_region_box_count(), 2);
        assert_eq!(
            selection.enclosing_area_corners().map(|(min, _)| min),
            Some(BlockPos::new(90, 64, -30))
        );
    }
}
