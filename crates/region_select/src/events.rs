use crate::coords::{format_coordinates, BlockPos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionMoved {
    pub old_origin: BlockPos,
    pub new_origin: BlockPos,
}

impl SelectionMoved {
    pub fn message(&self) -> String {
        format!(
            "Moved selection from {} to {}",
            format_coordinates(self.old_origin),
            format_coordinates(self.new_origin)
        )
    }
}

/// Receives human-readable announcements about selection edits.
pub trait SelectionEventSink {
    fn selection_moved(&mut self, event: &SelectionMoved);
}

impl SelectionEventSink for Vec<SelectionMoved> {
    fn selection_moved(&mut self, event: &SelectionMoved) {
        self.push(*event);
    }
}
