//! Drag-panning state machine for the map image.

use crate::state::coords::PAN_SCALE;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    Idle,
    Dragging { start: (f64, f64) },
}

/// Tracks one pointer drag at a time. `ref_pos` is the committed pan
/// offset in pixels and persists across gestures; the live offset during a
/// drag is `ref_pos + (cursor - start) * PAN_SCALE`.
///
/// Move/release without a prior press are no-ops, which keeps the gesture
/// robust against events arriving after a leave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanController {
    ref_pos: (f64, f64),
    gesture: Gesture,
}

impl Default for PanController {
    fn default() -> Self {
        Self {
            ref_pos: (0.0, 0.0),
            gesture: Gesture::Idle,
        }
    }
}

impl PanController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed pan offset.
    pub fn offset(&self) -> (f64, f64) {
        self.ref_pos
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// Enter the dragging state, recording the reference cursor position.
    pub fn press_start(&mut self, cursor: (f64, f64)) {
        self.gesture = Gesture::Dragging { start: cursor };
    }

    /// Live offset for the current drag; None while idle. Does not commit.
    pub fn drag_to(&mut self, cursor: (f64, f64)) -> Option<(f64, f64)> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::Dragging { start } => Some(Self::offset_from(self.ref_pos, start, cursor)),
        }
    }

    /// Commit the drag at `cursor` and return to idle. Used for both
    /// release and pointer-leave; leaving at high velocity can therefore
    /// commit the last cursor seen inside the area rather than the exit
    /// point (inherited behavior).
    pub fn release(&mut self, cursor: (f64, f64)) -> Option<(f64, f64)> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::Dragging { start } => {
                self.ref_pos = Self::offset_from(self.ref_pos, start, cursor);
                self.gesture = Gesture::Idle;
                Some(self.ref_pos)
            }
        }
    }

    /// Force the committed offset, legal in any state. Used on map loads.
    pub fn reset(&mut self, x: f64, y: f64) -> (f64, f64) {
        self.ref_pos = (x, y);
        self.gesture = Gesture::Idle;
        self.ref_pos
    }

    fn offset_from(ref_pos: (f64, f64), start: (f64, f64), cursor: (f64, f64)) -> (f64, f64) {
        (
            ref_pos.0 + (cursor.0 - start.0) * PAN_SCALE,
            ref_pos.1 + (cursor.1 - start.1) * PAN_SCALE,
        )
    }
}
