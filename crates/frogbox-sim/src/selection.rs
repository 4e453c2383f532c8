//! Drag gesture tracking.
//!
//! Holds the screen-space start and current points of an in-progress drag
//! and converts them into a world-space rectangle on demand.

use frogbox_core::types::{ScreenPoint, WorldRect};

use crate::camera::Projection;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionGesture {
    pub start: ScreenPoint,
    pub current: ScreenPoint,
}

#[derive(Debug, Default)]
pub struct SelectionTracker {
    gesture: Option<SelectionGesture>,
}

impl SelectionGesture {
    pub fn world_rect(&self, projection: &dyn Projection) -> WorldRect {
        WorldRect::from_corners(
            projection.screen_to_world(self.start),
            projection.screen_to_world(self.current),
        )
    }
}

impl SelectionTracker {
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start a new drag, replacing any unfinished one.
    pub fn begin(&mut self, point: ScreenPoint) {
        self.gesture = Some(SelectionGesture {
            start: point,
            current: point,
        });
    }

    /// Move the drag. Returns false when no drag is in progress.
    pub fn update(&mut self, point: ScreenPoint) -> bool {
        match self.gesture.as_mut() {
            Some(gesture) => {
                gesture.current = point;
                true
            }
            None => false,
        }
    }

    /// Release the drag at `point`, handing back the finished gesture.
    pub fn finish(&mut self, point: ScreenPoint) -> Option<SelectionGesture> {
        let mut gesture = self.gesture.take()?;
        gesture.current = point;
        Some(gesture)
    }

    pub fn cancel(&mut self) {
        self.gesture = None;
    }

    pub fn world_rect(&self, projection: &dyn Projection) -> Option<WorldRect> {
        self.gesture.map(|g| g.world_rect(projection))
    }
}
