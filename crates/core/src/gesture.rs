//! Swipe gesture tracking and classification for a voting card.
//!
//! A press starts a drag, moves update the offset from the press origin and a
//! release (or the pointer leaving the card) classifies the drag. Only the
//! horizontal offset matters for the decision; the vertical offset is kept so
//! the card follows the pointer.

use crate::ballot::Decision;

/// Horizontal displacement a release must exceed to count as a vote.
pub const SWIPE_THRESHOLD: f32 = 100.0;
/// Movement up to this distance still counts as a tap.
pub const TAP_SLOP: f32 = 5.0;
/// Displacement at which the like/dislike indicator lights up.
pub const HINT_THRESHOLD: f32 = 50.0;
/// Card rotation per pixel of horizontal offset, in degrees.
pub const ROTATION_PER_PX: f32 = 0.1;
/// Horizontal offset over which the card fades towards `MIN_OPACITY`.
pub const FADE_DISTANCE: f32 = 300.0;
/// The card never fades below this opacity.
pub const MIN_OPACITY: f32 = 0.7;

/// A pointer or touch position in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default,)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, };

    #[must_use]
    pub const fn new(x: f32, y: f32,) -> Self {
        Self { x, y, }
    }

    #[must_use]
    pub fn length(self,) -> f32 {
        self.x.hypot(self.y,)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self,) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y,)
    }
}

#[derive(Debug, Clone, Copy, PartialEq,)]
pub enum GesturePhase {
    Idle,
    Dragging { origin: Point, offset: Point, },
}

/// Classification of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum Release {
    /// Crossed the threshold.
    Vote(Decision,),
    /// Press and release without material movement.
    Tap,
    /// Snapped back, nothing recorded.
    Cancelled,
}

/// Presentation of the card for the current offset.
#[derive(Debug, Clone, Copy, PartialEq,)]
pub struct CardPose {
    pub offset:       Point,
    pub rotation_deg: f32,
    pub opacity:      f32,
}

impl CardPose {
    pub const NEUTRAL: Self = Self {
        offset:       Point::ZERO,
        rotation_deg: 0.0,
        opacity:      1.0,
    };

    #[must_use]
    pub fn from_offset(offset: Point,) -> Self {
        Self {
            offset,
            rotation_deg: offset.x * ROTATION_PER_PX,
            opacity: (1.0 - offset.x.abs() / FADE_DISTANCE).max(MIN_OPACITY,),
        }
    }
}

/// Which swipe indicators are lit while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default,)]
pub struct SwipeHint {
    pub approve: bool,
    pub reject:  bool,
}

/// The drag state of one card. One interaction at a time.
#[derive(Debug, Clone, Copy, PartialEq,)]
pub struct Gesture {
    phase: GesturePhase,
}

impl Default for Gesture {
    fn default() -> Self {
        Self {
            phase: GesturePhase::Idle,
        }
    }
}

impl Gesture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self,) -> GesturePhase {
        self.phase
    }

    #[must_use]
    pub const fn is_dragging(&self,) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    /// Current offset, zero while idle.
    #[must_use]
    pub const fn offset(&self,) -> Point {
        match self.phase {
            | GesturePhase::Dragging { offset, .. } => offset,
            | GesturePhase::Idle => Point::ZERO,
        }
    }

    /// Starts a drag at `at`. A press during a drag restarts it.
    pub fn press(&mut self, at: Point,) {
        self.phase = GesturePhase::Dragging {
            origin: at,
            offset: Point::ZERO,
        };
    }

    /// Updates the offset. Ignored while idle.
    pub fn move_to(&mut self, at: Point,) {
        if let GesturePhase::Dragging { origin, offset, } = &mut self.phase {
            *offset = at - *origin;
        }
    }

    /// Ends the drag and classifies it. Returns `None` when no drag was in
    /// progress.
    pub fn release(&mut self,) -> Option<Release,> {
        let offset = self.finish()?;

        if let Some(decision,) = classify(offset,) {
            Some(Release::Vote(decision,),)
        } else if offset.length() <= TAP_SLOP {
            Some(Release::Tap,)
        } else {
            Some(Release::Cancelled,)
        }
    }

    /// The pointer left the card. Classified like a release but never a tap.
    pub fn leave(&mut self,) -> Option<Release,> {
        let offset = self.finish()?;
        Some(classify(offset,).map_or(Release::Cancelled, Release::Vote,),)
    }

    /// Drops any drag in progress.
    pub fn reset(&mut self,) {
        self.phase = GesturePhase::Idle;
    }

    #[must_use]
    pub fn pose(&self,) -> CardPose {
        CardPose::from_offset(self.offset(),)
    }

    #[must_use]
    pub fn hint(&self,) -> SwipeHint {
        if !self.is_dragging() {
            return SwipeHint::default();
        }
        let dx = self.offset().x;
        SwipeHint {
            approve: dx > HINT_THRESHOLD,
            reject:  dx < -HINT_THRESHOLD,
        }
    }

    fn finish(&mut self,) -> Option<Point,> {
        let offset = match self.phase {
            | GesturePhase::Dragging { offset, .. } => offset,
            | GesturePhase::Idle => return None,
        };
        self.phase = GesturePhase::Idle;
        Some(offset,)
    }
}

/// Decision for a horizontal offset, if it crosses the threshold.
#[must_use]
pub fn classify(offset: Point,) -> Option<Decision,> {
    if offset.x.abs() <= SWIPE_THRESHOLD {
        None
    } else if offset.x > 0.0 {
        Some(Decision::Approve,)
    } else {
        Some(Decision::Reject,)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(gesture: &mut Gesture, dx: f32, dy: f32,) {
        gesture.press(Point::new(200.0, 300.0,),);
        gesture.move_to(Point::new(200.0 + dx, 300.0 + dy,),);
    }

    #[test]
    fn press_then_move_tracks_offset() {
        let mut g = Gesture::new();
        g.press(Point::new(10.0, 10.0,),);
        assert_eq!(g.offset(), Point::ZERO);

        g.move_to(Point::new(40.0, -5.0,),);
        assert_eq!(g.offset(), Point::new(30.0, -15.0));
        assert!(g.is_dragging());
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut g = Gesture::new();
        g.move_to(Point::new(500.0, 0.0,),);
        assert_eq!(g.phase(), GesturePhase::Idle);
        assert_eq!(g.release(), None);
    }

    #[test]
    fn release_past_threshold_votes_by_sign() {
        let mut g = Gesture::new();
        drag(&mut g, 101.0, 40.0,);
        assert_eq!(g.release(), Some(Release::Vote(Decision::Approve)));

        drag(&mut g, -150.0, 0.0,);
        assert_eq!(g.release(), Some(Release::Vote(Decision::Reject)));
    }

    #[test]
    fn release_at_threshold_snaps_back() {
        let mut g = Gesture::new();
        drag(&mut g, 100.0, 0.0,);
        assert_eq!(g.release(), Some(Release::Cancelled));
        assert_eq!(g.phase(), GesturePhase::Idle);
        assert_eq!(g.offset(), Point::ZERO);
        assert_eq!(g.pose(), CardPose::NEUTRAL);
    }

    #[test]
    fn vertical_drag_never_votes() {
        let mut g = Gesture::new();
        drag(&mut g, 20.0, 400.0,);
        assert_eq!(g.release(), Some(Release::Cancelled));
    }

    #[test]
    fn small_movement_is_a_tap() {
        let mut g = Gesture::new();
        drag(&mut g, 3.0, -3.0,);
        assert_eq!(g.release(), Some(Release::Tap));
    }

    #[test]
    fn leave_classifies_but_never_taps() {
        let mut g = Gesture::new();
        drag(&mut g, 0.0, 0.0,);
        assert_eq!(g.leave(), Some(Release::Cancelled));

        drag(&mut g, -120.0, 0.0,);
        assert_eq!(g.leave(), Some(Release::Vote(Decision::Reject)));
        assert_eq!(g.leave(), None);
    }

    #[test]
    fn press_restarts_drag() {
        let mut g = Gesture::new();
        drag(&mut g, 90.0, 0.0,);
        g.press(Point::new(0.0, 0.0,),);
        assert_eq!(g.offset(), Point::ZERO);
    }

    #[test]
    fn pose_rotates_and_fades_with_floor() {
        let pose = CardPose::from_offset(Point::new(150.0, 0.0,),);
        assert!((pose.rotation_deg - 15.0).abs() < 1e-4);
        assert!((pose.opacity - 0.7).abs() < 1e-4);

        let pose = CardPose::from_offset(Point::new(-30.0, 0.0,),);
        assert!((pose.rotation_deg + 3.0).abs() < 1e-4);
        assert!((pose.opacity - 0.9).abs() < 1e-4);

        let pose = CardPose::from_offset(Point::new(-900.0, 0.0,),);
        assert_eq!(pose.opacity, MIN_OPACITY);
    }

    #[test]
    fn hint_lights_past_half_threshold() {
        let mut g = Gesture::new();
        assert_eq!(g.hint(), SwipeHint::default());

        drag(&mut g, 51.0, 0.0,);
        assert_eq!(g.hint(), SwipeHint { approve: true, reject: false });

        g.move_to(Point::new(140.0, 300.0,),);
        assert_eq!(g.hint(), SwipeHint { approve: false, reject: true });
    }
}
