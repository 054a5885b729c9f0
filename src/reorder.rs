//! Drag-and-drop reordering of sections.
//!
//! The interaction is an explicit state machine:
//!
//! ```text
//!            grab(id)                    release()
//!   Idle ───────────────▶ Dragging ─────────────────▶ Idle
//!    ▲                   { active,       │  emits ReorderRequest when the
//!    │                     over }        │  drop target differs from active
//!    └───────────────────────────────────┘
//!                 cancel()
//! ```
//!
//! While dragging, the drop target (`over`) follows the pointer through
//! [`DragController::hover`], which picks the target whose vertical center is
//! closest to the pointer, or moves one slot at a time through
//! [`DragController::nudge`] for keyboard drags. The view asks
//! [`DragController::projected_order`] for the reflowed list and
//! [`DragController::is_dimmed`] for the grabbed item.
//!
//! A release with no target, a release onto the grabbed item itself, and a
//! cancel all end in `Idle` with no request: the order is left alone.

use crate::model::Id;
use crate::ops::array_move;

/// Where the interaction is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// The grabbed section.
        active: Id,
        /// The projected drop target, once one is known.
        over: Option<Id>,
    },
}

/// The on-screen extent of one droppable section.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    pub id: Id,
    pub top: f64,
    pub height: f64,
}

impl DropTarget {
    pub fn new(id: impl Into<Id>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// A completed drag: move `from` to the position of `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderRequest {
    pub from: Id,
    pub to: Id,
}

/// The target whose center is closest to `pointer_y`. Ties go to the earlier target.
///
/// A non-finite pointer (`NaN`, infinities) is over nothing.
pub fn closest_center(pointer_y: f64, targets: &[DropTarget]) -> Option<&DropTarget> {
    if !pointer_y.is_finite() {
        return None;
    }
    targets.iter().fold(None, |best: Option<&DropTarget>, target| match best {
        Some(b) if (b.center() - pointer_y).abs() <= (target.center() - pointer_y).abs() => Some(b),
        _ => Some(target),
    })
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The grabbed section, while dragging.
    pub fn active(&self) -> Option<&Id> {
        match &self.state {
            DragState::Dragging { active, .. } => Some(active),
            DragState::Idle => None,
        }
    }

    /// The projected drop target, while dragging.
    pub fn over(&self) -> Option<&Id> {
        match &self.state {
            DragState::Dragging { over, .. } => over.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Start dragging `id`. Ignored (returns `false`) if a drag is already in progress.
    pub fn grab(&mut self, id: Id) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.state = DragState::Dragging {
            over: Some(id.clone()),
            active: id,
        };
        true
    }

    /// Set the drop target directly. `None` means the pointer is off every target.
    pub fn set_over(&mut self, target: Option<Id>) {
        if let DragState::Dragging { over, .. } = &mut self.state {
            *over = target;
        }
    }

    /// Track the pointer: the target closest to `pointer_y` becomes the drop target.
    pub fn hover(&mut self, pointer_y: f64, targets: &[DropTarget]) -> Option<&Id> {
        let target = closest_center(pointer_y, targets).map(|t| t.id.clone());
        self.set_over(target);
        self.over()
    }

    /// Keyboard drag: move the drop target `delta` slots through `order`, clamped to the ends.
    pub fn nudge(&mut self, delta: isize, order: &[Id]) {
        let DragState::Dragging { active, over } = &mut self.state else {
            return;
        };
        let current = over.as_ref().unwrap_or(&*active);
        let Some(index) = order.iter().position(|id| id == current) else {
            return;
        };
        let last = order.len().saturating_sub(1);
        let next = index.saturating_add_signed(delta).min(last);
        *over = order.get(next).cloned();
    }

    /// Drop on the current target and return to `Idle`.
    pub fn release(&mut self) -> Option<ReorderRequest> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging {
                active,
                over: Some(over),
            } if active != over => Some(ReorderRequest {
                from: active,
                to: over,
            }),
            _ => None,
        }
    }

    /// Abandon the drag without a request.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// `order` as it would look if the drag were released now.
    pub fn projected_order(&self, order: &[Id]) -> Vec<Id> {
        let mut projected = order.to_vec();
        if let (Some(active), Some(over)) = (self.active(), self.over()) {
            let from = order.iter().position(|id| id == active);
            let to = order.iter().position(|id| id == over);
            if let (Some(from), Some(to)) = (from, to) {
                array_move(&mut projected, from, to);
            }
        }
        projected
    }

    /// Whether `id` is the grabbed item (drawn at reduced opacity).
    pub fn is_dimmed(&self, id: &Id) -> bool {
        self.active() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(ids: &[&str]) -> Vec<Id> {
        ids.iter().map(|id| Id::new(*id)).collect()
    }

    fn stacked_targets(ids: &[&str]) -> Vec<DropTarget> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| DropTarget::new(*id, i as f64 * 50.0, 40.0))
            .collect()
    }

    #[test]
    fn starts_idle() {
        let drag = DragController::new();
        assert_eq!(drag.state(), &DragState::Idle);
        assert_eq!(drag.active(), None);
    }

    #[test]
    fn grab_then_release_elsewhere_requests_move() {
        let mut drag = DragController::new();
        assert!(drag.grab(Id::new("a")));
        drag.set_over(Some(Id::new("c")));

        assert_eq!(
            drag.release(),
            Some(ReorderRequest {
                from: Id::new("a"),
                to: Id::new("c"),
            })
        );
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn release_on_self_requests_nothing() {
        let mut drag = DragController::new();
        drag.grab(Id::new("a"));
        assert_eq!(drag.release(), None);
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn release_off_target_requests_nothing() {
        let mut drag = DragController::new();
        drag.grab(Id::new("a"));
        drag.set_over(None);
        assert_eq!(drag.release(), None);
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut drag = DragController::new();
        drag.grab(Id::new("a"));
        drag.set_over(Some(Id::new("b")));
        drag.cancel();
        assert_eq!(drag.state(), &DragState::Idle);
        assert_eq!(drag.release(), None);
    }

    #[test]
    fn second_grab_is_ignored() {
        let mut drag = DragController::new();
        drag.grab(Id::new("a"));
        assert!(!drag.grab(Id::new("b")));
        assert_eq!(drag.active(), Some(&Id::new("a")));
    }

    #[test]
    fn closest_center_picks_nearest() {
        let targets = stacked_targets(&["a", "b", "c"]);
        // Centers at 20, 70, 120.
        assert_eq!(closest_center(0.0, &targets).unwrap().id, Id::new("a"));
        assert_eq!(closest_center(80.0, &targets).unwrap().id, Id::new("b"));
        assert_eq!(closest_center(500.0, &targets).unwrap().id, Id::new("c"));
        assert!(closest_center(10.0, &[]).is_none());
    }

    #[test]
    fn closest_center_tie_goes_to_first() {
        let targets = stacked_targets(&["a", "b"]);
        assert_eq!(closest_center(45.0, &targets).unwrap().id, Id::new("a"));
    }

    #[test]
    fn closest_center_ignores_non_finite_pointer() {
        let targets = stacked_targets(&["a", "b", "c"]);
        assert!(closest_center(f64::NAN, &targets).is_none());
        assert!(closest_center(f64::INFINITY, &targets).is_none());
        assert!(closest_center(f64::NEG_INFINITY, &targets).is_none());
    }

    #[test]
    fn hover_with_non_finite_pointer_clears_target() {
        let mut drag = DragController::new();
        let targets = stacked_targets(&["a", "b", "c"]);
        drag.grab(Id::new("a"));
        assert_eq!(drag.hover(118.0, &targets), Some(&Id::new("c")));
        assert_eq!(drag.hover(f64::NAN, &targets), None);
        assert_eq!(
            drag.state(),
            &DragState::Dragging {
                active: Id::new("a"),
                over: None
            }
        );
    }

    #[test]
    fn hover_tracks_pointer() {
        let mut drag = DragController::new();
        let targets = stacked_targets(&["a", "b", "c"]);
        drag.grab(Id::new("a"));
        assert_eq!(drag.hover(118.0, &targets), Some(&Id::new("c")));
        assert_eq!(drag.hover(65.0, &targets), Some(&Id::new("b")));
    }

    #[test]
    fn hover_while_idle_does_nothing() {
        let mut drag = DragController::new();
        let targets = stacked_targets(&["a"]);
        assert_eq!(drag.hover(0.0, &targets), None);
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn projected_order_reflows_around_target() {
        let ids = order(&["a", "b", "c", "d"]);
        let mut drag = DragController::new();
        assert_eq!(drag.projected_order(&ids), ids);

        drag.grab(Id::new("b"));
        drag.set_over(Some(Id::new("d")));
        assert_eq!(drag.projected_order(&ids), order(&["a", "c", "d", "b"]));
        assert!(drag.is_dimmed(&Id::new("b")));
        assert!(!drag.is_dimmed(&Id::new("a")));
    }

    #[test]
    fn nudge_moves_and_clamps() {
        let ids = order(&["a", "b", "c"]);
        let mut drag = DragController::new();
        drag.grab(Id::new("b"));

        drag.nudge(1, &ids);
        assert_eq!(drag.over(), Some(&Id::new("c")));
        drag.nudge(1, &ids);
        assert_eq!(drag.over(), Some(&Id::new("c")));
        drag.nudge(-5, &ids);
        assert_eq!(drag.over(), Some(&Id::new("a")));
    }
}
