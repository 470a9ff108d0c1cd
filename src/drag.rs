use interval::{Handle, TimeInterval};
use interval_set::IntervalSet;
use util::MINUTES_PER_DAY;

/// Horizontal placement of the slider track, in the pointer's coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerGeometry {
    pub left: f64,
    pub width: f64,
}

impl ContainerGeometry {
    pub fn new(left: f64, width: f64) -> Self {
        ContainerGeometry { left, width }
    }

    /// Maps a pointer x position onto the day, clamped to the track. `None`
    /// when the track has no usable width.
    pub fn minutes_at(&self, x: f64) -> Option<u16> {
        if !(self.width > 0.0) || !self.width.is_finite() || !x.is_finite() {
            return None;
        }

        let percentage = ((x - self.left) / self.width).max(0.0).min(1.0);
        Some((percentage * f64::from(MINUTES_PER_DAY)).round() as u16)
    }
}

impl Default for ContainerGeometry {
    fn default() -> Self {
        ContainerGeometry::new(0.0, f64::from(MINUTES_PER_DAY))
    }
}

/// An in-progress drag of one handle of one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub target_index: usize,
    pub handle: Handle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing is being dragged, or the position could not be mapped.
    Ignored,
    /// The handle moved; the set is not merged yet.
    Draft { index: usize, interval: TimeInterval },
    /// The move would cross the sibling handle. The drag is already over.
    Rejected(DragSession),
}

/// Tracks at most one drag and turns pointer moves into bound updates.
///
/// Moves are only routed while a session exists; every way out of a drag
/// goes through taking the session, so there is nothing left to release.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        DragController { session: None }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Starts dragging `handle` of the interval at `index`. Presses that did
    /// not land on a handle, or that arrive mid-drag, are ignored.
    pub fn press(&mut self, index: usize, handle: Handle, on_handle: bool) -> bool {
        if !on_handle {
            trace!("Press outside of a drag handle, ignoring");
            return false;
        }
        if let Some(active) = self.session {
            debug!(
                "Already dragging {} of #{}, ignoring press on {} of #{}",
                active.handle, active.target_index, handle, index
            );
            return false;
        }

        debug!("Start dragging {} of #{}", handle, index);
        self.session = Some(DragSession {
            target_index: index,
            handle,
        });
        true
    }

    pub fn pointer_move(
        &mut self,
        set: &mut IntervalSet,
        geometry: &ContainerGeometry,
        x: f64,
    ) -> MoveOutcome {
        let session = match self.session {
            Some(session) => session,
            None => return MoveOutcome::Ignored,
        };

        let candidate = match geometry.minutes_at(x) {
            Some(candidate) => candidate,
            None => {
                warn!("Cannot map x = {} onto {:?}", x, geometry);
                return MoveOutcome::Ignored;
            }
        };
        trace!("Pointer at {} maps to minute {}", x, candidate);

        let index = session.target_index;
        let committed = set
            .accepts(index, session.handle, candidate)
            .and_then(|accepted| {
                if accepted {
                    set.set_bound(index, session.handle, candidate).map(Some)
                } else {
                    Ok(None)
                }
            });

        match committed {
            Ok(Some(interval)) => MoveOutcome::Draft { index, interval },
            Ok(None) => {
                debug!(
                    "Minute {} would cross the other handle of #{}, ending drag",
                    candidate, index
                );
                self.session = None;
                MoveOutcome::Rejected(session)
            }
            Err(e) => {
                warn!("Dragged interval went away: {}", e);
                self.session = None;
                MoveOutcome::Rejected(session)
            }
        }
    }

    /// Ends the drag, if any.
    pub fn release(&mut self) -> Option<DragSession> {
        let session = self.session.take();
        if let Some(ref session) = session {
            debug!("Stop dragging {} of #{}", session.handle, session.target_index);
        }
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_with(from: u16, until: u16) -> IntervalSet {
        IntervalSet::new(vec![TimeInterval::new(from, until).unwrap()])
    }

    #[test]
    fn maps_pointer_position_onto_the_day() {
        let geometry = ContainerGeometry::new(100.0, 720.0);
        assert_eq!(geometry.minutes_at(100.0), Some(0));
        assert_eq!(geometry.minutes_at(460.0), Some(720));
        assert_eq!(geometry.minutes_at(820.0), Some(1440));
        assert_eq!(geometry.minutes_at(100.5), Some(1));
    }

    #[test]
    fn clamps_to_the_track() {
        let geometry = ContainerGeometry::new(100.0, 720.0);
        assert_eq!(geometry.minutes_at(-50.0), Some(0));
        assert_eq!(geometry.minutes_at(5000.0), Some(1440));
    }

    #[test]
    fn degenerate_tracks_map_nowhere() {
        assert_eq!(ContainerGeometry::new(0.0, 0.0).minutes_at(10.0), None);
        assert_eq!(ContainerGeometry::new(0.0, -5.0).minutes_at(10.0), None);
        assert_eq!(ContainerGeometry::default().minutes_at(::std::f64::NAN), None);
    }

    #[test]
    fn press_off_handle_is_ignored() {
        let mut drag = DragController::new();
        assert!(!drag.press(0, Handle::From, false));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn second_press_is_ignored_while_dragging() {
        let mut drag = DragController::new();
        assert!(drag.press(0, Handle::From, true));
        assert!(!drag.press(1, Handle::Until, true));
        assert_eq!(
            drag.session(),
            Some(&DragSession {
                target_index: 0,
                handle: Handle::From
            })
        );
    }

    #[test]
    fn moves_without_a_drag_are_ignored() {
        let mut drag = DragController::new();
        let mut set = set_with(100, 200);
        let outcome = drag.pointer_move(&mut set, &ContainerGeometry::default(), 150.0);
        assert_eq!(outcome, MoveOutcome::Ignored);
        assert_eq!(set.intervals(), &[TimeInterval::new(100, 200).unwrap()]);
    }

    #[test]
    fn accepted_moves_update_one_bound() {
        let mut drag = DragController::new();
        let mut set = set_with(100, 200);
        let geometry = ContainerGeometry::default();

        drag.press(0, Handle::From, true);
        assert_eq!(
            drag.pointer_move(&mut set, &geometry, 50.0),
            MoveOutcome::Draft {
                index: 0,
                interval: TimeInterval::new(50, 200).unwrap()
            }
        );
        assert_eq!(
            drag.pointer_move(&mut set, &geometry, 120.0),
            MoveOutcome::Draft {
                index: 0,
                interval: TimeInterval::new(120, 200).unwrap()
            }
        );
        assert!(drag.is_dragging());
    }

    #[test]
    fn dragging_from_past_until_ends_the_drag() {
        let mut drag = DragController::new();
        let mut set = set_with(100, 200);

        drag.press(0, Handle::From, true);
        let outcome = drag.pointer_move(&mut set, &ContainerGeometry::default(), 250.0);

        match outcome {
            MoveOutcome::Rejected(session) => assert_eq!(session.handle, Handle::From),
            other => panic!("unexpected {:?}", other),
        }
        assert!(!drag.is_dragging());
        assert!(set.get(0).unwrap().from() <= 199);
    }

    #[test]
    fn dragging_until_before_from_ends_the_drag() {
        let mut drag = DragController::new();
        let mut set = set_with(100, 200);

        drag.press(0, Handle::Until, true);
        match drag.pointer_move(&mut set, &ContainerGeometry::default(), 50.0) {
            MoveOutcome::Rejected(_) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(!drag.is_dragging());
        assert_eq!(set.get(0).unwrap().until(), 200);
    }

    #[test]
    fn until_can_reach_the_right_edge() {
        let mut drag = DragController::new();
        let mut set = set_with(100, 200);

        drag.press(0, Handle::Until, true);
        let outcome = drag.pointer_move(&mut set, &ContainerGeometry::default(), 2000.0);
        assert_eq!(
            outcome,
            MoveOutcome::Draft {
                index: 0,
                interval: TimeInterval::new(100, 1439).unwrap()
            }
        );
    }

    #[test]
    fn stale_target_ends_the_drag() {
        let mut drag = DragController::new();
        let mut set = set_with(100, 200);

        drag.press(4, Handle::Until, true);
        match drag.pointer_move(&mut set, &ContainerGeometry::default(), 300.0) {
            MoveOutcome::Rejected(_) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(!drag.is_dragging());
    }

    #[test]
    fn release_clears_the_session() {
        let mut drag = DragController::new();
        drag.press(0, Handle::Until, true);
        assert!(drag.release().is_some());
        assert!(drag.release().is_none());
        assert!(!drag.is_dragging());
    }
}
