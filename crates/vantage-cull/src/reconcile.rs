//! Frame reconciliation: turn admit/reject decisions into the minimal set
//! of show/hide transitions.

use vantage_scene::{ObjectId, Scene};

/// What the host should do with an object this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityAction {
    Show,
    Hide,
}

/// A single visibility toggle for the host to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub object: ObjectId,
    pub action: VisibilityAction,
}

/// Diff the decisions against current scene state.
///
/// Admitted objects that are hidden get a `Show`; rejected objects that
/// are visible get a `Hide`. Objects already in the correct state emit
/// nothing, so applying the result twice is a no-op the second time.
pub fn reconcile(scene: &Scene, admitted: &[ObjectId], rejected: &[ObjectId]) -> Vec<Transition> {
    let mut transitions = Vec::new();
    for &id in admitted {
        match scene.is_hidden(id) {
            Ok(true) => transitions.push(Transition {
                object: id,
                action: VisibilityAction::Show,
            }),
            Ok(false) => {}
            Err(err) => log::warn!("skipping admitted object: {err}"),
        }
    }
    for &id in rejected {
        match scene.is_hidden(id) {
            Ok(false) => transitions.push(Transition {
                object: id,
                action: VisibilityAction::Hide,
            }),
            Ok(true) => {}
            Err(err) => log::warn!("skipping rejected object: {err}"),
        }
    }
    transitions
}

/// Apply transitions to the scene.
///
/// Each toggle is independent; a failure (object deleted mid-frame) is
/// logged and the rest of the batch continues.
pub fn apply_transitions(scene: &mut Scene, transitions: &[Transition]) {
    for t in transitions {
        let hidden = t.action == VisibilityAction::Hide;
        if let Err(err) = scene.set_hidden(t.object, hidden) {
            let verb = match t.action {
                VisibilityAction::Show => "unhide",
                VisibilityAction::Hide => "hide",
            };
            log::warn!("could not {verb} {}: {err}", t.object);
        }
    }
}
