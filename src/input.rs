/// Maps abstract input triggers onto controller actions.
///
/// The front end decides which physical inputs produce which trigger
/// (keys, clicks, on-screen controls); this module decides what a trigger
/// means in the current state.

use crate::compute;
use crate::entities::{GameEvent, Session, Status, Variant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Jump,
    Shoot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    Restart,
    Jump,
    Shoot,
    Ignore,
}

/// The single action `trigger` performs given `state`.
pub fn resolve(state: &Session, trigger: Trigger) -> Action {
    if trigger == Trigger::Shoot && state.variant == Variant::Classic {
        return Action::Ignore;
    }
    match state.status {
        Status::Idle => Action::Start,
        Status::GameOver => Action::Restart,
        Status::Playing => match trigger {
            Trigger::Jump => Action::Jump,
            Trigger::Shoot if state.is_running() && !state.is_over() => Action::Shoot,
            Trigger::Shoot => Action::Ignore,
        },
    }
}

/// Resolve `trigger` and perform the resulting action.
pub fn apply_trigger(state: &Session, trigger: Trigger) -> (Session, Vec<GameEvent>) {
    let action = resolve(state, trigger);
    tracing::debug!(?trigger, ?action, status = ?state.status, "input");
    match action {
        Action::Start => compute::start(state),
        Action::Restart => compute::restart(state),
        Action::Jump => compute::jump(state),
        Action::Shoot => compute::shoot(state),
        Action::Ignore => (state.clone(), Vec::new()),
    }
}
