//! Pure state transitions for the cycle list.
//!
//! The reducer is a pure function over immutable snapshots: it never mutates
//! the input state and always hands back a freshly built one, so callers can
//! hold the previous snapshot for change detection. Timestamps travel inside
//! the actions, keeping the function clock-free.

use chrono::{DateTime, Utc};

use crate::domain::models::{Cycle, CyclesState};

/// The three transitions the cycle store supports.
#[derive(Debug, Clone)]
pub enum CycleAction {
    AddNewCycle(Cycle),
    InterruptCurrentCycle { at: DateTime<Utc> },
    MarkCurrentCycleAsFinished { at: DateTime<Utc> },
}

/// Applies an action to a state snapshot and returns the next state.
///
/// Transition rules:
/// - `AddNewCycle` appends the cycle and points the active id at it. There is
///   no precondition check: adding while another cycle is active replaces the
///   pointer and leaves the previous cycle without a terminal date. That is a
///   known quirk of the original behavior, kept as-is.
/// - `InterruptCurrentCycle` stamps `interrupted_date` on the active cycle and
///   clears the active id. If no cycle matches the pointer, the state is
///   returned unchanged.
/// - `MarkCurrentCycleAsFinished` stamps `finished_date` on the active cycle
///   but does NOT clear the active id; callers that need the pointer cleared
///   must interrupt or replace it themselves. Unchanged state when no match.
pub fn reduce(state: &CyclesState, action: CycleAction) -> CyclesState {
    match action {
        CycleAction::AddNewCycle(cycle) => {
            let active_cycle_id = Some(cycle.id.clone());
            let mut cycles = state.cycles.clone();
            cycles.push(cycle);
            CyclesState {
                cycles,
                active_cycle_id,
            }
        }
        CycleAction::InterruptCurrentCycle { at } => {
            match active_cycle_index(state) {
                Some(index) => {
                    let mut cycles = state.cycles.clone();
                    cycles[index].interrupted_date = Some(at);
                    CyclesState {
                        cycles,
                        active_cycle_id: None,
                    }
                }
                None => state.clone(),
            }
        }
        CycleAction::MarkCurrentCycleAsFinished { at } => {
            match active_cycle_index(state) {
                Some(index) => {
                    let mut cycles = state.cycles.clone();
                    cycles[index].finished_date = Some(at);
                    CyclesState {
                        cycles,
                        // The pointer intentionally stays in place here.
                        active_cycle_id: state.active_cycle_id.clone(),
                    }
                }
                None => state.clone(),
            }
        }
    }
}

fn active_cycle_index(state: &CyclesState) -> Option<usize> {
    let active_id = state.active_cycle_id.as_deref()?;
    state.cycles.iter().position(|cycle| cycle.id == active_id)
}
