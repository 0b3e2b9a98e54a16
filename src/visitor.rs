//! Diagnostic dump of a built machine.

use tracing::info;

use crate::core::{EventId, StateId, StateNode};
use crate::machine::StateMachine;

/// Traversal hooks over a built machine.
///
/// Each hook returns the fragment it contributes to the dump produced by
/// [`StateMachine::accept`]. Implementations are purely informational and
/// have no effect on routing. State order follows the table's internal
/// map, so it is not deterministic across runs.
pub trait MachineVisitor<S: StateId, E: EventId, C> {
    fn machine_entry(&self, machine: &StateMachine<S, E, C>) -> String;

    fn machine_exit(&self, machine: &StateMachine<S, E, C>) -> String;

    fn state_entry(&self, node: &StateNode<S, E, C>) -> String;

    fn state_exit(&self, _node: &StateNode<S, E, C>) -> String {
        String::new()
    }
}

/// Default dump format: machine header, one line per state, one indented
/// line per transition, dashed footer. Every line is also mirrored to the
/// log at info level.
pub struct OutlineVisitor;

impl<S: StateId, E: EventId, C> MachineVisitor<S, E, C> for OutlineVisitor {
    fn machine_entry(&self, machine: &StateMachine<S, E, C>) -> String {
        let header = format!("-----StateMachine:{}-------", machine.id());
        info!("{header}");
        header + "\n"
    }

    fn machine_exit(&self, _machine: &StateMachine<S, E, C>) -> String {
        let footer = "------------------------";
        info!("{footer}");
        format!("{footer}\n")
    }

    fn state_entry(&self, node: &StateNode<S, E, C>) -> String {
        let mut block = String::new();
        let state_line = format!("State:{:?}", node.id());
        info!("{state_line}");
        block.push_str(&state_line);
        block.push('\n');
        for transition in node.all_transitions() {
            let line = format!("    Transition:{}", transition.describe());
            info!("{line}");
            block.push_str(&line);
            block.push('\n');
        }
        block
    }
}
