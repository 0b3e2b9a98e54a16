//! Keyed store of built machines.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::core::{EventId, StateId};
use crate::machine::StateMachine;

/// Errors from the named-machine registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("state machine '{0}' is already registered, no need to build it again")]
    AlreadyRegistered(String),

    #[error("no state machine registered under '{0}', build it first")]
    NotFound(String),
}

/// Convenience store of built machines, keyed by machine id.
///
/// Registration is first-wins: an id cannot be overwritten by
/// re-registration.
pub struct MachineRegistry<S: StateId, E: EventId, C> {
    machines: HashMap<String, Arc<StateMachine<S, E, C>>>,
}

impl<S: StateId, E: EventId, C> MachineRegistry<S, E, C> {
    pub fn new() -> Self {
        MachineRegistry {
            machines: HashMap::new(),
        }
    }

    /// Store `machine` under its id.
    pub fn register(&mut self, machine: Arc<StateMachine<S, E, C>>) -> Result<(), RegistryError> {
        let id = machine.id().to_string();
        if self.machines.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }
        self.machines.insert(id, machine);
        Ok(())
    }

    /// Look up a machine by id.
    pub fn get(&self, machine_id: &str) -> Result<Arc<StateMachine<S, E, C>>, RegistryError> {
        self.machines
            .get(machine_id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(machine_id.to_string()))
    }
}

impl<S: StateId, E: EventId, C> Default for MachineRegistry<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}
