use std::sync::atomic::{AtomicU8, Ordering};

use backoffice_gate_types::RuntimeLevel;

use crate::collaborators::RuntimeState;

/// Runtime level that the host advances as installation and upgrades finish.
///
/// Share it behind an `Arc`: the host keeps one handle to call
/// [`SharedRuntimeState::set_level`], the gate reads through another.
#[derive(Debug)]
pub struct SharedRuntimeState {
    level: AtomicU8,
}

impl SharedRuntimeState {
    #[must_use]
    pub fn new(level: RuntimeLevel) -> Self {
        Self {
            level: AtomicU8::new(level.to_u8()),
        }
    }

    /// Store a new level and return the previous one.
    pub fn set_level(&self, level: RuntimeLevel) -> RuntimeLevel {
        let previous = RuntimeLevel::from_u8(self.level.swap(level.to_u8(), Ordering::AcqRel));
        if previous != level {
            tracing::info!(from = %previous, to = %level, "Runtime level changed");
        }
        previous
    }
}

impl Default for SharedRuntimeState {
    fn default() -> Self {
        Self::new(RuntimeLevel::Unknown)
    }
}

impl RuntimeState for SharedRuntimeState {
    fn level(&self) -> RuntimeLevel {
        RuntimeLevel::from_u8(self.level.load(Ordering::Acquire))
    }
}
