//! Animation scheduler
//!
//! Host-side registry of independent orchestrators. The host calls
//! [`AnimationScheduler::tick`] once per frame; every orchestrator that
//! registered for a frame is ticked. A failing hook in one run does not stop
//! the others.

use slotmap::{new_key_type, SlotMap};

use crate::controller::Orchestrator;
use crate::error::AnimationError;

new_key_type! {
    pub struct OrchestratorId;
}

/// Drives every registered orchestrator from one frame loop
pub struct AnimationScheduler {
    orchestrators: SlotMap<OrchestratorId, Orchestrator>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            orchestrators: SlotMap::with_key(),
        }
    }

    pub fn add(&mut self, orchestrator: Orchestrator) -> OrchestratorId {
        self.orchestrators.insert(orchestrator)
    }

    pub fn get(&self, id: OrchestratorId) -> Option<&Orchestrator> {
        self.orchestrators.get(id)
    }

    pub fn get_mut(&mut self, id: OrchestratorId) -> Option<&mut Orchestrator> {
        self.orchestrators.get_mut(id)
    }

    pub fn remove(&mut self, id: OrchestratorId) -> Option<Orchestrator> {
        self.orchestrators.remove(id)
    }

    /// Tick every orchestrator waiting for a frame.
    ///
    /// Returns the hook errors raised during this frame, keyed by run.
    pub fn tick(&mut self, timestamp_ms: f64) -> Vec<(OrchestratorId, AnimationError)> {
        let mut errors = Vec::new();

        for (id, orchestrator) in self.orchestrators.iter_mut() {
            if !orchestrator.wants_frame() {
                continue;
            }
            if let Err(err) = orchestrator.tick(timestamp_ms) {
                tracing::warn!(?id, error = %err, "orchestrator tick failed");
                errors.push((id, err));
            }
        }

        errors
    }

    /// Check if any run is still waiting for frames
    pub fn has_active_animations(&self) -> bool {
        self.orchestrators.values().any(Orchestrator::wants_frame)
    }

    /// Iterate over all orchestrators (immutable)
    pub fn iter(&self) -> impl Iterator<Item = (OrchestratorId, &Orchestrator)> {
        self.orchestrators.iter()
    }

    /// Get the number of orchestrators in the scheduler
    pub fn len(&self) -> usize {
        self.orchestrators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orchestrators.is_empty()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
