use tracing::Span;

use crate::schedule::Phase;

/// Lifecycle tracing handed to a backdrop instance at mount.
///
/// All events are emitted inside one span tagged with the instance id, so a
/// remount shows up as a new span. A disabled log emits nothing.
#[derive(Debug, Clone)]
pub struct LifecycleLog {
    enabled: bool,
    span: Span,
}

impl LifecycleLog {
    pub fn new(enabled: bool, instance: u64) -> Self {
        let span = if enabled {
            tracing::info_span!("backdrop", instance)
        } else {
            Span::none()
        };
        Self { enabled, span }
    }

    pub fn disabled() -> Self {
        Self::new(false, 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mounted(&self, nodes: usize, edges: usize) {
        if !self.enabled {
            return;
        }
        let _g = self.span.enter();
        tracing::info!(nodes, edges, "backdrop mounted");
    }

    pub fn phase_entered(&self, cycle: u64, phase: Phase, current: usize, target: usize) {
        if !self.enabled {
            return;
        }
        let _g = self.span.enter();
        tracing::debug!(cycle, phase = phase.as_str(), current, target, "phase entered");
    }

    pub fn path_computed(&self, len: usize, reached: bool) {
        if !self.enabled {
            return;
        }
        let _g = self.span.enter();
        tracing::debug!(len, reached, "search path computed");
    }

    pub fn torn_down(&self, frames: u64) {
        if !self.enabled {
            return;
        }
        let _g = self.span.enter();
        tracing::info!(frames, "backdrop torn down");
    }
}

impl Default for LifecycleLog {
    fn default() -> Self {
        Self::disabled()
    }
}
