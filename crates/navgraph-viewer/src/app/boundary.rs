/// Wraps a drawable surface that may fail to come up.
///
/// A failed mount is logged once and latches into `Fallback`; later mount
/// attempts are ignored until the process restarts.
#[derive(Debug)]
pub enum SurfaceBoundary<S> {
    Pending,
    Live(S),
    Fallback {
        reason: String,
    },
}

impl<S> Default for SurfaceBoundary<S> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<S> SurfaceBoundary<S> {
    pub fn mount(&mut self, init: impl FnOnce() -> anyhow::Result<S>) -> bool {
        if self.is_fallback() {
            return false;
        }
        match init() {
            Ok(surface) => {
                *self = Self::Live(surface);
                true
            }
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::error!(
                    %reason,
                    "graph surface failed to mount; showing static background"
                );
                *self = Self::Fallback { reason };
                false
            }
        }
    }

    /// Hands back the live surface, leaving the boundary pending.
    pub fn take_live(&mut self) -> Option<S> {
        match std::mem::take(self) {
            Self::Live(surface) => Some(surface),
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn live(&self) -> Option<&S> {
        match self {
            Self::Live(surface) => Some(surface),
            _ => None,
        }
    }

    pub fn live_mut(&mut self) -> Option<&mut S> {
        match self {
            Self::Live(surface) => Some(surface),
            _ => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            Self::Fallback { reason } => Some(reason),
            _ => None,
        }
    }
}
