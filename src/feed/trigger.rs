//! Edge-triggered visibility signal for infinite scroll.
//!
//! The UI reports after every frame whether the sentinel row is inside the
//! viewport.  [`VisibilityTrigger::observe`] turns that level signal into a
//! single "load more" pulse per contiguous visible interval.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityTrigger {
    visible: bool,
}

impl VisibilityTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest visibility; returns `true` on an invisible → visible edge.
    pub fn observe(&mut self, visible: bool) -> bool {
        let fired = visible && !self.visible;
        self.visible = visible;
        fired
    }
}
