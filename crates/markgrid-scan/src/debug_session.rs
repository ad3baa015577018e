use markgrid_core::PixelRect;
use serde::Serialize;

/// One accepted detection with its exclusion zone.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AcceptedSquare {
    pub row: usize,
    pub col: usize,
    pub exclusion: PixelRect,
}

/// Corner correction that hit the iteration cap.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct DriftEvent {
    pub candidate_row: usize,
    pub candidate_col: usize,
    pub kept_row: usize,
    pub kept_col: usize,
    pub iterations: u32,
}

/// Scoped recorder for one scanner invocation's visualization data.
///
/// Passed explicitly into the detection stream (`with_debug`); there is no
/// process-wide table. Dump to JSON for offline inspection.
#[derive(Debug, Default, Serialize)]
pub struct DebugSession {
    pub accepted: Vec<AcceptedSquare>,
    pub drift_events: Vec<DriftEvent>,
}

impl DebugSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_accept(&mut self, row: usize, col: usize, exclusion: PixelRect) {
        self.accepted.push(AcceptedSquare {
            row,
            col,
            exclusion,
        });
    }

    pub(crate) fn record_drift(
        &mut self,
        candidate_row: usize,
        candidate_col: usize,
        kept_row: usize,
        kept_col: usize,
        iterations: u32,
    ) {
        self.drift_events.push(DriftEvent {
            candidate_row,
            candidate_col,
            kept_row,
            kept_col,
            iterations,
        });
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
