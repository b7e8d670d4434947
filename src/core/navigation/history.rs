use crate::core::data::complex_rect::ComplexRect;

/// Plane bounds that were on screen before a zoom. The iteration cap is a
/// process-wide setting and is not captured.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HistoryFrame {
    region: ComplexRect,
}

impl HistoryFrame {
    #[must_use]
    pub fn new(region: ComplexRect) -> Self {
        Self { region }
    }

    #[must_use]
    pub fn region(&self) -> ComplexRect {
        self.region
    }
}

/// Unbounded stack of previously visited regions, most recent last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationHistory {
    frames: Vec<HistoryFrame>,
}

impl NavigationHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: HistoryFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<HistoryFrame> {
        self.frames.pop()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&HistoryFrame> {
        self.frames.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Frames from oldest to most recent.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryFrame> {
        self.frames.iter()
    }
}
