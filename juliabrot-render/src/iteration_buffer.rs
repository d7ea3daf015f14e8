use juliabrot_core::{IterationResult, Viewport};

/// Per-pixel `IterationResult` data for a full frame, before coloring.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationBuffer {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub data: Vec<IterationResult>,
}

impl IterationBuffer {
    pub fn new(viewport: Viewport, max_iterations: u32) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            max_iterations,
            data: vec![IterationResult::Interior; viewport.pixel_count()],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> IterationResult {
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn interior_count(&self) -> usize {
        self.data.iter().filter(|r| r.is_interior()).count()
    }
}
