use mandelzoom_core::IterationResult;

/// Per-pixel escape results for a full frame, row-major from the top row.
///
/// This is the raw output of the renderer before coloring. Keeping it apart
/// from the RGBA pixels lets a theme change recolor without re-iterating.
#[derive(Debug, Clone)]
pub struct IterationBuffer {
    pub width: u32,
    pub height: u32,
    /// The ceiling the frame was iterated to.
    pub iteration_limit: u32,
    pub data: Vec<IterationResult>,
}

impl IterationBuffer {
    pub fn new(width: u32, height: u32, iteration_limit: u32) -> Self {
        Self {
            width,
            height,
            iteration_limit,
            data: vec![IterationResult::Interior; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<IterationResult> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn interior_count(&self) -> usize {
        self.data.iter().filter(|r| !r.escaped()).count()
    }
}
