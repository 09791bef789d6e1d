use std::ops::Deref;

use parking_lot::RwLockReadGuard;

use crate::spatial::buffer::GenerationBuffer;

/// Read view of the generation pinned for rendering.
///
/// The writer never targets the pinned buffer. Only the most recent
/// `get_render_buffer` call pins, so a snapshot that has been superseded by a
/// later call (from any thread) may become the next write target, and
/// `update` then waits until it is dropped. Drop a snapshot before asking for
/// the next one.
pub struct RenderSnapshot<'a> {
    buffer_id: usize,
    buffer: RwLockReadGuard<'a, GenerationBuffer>,
}

impl<'a> RenderSnapshot<'a> {
    pub(super) fn new(buffer_id: usize, buffer: RwLockReadGuard<'a, GenerationBuffer>) -> Self {
        RenderSnapshot { buffer_id, buffer }
    }

    /// Which of the three buffers this snapshot reads
    #[inline]
    pub fn buffer_id(&self) -> usize {
        self.buffer_id
    }

    /// Flatten live particles into `out` (see [`extract_points`])
    pub fn extract_points(&self, out: &mut Vec<RenderPoint>) -> usize {
        extract_points(&self.buffer, out)
    }
}

impl Deref for RenderSnapshot<'_> {
    type Target = GenerationBuffer;

    #[inline]
    fn deref(&self) -> &GenerationBuffer {
        &self.buffer
    }
}

/// One drawable particle. Laid out as three consecutive `f32`s.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderPoint {
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
}

/// Replace the contents of `out` with every live particle of `buffer`,
/// lane by lane, and return the particle count.
pub fn extract_points(buffer: &GenerationBuffer, out: &mut Vec<RenderPoint>) -> usize {
    out.clear();
    out.extend(buffer.live_particles().map(|prt| RenderPoint {
        x: prt.x,
        y: prt.y,
        alpha: prt.alpha,
    }));
    out.len()
}
