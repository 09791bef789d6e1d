/// Number of generation buffers in rotation
pub const BUFFER_COUNT: usize = 3;

/// Which buffer plays which role. `render` is `None` until the renderer
/// first asks for a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferRoles {
    pub last: usize,
    pub next: usize,
    pub render: Option<usize>,
}

impl Default for BufferRoles {
    fn default() -> Self {
        BufferRoles {
            last: 0,
            next: 1,
            render: None,
        }
    }
}

impl BufferRoles {
    /// Publish `next` as the completed generation and pick the lowest index
    /// that is neither the new `last` nor pinned for rendering.
    pub(crate) fn rotate(&mut self) {
        self.last = self.next;
        self.next = match self.render {
            Some(render) if render != self.last => BUFFER_COUNT * (BUFFER_COUNT - 1) / 2 - self.last - render,
            _ => usize::from(self.last == 0),
        };
    }

    /// Pin `last` for rendering and return its index
    pub(crate) fn present(&mut self) -> usize {
        self.render = Some(self.last);
        self.last
    }

    /// All three roles name distinct buffers (`render` may coincide with `last`)
    pub fn is_consistent(&self) -> bool {
        let in_range = self.last < BUFFER_COUNT
            && self.next < BUFFER_COUNT
            && self.render.map_or(true, |r| r < BUFFER_COUNT);
        in_range && self.next != self.last && Some(self.next) != self.render
    }
}

/// A burst request waiting for admission
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRequest {
    pub x: f32,
    pub y: f32,
}
