use tracing::trace;

use super::render_extract::RenderSnapshot;
use super::{EffectSystem, SpawnRequest};

pub(super) fn add_effect(sys: &EffectSystem, x: f32, y: f32) {
    let mut swap = sys.swap.lock();
    if let Some(replaced) = swap.pending.replace(SpawnRequest { x, y }) {
        trace!(x = replaced.x, y = replaced.y, "pending spawn superseded");
    }
}

pub(super) fn get_render_buffer(sys: &EffectSystem) -> RenderSnapshot<'_> {
    // Swap lock is released before waiting on the buffer.
    let id = sys.swap.lock().roles.present();
    RenderSnapshot::new(id, sys.buffers[id].read())
}
