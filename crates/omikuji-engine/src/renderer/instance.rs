use bytemuck::{Pod, Zeroable};

/// Instance kinds understood by the host renderer.
pub mod draw_kind {
    /// Filled circle at (x, y) with radius `size`.
    pub const CIRCLE: f32 = 0.0;
    /// Stroke from (x, y) to (x2, y2) with width `size`.
    pub const LINE: f32 = 1.0;
}

/// Per-instance draw data for the particle layer.
/// 12 floats = 48 bytes stride; the host reads these straight out of memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    /// One of [`draw_kind`].
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    /// Line end point (unused for circles).
    pub x2: f32,
    pub y2: f32,
    /// Circle radius or line width.
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Flat buffer of draw instances, rebuilt every frame.
pub struct DrawBuffer {
    instances: Vec<DrawInstance>,
}

impl DrawBuffer {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: DrawInstance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[DrawInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// The buffer viewed as raw floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for direct memory reads from the host.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for DrawBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_instance_is_12_floats() {
        assert_eq!(std::mem::size_of::<DrawInstance>(), DrawInstance::STRIDE_BYTES);
        assert_eq!(DrawInstance::FLOATS, 12);
    }

    #[test]
    fn float_view_matches_layout() {
        let mut buf = DrawBuffer::new();
        buf.push(DrawInstance { kind: draw_kind::LINE, x: 3.0, size: 2.0, ..Default::default() });
        let floats = buf.as_floats();
        assert_eq!(floats.len(), DrawInstance::FLOATS);
        assert_eq!(floats[0], draw_kind::LINE);
        assert_eq!(floats[1], 3.0);
        assert_eq!(floats[5], 2.0);
    }
}
