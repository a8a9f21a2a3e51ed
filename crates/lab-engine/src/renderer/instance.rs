use bytemuck::{Pod, Zeroable};

/// Per-instance render data read by the host renderer.
/// Must match the host protocol: 28 floats = 112 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major world matrix.
    pub model: [[f32; 4]; 4],
    /// Base color RGB, opacity in `w`.
    pub color: [f32; 4],
    /// Emissive RGB (black when the material has none), shininess in `w`.
    pub emissive: [f32; 4],
    /// Geometry kind, two shape parameters, point size.
    pub shape: [f32; 4],
}

impl MeshInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Instances for one frame, opaque first.
pub struct RenderBuffer {
    pub instances: Vec<MeshInstance>,
    /// Instances `[0..opaque_split)` are opaque, the rest need blending.
    pub opaque_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(512),
            opaque_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.opaque_split = 0;
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn set_opaque_split(&mut self, split: u32) {
        self.opaque_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host-side reads of wasm memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
