#![cfg_attr(target_arch = "spirv", no_std)]

pub use spirv_std::glam;

use spirv_std::glam::{Vec2, Vec3};

/// Resource and attribute slots shared between the blit shader and the
/// pipeline setup code. The shader declares the same indices literally in
/// its `#[spirv(...)]` attributes, since those arguments cannot name
/// constants.
pub mod slots {
    /// Descriptor set holding the blit resources.
    pub const TEXTURE_SET: u32 = 0;
    /// Combined image+sampler binding within the texture set.
    pub const TEXTURE_BINDING: u32 = 2;
    /// Vertex input location of the quad position attribute.
    pub const POSITION_ATTRIBUTE: u32 = 0;
    /// Vertex input location of the quad UV attribute.
    pub const UV_ATTRIBUTE: u32 = 1;
}

/// Per-vertex attributes of the textured quad, laid out to match the
/// pipeline's vertex input state: position at offset 0, UV right after.
#[repr(C)]
#[cfg_attr(not(target_arch = "spirv"), derive(Clone, Copy, Debug, Default, PartialEq))]
pub struct Vertex {
    pub position: Vec3,
    pub uv: Vec2,
}

// 20 tightly packed bytes; no padding between or after the fields.
#[cfg(not(target_arch = "spirv"))]
unsafe impl bytemuck::Zeroable for Vertex {}
#[cfg(not(target_arch = "spirv"))]
unsafe impl bytemuck::Pod for Vertex {}

#[cfg(not(target_arch = "spirv"))]
impl Vertex {
    pub fn new(position: Vec3, uv: Vec2) -> Self {
        Self { position, uv }
    }

    pub fn to_array(&self) -> [f32; 5] {
        bytemuck::cast(*self)
    }
}

#[cfg(not(target_arch = "spirv"))]
pub const VERTEX_SIZE: u64 = size_of::<Vertex>() as u64;

#[cfg(not(target_arch = "spirv"))]
pub const UV_OFFSET: u32 = core::mem::offset_of!(Vertex, uv) as u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(VERTEX_SIZE, 20);
        assert_eq!(core::mem::offset_of!(Vertex, position), 0);
        assert_eq!(UV_OFFSET, 12);
    }

    #[test]
    fn vertex_casts_to_plain_floats() {
        let vertex = Vertex::new(Vec3::new(-1.0, 1.0, 0.5), Vec2::new(0.25, 0.75));
        assert_eq!(vertex.to_array(), [-1.0, 1.0, 0.5, 0.25, 0.75]);

        let bytes: &[u8] = bytemuck::cast_slice(core::slice::from_ref(&vertex));
        assert_eq!(bytes.len(), VERTEX_SIZE as usize);
    }

    #[test]
    fn slots_match_the_shader_interface() {
        assert_eq!(slots::TEXTURE_SET, 0);
        assert_eq!(slots::TEXTURE_BINDING, 2);
        assert_eq!(slots::POSITION_ATTRIBUTE, 0);
        assert_eq!(slots::UV_ATTRIBUTE, 1);
    }
}
