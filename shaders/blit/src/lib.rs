#![cfg_attr(target_arch = "spirv", no_std)]

use spirv_std::{
    glam::{Vec2, Vec3, Vec4},
    image::{Image2d, SampledImage},
    spirv,
};

// Slot indices mirror easel_gpu::slots; spirv attribute arguments must be
// integer literals.

#[spirv(vertex)]
pub fn main_vs(
    in_position: Vec3,
    in_uv: Vec2,
    #[spirv(position)] out_position: &mut Vec4,
    out_uv: &mut Vec2,
) {
    *out_position = Vec4::from((in_position, 1.0));
    *out_uv = in_uv;
}

#[spirv(fragment)]
pub fn main_fs(
    in_uv: Vec2,
    #[spirv(descriptor_set = 0, binding = 2)] texture: &SampledImage<Image2d>,
    output: &mut Vec4,
) {
    *output = texture.sample(in_uv);
}
