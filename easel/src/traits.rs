/// Explicit teardown. Vulkan handles must be destroyed against a live
/// device in a controlled order, which `core::ops::Drop` cannot express.
pub trait Drop {
    fn drop(&mut self);
}
