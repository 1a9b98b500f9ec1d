#[cfg(feature = "vulkan")]
mod vk;

pub mod settings;
pub mod window;

use crate::{app::info::Info, texture::Texture};

pub use settings::Settings;
use window::Window;

trait Renderer {
    fn new(info: &Info, settings: Settings, window: Window, texture: Texture) -> Self;
    fn draw(&mut self);
}

pub struct Handle {
    #[cfg(feature = "vulkan")]
    api: vk::Renderer,
}

pub fn new(info: &Info, settings: Settings, window: &winit::window::Window, texture: Texture) -> Handle {
    let window = Window::new(window).expect("easel::ren - failed to extract native window handles");
    #[cfg(feature = "vulkan")]
    return Handle { api: vk::Renderer::new(info, settings, window, texture) };
}

impl Handle {
    pub fn draw(&mut self) {
        #[cfg(feature = "vulkan")]
        self.api.draw();
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        #[cfg(feature = "vulkan")]
        crate::traits::Drop::drop(&mut self.api);
    }
}
