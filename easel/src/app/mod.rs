pub mod info;

use crate::{ren, texture::Texture};

use std::path::PathBuf;
use winit::{application::ApplicationHandler, dpi::PhysicalSize, error::EventLoopError, event::WindowEvent, event_loop::{ActiveEventLoop, ControlFlow, EventLoop}, window::{Window, WindowId}};

pub struct App {
    info: info::Info,
    settings: ren::Settings,
    texture_path: Option<PathBuf>,
    window: Option<Window>,
    ren: Option<ren::Handle>,
}

impl App {
    pub fn run(&mut self) -> Result<(), EventLoopError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(self)
    }
}

pub fn new(name: String, settings: ren::Settings, texture_path: Option<PathBuf>) -> App {
    App {
        info: info::new(name, info::make_version(0, 1, 0, 0)),
        settings,
        texture_path,
        window: None,
        ren: None,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let ren::settings::Resolution { width, height } = self.settings.resolution;
        let window_attributes = Window::default_attributes()
            .with_resizable(false)
            .with_inner_size(PhysicalSize::new(width, height))
            .with_title(self.info.app_name.to_string_lossy().into_owned());

        let window = event_loop
            .create_window(window_attributes)
            .expect("easel::App - failed to create window");

        let texture = match &self.texture_path {
            Some(path) => Texture::open(path),
            None => Texture::checker(512, 512, 64),
        };

        self.ren = Some(ren::new(&self.info, self.settings, &window, texture));
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                // tear the renderer down before the window goes away
                self.ren = None;
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Some(ren) = self.ren.as_mut() {
                    ren.draw();
                }
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }
}
