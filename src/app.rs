use crate::renderer::Renderer;
use std::process;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

struct AppContext {
    renderer: Renderer,
    window: Window,
}

#[derive(Default)]
pub struct App {
    context: Option<AppContext>,
}

impl App {
    pub fn new() -> Self {
        Self { context: None }
    }

    fn render(&mut self) {
        if let Some(context) = &mut self.context {
            context
                .renderer
                .draw_frame(&context.window)
                .unwrap_or_else(|err| {
                    eprintln!("{err}");
                    process::exit(1);
                });
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let (window, renderer) = Renderer::new(event_loop).unwrap_or_else(|err| {
            eprintln!("{err}");
            process::exit(1);
        });
        window.request_redraw();
        self.context = Some(AppContext { renderer, window });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        window_event: WindowEvent,
    ) {
        match window_event {
            WindowEvent::CloseRequested => {
                log::info!("The close button was pressed; stopping");
                self.context = None;
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(context) = &self.context {
                    context.window.request_redraw();
                }
            }
            WindowEvent::Resized(_) => {
                if let Some(context) = &mut self.context {
                    context.renderer.flag_resized();
                }
            }
            _ => {}
        }
    }
}
