//! `geoline <records.json> [options.toml]`
//!
//! Opens a window and draws the records as lines. Drag to pan, scroll to
//! zoom.

use std::{path::PathBuf, sync::Arc};

use geoline::{
    camera::{controller::MapController, mercator::lng_lat_to_world, viewport::Viewport},
    error::GeolineError,
    gpu::render_context::RenderContext,
    layer::{
        line::{LineLayer, LineLayerProps},
        record::{bounds, load_records, LineDatum, LineRecord},
        FrameUniforms, Layer, LayerContext,
    },
    options::Options,
    util::color::to_wgpu_color,
};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

struct Viewer {
    context: LayerContext,
    layer: LineLayer<LineRecord>,
    controller: MapController,
}

impl Viewer {
    fn new(
        gpu: RenderContext,
        records: &Arc<[LineRecord]>,
        options: &Options,
    ) -> Result<Self, GeolineError> {
        let mut context = LayerContext::new(gpu)?;
        let (width, height) = context.gpu.size();

        let mut props =
            LineLayerProps::new("lines", Arc::clone(records)).apply_options(&options.line);
        if options.view.web_mercator {
            props = props
                .get_source_position(|r: &LineRecord| lng_lat_to_world(r.source_position()))
                .get_target_position(|r: &LineRecord| lng_lat_to_world(r.target_position()));
        }

        let mut layer = LineLayer::new(props);
        layer.initialize_state(&mut context)?;
        layer.update_state(&mut context)?;

        let viewport = initial_viewport(records, options, width, height);
        Ok(Self {
            context,
            layer,
            controller: MapController::new(viewport),
        })
    }

    fn render(&mut self, clear_color: wgpu::Color) -> Result<(), wgpu::SurfaceError> {
        if let Err(e) = self.layer.update_state(&mut self.context) {
            log::error!("layer update failed: {e}");
        }

        let frame = self.context.gpu.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.gpu.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Line Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let uniforms = FrameUniforms {
                viewport: self.controller.viewport,
            };
            self.layer.draw(&mut self.context, &mut pass, &uniforms);
        }
        self.context.gpu.submit(encoder);
        frame.present();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.context.gpu.resize(width, height);
        self.controller.resize(width, height);
    }
}

fn initial_viewport(records: &[LineRecord], options: &Options, width: u32, height: u32) -> Viewport {
    let view = &options.view;
    let fitted = view
        .fit_to_data
        .then(|| bounds(records))
        .flatten()
        .map(|(min, max)| {
            // Mercator is monotonic on both axes, so projecting the corners
            // bounds the projected data.
            let (min, max) = if view.web_mercator {
                (lng_lat_to_world(min), lng_lat_to_world(max))
            } else {
                (min, max)
            };
            Viewport::fit_bounds(min, max, width, height, view.fit_padding)
        });
    fitted.unwrap_or_else(|| {
        let center = if view.web_mercator {
            lng_lat_to_world(view.center)
        } else {
            view.center
        };
        Viewport::new(center, view.zoom, width, height)
    })
}

struct App {
    records: Arc<[LineRecord]>,
    options: Options,
    window: Option<Arc<Window>>,
    viewer: Option<Viewer>,
}

impl App {
    fn new(records: Vec<LineRecord>, options: Options) -> Self {
        Self {
            records: records.into(),
            options,
            window: None,
            viewer: None,
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let [w, h] = self.options.view.window_size;
        let attrs = Window::default_attributes()
            .with_title("Geoline")
            .with_inner_size(winit::dpi::LogicalSize::new(w, h));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let viewer = pollster::block_on(RenderContext::new(
            Arc::clone(&window),
            (size.width, size.height),
        ))
        .map_err(GeolineError::from)
        .and_then(|gpu| Viewer::new(gpu, &self.records, &self.options));

        match viewer {
            Ok(viewer) => {
                log::info!("drawing {} lines", self.records.len());
                window.request_redraw();
                self.window = Some(window);
                self.viewer = Some(viewer);
            }
            Err(e) => {
                log::error!("{e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                viewer.resize(size.width, size.height);
                self.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let clear = to_wgpu_color(self.options.view.clear_color);
                match viewer.render(clear) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                        if let Some(window) = &self.window {
                            let inner = window.inner_size();
                            viewer.resize(inner.width, inner.height);
                        }
                        self.request_redraw();
                    }
                    Err(e) => log::error!("render error: {e:?}"),
                }
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                viewer.controller.set_dragging(state == ElementState::Pressed);
            }

            WindowEvent::CursorMoved { position, .. } => {
                if viewer.controller.cursor_moved(position.x, position.y) {
                    self.request_redraw();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => f64::from(y),
                    MouseScrollDelta::PixelDelta(pos) => pos.y * 0.01,
                };
                viewer.controller.zoom(lines);
                self.request_redraw();
            }

            _ => (),
        }
    }
}

fn run() -> Result<(), GeolineError> {
    let mut args = std::env::args().skip(1);
    let Some(data_path) = args.next().map(PathBuf::from) else {
        return Err(GeolineError::Viewer(
            "usage: geoline <records.json> [options.toml]".to_owned(),
        ));
    };
    let options = match args.next() {
        Some(path) => Options::load(&PathBuf::from(path))?,
        None => Options::default(),
    };
    let records = load_records(&data_path)?;

    let event_loop = EventLoop::new().map_err(|e| GeolineError::Viewer(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = App::new(records, options);
    event_loop
        .run_app(&mut app)
        .map_err(|e| GeolineError::Viewer(e.to_string()))
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
