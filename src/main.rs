mod core;
mod input;
mod playback;
mod settings;
mod ui;

use anyhow::{anyhow, Context as _, Result};
use clap::Parser;
use imgui::{Context, FontConfig, FontSource};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use glutin::prelude::*;
use glutin::display::GetGlDisplay;
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use glow::HasContext;

use std::ffi::CString;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use input::{load_csv, DEFAULT_DATA_FILE};
use playback::{FramePacer, InputEvent, PlaybackSession};
use settings::{CliArgs, Settings};
use ui::{FileDialogs, IntersectionView, Layout, PointerTracker, SpeedSlider};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run() {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

/// Pick the samples file: command line, then the default file, then a dialog
fn resolve_data_path(args: &CliArgs) -> Result<PathBuf> {
    if let Some(path) = &args.data_path {
        return Ok(path.clone());
    }

    let default = Path::new(DEFAULT_DATA_FILE);
    if default.exists() {
        return Ok(default.to_path_buf());
    }

    info!("{} not found, asking for a samples file", DEFAULT_DATA_FILE);
    FileDialogs::open_samples_file().ok_or_else(|| anyhow!("No samples file selected"))
}

fn run() -> Result<()> {
    let args = CliArgs::parse();
    let settings = Settings::load(args.settings_path.as_deref())?;

    let data_path = resolve_data_path(&args)?;
    let store = load_csv(&data_path)?;
    let mut session = PlaybackSession::new(store, &settings.playback_config())?;

    // Create event loop
    let event_loop = EventLoop::new().map_err(|e| anyhow!("Failed to create event loop: {}", e))?;

    // Build the window and GL display using glutin-winit
    let (window, gl_config) = DisplayBuilder::new()
        .with_window_builder(Some(
            WindowBuilder::new()
                .with_title("4-Way Traffic Light Replay")
                .with_resizable(false)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    settings.window_width,
                    settings.window_height,
                )),
        ))
        .build(&event_loop, glutin::config::ConfigTemplateBuilder::new(), |mut iter| {
            iter.next().expect("no GL config available")
        })
        .map_err(|e| anyhow!("Failed to create window and display: {}", e))?;

    let window = window.ok_or_else(|| anyhow!("Failed to create window"))?;
    let gl_display = gl_config.display();

    let context = unsafe {
        gl_display.create_context(
            &gl_config,
            &glutin::context::ContextAttributesBuilder::new()
                .build(Some(window.raw_window_handle())),
        )
    }
    .context("Failed to create GL context")?;

    let attrs = window.build_surface_attributes(
        glutin::surface::SurfaceAttributesBuilder::<glutin::surface::WindowSurface>::new(),
    );
    let surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
        .context("Failed to create surface")?;
    let context = context
        .make_current(&surface)
        .context("Failed to make context current")?;

    let load_gl = |symbol: &str| -> *const std::ffi::c_void {
        CString::new(symbol)
            .map(|name| gl_display.get_proc_address(&name))
            .unwrap_or(std::ptr::null())
    };
    let gl = unsafe { glow::Context::from_loader_function(load_gl) };
    // Second handle on the same GL context, used for clearing
    let gl_clear = unsafe { glow::Context::from_loader_function(load_gl) };

    // Set up imgui; layout is fixed, so no ini file
    let mut imgui = Context::create();
    imgui.set_ini_filename(None::<PathBuf>);
    imgui.set_log_filename(None::<PathBuf>);

    let hidpi_factor = window.scale_factor();
    imgui.fonts().add_font(&[FontSource::DefaultFontData {
        config: Some(FontConfig {
            size_pixels: (settings.font_size as f64 * hidpi_factor) as f32,
            ..FontConfig::default()
        }),
    }]);
    imgui.io_mut().font_global_scale = (1.0 / hidpi_factor) as f32;

    let mut platform = WinitPlatform::init(&mut imgui);
    platform.attach_window(imgui.io_mut(), &window, HiDpiMode::Default);

    let mut renderer = imgui_glow_renderer::AutoRenderer::initialize(gl, &mut imgui)
        .map_err(|e| anyhow!("Failed to initialize renderer: {:?}", e))?;

    let view = IntersectionView::new(Layout::new(
        settings.window_width as f32,
        settings.window_height as f32,
    ));
    let slider = SpeedSlider::new(settings.track);
    let mut pointer = PointerTracker::new();
    let mut pacer = FramePacer::new(Instant::now());
    let mut needs_redraw = true;
    let mut last_frame_time = Instant::now();

    info!("Replaying {} at {:.0} ms per step", data_path.display(), session.speed().current_interval());

    // Main loop
    event_loop
        .run(move |event, window_target| {
            match &event {
                Event::NewEvents(_) => {
                    let now = Instant::now();
                    imgui.io_mut().update_delta_time(now - last_frame_time);
                    last_frame_time = now;
                }
                Event::AboutToWait => {
                    if !session.is_running() {
                        window_target.exit();
                        return;
                    }

                    if pacer.poll(Instant::now(), session.frame_interval()) {
                        session.tick();
                        needs_redraw = true;
                    }

                    if needs_redraw {
                        if let Err(e) = platform.prepare_frame(imgui.io_mut(), &window) {
                            error!("Failed to prepare frame: {}", e);
                            std::process::exit(1);
                        }
                        window.request_redraw();
                        needs_redraw = false;
                    }

                    window_target.set_control_flow(ControlFlow::WaitUntil(pacer.deadline()));
                }
                Event::WindowEvent { event: window_event, .. } => match window_event {
                    WindowEvent::RedrawRequested => {
                        let ui = imgui.new_frame();
                        let frame = session.current_frame();
                        view.render(ui, frame, session.total_samples());
                        slider.render(ui, frame);

                        platform.prepare_render(ui, &window);
                        let draw_data = imgui.render();

                        unsafe {
                            gl_clear.clear_color(1.0, 1.0, 1.0, 1.0);
                            gl_clear.clear(glow::COLOR_BUFFER_BIT);
                        }

                        if let Err(e) = renderer.render(draw_data) {
                            error!("Rendering failed: {:?}", e);
                            std::process::exit(1);
                        }
                        if let Err(e) = surface.swap_buffers(&context) {
                            error!("Failed to swap buffers: {}", e);
                            std::process::exit(1);
                        }
                    }
                    WindowEvent::CloseRequested => {
                        session.handle_input(InputEvent::Quit);
                    }
                    WindowEvent::KeyboardInput { event: key, .. }
                        if key.state == ElementState::Pressed
                            && key.logical_key == Key::Named(NamedKey::Escape) =>
                    {
                        session.handle_input(InputEvent::Quit);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let logical = position.to_logical::<f32>(window.scale_factor());
                        session.handle_input(pointer.moved(logical.x, logical.y));
                        if pointer.is_held() {
                            needs_redraw = true;
                        }
                    }
                    WindowEvent::CursorLeft { .. } => pointer.left(),
                    WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state {
                        ElementState::Pressed => {
                            session.handle_input(pointer.pressed());
                            needs_redraw = true;
                        }
                        ElementState::Released => pointer.released(),
                    },
                    _ => {}
                },
                Event::LoopExiting => {
                    debug!("Event loop exiting after {} frames", session.frames_played());
                }
                _ => {}
            }

            platform.handle_event(imgui.io_mut(), &window, &event);
        })
        .map_err(|e| anyhow!("Event loop error: {}", e))?;

    Ok(())
}
