//! Orbitone - a perlin-orbit FM drone
//!
//! Four noise-driven points circle the screen center; their distances
//! modulate a six-oscillator FM synth while each point radiates a fan of
//! colored beams. Sound and image move together because they read the same
//! modulation snapshot.

mod audio;
mod cli;
mod dynamics;
mod modulation;
mod noise;
mod orbit;
mod params;
mod radial;
mod rendering;
mod synth;

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use clap::Parser;

use audio::AudioSystem;
use cli::Args;
use modulation::mix;
use orbit::OrbitSystem;
use params::*;
use radial::{beam_colors, BeamMesh};
use rendering::{BeamDraw, BlendKind, RenderSystem};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    orbit: OrbitSystem,
    mesh: BeamMesh,
    audio: Option<AudioSystem>,

    // Configuration
    modulation_params: ModulationParams,
    render_config: RenderConfig,
    mute: bool,
}

impl App {
    fn new(args: &Args) -> Self {
        let render_config = RenderConfig::default();
        let orbit = OrbitSystem::new(OrbitParams::default(), render_config.center(), args.seed);
        let mesh = BeamMesh::new(BeamParams::default());

        Self {
            window: None,
            render_system: None,
            orbit,
            mesh,
            audio: None,
            modulation_params: ModulationParams::default(),
            render_config,
            mute: args.mute,
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Orbitone")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        // Initialize rendering system
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.mesh.vertex_count(),
            &self.render_config,
        ))
        .unwrap();

        // Initialize audio system; keep running visual-only if it fails
        if !self.mute {
            match AudioSystem::new(SynthParams::default(), CompressorParams::default()) {
                Ok(audio) => self.audio = Some(audio),
                Err(err) => eprintln!("Audio offline: {}", err),
            }
        }

        println!("\nOrbitone is running!");
        println!("Press ESC to quit\n");

        self.window = Some(window);
        self.render_system = Some(render_system);
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

impl App {
    /// Advance the simulation and render a single frame
    fn render_frame(&mut self) {
        let Some(ref render_system) = self.render_system else {
            return;
        };

        // Advance orbits and derive this frame's modulation snapshot
        let points = *self.orbit.update();
        let snapshot = mix(&points, &self.modulation_params);

        // Hand the snapshot to the audio thread
        if let Some(audio) = &self.audio {
            audio.publish(snapshot);
        }

        // Rebuild and upload the beam mesh
        let colors = beam_colors(snapshot.amt);
        self.mesh.rebuild(&points, &colors);
        render_system.update_vertices(&self.mesh.vertices);

        // Layering: clear to point 3's color, glow points 1 and 2,
        // overwrite with point 3, glow point 4 on top
        let draws = [
            BeamDraw {
                range: self.mesh.point_range(0),
                blend: BlendKind::Additive,
            },
            BeamDraw {
                range: self.mesh.point_range(1),
                blend: BlendKind::Additive,
            },
            BeamDraw {
                range: self.mesh.point_range(2),
                blend: BlendKind::Opaque,
            },
            BeamDraw {
                range: self.mesh.point_range(3),
                blend: BlendKind::Additive,
            },
        ];

        if let Err(e) = render_system.render(colors[2], &draws) {
            eprintln!("Render error: {:?}", e);
        }
    }
}

fn main() {
    let args = Args::parse();

    println!("Orbitone - perlin-orbit FM drone");
    println!("Initializing systems...\n");

    let mut app = App::new(&args);
    let event_loop = EventLoop::new().unwrap();
    let _ = event_loop.run_app(&mut app);
}
