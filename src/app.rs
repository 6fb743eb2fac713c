//! Application shell: window, event dispatch and the frame driver
//!
//! Owns the winit event loop and the application state. Events arrive one
//! at a time on the main thread and each handler runs to completion, so no
//! locking is needed anywhere. The async model and font loads report
//! through one-shot channels polled between frames; until they land the
//! scene simply renders without them.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use cgmath::{Deg, Point3, Rad, Vector3};
use futures::channel::oneshot;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::assets::{self, AssetError, LoadedModel, TextureLibrary};
use crate::forest::{
    animation::{self, FrameClock},
    builder::{self, SceneHandles},
    interaction::{self, MoveDirection, TextHighlight},
};
use crate::gfx::{
    camera::rig::{CameraMode, CameraRig},
    picking,
    rendering::RenderEngine,
    scene::Scene,
    text::FontAtlas,
};

/// Pixel size glyphs are rasterized at before being scaled to banner size
const FONT_RASTER_SIZE: f32 = 48.0;

const WINDOW_WIDTH: u32 = 1200;
const WINDOW_HEIGHT: u32 = 800;

/// In-flight background loads, drained as they complete
struct PendingLoads {
    font: Option<oneshot::Receiver<Result<FontAtlas, AssetError>>>,
    panda1: Option<oneshot::Receiver<Result<LoadedModel, AssetError>>>,
    panda2: Option<oneshot::Receiver<Result<LoadedModel, AssetError>>>,
}

pub struct ForestApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    handles: SceneHandles,
    clock: FrameClock,
    text_highlight: TextHighlight,
    /// Index of the movable panda; `None` until its load completes, and any
    /// movement key pressed before then is a no-op
    movable_panda: Option<usize>,
    pending: PendingLoads,
    cursor_position: PhysicalPosition<f64>,
}

impl ForestApp {
    /// Builds the scene and kicks off the background asset loads
    pub async fn new() -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        let aspect = WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32;
        let mut scene = Scene::new(CameraRig::new(aspect), builder::forest_lights());

        let asset_root = PathBuf::from("assets");
        let mut textures = TextureLibrary::load(&asset_root);
        let mut rng = rand::rng();
        let handles = builder::build_forest(&mut scene, &mut textures, &mut rng);

        // The model is loaded twice on purpose: two independent instances
        let model_path = asset_root.join("model/panda/panda.obj");
        let pending = PendingLoads {
            font: Some(assets::spawn_font_load(
                asset_root.join("fonts/gentilis_bold.ttf"),
                FONT_RASTER_SIZE,
            )),
            panda1: Some(assets::spawn_model_load(model_path.clone())),
            panda2: Some(assets::spawn_model_load(model_path)),
        };

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                scene,
                handles,
                clock: FrameClock::new(),
                text_highlight: TextHighlight::new(),
                movable_panda: None,
                pending,
                cursor_position: PhysicalPosition::new(0.0, 0.0),
            },
        })
    }

    /// Runs the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop failed")?;
        Ok(())
    }
}

impl AppState {
    /// Splices any completed background loads into the scene
    ///
    /// Runs only once the GPU context exists, so freshly arrived objects can
    /// be uploaded immediately. Failed loads log a warning and leave the
    /// rest of the scene untouched.
    fn poll_pending_loads(&mut self) {
        let Some(engine) = self.render_engine.as_ref() else {
            return;
        };

        if let Some(mut receiver) = self.pending.font.take() {
            match receiver.try_recv() {
                Ok(None) => self.pending.font = Some(receiver), // still loading
                Ok(Some(Ok(atlas))) => {
                    let index = builder::add_welcome_text(&mut self.scene, &atlas);
                    if let Some(object) = self.scene.get_object_mut(index) {
                        object.init_gpu_resources(engine.device());
                    }
                    self.scene.sync_materials(engine.device(), engine.queue());
                    log::info!("Welcome banner added to scene");
                }
                Ok(Some(Err(err))) => log::warn!("Welcome banner unavailable: {}", err),
                Err(_) => log::warn!("Font loader terminated without a result"),
            }
        }

        if let Some(mut receiver) = self.pending.panda1.take() {
            match receiver.try_recv() {
                Ok(None) => self.pending.panda1 = Some(receiver),
                Ok(Some(Ok(model))) => {
                    let index = builder::add_panda(
                        &mut self.scene,
                        &model,
                        "panda1",
                        Vector3::new(-8.0, 11.0, 20.0),
                        Deg(90.0),
                    );
                    if let Some(object) = self.scene.get_object_mut(index) {
                        object.init_gpu_resources(engine.device());
                    }
                    self.scene.sync_materials(engine.device(), engine.queue());
                    // Movement keys act from this point on
                    self.movable_panda = Some(index);
                    log::info!("panda1 added to scene");
                }
                Ok(Some(Err(err))) => log::warn!("panda1 unavailable: {}", err),
                Err(_) => log::warn!("panda1 loader terminated without a result"),
            }
        }

        if let Some(mut receiver) = self.pending.panda2.take() {
            match receiver.try_recv() {
                Ok(None) => self.pending.panda2 = Some(receiver),
                Ok(Some(Ok(model))) => {
                    let index = builder::add_panda(
                        &mut self.scene,
                        &model,
                        "panda2",
                        Vector3::new(-8.0, 11.0, 0.0),
                        Deg(45.0),
                    );
                    if let Some(object) = self.scene.get_object_mut(index) {
                        object.init_gpu_resources(engine.device());
                    }
                    self.scene.sync_materials(engine.device(), engine.queue());
                    log::info!("panda2 added to scene");
                }
                Ok(Some(Err(err))) => log::warn!("panda2 unavailable: {}", err),
                Err(_) => log::warn!("panda2 loader terminated without a result"),
            }
        }
    }

    fn handle_key(&mut self, key_code: KeyCode, event_loop: &ActiveEventLoop) {
        match key_code {
            KeyCode::Escape => event_loop.exit(),
            // Cycle camera mode, resetting whichever fixed camera goes stale
            KeyCode::Space => self.scene.camera_rig.cycle(),
            KeyCode::KeyW => self.move_panda(MoveDirection::Forward),
            KeyCode::KeyA => self.move_panda(MoveDirection::Left),
            KeyCode::KeyS => self.move_panda(MoveDirection::Backward),
            KeyCode::KeyD => self.move_panda(MoveDirection::Right),
            _ => (),
        }
    }

    /// One unit step per keypress; silently ignored until the model loads
    fn move_panda(&mut self, direction: MoveDirection) {
        interaction::apply_movement(&mut self.scene, self.movable_panda, direction);
    }

    /// Hit-tests the click against the scene and toggles the banner color
    ///
    /// However many intersections the ray reports, a single click flips the
    /// toggle at most once.
    fn handle_pointer_press(&mut self) {
        let Some(engine) = self.render_engine.as_ref() else {
            return;
        };

        let (width, height) = engine.get_surface_size();
        let hits = picking::pick_all(
            (self.cursor_position.x as f32, self.cursor_position.y as f32),
            (width as f32, height as f32),
            self.scene.camera_rig.active(),
            &self.scene,
        );

        if hits.iter().any(|hit| hit.name == builder::WELCOME_TEXT_NAME) {
            let color = self.text_highlight.flip();
            if let Some(material) = self
                .scene
                .material_manager
                .get_material_mut(builder::WELCOME_TEXT_NAME)
            {
                material.set_base_color(color);
            }
            self.scene.sync_materials(engine.device(), engine.queue());
            log::debug!(
                "Welcome banner toggled, highlighted: {}",
                self.text_highlight.is_highlighted()
            );
        }
    }

    /// The per-frame update: advance the clock, move the sun pair and its
    /// light, drive the orbiting camera, then draw
    fn advance_frame(&mut self) {
        let Some(engine) = self.render_engine.as_mut() else {
            return;
        };

        let t = self.clock.tick();
        let (x, z) = animation::orbit_position(t, animation::SUN_ORBIT_RADIUS);

        if let Some(sun) = self.scene.get_object_mut(self.handles.sun) {
            sun.position = Vector3::new(x, animation::SUN_HEIGHT, z);
            sun.rotate_y(Rad(animation::SUN_SPIN_STEP));
        }
        if let Some(ring) = self.scene.get_object_mut(self.handles.sun_ring) {
            ring.position = Vector3::new(x, animation::SUN_HEIGHT, z);
            ring.rotate_y(Rad(-animation::SUN_SPIN_STEP));
            ring.rotate_z(Rad(-animation::SUN_SPIN_STEP));
        }
        self.scene.lights.spot.position = Vector3::new(x, animation::SUN_LIGHT_HEIGHT, z);

        if self.scene.camera_rig.mode == CameraMode::Orbiting {
            let (cx, cz) = animation::orbit_position(t, animation::CAMERA_ORBIT_RADIUS);
            let camera = &mut self.scene.camera_rig.orbiting;
            camera.set_eye(Point3::new(cx, animation::CAMERA_ORBIT_HEIGHT, cz));
            camera.look_at(Point3::new(0.0, 0.0, 0.0));
        }

        self.scene.update();
        engine.update(self.scene.camera_rig.active().uniform, &self.scene.lights);
        self.scene.sync_transforms(engine.queue());
        engine.render_frame(&self.scene);
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("Panda Forest")
                .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            self.scene.camera_rig.resize(width, height);

            let shadow_map_size = self.scene.lights.spot.shadow_map_size;
            let window_clone = window_handle.clone();
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height, shadow_map_size).await
            });

            self.scene
                .init_gpu_resources(renderer.device(), renderer.queue());

            self.render_engine = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if self.render_engine.is_none() {
            return;
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.handle_key(key_code, event_loop);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_position = position;
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.handle_pointer_press();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene.camera_rig.resize(width, height);
                if let Some(engine) = self.render_engine.as_mut() {
                    engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.advance_frame();
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        self.scene.camera_rig.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.poll_pending_loads();

        // Unconditional re-schedule: the animation never stops on its own
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
