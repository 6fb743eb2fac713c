use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseScrollDelta},
    window::Window,
};

use super::view_camera::ViewCamera;

/// Mouse-driven orbit control helper
///
/// Drag rotates the bound camera around its aim point, the wheel zooms. The
/// rig rebinds a fresh controller whenever the active camera changes, so
/// drag state never leaks from one camera to the next.
pub struct OrbitController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    is_mouse_pressed: bool,
}

impl OrbitController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            is_mouse_pressed: false,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut ViewCamera,
    ) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.dolly(scroll_amount * self.zoom_speed);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    camera.orbit(
                        delta.0 as f32 * self.rotate_speed,
                        delta.1 as f32 * self.rotate_speed,
                    );
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }
}
