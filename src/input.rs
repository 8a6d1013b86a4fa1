use crate::focus::FocusDirection;
use glam::Vec2;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{Key, NamedKey};

/// Pointer device as seen by the drag controller.
pub trait PointerSource {
    /// False once the device stops tracking, e.g. the cursor left the window.
    fn has_active_pointer(&self) -> bool;
    /// Pointer in normalized device coordinates, both axes in `[-1, 1]`, y up.
    fn pointer_position(&self) -> Vec2;
    fn aspect_ratio(&self) -> f32;
}

/// Window-pixel cursor tracking converted to device coordinates.
#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    window_size: PhysicalSize<u32>,
    cursor_px: Option<Vec2>,
}

impl PointerState {
    pub fn new(window_size: PhysicalSize<u32>) -> Self {
        Self { window_size, cursor_px: None }
    }

    pub fn window_size(&self) -> PhysicalSize<u32> {
        self.window_size
    }

    pub fn set_window_size(&mut self, size: PhysicalSize<u32>) {
        self.window_size = size;
    }

    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor_px = Some(Vec2::new(x, y));
    }

    pub fn clear_cursor(&mut self) {
        self.cursor_px = None;
    }

    pub fn cursor_pixels(&self) -> Option<Vec2> {
        self.cursor_px
    }

    /// Pointer in the aspect-corrected 2D overlay space: x spans
    /// `[-aspect, aspect]`, y spans `[-1, 1]`.
    pub fn overlay_position(&self) -> Option<Vec2> {
        self.has_active_pointer().then(|| to_overlay(self.pointer_position(), self.aspect_ratio()))
    }
}

impl PointerSource for PointerState {
    fn has_active_pointer(&self) -> bool {
        self.cursor_px.is_some() && self.window_size.width > 0 && self.window_size.height > 0
    }

    fn pointer_position(&self) -> Vec2 {
        let Some(cursor) = self.cursor_px else {
            return Vec2::ZERO;
        };
        if self.window_size.width == 0 || self.window_size.height == 0 {
            return Vec2::ZERO;
        }
        let ndc_x = (cursor.x / self.window_size.width as f32) * 2.0 - 1.0;
        let ndc_y = 1.0 - (cursor.y / self.window_size.height as f32) * 2.0;
        Vec2::new(ndc_x, ndc_y).clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
    }

    fn aspect_ratio(&self) -> f32 {
        if self.window_size.height == 0 {
            1.0
        } else {
            self.window_size.width as f32 / self.window_size.height as f32
        }
    }
}

/// Maps device coordinates into the overlay space the ghost visual lives in.
pub fn to_overlay(ndc: Vec2, aspect_ratio: f32) -> Vec2 {
    Vec2::new(ndc.x * aspect_ratio, ndc.y)
}

/// Per-frame input collected from window events.
pub struct Input {
    pointer: PointerState,
    shift_held: bool,
    tab_presses: Vec<FocusDirection>,
    escape_pressed: bool,
    left_pressed: bool,
    left_clicked: bool,
    left_released: bool,
}

impl Input {
    pub fn new(window_size: PhysicalSize<u32>) -> Self {
        Self {
            pointer: PointerState::new(window_size),
            shift_held: false,
            tab_presses: Vec::new(),
            escape_pressed: false,
            left_pressed: false,
            left_clicked: false,
            left_released: false,
        }
    }

    pub fn push(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Key { key, pressed } => self.apply_key(&key, pressed),
            InputEvent::Modifiers { shift } => self.shift_held = shift,
            InputEvent::MouseButton { button: MouseButton::Left, pressed } => {
                if pressed {
                    self.left_clicked = true;
                } else if self.left_pressed {
                    self.left_released = true;
                }
                self.left_pressed = pressed;
            }
            InputEvent::MouseButton { .. } => {}
            InputEvent::CursorPos { x, y } => self.pointer.set_cursor(x, y),
            InputEvent::CursorLeft => self.pointer.clear_cursor(),
            InputEvent::Resized { width, height } => {
                self.pointer.set_window_size(PhysicalSize::new(width, height));
            }
            InputEvent::Other => {}
        }
    }

    fn apply_key(&mut self, key: &Key, pressed: bool) {
        match key {
            Key::Named(NamedKey::Shift) => self.shift_held = pressed,
            Key::Named(NamedKey::Tab) if pressed => {
                self.tab_presses.push(FocusDirection::from_shift(self.shift_held));
            }
            Key::Named(NamedKey::Escape) if pressed => self.escape_pressed = true,
            _ => {}
        }
    }

    pub fn clear_frame(&mut self) {
        self.tab_presses.clear();
        self.escape_pressed = false;
        self.left_clicked = false;
        self.left_released = false;
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn take_tab_presses(&mut self) -> Vec<FocusDirection> {
        std::mem::take(&mut self.tab_presses)
    }

    pub fn take_escape(&mut self) -> bool {
        std::mem::replace(&mut self.escape_pressed, false)
    }

    pub fn take_left_click(&mut self) -> bool {
        std::mem::replace(&mut self.left_clicked, false)
    }

    pub fn take_left_release(&mut self) -> bool {
        std::mem::replace(&mut self.left_released, false)
    }

    pub fn left_held(&self) -> bool {
        self.left_pressed
    }

    pub fn shift_held(&self) -> bool {
        self.shift_held
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, pressed: bool },
    Modifiers { shift: bool },
    MouseButton { button: MouseButton, pressed: bool },
    CursorPos { x: f32, y: f32 },
    CursorLeft,
    Resized { width: u32, height: u32 },
    Other,
}

impl InputEvent {
    pub fn from_window_event(ev: &WindowEvent) -> Self {
        match ev {
            WindowEvent::CursorMoved { position, .. } => {
                InputEvent::CursorPos { x: position.x as f32, y: position.y as f32 }
            }
            WindowEvent::CursorLeft { .. } => InputEvent::CursorLeft,
            WindowEvent::MouseInput { state, button, .. } => {
                InputEvent::MouseButton { button: *button, pressed: *state == ElementState::Pressed }
            }
            WindowEvent::KeyboardInput { event, .. } => InputEvent::Key {
                key: event.logical_key.clone(),
                pressed: event.state == ElementState::Pressed,
            },
            WindowEvent::ModifiersChanged(modifiers) => {
                InputEvent::Modifiers { shift: modifiers.state().shift_key() }
            }
            WindowEvent::Resized(size) => InputEvent::Resized { width: size.width, height: size.height },
            _ => InputEvent::Other,
        }
    }
}
