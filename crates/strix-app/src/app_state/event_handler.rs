//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent as WinitKeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use strix_engine::input::{
    KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::core::{logical_view, StrixApp};

impl ApplicationHandler for StrixApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
            return;
        }

        self.update_window_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                if let Some(shell) = &mut self.shell {
                    shell.shutdown();
                }
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    let scale_factor = self
                        .window
                        .as_ref()
                        .map(|w| w.scale_factor())
                        .unwrap_or(1.0);
                    if let Some(shell) = &mut self.shell {
                        shell.handle_view_resize(logical_view(size, scale_factor), scale_factor);
                    }
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let size = self.window.as_ref().map(|w| w.inner_size());
                if let (Some(size), Some(shell)) = (size, self.shell.as_mut()) {
                    if size.width > 0 && size.height > 0 {
                        shell.handle_view_resize(logical_view(size, scale_factor), scale_factor);
                    }
                }
            }

            WindowEvent::Focused(focused) => {
                if let Some(host) = &self.host {
                    host.set_focused(focused);
                }
                if let Some(shell) = &mut self.shell {
                    shell.handle_focus_changed(focused);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_pos = (position.x, position.y);
                let (x, y) = self.cursor_logical();
                let modifiers = self.engine_modifiers();
                if let Some(shell) = &mut self.shell {
                    shell.forward_mouse_event(MouseEvent {
                        kind: MouseEventKind::Moved,
                        x,
                        y,
                        modifiers,
                    });
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_input(state, button);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.handle_mouse_wheel(delta);
            }

            WindowEvent::ModifiersChanged(new_modifiers) => {
                self.modifiers = new_modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_keyboard_input(event);
            }

            WindowEvent::RedrawRequested => {
                if let Some(shell) = &mut self.shell {
                    if let Err(e) = shell.render_active() {
                        tracing::error!("Render error: {e}");
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let done = self
            .shell
            .as_ref()
            .is_some_and(|s| s.window_close_requested() || s.is_shut_down());
        if done {
            if let Some(shell) = &mut self.shell {
                shell.shutdown();
            }
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl StrixApp {
    /// Last cursor position in logical view coordinates.
    fn cursor_logical(&self) -> (i32, i32) {
        let scale_factor = self
            .window
            .as_ref()
            .map(|w| w.scale_factor())
            .unwrap_or(1.0);
        (
            (self.cursor_pos.0 / scale_factor).round() as i32,
            (self.cursor_pos.1 / scale_factor).round() as i32,
        )
    }

    fn engine_modifiers(&self) -> Modifiers {
        Modifiers {
            shift: self.modifiers.shift_key(),
            control: self.modifiers.control_key(),
            alt: self.modifiers.alt_key(),
            meta: self.modifiers.super_key(),
        }
    }

    fn handle_mouse_input(&mut self, state: ElementState, button: winit::event::MouseButton) {
        let button = match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            winit::event::MouseButton::Right => MouseButton::Right,
            _ => return,
        };
        let kind = match state {
            ElementState::Pressed => MouseEventKind::Down(button),
            ElementState::Released => MouseEventKind::Up(button),
        };
        let (x, y) = self.cursor_logical();
        let modifiers = self.engine_modifiers();
        if let Some(shell) = &mut self.shell {
            shell.forward_mouse_event(MouseEvent {
                kind,
                x,
                y,
                modifiers,
            });
        }
    }

    fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        // One wheel line scrolls 40 logical pixels.
        let (delta_x, delta_y) = match delta {
            MouseScrollDelta::LineDelta(x, y) => ((x * 40.0) as i32, (y * 40.0) as i32),
            MouseScrollDelta::PixelDelta(pos) => (pos.x as i32, pos.y as i32),
        };
        let (x, y) = self.cursor_logical();
        let modifiers = self.engine_modifiers();
        if let Some(shell) = &mut self.shell {
            shell.forward_mouse_event(MouseEvent {
                kind: MouseEventKind::Scroll { delta_x, delta_y },
                x,
                y,
                modifiers,
            });
        }
    }

    /// Process a keyboard input event: shell shortcuts first, then the
    /// active browser.
    fn handle_keyboard_input(&mut self, event: WinitKeyEvent) {
        let is_press = event.state == ElementState::Pressed;

        if is_press && self.modifiers.control_key() && self.dispatch_shortcut(&event.logical_key) {
            return;
        }

        let modifiers = self.engine_modifiers();
        let Some(shell) = &mut self.shell else {
            return;
        };

        match &event.logical_key {
            Key::Character(text) => {
                let Some(c) = text.chars().next() else {
                    return;
                };
                let kind = if is_press {
                    KeyEventKind::Down
                } else {
                    KeyEventKind::Up
                };
                shell.forward_key_event(KeyEvent {
                    kind,
                    character: None,
                    key_code: c as u32,
                    modifiers,
                });
                // Down, then the character it types. Control and alt
                // chords do not type.
                if is_press && !modifiers.control && !modifiers.alt {
                    shell.forward_key_event(KeyEvent {
                        kind: KeyEventKind::Char,
                        character: Some(c),
                        key_code: c as u32,
                        modifiers,
                    });
                }
            }
            Key::Named(named) => {
                let Some(key_code) = named_key_code(*named) else {
                    return;
                };
                let kind = if is_press {
                    KeyEventKind::Down
                } else {
                    KeyEventKind::Up
                };
                shell.forward_key_event(KeyEvent {
                    kind,
                    character: None,
                    key_code,
                    modifiers,
                });
                if is_press {
                    if let Some(c) = named_key_char(*named) {
                        shell.forward_key_event(KeyEvent {
                            kind: KeyEventKind::Char,
                            character: Some(c),
                            key_code,
                            modifiers,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    /// Ctrl-modified tab shortcuts. Returns true when the key was
    /// consumed by the shell.
    pub(super) fn dispatch_shortcut(&mut self, key: &Key) -> bool {
        let Some(shell) = &mut self.shell else {
            return false;
        };
        match key {
            Key::Character(c) => match c.as_str() {
                "t" => {
                    let homepage = shell.settings().homepage.clone();
                    let index = shell.create_tab(&homepage);
                    if index >= 0 {
                        if let Some(tab_id) = shell.tab_id_at(index as usize) {
                            shell.surface_ready(tab_id);
                        }
                    }
                    true
                }
                "w" => {
                    if let Some(index) = shell.active_index() {
                        shell.close_tab(index);
                    }
                    true
                }
                "r" => {
                    shell.reload();
                    true
                }
                _ => false,
            },
            Key::Named(NamedKey::Tab) => {
                let count = shell.tab_count();
                if count > 1 {
                    if let Some(active) = shell.active_index() {
                        shell.switch_tab((active + 1) % count);
                    }
                }
                true
            }
            _ => false,
        }
    }
}

/// Windows-style virtual key codes for the named keys the session
/// forwards. Unlisted keys are dropped.
fn named_key_code(key: NamedKey) -> Option<u32> {
    let code = match key {
        NamedKey::Backspace => 0x08,
        NamedKey::Tab => 0x09,
        NamedKey::Enter => 0x0d,
        NamedKey::Escape => 0x1b,
        NamedKey::Space => 0x20,
        NamedKey::PageUp => 0x21,
        NamedKey::PageDown => 0x22,
        NamedKey::End => 0x23,
        NamedKey::Home => 0x24,
        NamedKey::ArrowLeft => 0x25,
        NamedKey::ArrowUp => 0x26,
        NamedKey::ArrowRight => 0x27,
        NamedKey::ArrowDown => 0x28,
        NamedKey::Delete => 0x2e,
        _ => return None,
    };
    Some(code)
}

/// Characters produced by named keys that type something.
fn named_key_char(key: NamedKey) -> Option<char> {
    match key {
        NamedKey::Enter => Some('\r'),
        NamedKey::Tab => Some('\t'),
        NamedKey::Space => Some(' '),
        _ => None,
    }
}
