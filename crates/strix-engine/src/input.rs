//! Input events forwarded to a browser host.
//!
//! Coordinates are logical units relative to the browser view's
//! top-left corner; the engine applies the device scale itself.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Moved,
    Scroll { delta_x: i32, delta_y: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: i32,
    pub y: i32,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn new(kind: MouseEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Down,
    Up,
    Char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    /// Unicode character for `Char` events, if any.
    pub character: Option<char>,
    /// Platform-neutral key code for `Down`/`Up` events.
    pub key_code: u32,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn character(c: char) -> Self {
        Self {
            kind: KeyEventKind::Char,
            character: Some(c),
            key_code: 0,
            modifiers: Modifiers::default(),
        }
    }
}
