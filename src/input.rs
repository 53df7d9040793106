use thiserror::Error;
use winit::event::{ElementState, KeyboardInput, ModifiersState, MouseButton, VirtualKeyCode};

use crate::session::EditorCommand;
use crate::tools::Tool;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Enter a map {0}")]
    EmptyField(&'static str),
    #[error("Map {field} {text} is too large")]
    OutOfRange { field: &'static str, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Width,
    Height,
}

/// The width/height text fields used by "New". Only digits are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionFields {
    pub width: String,
    pub height: String,
    pub focus: Field,
}

impl DimensionFields {
    pub fn new(width: &str, height: &str) -> Self {
        Self {
            width: width.chars().filter(char::is_ascii_digit).collect(),
            height: height.chars().filter(char::is_ascii_digit).collect(),
            focus: Field::Width,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Width => &mut self.width,
            Field::Height => &mut self.height,
        }
    }

    pub fn push_digit(&mut self, digit: char) -> bool {
        if digit.is_ascii_digit() {
            self.focused_mut().push(digit);
            true
        } else {
            false
        }
    }

    pub fn backspace(&mut self) -> bool {
        self.focused_mut().pop().is_some()
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Field::Width => Field::Height,
            Field::Height => Field::Width,
        };
    }

    /// Zero is let through; the grid itself rejects it.
    pub fn parse(&self) -> Result<(u32, u32), InputError> {
        Ok((
            parse_field("width", &self.width)?,
            parse_field("height", &self.height)?,
        ))
    }

    pub fn describe(&self) -> String {
        let (width, height) = match self.focus {
            Field::Width => (format!("[{}]", self.width), self.height.clone()),
            Field::Height => (self.width.clone(), format!("[{}]", self.height)),
        };
        format!("New: {} x {}", width, height)
    }
}

fn parse_field(field: &'static str, text: &str) -> Result<u32, InputError> {
    if text.is_empty() {
        return Err(InputError::EmptyField(field));
    }
    text.parse().map_err(|_| InputError::OutOfRange {
        field,
        text: text.to_string(),
    })
}

/// What the event loop should do in response to an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    None,
    Command(EditorCommand),
    /// The dimension fields changed; only the title needs refreshing.
    FieldsChanged,
    Open,
    Save,
    SaveAs,
    Rejected(InputError),
}

pub struct InputHandler {
    modifiers: ModifiersState,
    pointer: Option<(f64, f64)>,
    fields: DimensionFields,
}

impl InputHandler {
    pub fn new(fields: DimensionFields) -> Self {
        Self {
            modifiers: ModifiersState::empty(),
            pointer: None,
            fields,
        }
    }

    pub fn fields(&self) -> &DimensionFields {
        &self.fields
    }

    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some((x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn handle_keyboard_input(&mut self, input: &KeyboardInput) -> InputAction {
        match input.virtual_keycode {
            Some(key_code) => self.handle_key(key_code, input.state),
            None => InputAction::None,
        }
    }

    pub fn handle_mouse_input(
        &mut self,
        state: ElementState,
        button: MouseButton,
        surface_size: (u32, u32),
    ) -> InputAction {
        if state != ElementState::Pressed || button != MouseButton::Left {
            return InputAction::None;
        }
        match self.pointer {
            Some((x, y)) => InputAction::Command(EditorCommand::Click {
                x,
                y,
                surface_width: surface_size.0,
                surface_height: surface_size.1,
            }),
            None => InputAction::None,
        }
    }

    pub fn handle_key(&mut self, key_code: VirtualKeyCode, state: ElementState) -> InputAction {
        if state != ElementState::Pressed {
            return InputAction::None;
        }
        let ctrl = self.modifiers.ctrl();
        let shift = self.modifiers.shift();

        match key_code {
            // File and map shortcuts
            VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => self.new_grid(),
            VirtualKeyCode::N if ctrl => self.new_grid(),
            VirtualKeyCode::O if ctrl => InputAction::Open,
            VirtualKeyCode::S if ctrl && shift => InputAction::SaveAs,
            VirtualKeyCode::S if ctrl => InputAction::Save,

            // Keyboard cursor
            VirtualKeyCode::Up => InputAction::Command(EditorCommand::MoveCursor(0, -1)),
            VirtualKeyCode::Down => InputAction::Command(EditorCommand::MoveCursor(0, 1)),
            VirtualKeyCode::Left => InputAction::Command(EditorCommand::MoveCursor(-1, 0)),
            VirtualKeyCode::Right => InputAction::Command(EditorCommand::MoveCursor(1, 0)),
            VirtualKeyCode::Space => InputAction::Command(EditorCommand::ToggleAtCursor),

            // Tool selection
            VirtualKeyCode::P if !ctrl => InputAction::Command(EditorCommand::SelectTool(Tool::Pen)),
            VirtualKeyCode::L if !ctrl => InputAction::Command(EditorCommand::SelectTool(Tool::Line)),
            VirtualKeyCode::R if !ctrl => InputAction::Command(EditorCommand::SelectTool(Tool::Rectangle)),
            VirtualKeyCode::Escape => InputAction::Command(EditorCommand::SelectTool(Tool::None)),

            // Dimension fields
            VirtualKeyCode::Tab => {
                self.fields.switch_focus();
                InputAction::FieldsChanged
            }
            VirtualKeyCode::Back => {
                if self.fields.backspace() {
                    InputAction::FieldsChanged
                } else {
                    InputAction::None
                }
            }
            // Anything else is a digit for the focused field, or ignored
            _ if !ctrl => match digit_for_key(key_code) {
                Some(digit) => {
                    self.fields.push_digit(digit);
                    InputAction::FieldsChanged
                }
                None => InputAction::None,
            },
            _ => InputAction::None,
        }
    }

    fn new_grid(&self) -> InputAction {
        match self.fields.parse() {
            Ok((width, height)) => InputAction::Command(EditorCommand::NewGrid { width, height }),
            Err(err) => InputAction::Rejected(err),
        }
    }
}

fn digit_for_key(key_code: VirtualKeyCode) -> Option<char> {
    match key_code {
        VirtualKeyCode::Key0 | VirtualKeyCode::Numpad0 => Some('0'),
        VirtualKeyCode::Key1 | VirtualKeyCode::Numpad1 => Some('1'),
        VirtualKeyCode::Key2 | VirtualKeyCode::Numpad2 => Some('2'),
        VirtualKeyCode::Key3 | VirtualKeyCode::Numpad3 => Some('3'),
        VirtualKeyCode::Key4 | VirtualKeyCode::Numpad4 => Some('4'),
        VirtualKeyCode::Key5 | VirtualKeyCode::Numpad5 => Some('5'),
        VirtualKeyCode::Key6 | VirtualKeyCode::Numpad6 => Some('6'),
        VirtualKeyCode::Key7 | VirtualKeyCode::Numpad7 => Some('7'),
        VirtualKeyCode::Key8 | VirtualKeyCode::Numpad8 => Some('8'),
        VirtualKeyCode::Key9 | VirtualKeyCode::Numpad9 => Some('9'),
        _ => None,
    }
}
