use clap::Parser;
use std::path::PathBuf;
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use map_editor::config::EditorConfig;
use map_editor::dialogs;
use map_editor::graphics::GraphicsRenderer;
use map_editor::input::{DimensionFields, InputAction, InputHandler};
use map_editor::render::{self, Canvas};
use map_editor::session::{EditingSession, EditorCommand};

const APP_NAME: &str = "Map Editor";

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Map file to open at start-up
    map_file: Option<PathBuf>,
    /// Editor settings (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = EditorConfig::load(args.config.as_deref())?;
    let palette = config.palette();

    let mut session = EditingSession::new();
    if let Some(path) = args.map_file {
        if let Err(err) = session.apply(EditorCommand::Open(path)) {
            dialogs::show_error(APP_NAME, &err.to_string());
        }
    }

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(APP_NAME)
        .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
        .with_resizable(true)
        .build(&event_loop)?;

    let mut graphics = GraphicsRenderer::new(&window)?;
    let mut input_handler = InputHandler::new(DimensionFields::new(
        &config.default_width,
        &config.default_height,
    ));

    let mut redraw_requested = true;
    let mut title = String::new();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent { event, .. } => {
                let action = match event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                        InputAction::None
                    }
                    WindowEvent::Resized(size) => {
                        graphics.resize(size.width, size.height);
                        redraw_requested = true;
                        InputAction::None
                    }
                    WindowEvent::ModifiersChanged(modifiers) => {
                        input_handler.set_modifiers(modifiers);
                        InputAction::None
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input_handler.set_pointer(position.x, position.y);
                        InputAction::None
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input_handler.clear_pointer();
                        InputAction::None
                    }
                    WindowEvent::KeyboardInput { input, .. } => input_handler.handle_keyboard_input(&input),
                    WindowEvent::MouseInput { state, button, .. } => {
                        input_handler.handle_mouse_input(state, button, graphics.size())
                    }
                    _ => InputAction::None,
                };

                if handle_action(action, &mut session, &config) {
                    redraw_requested = true;
                }
            }
            Event::MainEventsCleared => {
                let new_title = format!(
                    "{} - {}",
                    session.title(&config.default_file_name),
                    input_handler.fields().describe()
                );
                if new_title != title {
                    window.set_title(&new_title);
                    title = new_title;
                }

                if redraw_requested {
                    window.request_redraw();
                    redraw_requested = false;
                }
            }
            Event::RedrawRequested(_) => {
                if let Err(err) = render::render_grid(&mut graphics, session.grid(), &palette) {
                    log::error!("Render error: {}", err);
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}

/// Runs one input action against the session. Returns whether to redraw.
fn handle_action(action: InputAction, session: &mut EditingSession, config: &EditorConfig) -> bool {
    let command = match action {
        InputAction::None | InputAction::FieldsChanged => return false,
        InputAction::Rejected(err) => {
            dialogs::show_error(APP_NAME, &err.to_string());
            return false;
        }
        InputAction::Command(command) => command,
        InputAction::Open => match dialogs::pick_map_to_open(session.file_path()) {
            Some(path) => EditorCommand::Open(path),
            None => return false,
        },
        // Nothing to save yet; let the session report it before any dialog opens.
        InputAction::Save | InputAction::SaveAs if session.grid().is_empty() => EditorCommand::Save,
        InputAction::Save if session.file_path().is_some() => EditorCommand::Save,
        InputAction::Save | InputAction::SaveAs => {
            match dialogs::pick_map_to_save(session.file_path(), &config.default_file_name) {
                Some(path) => EditorCommand::SaveAs(path),
                None => return false,
            }
        }
    };

    match session.apply(command) {
        Ok(redraw) => redraw,
        Err(err) => {
            dialogs::show_error(APP_NAME, &err.to_string());
            false
        }
    }
}
