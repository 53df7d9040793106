use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::grid::{GridError, GridState};
use crate::layout;
use crate::map_file::{self, MapFileError};
use crate::tools::Tool;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("{0}")]
    Grid(#[from] GridError),
    #[error("{0}")]
    MapFile(#[from] MapFileError),
    #[error("The map has not been saved yet; use Save As")]
    NoFilePath,
    #[error("There is no map to save; create one with New first")]
    EmptyMap,
}

/// Everything the editor can be asked to do. Input handling produces these;
/// the session applies them.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    NewGrid { width: u32, height: u32 },
    ToggleCell { x: u32, y: u32 },
    Click { x: f64, y: f64, surface_width: u32, surface_height: u32 },
    MoveCursor(i32, i32),
    ToggleAtCursor,
    SelectTool(Tool),
    Open(PathBuf),
    Save,
    SaveAs(PathBuf),
}

/// The map being edited, where it lives on disk and the active tool.
#[derive(Debug, Default)]
pub struct EditingSession {
    grid: GridState,
    file_path: Option<PathBuf>,
    tool: Tool,
    modified: bool,
}

impl EditingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Runs one command. Returns whether the map needs redrawing.
    pub fn apply(&mut self, command: EditorCommand) -> Result<bool, SessionError> {
        match command {
            EditorCommand::NewGrid { width, height } => {
                self.new_grid(width, height)?;
                Ok(true)
            }
            EditorCommand::ToggleCell { x, y } => {
                self.grid.toggle_cell_at(x, y)?;
                self.modified = true;
                Ok(true)
            }
            EditorCommand::Click { x, y, surface_width, surface_height } => {
                Ok(self.click(x, y, surface_width, surface_height)?)
            }
            EditorCommand::MoveCursor(dx, dy) => {
                // Only the cursor outline changes; no edit
                self.grid.move_cursor(dx, dy);
                Ok(!self.grid.is_empty())
            }
            EditorCommand::ToggleAtCursor => {
                if self.grid.is_empty() {
                    return Ok(false);
                }
                self.grid.toggle_cell()?;
                self.modified = true;
                Ok(true)
            }
            EditorCommand::SelectTool(tool) => {
                log::debug!("Tool: {}", tool.label());
                self.tool = tool;
                Ok(false) // title only
            }
            EditorCommand::Open(path) => {
                self.open(path)?;
                Ok(true)
            }
            EditorCommand::Save => {
                self.save()?;
                Ok(false)
            }
            EditorCommand::SaveAs(path) => {
                self.save_as(path)?;
                Ok(false)
            }
        }
    }

    /// Replaces the map with an all-off `width * height` map. The file path
    /// is kept so Save still targets the last opened or saved file.
    pub fn new_grid(&mut self, width: u32, height: u32) -> Result<(), GridError> {
        self.grid = GridState::new(width, height)?;
        self.modified = false;
        log::info!("New map ({}, {})", width, height);
        Ok(())
    }

    pub fn click(&mut self, x: f64, y: f64, surface_width: u32, surface_height: u32) -> Result<bool, GridError> {
        let picked = layout::pick_cell(
            x,
            y,
            surface_width,
            surface_height,
            self.grid.width(),
            self.grid.height(),
        );

        match picked {
            Some((cell_x, cell_y)) => {
                let changed = self.tool.apply_click(&mut self.grid, cell_x, cell_y)?;
                self.modified |= changed;
                Ok(changed)
            }
            None => {
                log::debug!("Click at ({:.0}, {:.0}) is outside the map", x, y);
                Ok(false)
            }
        }
    }

    /// Loads a map file. The current map is only replaced once the whole file
    /// has parsed.
    pub fn open<P: Into<PathBuf>>(&mut self, path: P) -> Result<(), MapFileError> {
        let path = path.into();
        // Parse into a new grid first so a bad file leaves the session untouched
        let grid = map_file::read_map(&path)?;

        log::info!("Opened {} ({}, {})", path.display(), grid.width(), grid.height());
        self.grid = grid;
        self.file_path = Some(path);
        self.modified = false;
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), SessionError> {
        // A 0x0 map would be written but could never be opened again.
        if self.grid.is_empty() {
            return Err(SessionError::EmptyMap);
        }
        let path = self.file_path.clone().ok_or(SessionError::NoFilePath)?;
        map_file::write_map(&path, &self.grid)?;
        log::info!("Saved {}", path.display());
        self.modified = false;
        Ok(())
    }

    pub fn save_as<P: Into<PathBuf>>(&mut self, path: P) -> Result<(), SessionError> {
        if self.grid.is_empty() {
            return Err(SessionError::EmptyMap);
        }
        let path = path.into();
        map_file::write_map(&path, &self.grid)?;
        log::info!("Saved {}", path.display());
        self.file_path = Some(path);
        self.modified = false;
        Ok(())
    }

    /// Window title: file name, unsaved marker, map size and active tool.
    pub fn title(&self, untitled: &str) -> String {
        let name = self
            .file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| untitled.to_string());
        let marker = if self.modified { "*" } else { "" };

        format!(
            "{}{} - Map Size = ({}, {}) - Tool: {}",
            name,
            marker,
            self.grid.width(),
            self.grid.height(),
            self.tool.label()
        )
    }
}
