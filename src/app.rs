//! Application state and screen navigation
//!
//! Screen state machine: Title → Level Select → Playing → Summary, with
//! navigation commands moving between them. Starting a level is async: the
//! command queues the level and the next frame awaits the file before the
//! session is built. A level that fails to load sends the player back to
//! level select.

use std::collections::HashMap;
use macroquad::prelude::*;
use macroquad::file::load_file;
use crate::config::MAX_LEVELS;
use crate::game::renderer::{draw_game, GameTextures};
use crate::game::{GameRuntime, LevelSession, Summary};
use crate::input::{Action, InputState};
use crate::progress::{ProgressRecord, ProgressStore};
use crate::ui::{draw_hud, level_select_screen, summary_screen, title_screen, MouseState};
use crate::world::{level_path, parse_level_data, LevelData, LevelError};

/// Player sprite; the layered-rectangle placeholder is drawn without it
pub const PLAYER_SPRITE_PATH: &str = "assets/img/player.png";

/// Navigation requested by a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Start a level from level select
    Play(u32),
    /// Restart the current level
    Retry,
    /// Start the level after the current one
    NextLevel,
    LevelSelect,
    /// One screen up: level select → title, game → level select
    Back,
}

/// Where the app is, as far as navigation cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Title,
    LevelSelect,
    Level(u32),
}

/// Resolve a navigation command
pub fn route(from: Route, command: NavCommand, progress: &ProgressRecord) -> Route {
    let current_level = match from {
        Route::Level(level) => Some(level),
        _ => None,
    };
    match command {
        NavCommand::Play(level) if progress.is_unlocked(level) => Route::Level(level),
        NavCommand::Play(_) => Route::LevelSelect,
        NavCommand::Retry => current_level.map(Route::Level).unwrap_or(Route::LevelSelect),
        NavCommand::NextLevel => match current_level {
            Some(level) if level < MAX_LEVELS => Route::Level(level + 1),
            _ => Route::LevelSelect,
        },
        NavCommand::LevelSelect => Route::LevelSelect,
        NavCommand::Back => match from {
            Route::LevelSelect | Route::Title => Route::Title,
            Route::Level(_) => Route::LevelSelect,
        },
    }
}

/// Fetch and parse a numbered level file
pub async fn load_level_file(level: u32) -> Result<LevelData, LevelError> {
    let path = level_path(level);
    let bytes = load_file(&path).await.map_err(|e| LevelError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    let data = parse_level_data(&bytes)?;
    tracing::info!(level, path = %path, "level loaded");
    Ok(data)
}

/// Load a texture, or log and fall back to the procedural placeholder
async fn load_optional_texture(path: &str) -> Option<Texture2D> {
    match load_texture(path).await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Linear);
            tracing::info!(path, "loaded texture");
            Some(texture)
        }
        Err(e) => {
            tracing::warn!(path, "Failed to load texture, using placeholder: {}", e);
            None
        }
    }
}

/// Images used by the renderer, loaded once and cached
#[derive(Default)]
pub struct Assets {
    pub player: Option<Texture2D>,
    /// Level backgrounds by name; failed loads are cached as None
    backgrounds: HashMap<String, Option<Texture2D>>,
}

impl Assets {
    pub async fn load() -> Self {
        Self {
            player: load_optional_texture(PLAYER_SPRITE_PATH).await,
            backgrounds: HashMap::new(),
        }
    }

    async fn background(&mut self, name: Option<&str>) -> Option<Texture2D> {
        let name = name?;
        if let Some(cached) = self.backgrounds.get(name) {
            return cached.clone();
        }
        let texture = load_optional_texture(&format!("assets/img/{}", name)).await;
        self.backgrounds.insert(name.to_string(), texture.clone());
        texture
    }
}

enum Screen {
    Title,
    LevelSelect,
    Playing {
        runtime: GameRuntime,
        background: Option<Texture2D>,
    },
    Summary {
        runtime: GameRuntime,
        background: Option<Texture2D>,
        summary: Summary,
    },
}

pub struct App {
    screen: Screen,
    store: Box<dyn ProgressStore>,
    /// Cached copy for level select; refreshed after every session
    progress: ProgressRecord,
    input: InputState,
    assets: Assets,
    seed: u64,
    sessions_started: u64,
    /// Level to load at the start of the next frame
    pending_level: Option<u32>,
}

impl App {
    /// `start_level` skips the menus (the `--level` flag); it is not
    /// checked against unlocked levels.
    pub fn new(store: Box<dyn ProgressStore>, assets: Assets, seed: u64, start_level: Option<u32>) -> Self {
        let progress = store.load_or_default();
        tracing::info!(
            unlocked = progress.unlocked_levels,
            completed = progress.completed_levels.len(),
            "progress loaded"
        );
        Self {
            screen: Screen::Title,
            store,
            progress,
            input: InputState::new(),
            assets,
            seed,
            sessions_started: 0,
            pending_level: start_level,
        }
    }

    fn current_route(&self) -> Route {
        match &self.screen {
            Screen::Title => Route::Title,
            Screen::LevelSelect => Route::LevelSelect,
            Screen::Playing { runtime, .. } | Screen::Summary { runtime, .. } => {
                Route::Level(runtime.session().level())
            }
        }
    }

    /// Run one frame: pending loads, the current screen, navigation
    pub async fn frame(&mut self) {
        if let Some(level) = self.pending_level.take() {
            self.start_level(level).await;
        }

        let mouse = MouseState::poll();
        let mut ended = None;

        let command = match &mut self.screen {
            Screen::Title => title_screen(&mouse, &self.input),
            Screen::LevelSelect => level_select_screen(&mouse, &self.input, &self.progress),
            Screen::Playing { runtime, background } => {
                let input = self.input.player_input();
                ended = runtime.update(get_frame_time(), input, self.store.as_ref());

                clear_background(BLACK);
                let textures = GameTextures {
                    player: self.assets.player.as_ref(),
                    background: background.as_ref(),
                };
                draw_game(runtime, &textures);
                draw_hud(&runtime.session().hud());

                if ended.is_none() && self.input.action_pressed(Action::Back) {
                    tracing::info!(level = runtime.session().level(), "level abandoned");
                    Some(NavCommand::Back)
                } else {
                    None
                }
            }
            Screen::Summary { runtime, background, summary } => {
                clear_background(BLACK);
                let textures = GameTextures {
                    player: self.assets.player.as_ref(),
                    background: background.as_ref(),
                };
                draw_game(runtime, &textures);
                summary_screen(&mouse, &self.input, summary)
            }
        };

        if let Some(summary) = ended {
            self.progress = self.store.load_or_default();
            let screen = std::mem::replace(&mut self.screen, Screen::Title);
            if let Screen::Playing { runtime, background } = screen {
                self.screen = Screen::Summary { runtime, background, summary };
            }
        }

        if let Some(command) = command {
            self.navigate(command);
        }
    }

    fn navigate(&mut self, command: NavCommand) {
        let from = self.current_route();
        let to = route(from, command, &self.progress);
        tracing::debug!(?from, ?command, ?to, "navigate");

        match to {
            Route::Title => self.screen = Screen::Title,
            Route::LevelSelect => {
                self.progress = self.store.load_or_default();
                self.screen = Screen::LevelSelect;
            }
            Route::Level(level) => self.pending_level = Some(level),
        }
    }

    async fn start_level(&mut self, level: u32) {
        match load_level_file(level).await {
            Ok(data) => {
                let background = self.assets.background(data.background.as_deref()).await;
                self.sessions_started += 1;
                let seed = self.seed.wrapping_add(self.sessions_started);
                let session = LevelSession::new(level, data, seed);
                self.screen = Screen::Playing {
                    runtime: GameRuntime::new(session),
                    background,
                };
            }
            Err(e) => {
                tracing::error!(level, "Failed to load level: {}", e);
                self.progress = self.store.load_or_default();
                self.screen = Screen::LevelSelect;
            }
        }
    }
}
