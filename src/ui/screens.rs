//! Screens
//!
//! Layout constants are in screen pixels of the fixed 800×500 window.

use macroquad::prelude::*;
use crate::app::NavCommand;
use crate::config::{LEVEL_SELECT_COUNT, MAX_LEVELS, WORLD_HEIGHT, WORLD_WIDTH};
use crate::game::geometry::Rect;
use crate::game::session::{Hud, Summary};
use crate::input::{Action, InputState};
use crate::progress::{LevelStatus, ProgressRecord};
use super::input::MouseState;
use super::theme::*;
use super::widgets::*;

// =============================================================================
// Title
// =============================================================================

pub const PLAY_BUTTON: Rect = Rect::new(300.0, 270.0, 200.0, 56.0);

pub fn title_screen(mouse: &MouseState, input: &InputState) -> Option<NavCommand> {
    clear_background(BG_COLOR);
    let cx = WORLD_WIDTH * 0.5;
    draw_text_centered("SKYHOP", cx, 170.0, FONT_SIZE_TITLE * 1.5, STAR_ON);
    draw_text_centered("Collect, wall-jump, beat the clock", cx, 215.0, FONT_SIZE_CONTENT, TEXT_DIM);

    let clicked = button(mouse, PLAY_BUTTON, "Play");

    draw_text_centered(
        "Arrows / WASD to move   Up / W / Space to jump   Esc to leave a level",
        cx,
        WORLD_HEIGHT - 30.0,
        FONT_SIZE_SMALL,
        TEXT_DIM,
    );

    if clicked || input.action_pressed(Action::Confirm) {
        Some(NavCommand::LevelSelect)
    } else {
        None
    }
}

// =============================================================================
// Level select
// =============================================================================

pub const BACK_BUTTON: Rect = Rect::new(20.0, 20.0, 110.0, 40.0);

const LEVEL_BUTTON_W: f32 = 140.0;
const LEVEL_BUTTON_H: f32 = 110.0;
const LEVEL_BUTTON_GAP: f32 = 20.0;
const LEVELS_PER_ROW: u32 = 4;
const LEVEL_GRID_TOP: f32 = 120.0;

/// Button of a level (1-based) in the level select grid; short rows are centered
pub fn level_button_rect(level: u32) -> Rect {
    let index = level.saturating_sub(1);
    let row = index / LEVELS_PER_ROW;
    let col = index % LEVELS_PER_ROW;
    let in_row = (LEVEL_SELECT_COUNT - row * LEVELS_PER_ROW).min(LEVELS_PER_ROW);
    let row_w = in_row as f32 * LEVEL_BUTTON_W + (in_row.saturating_sub(1)) as f32 * LEVEL_BUTTON_GAP;
    let x0 = (WORLD_WIDTH - row_w) * 0.5;
    Rect::new(
        x0 + col as f32 * (LEVEL_BUTTON_W + LEVEL_BUTTON_GAP),
        LEVEL_GRID_TOP + row as f32 * (LEVEL_BUTTON_H + LEVEL_BUTTON_GAP),
        LEVEL_BUTTON_W,
        LEVEL_BUTTON_H,
    )
}

/// Level under a point, if its button is there
pub fn level_at(x: f32, y: f32) -> Option<u32> {
    (1..=LEVEL_SELECT_COUNT).find(|&level| level_button_rect(level).contains(x, y))
}

pub fn level_select_screen(
    mouse: &MouseState,
    input: &InputState,
    progress: &ProgressRecord,
) -> Option<NavCommand> {
    clear_background(BG_COLOR);
    draw_text_centered("Select Level", WORLD_WIDTH * 0.5, 70.0, FONT_SIZE_TITLE, TEXT_COLOR);

    let back = button(mouse, BACK_BUTTON, "Back");

    for level in 1..=LEVEL_SELECT_COUNT {
        let rect = level_button_rect(level);
        let status = progress.status(level);
        let bg = match status {
            LevelStatus::Locked => BUTTON_LOCKED,
            LevelStatus::Complete => BUTTON_COMPLETE,
            LevelStatus::Available if mouse.inside(&rect) => BUTTON_HOVER,
            LevelStatus::Available => BUTTON_BG,
        };
        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 8.0, bg);

        let cx = rect.center_x();
        let text = if status == LevelStatus::Locked { TEXT_DIM } else { WHITE };
        draw_text_centered(&level.to_string(), cx, rect.y + 45.0, FONT_SIZE_TITLE * 0.8, text);
        draw_text_centered(status.label(), cx, rect.y + 72.0, FONT_SIZE_SMALL, text);
        if status == LevelStatus::Complete {
            draw_star_row(cx, rect.y + 92.0, 8.0, progress.stars(level));
        }
    }

    if back || input.action_pressed(Action::Back) {
        return Some(NavCommand::Back);
    }

    // Locked levels can't be started
    if mouse.left_pressed {
        if let Some(level) = level_at(mouse.x, mouse.y) {
            if progress.is_unlocked(level) {
                return Some(NavCommand::Play(level));
            }
        }
    }
    None
}

// =============================================================================
// HUD
// =============================================================================

pub fn draw_hud(hud: &Hud) {
    draw_rectangle(0.0, 0.0, WORLD_WIDTH, 32.0, PANEL_COLOR);
    let line = format!(
        "Score: {}    Items: {}/{}    Level: {}    Time: {}",
        hud.score, hud.collected, hud.required, hud.level, hud.time_left
    );
    draw_text(&line, 12.0, 22.0, FONT_SIZE_CONTENT, TEXT_COLOR);

    let ratio = if hud.max_health > 0 { hud.health as f32 / hud.max_health as f32 } else { 0.0 };
    draw_health_bar(WORLD_WIDTH - 132.0, 10.0, 120.0, 12.0, ratio);
}

// =============================================================================
// Summary
// =============================================================================

pub const RETRY_BUTTON: Rect = Rect::new(190.0, 390.0, 190.0, 48.0);
pub const NEXT_BUTTON: Rect = Rect::new(420.0, 390.0, 190.0, 48.0);

/// Performance line under the stars of a completed level
pub fn performance_message(stars: u8) -> (&'static str, Color) {
    match stars {
        3 => ("Perfect! You collected everything with time to spare!", STAR_ON),
        2 => ("Great job! You completed the level efficiently!", SUCCESS_COLOR),
        _ => ("Good work! Try for a better time next time!", GOOD_COLOR),
    }
}

/// Second summary button: the next level after a win below the last level,
/// otherwise back to level select
pub fn next_button(summary: &Summary) -> (NavCommand, &'static str) {
    if summary.success && summary.level < MAX_LEVELS {
        (NavCommand::NextLevel, "Next Level")
    } else {
        (NavCommand::LevelSelect, "Level Select")
    }
}

/// Drawn over the frozen playfield
pub fn summary_screen(mouse: &MouseState, input: &InputState, summary: &Summary) -> Option<NavCommand> {
    draw_rectangle(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT, Color::new(0.0, 0.0, 0.0, 0.5));
    draw_rounded_rect(150.0, 50.0, 500.0, 410.0, 12.0, PANEL_COLOR);

    let cx = WORLD_WIDTH * 0.5;
    let (title, title_color) = if summary.success {
        ("Level Complete!", SUCCESS_COLOR)
    } else {
        ("Game Over!", FAILURE_COLOR)
    };
    draw_text_centered(title, cx, 110.0, FONT_SIZE_TITLE, title_color);

    let mut y = 150.0;
    if summary.success && summary.stars > 0 {
        draw_star_row(cx, y + 15.0, 18.0, summary.stars);
        let (message, color) = performance_message(summary.stars);
        draw_text_centered(message, cx, y + 65.0, FONT_SIZE_CONTENT, color);
        y += 90.0;
    } else {
        draw_text_centered(&summary.message, cx, y + 20.0, FONT_SIZE_HEADER, TEXT_COLOR);
        y += 50.0;
    }

    let stats = [
        format!("Final Score: {}", summary.score),
        format!("Items Collected: {}/{}", summary.collected, summary.required),
        format!("Time Remaining: {}s", summary.time_left),
    ];
    for line in &stats {
        draw_text_centered(line, cx, y, FONT_SIZE_CONTENT, TEXT_DIM);
        y += 28.0;
    }

    let retry = button(mouse, RETRY_BUTTON, "Try Again");
    let (next_command, next_label) = next_button(summary);
    let next = button(mouse, NEXT_BUTTON, next_label);

    if retry || input.action_pressed(Action::Retry) {
        Some(NavCommand::Retry)
    } else if next || input.action_pressed(Action::Confirm) {
        Some(next_command)
    } else if input.action_pressed(Action::Back) {
        Some(NavCommand::LevelSelect)
    } else {
        None
    }
}
