//! Immediate-mode widgets
//!
//! Rebuilt every frame: a widget draws itself and reports whether it was
//! clicked. No retained state.

use std::f32::consts::{FRAC_PI_2, PI};
use macroquad::prelude::*;
use crate::game::geometry::Rect;
use super::input::MouseState;
use super::theme::*;

/// Draw text centered horizontally on `cx`, baseline at `y`
pub fn draw_text_centered(text: &str, cx: f32, y: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, cx - dims.width * 0.5, y, font_size, color);
}

/// Draw a text button, returns true if clicked
pub fn button(mouse: &MouseState, rect: Rect, label: &str) -> bool {
    let hovered = mouse.inside(&rect);
    let bg = if mouse.clicking(&rect) {
        BUTTON_PRESSED
    } else if hovered {
        BUTTON_HOVER
    } else {
        BUTTON_BG
    };
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 6.0, bg);
    draw_text_centered(label, rect.center_x(), rect.center_y() + FONT_SIZE_HEADER * 0.3, FONT_SIZE_HEADER, WHITE);
    mouse.clicked(&rect)
}

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    // Main body
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    // Corners (circles)
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}

/// Points of a five-pointed star, alternating outer and inner radius
fn star_points(cx: f32, cy: f32, outer: f32) -> [Vec2; 10] {
    let inner = outer * 0.45;
    let mut points = [Vec2::ZERO; 10];
    for (i, point) in points.iter_mut().enumerate() {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = -FRAC_PI_2 + i as f32 * PI / 5.0;
        *point = vec2(cx + radius * angle.cos(), cy + radius * angle.sin());
    }
    points
}

pub fn draw_star(cx: f32, cy: f32, outer: f32, color: Color) {
    let points = star_points(cx, cy, outer);
    let center = vec2(cx, cy);
    for i in 0..points.len() {
        draw_triangle(center, points[i], points[(i + 1) % points.len()], color);
    }
}

/// Row of three stars centered on `cx`, the first `earned` filled
pub fn draw_star_row(cx: f32, cy: f32, outer: f32, earned: u8) {
    let spacing = outer * 2.4;
    for i in 0..3u8 {
        let x = cx + (i as f32 - 1.0) * spacing;
        let color = if i < earned { STAR_ON } else { STAR_OFF };
        draw_star(x, cy, outer, color);
    }
}

/// Health bar color: green above half, orange above a fifth, red below
pub fn health_color(ratio: f32) -> Color {
    if ratio > 0.5 {
        LIME
    } else if ratio > 0.2 {
        ORANGE
    } else {
        RED
    }
}

/// Black bar with a colored fill proportional to `ratio`
pub fn draw_health_bar(x: f32, y: f32, w: f32, h: f32, ratio: f32) {
    let ratio = ratio.clamp(0.0, 1.0);
    draw_rectangle(x, y, w, h, BLACK);
    draw_rectangle(x, y, w * ratio, h, health_color(ratio));
}
