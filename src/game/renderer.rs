//! Game Renderer
//!
//! Projects the session state onto the screen with macroquad. Nothing here
//! mutates the simulation; world pixels map 1:1 to screen pixels.
//!
//! Draw order: background, obstacles, collectibles, particles, exit,
//! enemies, player.

use std::f32::consts::PI;
use macroquad::prelude::*;
use crate::config::{EXIT_RADIUS, WORLD_HEIGHT, WORLD_WIDTH};
use crate::ui::draw_health_bar;
use crate::world::{ObstacleKind, ObstacleSpec};
use super::collectible::{Collectible, CollectibleKind};
use super::enemy::Enemy;
use super::player::Player;
use super::runtime::GameRuntime;

const SKY_TOP: Color = Color::new(0.53, 0.81, 0.92, 1.0); // #87CEEB
const SKY_BOTTOM: Color = Color::new(0.60, 0.98, 0.60, 1.0); // #98FB98
const WALL_COLOR: Color = Color::new(0.40, 0.26, 0.13, 1.0); // #654321
const WOOD_COLOR: Color = Color::new(0.55, 0.27, 0.07, 1.0); // #8B4513
const WOOD_TRIM: Color = Color::new(0.63, 0.32, 0.18, 1.0); // #A0522D
const COIN_CORE: Color = Color::new(1.0, 0.65, 0.0, 1.0); // #FFA500
const EXIT_OPEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
const EXIT_CLOSED: Color = Color::new(0.53, 0.53, 0.53, 1.0);
const EXIT_LABEL_CLOSED: Color = Color::new(0.27, 0.27, 0.27, 1.0);

/// Textures the renderer can use; every one is optional
#[derive(Default)]
pub struct GameTextures<'a> {
    pub player: Option<&'a Texture2D>,
    pub background: Option<&'a Texture2D>,
}

/// Convert an RGB triple from the entity tables
pub fn rgb(c: [u8; 3]) -> Color {
    Color::from_rgba(c[0], c[1], c[2], 255)
}

/// Draw the whole playfield for the current frame
pub fn draw_game(runtime: &GameRuntime, textures: &GameTextures) {
    let session = runtime.session();

    draw_background(textures.background);

    for obstacle in session.obstacles() {
        draw_obstacle(obstacle);
    }

    for item in session.collectibles() {
        draw_collectible(item);
    }

    for p in session.particles().iter() {
        let mut color = rgb(p.color);
        color.a = p.life.clamp(0.0, 1.0);
        draw_circle(p.x, p.y, p.size, color);
    }

    draw_exit(session.exit().x, session.exit().y, session.exit_open());

    for enemy in session.enemies().iter() {
        draw_enemy(enemy);
    }

    draw_player(session.player(), textures.player, runtime.hit_flash());
}

fn draw_background(texture: Option<&Texture2D>) {
    if let Some(texture) = texture {
        draw_texture_ex(texture, 0.0, 0.0, WHITE, DrawTextureParams {
            dest_size: Some(vec2(WORLD_WIDTH, WORLD_HEIGHT)),
            ..Default::default()
        });
        return;
    }

    // Vertical sky-to-grass gradient in thin bands
    const BANDS: usize = 50;
    let band_h = WORLD_HEIGHT / BANDS as f32;
    for i in 0..BANDS {
        let t = i as f32 / (BANDS - 1) as f32;
        let color = Color::new(
            SKY_TOP.r + (SKY_BOTTOM.r - SKY_TOP.r) * t,
            SKY_TOP.g + (SKY_BOTTOM.g - SKY_TOP.g) * t,
            SKY_TOP.b + (SKY_BOTTOM.b - SKY_TOP.b) * t,
            1.0,
        );
        draw_rectangle(0.0, i as f32 * band_h, WORLD_WIDTH, band_h + 1.0, color);
    }
}

fn draw_obstacle(o: &ObstacleSpec) {
    match o.obstacle_kind() {
        ObstacleKind::Wall => {
            draw_rectangle(o.x, o.y, o.width, o.height, WALL_COLOR);
            draw_rectangle(o.x, o.y, 3.0, o.height, WOOD_COLOR);
            draw_rectangle(o.x + o.width - 3.0, o.y, 3.0, o.height, WOOD_COLOR);
        }
        ObstacleKind::Platform => {
            draw_rectangle(o.x, o.y, o.width, o.height, WOOD_COLOR);
            draw_rectangle(o.x, o.y, o.width, 3.0, WOOD_TRIM);
        }
    }
}

fn draw_collectible(item: &Collectible) {
    if item.collected {
        return;
    }
    let size = item.kind.size() * item.pulse();
    let color = rgb(item.kind.color());
    let (cx, cy) = (item.x, item.y);

    // Glow
    let mut glow = color;
    glow.a = 0.25;
    draw_circle(cx, cy, size * 0.8, glow);

    match item.kind {
        CollectibleKind::Coin => {
            draw_circle(cx, cy, size / 2.0, color);
            draw_circle(cx, cy, size / 3.0, COIN_CORE);
        }
        CollectibleKind::Gem => {
            let outline = [
                vec2(0.0, -size / 2.0),
                vec2(size / 3.0, -size / 4.0),
                vec2(size / 3.0, size / 4.0),
                vec2(0.0, size / 2.0),
                vec2(-size / 3.0, size / 4.0),
                vec2(-size / 3.0, -size / 4.0),
            ];
            let center = vec2(cx, cy);
            for i in 0..outline.len() {
                let a = center + outline[i];
                let b = center + outline[(i + 1) % outline.len()];
                draw_triangle(center, a, b, color);
            }
            draw_circle(cx - size / 6.0, cy - size / 6.0, size / 8.0, WHITE);
        }
        CollectibleKind::Special => {
            // Six spinning blades
            let center = vec2(cx, cy);
            for i in 0..6 {
                let angle = item.animation_phase + i as f32 * PI / 3.0;
                let rot = |x: f32, y: f32| {
                    let (s, c) = angle.sin_cos();
                    center + vec2(x * c - y * s, x * s + y * c)
                };
                let tip = rot(size / 2.0, 0.0);
                draw_triangle(center, tip, rot(size / 3.0, size / 6.0), color);
                draw_triangle(center, tip, rot(size / 3.0, -size / 6.0), color);
            }
        }
    }
}

fn draw_exit(x: f32, y: f32, open: bool) {
    draw_circle(x, y, EXIT_RADIUS, if open { EXIT_OPEN } else { EXIT_CLOSED });
    let label = "EXIT";
    let dims = measure_text(label, None, 14, 1.0);
    let label_color = if open { WHITE } else { EXIT_LABEL_CLOSED };
    draw_text(label, x - dims.width * 0.5, y + 4.0, 14.0, label_color);
    if open {
        draw_circle_lines(x, y, 25.0, 2.0, WHITE);
    }
}

fn draw_enemy(enemy: &Enemy) {
    if !enemy.alive {
        return;
    }
    draw_rectangle(enemy.x, enemy.y, enemy.width, enemy.height, PURPLE);
    draw_health_bar(enemy.x, enemy.y - 10.0, enemy.width, 6.0, enemy.health.ratio());
}

fn draw_player(player: &Player, sprite: Option<&Texture2D>, hit_flash: u32) {
    let (x, y, w, h) = (player.x, player.y, player.width, player.height);

    if player.on_wall {
        // Wall-slide glow
        draw_rectangle(x - 4.0, y - 4.0, w + 8.0, h + 8.0, Color::new(1.0, 0.42, 0.42, 0.35));
    }

    // Blink while the hit flash runs
    let tint = if hit_flash % 6 >= 3 { Color::new(1.0, 0.4, 0.4, 1.0) } else { WHITE };

    if let Some(texture) = sprite {
        draw_texture_ex(texture, x, y, tint, DrawTextureParams {
            dest_size: Some(vec2(w, h)),
            flip_x: player.facing < 0,
            ..Default::default()
        });
        return;
    }

    let (outer, mid, inner) = if player.on_wall {
        (
            Color::from_rgba(0xFF, 0x6B, 0x6B, 255),
            Color::from_rgba(0xD3, 0x2F, 0x2F, 255),
            Color::from_rgba(0xFF, 0x8A, 0x80, 255),
        )
    } else {
        (
            Color::from_rgba(0x4C, 0xAF, 0x50, 255),
            Color::from_rgba(0x2E, 0x7D, 0x32, 255),
            Color::from_rgba(0x66, 0xBB, 0x6A, 255),
        )
    };
    let shade = |c: Color| Color::new(c.r * tint.r, c.g * tint.g, c.b * tint.b, 1.0);
    draw_rectangle(x, y, w, h, shade(outer));
    draw_rectangle(x + 2.0, y + 2.0, w - 4.0, h - 4.0, shade(mid));
    draw_rectangle(x + 4.0, y + 4.0, w - 8.0, h - 8.0, shade(inner));

    // Eye on the facing side
    let eye_x = if player.facing < 0 { x + w * 0.3 } else { x + w * 0.7 };
    draw_circle(eye_x, y + h * 0.35, (w * 0.08).max(2.0), BLACK);
}
