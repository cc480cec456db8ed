//! Read-only draw pass

use glam::IVec2;

use super::content::{Content, TextureId};
use crate::consts::{DISPLAY_OFFSET, HEALTH_PREFIX, SCORE_PREFIX};
use crate::highscores::HighScores;
use crate::sim::{GamePhase, GameState, Rect};

/// RGBA tint applied to a sprite or text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint(pub [u8; 4]);

impl Tint {
    pub const WHITE: Tint = Tint([255, 255, 255, 255]);
}

/// Drawing backend
pub trait Renderer {
    /// Draw `source` (whole texture if None) of a texture into `dest`
    fn draw_sprite(&mut self, texture: TextureId, dest: Rect, source: Option<Rect>, tint: Tint);
    fn draw_text(&mut self, text: &str, position: IVec2, tint: Tint);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Sprite {
        texture: TextureId,
        dest: Rect,
        source: Option<Rect>,
    },
    Text {
        text: String,
        position: IVec2,
    },
}

/// Renderer that records calls instead of drawing
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl Renderer for RecordingRenderer {
    fn draw_sprite(&mut self, texture: TextureId, dest: Rect, source: Option<Rect>, _tint: Tint) {
        self.commands.push(DrawCommand::Sprite {
            texture,
            dest,
            source,
        });
    }

    fn draw_text(&mut self, text: &str, position: IVec2, _tint: Tint) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
        });
    }
}

pub fn score_location() -> IVec2 {
    IVec2::new(DISPLAY_OFFSET, DISPLAY_OFFSET)
}

pub fn health_location() -> IVec2 {
    IVec2::new(DISPLAY_OFFSET, 2 * DISPLAY_OFFSET)
}

fn draw_hud(state: &GameState, renderer: &mut impl Renderer) {
    renderer.draw_text(
        &format!("{}{}", HEALTH_PREFIX, state.burger.health()),
        health_location(),
        Tint::WHITE,
    );
    renderer.draw_text(
        &format!("{}{}", SCORE_PREFIX, state.score),
        score_location(),
        Tint::WHITE,
    );
}

fn draw_world(state: &GameState, content: &Content, renderer: &mut impl Renderer) {
    renderer.draw_sprite(content.burger.texture, state.burger.rect, None, Tint::WHITE);
    for cabbage in &state.cabbages {
        renderer.draw_sprite(content.cabbage.texture, cabbage.rect, None, Tint::WHITE);
    }
    for projectile in &state.projectiles {
        let sprite = content.projectile(projectile.kind);
        renderer.draw_sprite(sprite.texture, projectile.rect, None, Tint::WHITE);
    }
    for explosion in &state.explosions {
        renderer.draw_sprite(
            content.explosion.texture,
            explosion.rect,
            Some(explosion.source_rect()),
            Tint::WHITE,
        );
    }
}

/// Draw the current frame
pub fn draw(
    state: &GameState,
    content: &Content,
    high_scores: &HighScores,
    renderer: &mut impl Renderer,
) {
    match state.phase {
        GamePhase::MainMenu => draw_hud(state, renderer),
        GamePhase::Playing | GamePhase::Paused => {
            draw_world(state, content, renderer);
            draw_hud(state, renderer);
        }
        GamePhase::Result => {
            renderer.draw_text(
                &format!("{}{}", SCORE_PREFIX, state.score),
                score_location(),
                Tint::WHITE,
            );
            renderer.draw_text(&high_scores.scoreboard(), health_location(), Tint::WHITE);
        }
    }
}
