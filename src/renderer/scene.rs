//! Frame composition for a play session
//!
//! Draw order: snow, ski tracks, world entities sorted by y (so lower
//! objects overlap higher ones), then full-screen tints. Text (HUD, popups)
//! is handled by the page.

use glam::Vec2;

use super::canvas::Canvas;
use super::vertex::colors;
use crate::assets::Assets;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::rng::{RandomSource, seeded};
use crate::sim::{Camera, Entity, GameMode, PlaySession};

/// World rows of background speckles
const SPECKLE_ROW: f32 = 50.0;
const SPECKLES_PER_ROW: u32 = 6;
/// Ski track offset from the trail center
const TRACK_GAP: f32 = 5.0;

/// Draw the whole session into `canvas`
pub fn draw_session(session: &PlaySession, canvas: &mut dyn Canvas, assets: &dyn Assets) {
    let mut camera = session.camera.clone();
    camera.pos += session.shake_offset();

    let center = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
    let full = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    canvas.fill_rect(center, full, colors::SNOW_WHITE);
    draw_speckles(&camera, canvas);
    draw_tracks(session, &camera, canvas);

    let terrain = &session.terrain;
    let mut layer: Vec<&dyn Entity> = Vec::new();
    layer.extend(terrain.obstacles.active().map(|e| e as &dyn Entity));
    layer.extend(terrain.collectibles.active().map(|e| e as &dyn Entity));
    layer.extend(terrain.ramps.active().map(|e| e as &dyn Entity));
    layer.extend(terrain.npcs.active().map(|e| e as &dyn Entity));
    if session.mode == GameMode::Slalom {
        layer.extend(terrain.gates.active().map(|e| e as &dyn Entity));
    }
    layer.retain(|e| camera.is_visible(e.body().pos, e.body().size));
    if session.boss.is_hunting() {
        layer.push(&session.boss);
    }
    layer.push(&session.player);
    layer.sort_by(|a, b| a.body().pos.y.total_cmp(&b.body().pos.y));

    for entity in layer {
        entity.render(&camera, canvas, assets);
    }

    if session.boss_warning_active() {
        canvas.fill_rect(center, full, colors::WARNING_TINT);
    }
    if session.is_caught() {
        canvas.fill_rect(center, full, colors::CAUGHT_OVERLAY);
    }
}

/// Small shadows scattered over the snow, fixed in world space
fn draw_speckles(camera: &Camera, canvas: &mut dyn Canvas) {
    let first = (camera.top_edge() / SPECKLE_ROW).floor() as i64;
    let last = (camera.bottom_edge() / SPECKLE_ROW).ceil() as i64;
    for row in first..=last {
        let mut rng = seeded(row as u64);
        for _ in 0..SPECKLES_PER_ROW {
            let world = Vec2::new(
                camera.pos.x + rng.range(0.0, camera.width),
                row as f32 * SPECKLE_ROW + rng.range(0.0, SPECKLE_ROW),
            );
            let radius = rng.range(1.0, 3.0);
            canvas.fill_circle(camera.world_to_screen(world), radius, colors::SNOW_SHADOW);
        }
    }
}

fn draw_tracks(session: &PlaySession, camera: &Camera, canvas: &mut dyn Canvas) {
    let trail = &session.player.trail;
    for pair in trail.windows(2) {
        let (a, b) = (camera.world_to_screen(pair[0]), camera.world_to_screen(pair[1]));
        for side in [-TRACK_GAP, TRACK_GAP] {
            let offset = Vec2::new(side, 0.0);
            canvas.stroke_line(a + offset, b + offset, 2.0, colors::TRACK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetCatalog, NoAssets};
    use crate::renderer::VertexCanvas;
    use crate::renderer::canvas::testing::{DrawCall, RecordingCanvas};
    use crate::sim::{ObstacleKind, TickInput};
    use crate::tuning::GameConfig;

    fn session_with_tree() -> PlaySession {
        let mut session = PlaySession::new(GameMode::Freerun, &GameConfig::default(), 3);
        session.terrain.obstacles.release_all();
        session.terrain.collectibles.release_all();
        session.terrain.ramps.release_all();
        session.terrain.npcs.release_all();
        let tree_at = session.player.pos() + Vec2::new(0.0, 150.0);
        session.terrain.obstacles.acquire().init(tree_at, ObstacleKind::Tree);
        session
    }

    #[test]
    fn test_placeholders_without_assets() {
        let session = session_with_tree();
        let mut canvas = RecordingCanvas::default();
        draw_session(&session, &mut canvas, &NoAssets);

        assert!(canvas.sprite_keys().is_empty());
        // Background covers the whole canvas first
        assert_eq!(
            canvas.calls[0],
            DrawCall::Rect(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0))
        );
        assert!(canvas.calls.iter().any(|c| matches!(c, DrawCall::Triangle)));
    }

    #[test]
    fn test_sprites_when_bound_in_y_order() {
        let session = session_with_tree();
        let mut assets = AssetCatalog::new();
        assets.insert("obstacle_tree", "tree.png");
        assets.insert(session.player.sprite_key(), "skier.png");

        let mut canvas = RecordingCanvas::default();
        draw_session(&session, &mut canvas, &assets);

        // Skier is above the tree on the slope, so it is drawn first
        assert_eq!(
            canvas.sprite_keys(),
            vec![session.player.sprite_key(), "obstacle_tree"]
        );
    }

    #[test]
    fn test_bound_sprites_keep_placeholders_on_vertex_canvas() {
        let session = session_with_tree();
        let mut placeholders = VertexCanvas::new();
        draw_session(&session, &mut placeholders, &NoAssets);

        let mut assets = AssetCatalog::new();
        assets.insert("obstacle_tree", "tree.png");
        assets.insert(session.player.sprite_key(), "skier.png");
        let mut bound = VertexCanvas::new();
        draw_session(&session, &mut bound, &assets);

        assert_eq!(bound.vertices(), placeholders.vertices());
    }

    #[test]
    fn test_tracks_follow_trail() {
        let mut session = PlaySession::new(GameMode::Freerun, &GameConfig::default(), 3);
        for _ in 0..5 {
            session.tick(&TickInput::default(), 1.0 / 60.0);
        }
        let mut canvas = RecordingCanvas::default();
        draw_session(&session, &mut canvas, &NoAssets);
        let lines = canvas
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line(..)))
            .count();
        // Two tracks per trail segment, plus whatever the placeholders stroke
        assert!(lines >= (session.player.trail.len() - 1) * 2);
    }

    #[test]
    fn test_gates_hidden_in_freerun() {
        let mut session = PlaySession::new(GameMode::Slalom, &GameConfig::default(), 3);
        session.tick(&TickInput::default(), 1.0 / 60.0);

        let mut canvas = RecordingCanvas::default();
        draw_session(&session, &mut canvas, &NoAssets);
        let with_gates = canvas.calls.len();

        session.mode = GameMode::Freerun;
        let mut canvas = RecordingCanvas::default();
        draw_session(&session, &mut canvas, &NoAssets);
        assert!(canvas.calls.len() < with_gates);
    }
}
