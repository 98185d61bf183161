use anyhow::{Context, Result};
use log::{debug, info};

use crate::color::parse_color;
use crate::config::{Config, HeartConfig, PenConfig};
use crate::scene::Scene;
use crate::turtle::Turtle;

/// Traces and fills the heart outline from the turtle's current position
/// and heading.
pub fn draw_heart(turtle: &mut Turtle, scene: &mut Scene, heart: &HeartConfig) {
    turtle.begin_fill(scene);
    turtle.turn_left(scene, heart.lean);
    turtle.forward(scene, heart.side);
    turtle.arc(scene, heart.lobe_radius, heart.lobe_extent);
    turtle.turn_right(scene, heart.notch_turn);
    turtle.arc(scene, heart.lobe_radius, heart.lobe_extent);
    turtle.forward(scene, heart.side);
    turtle.end_fill(scene);
}

fn configure_pen(turtle: &mut Turtle, scene: &mut Scene, pen: &PenConfig) -> Result<()> {
    let shape = pen.shape.parse().context("invalid pen shape")?;
    let color = parse_color(&pen.color).context("invalid pen color")?;
    turtle.set_shape(scene, shape);
    turtle.set_color(scene, color);
    turtle.set_speed(pen.speed);
    turtle.set_width(pen.width);
    Ok(())
}

/// Builds the complete heart picture: a configured pen moved to the start
/// point without drawing, the heart, and the pen glyph hidden afterwards.
pub fn draw_scene(config: &Config) -> Result<Scene> {
    let background =
        parse_color(&config.window.background).context("invalid background color")?;
    let mut scene = Scene::default();
    scene.set_background(background);
    let mut pen = Turtle::new(&mut scene);
    configure_pen(&mut pen, &mut scene, &config.pen)?;

    let start = config.heart.start;
    pen.pen_up();
    pen.move_to(&mut scene, start.x, start.y);
    pen.set_heading(&mut scene, config.heart.start_heading);
    pen.pen_down();

    draw_heart(&mut pen, &mut scene, &config.heart);
    pen.hide(&mut scene);

    let end = pen.position();
    debug!(
        "heart traced: {} ops, ends at ({:.3}, {:.3}) heading {:.3}",
        scene.ops().len(),
        end.x,
        end.y,
        pen.heading()
    );
    info!("heart outline closes within {:.3} units", end.distance(start));

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use skia_safe::Color;

    use super::*;
    use crate::geometry::{Vec2, heading_delta};
    use crate::scene::DrawOp;

    #[test]
    fn heart_ends_at_composed_pose() {
        let mut scene = Scene::default();
        let mut t = Turtle::new(&mut scene);
        t.pen_up();
        t.move_to(&mut scene, 0.0, -100.0);
        t.pen_down();
        draw_heart(&mut t, &mut scene, &HeartConfig::default());

        // 50 + 200 - 140 + 200 = 310
        assert!(heading_delta(t.heading(), 310.0) < 1e-9);

        // Compose the same moves analytically.
        let mut pos = Vec2::new(0.0, -100.0);
        let mut heading = 50.0;
        pos = pos + Vec2::from_heading(heading) * 133.0;
        for turn_after in [-140.0, 0.0] {
            let centre = pos + Vec2::from_heading(heading + 90.0) * 50.0;
            pos = centre + (pos - centre).rotate(200.0);
            heading += 200.0 + turn_after;
        }
        pos = pos + Vec2::from_heading(heading) * 133.0;

        assert!(t.position().distance(pos) < 1e-9);
        assert!((t.position().x - 0.4078).abs() < 1e-3);
        assert!((t.position().y + 100.0).abs() < 1e-6);
    }

    #[test]
    fn scene_has_one_closed_fill_below_outline() {
        let scene = draw_scene(&Config::default()).expect("default config is valid");

        let fills: Vec<_> = scene.fills().collect();
        assert_eq!(fills.len(), 1);
        let outline = fills[0];
        let first = outline[0];
        let last = outline[outline.len() - 1];
        assert_eq!(first, Vec2::new(0.0, -100.0));
        assert!(first.distance(last) < 1.0);

        // 2 sides + 11 chords per lobe
        assert_eq!(scene.lines().count(), 24);
        assert!(matches!(scene.ops()[0], DrawOp::Fill { .. }));
    }

    #[test]
    fn scene_is_red_on_white_with_hidden_pen() {
        let scene = draw_scene(&Config::default()).expect("default config is valid");
        assert_eq!(scene.background, Color::WHITE);
        assert_eq!(scene.visible_cursors().count(), 0);
        assert!(scene.ops().iter().all(|op| match op {
            DrawOp::Line { color, .. } | DrawOp::Fill { color, .. } => {
                *color == Color::from_rgb(255, 0, 0)
            }
        }));
    }

    #[test]
    fn bad_pen_settings_are_reported() {
        let mut config = Config::default();
        config.pen.color = String::from("not-a-color");
        let err = draw_scene(&config).expect_err("color should be rejected");
        assert!(format!("{err:#}").contains("invalid pen color"));

        let mut config = Config::default();
        config.pen.shape = String::from("dragon");
        assert!(draw_scene(&config).is_err());
    }

    #[test]
    fn repositioning_leaves_no_trace() {
        let scene = draw_scene(&Config::default()).expect("default config is valid");
        let origin = Vec2::ZERO;
        assert!(scene.lines().all(|(from, _)| from != origin));
    }

    #[test]
    fn heart_is_mirror_symmetric() {
        let scene = draw_scene(&Config::default()).expect("default config is valid");
        let (min_x, max_x) = scene
            .lines()
            .flat_map(|(a, b)| [a.x, b.x])
            .fold((f64::MAX, f64::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
        // the outline closes 0.4 units right of where it started
        assert!((min_x + max_x).abs() < 1.0, "{min_x} {max_x}");
    }
}
