//! Built-in visualizers: an ASCII frame dump and a JSON-lines feed

use std::io::Write;

use crate::ports::Visualizer;
use crate::sim::SpaceFieldSnapshot;

/// Draws the field as text, one cell per field unit, `+y` pointing up
pub struct TextVisualizer<W: Write> {
    out: W,
    /// Render every n-th tick
    every: u64,
}

impl<W: Write> TextVisualizer<W> {
    pub fn new(out: W, every: u64) -> Self {
        Self {
            out,
            every: every.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render a snapshot into text lines, top row first
    pub fn draw(snapshot: &SpaceFieldSnapshot) -> Vec<String> {
        let cols = snapshot.width.ceil().max(1.0) as usize;
        let rows = snapshot.height.ceil().max(1.0) as usize;
        let mut grid = vec![vec![' '; cols]; rows];

        // Later objects win the cell; the ship is drawn last
        let objects = snapshot
            .missiles
            .iter()
            .chain(&snapshot.asteroids)
            .chain(snapshot.explosions.iter().map(|e| &e.object))
            .chain(std::iter::once(&snapshot.ship));
        for object in objects {
            let col = (object.center.x.floor().max(0.0) as usize).min(cols - 1);
            let row = (object.center.y.floor().max(0.0) as usize).min(rows - 1);
            grid[rows - 1 - row][col] = object.symbol;
        }

        let border = format!("+{}+", "-".repeat(cols));
        let mut lines = Vec::with_capacity(rows + 3);
        lines.push(border.clone());
        lines.extend(
            grid.into_iter()
                .map(|row| format!("|{}|", row.into_iter().collect::<String>())),
        );
        lines.push(border);
        lines.push(format!(
            "tick {} | score {} | asteroids destroyed {}{}",
            snapshot.tick,
            snapshot.score.total_score,
            snapshot.score.asteroids_destroyed,
            if snapshot.playing { "" } else { " | PAUSED" }
        ));
        lines
    }
}

impl<W: Write> Visualizer for TextVisualizer<W> {
    fn render_space_field(&mut self, snapshot: &SpaceFieldSnapshot) {
        if snapshot.tick % self.every != 0 {
            return;
        }
        let frame = Self::draw(snapshot).join("\n");
        if let Err(err) = writeln!(self.out, "{frame}\n") {
            log::warn!("Failed to render frame {}: {err}", snapshot.tick);
        }
    }
}

/// Writes each snapshot as one JSON object per line
pub struct JsonLinesVisualizer<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesVisualizer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visualizer for JsonLinesVisualizer<W> {
    fn render_space_field(&mut self, snapshot: &SpaceFieldSnapshot) {
        let result = serde_json::to_writer(&mut self.out, snapshot)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(self.out));
        if let Err(err) = result {
            log::warn!("Failed to write frame {}: {err}", snapshot.tick);
        }
    }
}

/// Discards every frame
pub struct NullVisualizer;

impl Visualizer for NullVisualizer {
    fn render_space_field(&mut self, _snapshot: &SpaceFieldSnapshot) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::physics::{Point2D, Vector2D};
    use crate::sim::{EngineState, GamePhase, SpaceField};
    use crate::test_support::FixedProbability;

    fn snapshot(phase: GamePhase) -> SpaceFieldSnapshot {
        let mut field = SpaceField::new(
            4.0,
            3.0,
            FieldConfig::default(),
            Box::new(FixedProbability(0.5)),
        );
        field.insert_asteroid(Point2D::new(0.5, 2.5), Vector2D::ZERO, 0.5, 1.0);
        field.insert_missile(Point2D::new(2.2, 0.5), Vector2D::ZERO);
        let mut state = EngineState::new();
        state.phase = phase;
        state.time_ticks = 4;
        field.snapshot(&state)
    }

    #[test]
    fn test_draw_places_symbols() {
        let lines = TextVisualizer::<Vec<u8>>::draw(&snapshot(GamePhase::Playing));
        assert_eq!(
            lines,
            vec![
                "+----+",
                "|.   |",
                "|  @ |",
                "|  ^ |",
                "+----+",
                "tick 4 | score 0 | asteroids destroyed 0",
            ]
        );
    }

    #[test]
    fn test_text_render_marks_pause_and_skips_ticks() {
        let mut vis = TextVisualizer::new(Vec::new(), 3);
        vis.render_space_field(&snapshot(GamePhase::Paused));
        assert!(vis.out.is_empty());

        let mut vis = TextVisualizer::new(Vec::new(), 2);
        vis.render_space_field(&snapshot(GamePhase::Paused));
        let text = String::from_utf8(vis.into_inner()).unwrap();
        assert!(text.contains("| PAUSED"));
    }

    #[test]
    fn test_json_lines() {
        let mut vis = JsonLinesVisualizer::new(Vec::new());
        vis.render_space_field(&snapshot(GamePhase::Playing));
        vis.render_space_field(&snapshot(GamePhase::Paused));
        let text = String::from_utf8(vis.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let frame: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(frame["playing"], false);
        assert_eq!(frame["asteroids"][0]["symbol"], ".");
        assert_eq!(frame["width"], 4.0);
    }
}
