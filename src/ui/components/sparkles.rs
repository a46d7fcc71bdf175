use std::time::{Duration, Instant};

use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

const LIFETIME: Duration = Duration::from_millis(1200);
const GLYPHS: [char; 4] = ['\u{2726}', '\u{2727}', '*', '\u{00b7}']; // ✦ ✧ * ·
const MAX_PARTICLES: usize = 120;

/// One particle, in coordinates relative to the area it is drawn in
/// (0.0..1.0 on both axes).
#[derive(Clone, Debug)]
struct Particle {
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
    born: Instant,
    color: usize,
    glyph: char,
}

impl Particle {
    fn position(&self, now: Instant) -> (f32, f32) {
        let t = now.saturating_duration_since(self.born).as_secs_f32();
        (self.x + self.dx * t, self.y + self.dy * t)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Sparkles {
    particles: Vec<Particle>,
}

impl Sparkles {
    /// Spawns `count` particles around the middle of the area.
    pub fn burst<R: Rng>(&mut self, rng: &mut R, count: usize, now: Instant) {
        for _ in 0..count {
            self.particles.push(Particle {
                x: rng.gen_range(0.3..0.7),
                y: rng.gen_range(0.3..0.7),
                dx: rng.gen_range(-0.35..0.35),
                dy: rng.gen_range(-0.45..0.15),
                born: now,
                color: rng.gen_range(0..16),
                glyph: GLYPHS[rng.gen_range(0..GLYPHS.len())],
            });
        }
        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.particles
            .retain(|p| now.saturating_duration_since(p.born) < LIFETIME);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Draws live particles over whatever is already in the buffer.
pub struct SparkleLayer<'a> {
    sparkles: &'a Sparkles,
    theme: &'a Theme,
    now: Instant,
}

impl<'a> SparkleLayer<'a> {
    pub fn new(sparkles: &'a Sparkles, theme: &'a Theme, now: Instant) -> Self {
        Self {
            sparkles,
            theme,
            now,
        }
    }
}

impl Widget for SparkleLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let colors = &self.theme.colors;

        for p in &self.sparkles.particles {
            let (x, y) = p.position(self.now);
            if !(0.0..1.0).contains(&x) || !(0.0..1.0).contains(&y) {
                continue;
            }
            let col = area.x + (x * area.width as f32) as u16;
            let row = area.y + (y * area.height as f32) as u16;
            let style = Style::default()
                .fg(colors.sparkle(p.color))
                .add_modifier(Modifier::BOLD);
            buf[(col, row)].set_char(p.glyph).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use ratatui::layout::Position;

    #[test]
    fn test_particles_expire() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut sparkles = Sparkles::default();
        let start = Instant::now();
        sparkles.burst(&mut rng, 10, start);
        assert_eq!(sparkles.len(), 10);

        sparkles.tick(start + Duration::from_millis(500));
        assert_eq!(sparkles.len(), 10);
        sparkles.tick(start + LIFETIME);
        assert!(sparkles.is_empty());
    }

    #[test]
    fn test_burst_is_capped() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut sparkles = Sparkles::default();
        sparkles.burst(&mut rng, MAX_PARTICLES + 30, Instant::now());
        assert_eq!(sparkles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_render_stays_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut sparkles = Sparkles::default();
        let start = Instant::now();
        sparkles.burst(&mut rng, 50, start);

        let theme = Theme::default();
        let screen = Rect::new(0, 0, 30, 10);
        let area = Rect::new(2, 1, 20, 6);
        let blank = Buffer::empty(screen);

        // Fresh particles sit mid-area; late ones have drifted past the edges.
        for elapsed_ms in [0, 900, 1150] {
            let mut buf = Buffer::empty(screen);
            SparkleLayer::new(&sparkles, &theme, start + Duration::from_millis(elapsed_ms))
                .render(area, &mut buf);

            let mut drawn = 0;
            for y in screen.top()..screen.bottom() {
                for x in screen.left()..screen.right() {
                    if area.contains(Position { x, y }) {
                        if buf[(x, y)] != blank[(x, y)] {
                            drawn += 1;
                        }
                    } else {
                        assert_eq!(buf[(x, y)], blank[(x, y)], "cell ({x}, {y}) at {elapsed_ms}ms");
                    }
                }
            }
            if elapsed_ms == 0 {
                assert!(drawn > 0);
            }
        }
    }
}
