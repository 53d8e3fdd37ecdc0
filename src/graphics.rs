use copter::simulation;
use copter::simulation::episode::Episode;
use macroquad::prelude::*;

const ROCK: Color = Color::new(0.22, 0.55, 0.25, 1.0);
const HUMAN: Color = Color::new(0.1, 0.35, 0.9, 1.0);
const NETWORK: Color = Color::new(0.95, 0.55, 0.1, 0.8);
const WRECK: Color = Color::new(0.5, 0.5, 0.5, 0.5);
const EXHAUST: Color = Color::new(1.0, 0.53, 0.0, 0.6);
const EXHAUST_RADIUS: f32 = 7.0;

/// Maps field coordinates onto the drawable area left of the side panel.
pub struct Viewport {
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    pub fn new(cave: &simulation::cave::Cave, panel_width: f32) -> Self {
        let drawable = (screen_width() - panel_width).max(1.0);
        Self {
            scale_x: drawable / cave.width(),
            scale_y: screen_height() / cave.height(),
        }
    }
}

trait ToScreen {
    type Output;
    fn to_screen(&self, viewport: &Viewport) -> Self::Output;
}

impl ToScreen for (f32, f32) {
    type Output = Vec2;
    fn to_screen(&self, viewport: &Viewport) -> Vec2 {
        vec2(self.0 * viewport.scale_x, self.1 * viewport.scale_y)
    }
}

impl ToScreen for f32 {
    type Output = f32;
    fn to_screen(&self, viewport: &Viewport) -> f32 {
        self * viewport.scale_x.min(viewport.scale_y)
    }
}

/// Fills the rock above the ceiling and below the floor, one quad per segment.
pub fn draw_cave(episode: &Episode, viewport: &Viewport) {
    let cave = episode.cave();
    let height = cave.height();
    let samples: Vec<_> = cave.samples().collect();

    for pair in samples.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);

        let top_a = (a.x, 0.0).to_screen(viewport);
        let top_b = (b.x, 0.0).to_screen(viewport);
        let ceiling_a = (a.x, cave.ceiling_y(a)).to_screen(viewport);
        let ceiling_b = (b.x, cave.ceiling_y(b)).to_screen(viewport);
        draw_triangle(top_a, top_b, ceiling_b, ROCK);
        draw_triangle(top_a, ceiling_b, ceiling_a, ROCK);

        let floor_a = (a.x, cave.floor_y(a)).to_screen(viewport);
        let floor_b = (b.x, cave.floor_y(b)).to_screen(viewport);
        let bottom_a = (a.x, height).to_screen(viewport);
        let bottom_b = (b.x, height).to_screen(viewport);
        draw_triangle(floor_a, floor_b, bottom_b, ROCK);
        draw_triangle(floor_a, bottom_b, bottom_a, ROCK);
    }
}

/// Draws every copter as the outline of its collision probes, plus a marker
/// where each dead copter crashed.
pub fn draw_copters(episode: &Episode, viewport: &Viewport) {
    // Wrecks first so live copters stay on top.
    let mut agents: Vec<_> = episode.agents().iter().collect();
    agents.sort_by_key(|agent| agent.copter.is_alive());

    for agent in agents {
        let copter = &agent.copter;
        let color = if !copter.is_alive() {
            WRECK
        } else if agent.pilot.is_human() {
            HUMAN
        } else {
            NETWORK
        };

        let outline: Vec<Vec2> = copter
            .collision_points()
            .map(|point| point.to_screen(viewport))
            .collect();
        if let Some(&first) = outline.first() {
            for pair in outline.windows(2) {
                draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, 2.0, color);
            }
            if let Some(&last) = outline.last() {
                draw_line(last.x, last.y, first.x, first.y, 2.0, color);
            }
        }

        if copter.is_alive() {
            draw_trail(copter.trail(), viewport);
        }

        if copter.is_alive() && copter.thrust_engaged {
            let nozzle = (copter.tail_x(), copter.y).to_screen(viewport);
            draw_circle(nozzle.x, nozzle.y, 3.0_f32.to_screen(viewport), YELLOW);
        }

        if let Some(point) = copter.death_point() {
            let screen = point.to_screen(viewport);
            draw_circle(screen.x, screen.y, 5.0_f32.to_screen(viewport), RED);
        }
    }
}

/// Exhaust puffs that grow and brighten towards the newest point.
fn draw_trail(trail: &simulation::copter::Trail, viewport: &Viewport) {
    let last = trail.len().saturating_sub(1).max(1) as f32;
    for (i, point) in trail.points().enumerate() {
        let weight = i as f32 / last;
        let screen = point.to_screen(viewport);
        let color = Color {
            a: EXHAUST.a * weight,
            ..EXHAUST
        };
        draw_circle(screen.x, screen.y, (EXHAUST_RADIUS * weight).to_screen(viewport), color);
    }
}

/// Draws the distance of the human copter and the leading network copter.
pub fn draw_hud(episode: &Episode, generation: u32) {
    let font_size = 24.0;
    let mut y = 30.0;

    let mut line = |text: String| {
        draw_text(&text, 10.0, y, font_size, WHITE);
        y += font_size;
    };

    line(format!("Generation {}", generation));

    let alive = episode
        .agents()
        .iter()
        .filter(|agent| agent.copter.is_alive())
        .count();
    line(format!("Alive: {}/{}", alive, episode.agents().len()));

    let leader = episode
        .agents()
        .iter()
        .filter(|agent| !agent.pilot.is_human())
        .map(|agent| agent.copter.distance)
        .reduce(f32::max);
    if let Some(distance) = leader {
        line(format!("Best distance: {:.0}", distance));
    }

    if let Some(human) = episode.agents().iter().find(|agent| agent.pilot.is_human()) {
        let status = if human.copter.is_alive() { "" } else { " (crashed)" };
        line(format!("Your distance: {:.0}{}", human.copter.distance, status));
    }
}
