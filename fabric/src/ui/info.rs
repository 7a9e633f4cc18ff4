use std::time::Instant;

use eframe::egui;

/// Right-hand status panel: simulation clock, smoothed tick rate, and the
/// key bindings.
pub struct InfoPanel {
    last_tick: u64,
    last_update: Instant,
    tick_rates: [f64; 30],
    tick_rate_index: usize,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self {
            last_tick: 0,
            last_update: Instant::now(),
            tick_rates: [0.0; 30],
            tick_rate_index: 0,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        ui: &mut egui::Ui,
        now: f32,
        tick: u64,
        delta: f32,
        num_bodies: usize,
        paused: bool,
        placing: bool,
    ) {
        let upd_time = Instant::now();
        let elapsed = upd_time.duration_since(self.last_update);
        let ticks_elapsed = tick.saturating_sub(self.last_tick);

        self.tick_rates[self.tick_rate_index] = (ticks_elapsed as f64) / elapsed.as_secs_f64();
        self.tick_rate_index = (self.tick_rate_index + 1) % self.tick_rates.len();

        self.last_tick = tick;
        self.last_update = upd_time;

        let avg_tick_rate = self.tick_rates.iter().sum::<f64>() / self.tick_rates.len() as f64;

        ui.vertical(|ui| {
            ui.label(format!("Simulation clock: {now:.2} s"));
            ui.label(format!("Ticks: {tick} ({avg_tick_rate:.0}/s)"));
            ui.label(format!("Step: {delta:.5} s/tick"));
            ui.label(format!("Bodies: {num_bodies}"));
            ui.label(if paused {
                "paused"
            } else if placing {
                "placing a body"
            } else {
                "running"
            });
            ui.separator();
            ui.label("space: pause / run");
            ui.label("wasd / arrows: pan and orbit camera");
            ui.label("+/-: zoom, o/l: step faster/slower");
            ui.label("n: new body, arrows place it (shift: depth)");
            ui.label("m: grow mass, enter: launch");
        });
    }
}

impl Default for InfoPanel {
    fn default() -> Self {
        Self::new()
    }
}
