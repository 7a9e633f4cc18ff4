use std::sync::{Arc, mpsc::Sender};

use cgmath::{Matrix4, Point3, Vector3, Zero};
use eframe::egui::{self, Color32, Key, Pos2, Rect, Sense, Stroke, Vec2};

use crate::{
    SceneObject,
    camera::{self, Camera},
    constants::MASS_GROWTH_RATE,
    event_loop::{KeyboardState, SimCommand},
    exchange::{FrameExchange, FrameSample},
    field::grid::Grid,
};

mod info;

const GRID_COLOR: Color32 = Color32::from_rgb(77, 77, 179);
const INFO_PANEL_WIDTH: f32 = 280.0;

/// Rendering description for one body, index-aligned with the arena.
pub struct BodyDescriptor {
    pub name: String,
    pub color: Color32,
    pub glow: bool,
}

impl From<&SceneObject> for BodyDescriptor {
    fn from(obj: &SceneObject) -> Self {
        Self {
            name: obj.name.clone(),
            color: Color32::from_rgb(
                (obj.color[0] * 255.0) as u8,
                (obj.color[1] * 255.0) as u8,
                (obj.color[2] * 255.0) as u8,
            ),
            glow: obj.glow,
        }
    }
}

pub struct FabricApp {
    exchange: Arc<FrameExchange>,
    commands: Sender<SimCommand>,
    camera: Camera,
    keyboard: KeyboardState,
    grid: Grid,
    frame: FrameSample,
    descriptors: Vec<BodyDescriptor>,
    spawn_mass: f32,
    placing: bool,
    spawned: usize,
    info_panel: info::InfoPanel,
}

impl FabricApp {
    pub fn new(
        exchange: Arc<FrameExchange>,
        commands: Sender<SimCommand>,
        grid: Grid,
        descriptors: Vec<BodyDescriptor>,
        spawn_mass: f32,
    ) -> Self {
        let extent = grid.half_extent() as f32 * grid.spacing();
        let frame = FrameSample::new(descriptors.len(), grid.num_points());
        Self {
            exchange,
            commands,
            camera: Camera::new(extent),
            keyboard: KeyboardState::default(),
            grid,
            frame,
            descriptors,
            spawn_mass,
            placing: false,
            spawned: 0,
            info_panel: info::InfoPanel::new(),
        }
    }

    fn read_input(&mut self, ctx: &egui::Context) -> f32 {
        ctx.input(|i| {
            self.keyboard.shift = i.modifiers.shift;
            for evt in &i.events {
                if let egui::Event::Key { key, pressed, .. } = evt {
                    match key {
                        Key::ArrowUp => self.keyboard.up = *pressed,
                        Key::ArrowDown => self.keyboard.down = *pressed,
                        Key::ArrowLeft => self.keyboard.left = *pressed,
                        Key::ArrowRight => self.keyboard.right = *pressed,
                        Key::W => self.keyboard.w = *pressed,
                        Key::A => self.keyboard.a = *pressed,
                        Key::S => self.keyboard.s = *pressed,
                        Key::D => self.keyboard.d = *pressed,
                        Key::Plus => self.keyboard.plus = *pressed,
                        Key::Minus => self.keyboard.minus = *pressed,
                        Key::M => self.keyboard.grow = *pressed,
                        Key::O => self.keyboard.speed_up = *pressed,
                        Key::L => self.keyboard.slow_down = *pressed,
                        Key::Space => self.keyboard.pause.event(*pressed),
                        Key::N => self.keyboard.spawn.event(*pressed),
                        Key::Enter => self.keyboard.launch.event(*pressed),
                        _ => (),
                    }
                }
            }
            i.stable_dt
        })
    }

    fn dispatch_commands(&mut self, dt: f32) {
        if self.keyboard.pause.get_trigger() {
            self.exchange.set_paused(!self.exchange.paused());
        }
        if self.keyboard.speed_up {
            self.exchange.set_delta(self.exchange.delta() * 1.02);
        }
        if self.keyboard.slow_down {
            self.exchange.set_delta(self.exchange.delta() * 0.98);
        }

        if self.keyboard.spawn.get_trigger() && !self.placing {
            self.spawned += 1;
            self.descriptors.push(BodyDescriptor {
                name: format!("spawned-{}", self.spawned),
                color: Color32::from_rgb(
                    rand::random_range(90..=255),
                    rand::random_range(90..=255),
                    rand::random_range(90..=255),
                ),
                glow: false,
            });
            let _ = self.commands.send(SimCommand::SpawnHeld {
                pos: Point3::new(0.0, 0.0, 0.0),
                mass: self.spawn_mass,
            });
            self.placing = true;
        }

        if self.placing {
            // Arrow keys position the held body; shift moves it in depth
            // instead of height, matching the placement scheme of the
            // keyboard-driven original.
            let held_radius = self
                .frame
                .bodies
                .last()
                .map(|b| b.radius)
                .unwrap_or(0.0);
            let step = (held_radius * 0.2).max(self.grid.spacing() * 0.2);
            let mut nudge = Vector3::zero();
            if self.keyboard.up {
                if self.keyboard.shift {
                    nudge.z += step;
                } else {
                    nudge.y += step;
                }
            }
            if self.keyboard.down {
                if self.keyboard.shift {
                    nudge.z -= step;
                } else {
                    nudge.y -= step;
                }
            }
            if self.keyboard.right {
                nudge.x += step;
            }
            if self.keyboard.left {
                nudge.x -= step;
            }
            if nudge != Vector3::zero() {
                let _ = self.commands.send(SimCommand::NudgeHeld(nudge));
            }

            if self.keyboard.grow {
                let _ = self
                    .commands
                    .send(SimCommand::GrowHeld(1.0 + MASS_GROWTH_RATE * dt));
            }

            if self.keyboard.launch.get_trigger() {
                let _ = self.commands.send(SimCommand::Launch(Vector3::zero()));
                self.placing = false;
            }
        } else {
            self.keyboard.launch.get_trigger();
            self.camera.rot(&self.keyboard);
        }

        self.camera.move_relative(&self.keyboard);
        self.camera.zoom(&self.keyboard);
    }

    fn paint_scene(&mut self, painter: &egui::Painter, rect: Rect) {
        painter.rect_filled(rect, egui::CornerRadius::ZERO, Color32::BLACK);

        self.camera.resize(rect.width() / rect.height());
        let vp = self.camera.view_proj();

        let stroke = Stroke::new(1.0, GRID_COLOR);
        let h = self.grid.half_extent();
        for i in -h..=h {
            for j in -h..=h {
                let p0 = deformed_point(&self.grid, &self.frame.heights, i, j);
                if i < h {
                    let p1 = deformed_point(&self.grid, &self.frame.heights, i + 1, j);
                    if let (Some(a), Some(b)) =
                        (project_to_rect(&vp, rect, p0), project_to_rect(&vp, rect, p1))
                    {
                        painter.line_segment([a.0, b.0], stroke);
                    }
                }
                if j < h {
                    let p2 = deformed_point(&self.grid, &self.frame.heights, i, j + 1);
                    if let (Some(a), Some(b)) =
                        (project_to_rect(&vp, rect, p0), project_to_rect(&vp, rect, p2))
                    {
                        painter.line_segment([a.0, b.0], stroke);
                    }
                }
            }
        }

        for (snapshot, desc) in self.frame.bodies.iter().zip(&self.descriptors) {
            let pos = Point3::new(snapshot.pos[0], snapshot.pos[1], snapshot.pos[2]);
            if let Some((center, depth)) = project_to_rect(&vp, rect, pos) {
                let radius = self
                    .camera
                    .screen_radius(snapshot.radius, depth, rect.height())
                    .max(2.0);
                if desc.glow {
                    painter.circle_filled(center, radius * 1.8, desc.color.gamma_multiply(0.25));
                }
                painter.circle_filled(center, radius, desc.color);
                if snapshot.held {
                    painter.circle_stroke(center, radius + 3.0, Stroke::new(1.0, Color32::WHITE));
                }
            }
        }
    }
}

fn deformed_point(grid: &Grid, heights: &[f32], i: i32, j: i32) -> Point3<f32> {
    let mut p = grid.point(i, j);
    p.y = heights.get(grid.index(i, j)).copied().unwrap_or(0.0);
    p
}

fn project_to_rect(vp: &Matrix4<f32>, rect: Rect, p: Point3<f32>) -> Option<(Pos2, f32)> {
    camera::project(vp, p, rect.width(), rect.height())
        .map(|(x, y, w)| (Pos2::new(rect.min.x + x, rect.min.y + y), w))
}

impl eframe::App for FabricApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = self.read_input(ctx);
        self.dispatch_commands(dt);
        self.exchange.sample(&mut self.frame);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let size = Vec2::new(
                    (ui.available_width() - INFO_PANEL_WIDTH).max(100.0),
                    ui.available_height(),
                );
                let (response, painter) = ui.allocate_painter(size, Sense::hover());
                self.paint_scene(&painter, response.rect);

                self.info_panel.render(
                    ui,
                    self.frame.now,
                    self.exchange.current_ticks(),
                    self.exchange.delta(),
                    self.frame.bodies.len(),
                    self.exchange.paused(),
                    self.placing,
                );
            });
        });
        ctx.request_repaint();
    }
}
