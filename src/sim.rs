//! Headless driver loop.
//!
//! Each frame runs in a fixed order: route dispatch, walker movement, then
//! the camera tick. The camera must see the walker's post-movement pose, so
//! nothing may move the walker after the camera has ticked.

use std::rc::Rc;

use glam::{Quat, Vec3};
use serde::Serialize;

use crate::camera::{CameraConfig, CameraController, CameraPose, Lens, Side};
use crate::math::{flatten, look_rotation, rotation_from_euler_degrees};
use crate::scenes::{Layout, ScenePreset};
use crate::traits::MotionState;
use crate::walker::Walker;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOptions {
    pub ticks: usize,
    pub dt: f32,
    pub walker_speed: f32,
    /// Seconds the walker idles before each leg of the route
    pub pause: f32,
    pub lens: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            ticks: 1200,
            dt: 1.0 / 60.0,
            walker_speed: 3.5,
            pause: 2.0,
            lens: true,
        }
    }
}

/// Waypoints handed to the walker one at a time with an idle pause between
#[derive(Debug, Clone)]
struct Route {
    waypoints: Vec<Vec3>,
    next: usize,
    pause: f32,
    wait: f32,
}

impl Route {
    fn new(waypoints: Vec<Vec3>, pause: f32) -> Self {
        Self {
            waypoints,
            next: 0,
            pause,
            wait: pause,
        }
    }

    fn dispatch(&mut self, walker: &Walker, dt: f32) {
        if walker.destination().is_some() || self.is_finished() {
            return;
        }
        if self.wait > 0.0 {
            self.wait -= dt;
            return;
        }
        walker.move_to(self.waypoints[self.next]);
        self.next += 1;
        self.wait = self.pause;
    }

    fn is_finished(&self) -> bool {
        self.next >= self.waypoints.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord {
    pub tick: usize,
    pub time: f32,
    pub target: Vec3,
    pub is_moving: bool,
    pub camera_position: Vec3,
    pub camera_rotation: Quat,
    pub fov: Option<f32>,
    pub lateral_offset: f32,
    pub wall_blend: f32,
    pub left_blocked: bool,
    pub right_blocked: bool,
    pub side: Side,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    /// Largest camera movement between consecutive frames
    pub max_camera_step: f32,
    pub max_wall_blend: f32,
    pub moving_ticks: usize,
    pub blocked_ticks: usize,
    /// Frames whose camera position ended up inside an obstacle
    pub solid_ticks: usize,
    pub route_completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub generated_at: String,
    pub scene: ScenePreset,
    pub dt: f32,
    pub summary: Summary,
    pub frames: Vec<FrameRecord>,
}

pub struct Simulation {
    preset: ScenePreset,
    layout: Layout,
    walker: Rc<Walker>,
    controller: CameraController,
    route: Route,
    options: SimulationOptions,
}

impl Simulation {
    pub fn new(preset: ScenePreset, config: CameraConfig, options: SimulationOptions) -> Self {
        Self::with_layout(preset, preset.layout(), config, options)
    }

    pub fn with_layout(
        preset: ScenePreset,
        layout: Layout,
        config: CameraConfig,
        options: SimulationOptions,
    ) -> Self {
        let walker = Rc::new(Walker::new(layout.spawn, layout.facing, options.walker_speed));
        let pose = starting_pose(&config, layout.spawn, layout.facing);

        let mut controller = CameraController::with_pose(config, pose);
        if options.lens {
            controller.bind_lens(Lens::new(controller.config().fov.moving));
        }
        controller.follow_target(&walker);

        let route = Route::new(layout.waypoints.clone(), options.pause);
        Self {
            preset,
            layout,
            walker,
            controller,
            route,
            options,
        }
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn walker(&self) -> &Walker {
        &self.walker
    }

    /// One frame: dispatch, move, then camera
    pub fn step(&mut self, dt: f32) -> bool {
        self.route.dispatch(&self.walker, dt);
        self.walker.advance(dt);
        self.controller.update(dt, &self.layout.scene)
    }

    pub fn run(&mut self) -> SimulationReport {
        let dt = self.options.dt;
        log::info!(
            "Simulating {:?} for {} ticks at dt {:.4}",
            self.preset,
            self.options.ticks,
            dt
        );

        let mut frames = Vec::with_capacity(self.options.ticks);
        let mut summary = Summary::default();
        let mut previous = self.controller.pose().position;

        for tick in 0..self.options.ticks {
            if !self.step(dt) {
                log::warn!("Camera skipped tick {}", tick);
                continue;
            }
            let Some(out) = self.controller.last_tick() else {
                continue;
            };
            let state = out.state;
            let is_moving = self.walker.is_moving();

            summary.max_camera_step = summary
                .max_camera_step
                .max((state.pose.position - previous).length());
            summary.max_wall_blend = summary.max_wall_blend.max(state.wall_effect_blend);
            summary.moving_ticks += usize::from(is_moving);
            summary.blocked_ticks += usize::from(out.probe.left_blocked || out.probe.right_blocked);
            summary.solid_ticks += usize::from(self.layout.scene.is_solid(state.pose.position));
            previous = state.pose.position;

            frames.push(FrameRecord {
                tick,
                time: (tick + 1) as f32 * dt,
                target: self.walker.position(),
                is_moving,
                camera_position: state.pose.position,
                camera_rotation: state.pose.rotation,
                fov: out.fov,
                lateral_offset: state.current_offset,
                wall_blend: state.wall_effect_blend,
                left_blocked: out.probe.left_blocked,
                right_blocked: out.probe.right_blocked,
                side: out.side,
            });
        }

        summary.route_completed = self.route.is_finished() && !self.walker.is_moving();
        log::info!(
            "Simulation done: {} frames, max step {:.3}, route completed: {}",
            frames.len(),
            summary.max_camera_step,
            summary.route_completed
        );

        SimulationReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            scene: self.preset,
            dt,
            summary,
            frames,
        }
    }
}

/// Camera already sitting in the moving framing behind the spawn point
fn starting_pose(config: &CameraConfig, spawn: Vec3, facing: Vec3) -> CameraPose {
    let forward = flatten(facing).unwrap_or(Vec3::Z);
    let right = Vec3::Y.cross(forward);
    let offset = config.moving.offset;
    let position =
        spawn - forward * offset.z + Vec3::Y * offset.y + right * config.horizontal_offset;
    let rotation = look_rotation(forward).unwrap_or(Quat::IDENTITY)
        * rotation_from_euler_degrees(config.moving.rotation);
    CameraPose::new(position, rotation)
}
