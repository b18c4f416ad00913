use std::rc::{Rc, Weak};

use super::config::CameraConfig;
use super::rig::{tick, CameraPose, CameraState, FrameInput, TickOutput};
use crate::traits::{Followable, SpatialQuery};

/// Optional camera lens whose field of view the controller drives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    /// Vertical field of view in degrees
    pub field_of_view: f32,
}

impl Lens {
    pub fn new(field_of_view: f32) -> Self {
        Self { field_of_view }
    }
}

/// Follow camera bound to at most one target at a time.
///
/// The target is held weakly: if it is dropped the controller simply stops
/// updating until it is given a new one.
pub struct CameraController {
    config: CameraConfig,
    state: CameraState,
    target: Option<Weak<dyn Followable>>,
    is_following: bool,
    lens: Option<Lens>,
    last_tick: Option<TickOutput>,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        let state = CameraState::initialize(&config);
        Self::with_state(config, state)
    }

    pub fn with_pose(config: CameraConfig, pose: CameraPose) -> Self {
        let state = CameraState::with_pose(&config, pose);
        Self::with_state(config, state)
    }

    fn with_state(config: CameraConfig, state: CameraState) -> Self {
        Self {
            config,
            state,
            target: None,
            is_following: false,
            lens: None,
            last_tick: None,
        }
    }

    /// Start following `target`. Smoothed state carries over from the
    /// previous target.
    pub fn follow_target<T: Followable + 'static>(&mut self, target: &Rc<T>) {
        let weak = Rc::downgrade(target);
        let weak: Weak<dyn Followable> = weak;
        if target.motion_state().is_none() {
            log::debug!("Followed target has no motion state, camera will hold still");
        }
        self.target = Some(weak);
        self.is_following = true;
        log::debug!("Camera following target at {:?}", target.pose().position);
    }

    pub fn stop_following(&mut self) {
        self.target = None;
        self.is_following = false;
        log::debug!("Camera stopped following");
    }

    pub fn bind_lens(&mut self, lens: Lens) {
        log::debug!("Lens bound with fov {}", lens.field_of_view);
        self.lens = Some(lens);
    }

    pub fn unbind_lens(&mut self) -> Option<Lens> {
        self.lens.take()
    }

    /// Advance one frame. Must run after the target has moved this frame.
    ///
    /// Returns `false` when the tick was skipped: not following, target
    /// dropped, or the target has no motion state.
    pub fn update(&mut self, dt: f32, world: &dyn SpatialQuery) -> bool {
        if !self.is_following {
            return false;
        }
        let Some(target) = self.target.as_ref().and_then(Weak::upgrade) else {
            return false;
        };
        let Some(motion) = target.motion_state() else {
            return false;
        };

        let input = FrameInput {
            target: target.pose(),
            is_moving: motion.is_moving(),
            fov: self.lens.map(|lens| lens.field_of_view),
        };

        let out = tick(&self.state, &input, &self.config, world, dt);
        self.state = out.state;
        if let (Some(lens), Some(fov)) = (self.lens.as_mut(), out.fov) {
            lens.field_of_view = fov;
        }
        self.last_tick = Some(out);
        true
    }

    pub fn is_following(&self) -> bool {
        self.is_following
    }

    pub fn pose(&self) -> CameraPose {
        self.state.pose
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn lens(&self) -> Option<Lens> {
        self.lens
    }

    /// Diagnostics from the most recent tick that ran
    pub fn last_tick(&self) -> Option<&TickOutput> {
        self.last_tick.as_ref()
    }
}
