use follow_camera::camera::CameraConfig;
use follow_camera::scenes::ScenePreset;
use follow_camera::sim::{Simulation, SimulationOptions};

#[cfg(test)]
mod simulation_tests {
    use super::*;

    #[test]
    fn test_left_wall_run_frames_walker_safely() {
        let mut sim = Simulation::new(ScenePreset::LeftWall, CameraConfig::default(), SimulationOptions::default());
        let report = sim.run();
        let summary = &report.summary;

        assert_eq!(report.frames.len(), 1200);
        assert!(summary.route_completed, "walker never reached the end of the route");
        assert!(summary.blocked_ticks > 0);
        assert!((summary.max_wall_blend - 1.0).abs() < 1e-6);
        assert_eq!(summary.solid_ticks, 0, "camera ended up inside geometry");
        assert!(report.frames.iter().all(|f| f.camera_position.x > 0.0));
    }

    #[test]
    fn test_open_field_never_sees_walls() {
        let options = SimulationOptions {
            ticks: 600,
            ..SimulationOptions::default()
        };
        let mut sim = Simulation::new(ScenePreset::OpenField, CameraConfig::default(), options);
        let report = sim.run();

        assert_eq!(report.summary.blocked_ticks, 0);
        assert_eq!(report.summary.max_wall_blend, 0.0);
        assert_eq!(report.summary.solid_ticks, 0);
        assert!(report.summary.moving_ticks > 0);
    }

    #[test]
    fn test_fov_follows_motion_state() {
        let options = SimulationOptions {
            ticks: 900,
            ..SimulationOptions::default()
        };
        let config = CameraConfig::default();
        let mut sim = Simulation::new(ScenePreset::OpenField, config.clone(), options);
        let report = sim.run();

        // Idle at spawn for the first pause, so the lens widens toward the stopped fov
        let early = report.frames[100].fov.unwrap();
        assert!(early > config.fov.moving, "fov {} did not widen while idle", early);
        assert!(report.frames.iter().all(|f| {
            let fov = f.fov.unwrap();
            fov >= config.fov.moving - 1e-3 && fov <= config.fov.stopped + 1e-3
        }));
    }

    #[test]
    fn test_without_lens_fov_is_not_reported() {
        let options = SimulationOptions {
            ticks: 30,
            lens: false,
            ..SimulationOptions::default()
        };
        let mut sim = Simulation::new(ScenePreset::Courtyard, CameraConfig::default(), options);
        let report = sim.run();

        assert!(report.frames.iter().all(|f| f.fov.is_none()));
        assert!(sim.controller().lens().is_none());
    }

    #[test]
    fn test_report_serializes() {
        let options = SimulationOptions {
            ticks: 10,
            ..SimulationOptions::default()
        };
        let mut sim = Simulation::new(ScenePreset::Corridor, CameraConfig::default(), options);
        let report = sim.run();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["scene"], "corridor");
        assert_eq!(json["frames"].as_array().unwrap().len(), 10);
        assert!(json["generated_at"].as_str().is_some());
    }
}
