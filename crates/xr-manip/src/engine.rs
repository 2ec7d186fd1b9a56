//! Manipulation engine facade
//!
//! [`ManipulationEngine::update`] runs one frame: sample sources, gate grabs,
//! pick a sub-object when in per-object mode, step the session, smooth the
//! result into the target, then notify gizmo and haptic backends.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ManipulationConfig;
use crate::feedback::{GizmoBackend, GizmoPoints, HapticBackend, HapticDispatcher, HapticPulse, NullGizmoBackend};
use crate::gate::{CollisionGate, GrabMemory, GrabTransition};
use crate::input::{FrameInput, InputSampler, ManipulationPoint};
use crate::manipulation::{ManipulationMode, ManipulationStateMachine};
use crate::scene::{NodeId, SceneGraph, TargetResolver};
use crate::smoothing::SmoothingFilter;

/// Opaque handle of the host's immersive session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHandle(pub u64);

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// What one call to `update` produced besides the transform write
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub gizmo: GizmoPoints,
    pub pulses: Vec<HapticPulse>,
    /// Object manipulated (or manipulable) this frame
    pub target: Option<NodeId>,
    pub mode: ManipulationMode,
}

pub struct ManipulationEngine {
    config: ManipulationConfig,
    session: Option<SessionHandle>,
    root: Option<NodeId>,
    /// Sticky per-object pick, held until every grab is released
    picked: Option<NodeId>,
    sampler: InputSampler,
    gate: CollisionGate,
    memory: GrabMemory,
    resolver: TargetResolver,
    machine: ManipulationStateMachine,
    smoothing: SmoothingFilter,
    haptics: HapticDispatcher,
    gizmo: Box<dyn GizmoBackend>,
}

impl Default for ManipulationEngine {
    fn default() -> Self {
        Self::new(ManipulationConfig::default())
    }
}

impl ManipulationEngine {
    pub fn new(config: ManipulationConfig) -> Self {
        Self {
            session: None,
            root: None,
            picked: None,
            sampler: InputSampler::new(config.input.clone()),
            gate: CollisionGate::new(config.collision_enabled),
            memory: GrabMemory::new(),
            resolver: TargetResolver::new(),
            machine: ManipulationStateMachine::new(config.two_hand.clone()),
            smoothing: SmoothingFilter::new(&config.smoothing),
            haptics: HapticDispatcher::new(config.haptics.clone()),
            gizmo: Box::new(NullGizmoBackend),
            config,
        }
    }

    pub fn with_haptic_backend(mut self, backend: Box<dyn HapticBackend>) -> Self {
        self.haptics.set_backend(backend);
        self
    }

    pub fn with_gizmo_backend(mut self, backend: Box<dyn GizmoBackend>) -> Self {
        self.gizmo = backend;
        self
    }

    pub fn config(&self) -> &ManipulationConfig {
        &self.config
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.config.enabled != enabled {
            tracing::info!("Manipulation {}", if enabled { "enabled" } else { "disabled" });
        }
        self.config.enabled = enabled;
    }

    pub fn set_gizmo_enabled(&mut self, enabled: bool) {
        self.config.gizmo_enabled = enabled;
    }

    pub fn set_collision_enabled(&mut self, enabled: bool) {
        if self.config.collision_enabled != enabled {
            tracing::info!("Collision gating {}", if enabled { "enabled" } else { "disabled" });
        }
        self.config.collision_enabled = enabled;
        self.gate.set_enabled(enabled);
    }

    /// Switching modes drops the live session and any pick
    pub fn set_per_object_enabled(&mut self, enabled: bool) {
        if self.config.per_object_enabled == enabled {
            return;
        }
        tracing::info!("Per-object manipulation {}", if enabled { "enabled" } else { "disabled" });
        self.config.per_object_enabled = enabled;
        self.picked = None;
        self.machine.reset();
    }

    /// Set α; clamped into (0, 1]
    pub fn set_smoothing_factor(&mut self, factor: f32) {
        self.smoothing.set_factor(factor);
        self.config.smoothing.factor = self.smoothing.factor();
    }

    /// Object (or compound root, in per-object mode) to manipulate
    pub fn set_target(&mut self, root: NodeId) {
        if self.root != Some(root) {
            tracing::info!("Manipulation target set to {}", root);
            self.picked = None;
            self.machine.reset();
        }
        self.root = Some(root);
    }

    pub fn clear_target(&mut self) {
        if self.root.take().is_some() {
            tracing::info!("Manipulation target cleared");
        }
        self.picked = None;
        self.machine.reset();
    }

    pub fn target(&self) -> Option<NodeId> {
        self.root
    }

    /// Begin manipulating inside an immersive session, from a clean state.
    /// Returns release pulses for grabs still held from a previous session.
    pub fn start(&mut self, handle: SessionHandle) -> Vec<HapticPulse> {
        tracing::info!("Manipulation started for {}", handle);
        let pulses = self.clear_state();
        self.session = Some(handle);
        pulses
    }

    /// Drop all sessions, picks and grab memory immediately. Sources that
    /// were holding a grab get their release pulse; those are returned.
    pub fn stop(&mut self) -> Vec<HapticPulse> {
        if let Some(handle) = self.session.take() {
            tracing::info!("Manipulation stopped for {}", handle);
        }
        self.clear_state()
    }

    pub fn session(&self) -> Option<SessionHandle> {
        self.session
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Object that manipulation currently writes to
    pub fn effective_target(&self) -> Option<NodeId> {
        if self.config.per_object_enabled {
            self.picked
        } else {
            self.root
        }
    }

    pub fn mode(&self) -> ManipulationMode {
        self.machine.mode()
    }

    /// Reset sessions, picks and grab memory, releasing held grabs
    fn clear_state(&mut self) -> Vec<HapticPulse> {
        self.picked = None;
        self.machine.reset();

        let pulses: Vec<HapticPulse> = self
            .memory
            .release_all()
            .into_iter()
            .filter_map(|(source, record)| {
                self.haptics
                    .pulse_for(source, record.has_haptics, GrabTransition::Released)
            })
            .collect();
        for pulse in &pulses {
            self.haptics.dispatch(pulse);
        }
        pulses
    }

    /// Run one frame. Writes the effective target's transform in place and
    /// never fails; problems degrade to "no update this frame".
    pub fn update<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, frame: &FrameInput) -> FrameReport {
        if !self.config.enabled || self.session.is_none() {
            let pulses = self.clear_state();
            return self.idle_report(pulses);
        }
        let Some(root) = self.root.filter(|root| scene.contains(*root)) else {
            self.picked = None;
            self.machine.reset();
            return self.idle_report(Vec::new());
        };

        let mut points = self.sampler.sample(&frame.sources, &frame.reference_space);
        let mut pulses = Vec::new();

        for point in points.iter_mut() {
            let was_grabbing = self.memory.was_grabbing(point.source);

            let fresh_attempt = point.grabbing && point.palm_down && !was_grabbing;
            if fresh_attempt && self.config.per_object_enabled && self.picked.is_none() {
                self.picked = self.resolver.resolve(&*scene, root, point);
                if let Some(node) = self.picked {
                    tracing::debug!("{} picked {}", point.source, node);
                }
            }

            let admitted = match self.effective_target() {
                Some(target) => {
                    let target_box = scene.world_bounds(target);
                    self.gate.admit(point, was_grabbing, target_box.as_ref())
                }
                None => false,
            };
            point.just_started = admitted && !was_grabbing;
            point.grabbing = admitted;

            if let Some(transition) = self.memory.record(point.source, admitted, point.has_haptics) {
                pulses.extend(self.haptics.pulse_for(point.source, point.has_haptics, transition));
            }
        }

        let pruned = self.memory.retain_sources(frame.sources.iter().map(|s| s.id));
        if pruned > 0 {
            tracing::debug!("Dropped grab memory for {} departed source(s)", pruned);
        }

        let grabbing: Vec<ManipulationPoint> = points.into_iter().filter(|p| p.grabbing).take(2).collect();
        tracing::trace!("{} grabbing point(s) this frame", grabbing.len());

        // A grabbing source that lost its pose this frame still holds the pick
        if !self.memory.any_grabbing() {
            if let Some(node) = self.picked.take() {
                tracing::debug!("Released pick of {}", node);
            }
        }

        let target = self.effective_target();
        match target.and_then(|t| scene.world_transform(t).map(|current| (t, current))) {
            Some((target, current)) => {
                let target_box = scene.world_bounds(target);
                let gate = &self.gate;
                let desired = self
                    .machine
                    .step(&grabbing, &current, |p| gate.may_grab(p, target_box.as_ref()));
                if let Some(desired) = desired {
                    let next = self.smoothing.apply(&current, &desired, frame.delta_time);
                    if let Err(e) = scene.set_world_transform(target, next) {
                        tracing::debug!("Could not write transform of {}: {}", target, e);
                    }
                }
            }
            None => self.machine.reset(),
        }

        let gizmo = if self.config.gizmo_enabled {
            GizmoPoints::from_points(&grabbing)
        } else {
            GizmoPoints::Empty
        };
        self.gizmo.show(&gizmo);
        for pulse in &pulses {
            self.haptics.dispatch(pulse);
        }

        FrameReport {
            gizmo,
            pulses,
            target,
            mode: self.machine.mode(),
        }
    }

    fn idle_report(&mut self, pulses: Vec<HapticPulse>) -> FrameReport {
        self.gizmo.show(&GizmoPoints::Empty);
        FrameReport {
            pulses,
            target: self.effective_target(),
            ..FrameReport::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ControllerState, Handedness, Pose, TrackedSource};
    use crate::scene::Scene;
    use crate::spatial::{Bounds, Point3D, Quaternion, Transform, Vector3D};

    fn engine() -> ManipulationEngine {
        let mut config = ManipulationConfig::default();
        config.smoothing.factor = 1.0;
        let mut engine = ManipulationEngine::new(config);
        engine.start(SessionHandle(1));
        engine
    }

    fn cube_scene() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let cube = scene.add_root("cube", Transform::identity());
        scene.set_geometry(cube, Bounds::centered(Point3D::ORIGIN, Vector3D::splat(0.1))).unwrap();
        (scene, cube)
    }

    fn controller(id: u32, position: Point3D, trigger: f32) -> TrackedSource {
        TrackedSource::controller(
            id,
            Handedness::Right,
            ControllerState {
                grip: Some(Pose::new(position, Quaternion::IDENTITY)),
                trigger,
                ..ControllerState::default()
            },
        )
    }

    #[test]
    fn test_idle_without_session() {
        let (mut scene, cube) = cube_scene();
        let mut engine = ManipulationEngine::default();
        engine.set_target(cube);
        let frame = FrameInput::new(vec![controller(1, Point3D::ORIGIN, 1.0)]);
        let report = engine.update(&mut scene, &frame);
        assert_eq!(report.mode, ManipulationMode::Idle);
        assert!(report.gizmo.is_empty());
    }

    #[test]
    fn test_idle_without_target() {
        let (mut scene, _) = cube_scene();
        let mut engine = engine();
        let frame = FrameInput::new(vec![controller(1, Point3D::ORIGIN, 1.0)]);
        let report = engine.update(&mut scene, &frame);
        assert_eq!(report.mode, ManipulationMode::Idle);
        assert_eq!(report.target, None);
    }

    #[test]
    fn test_one_hand_drag() {
        let (mut scene, cube) = cube_scene();
        let mut engine = engine();
        engine.set_target(cube);

        engine.update(&mut scene, &FrameInput::new(vec![controller(1, Point3D::new(0.05, 0.0, 0.0), 1.0)]));
        let report = engine.update(
            &mut scene,
            &FrameInput::new(vec![controller(1, Point3D::new(0.55, 0.0, 0.0), 1.0)]),
        );
        assert_eq!(report.mode, ManipulationMode::OneHand);
        assert_eq!(report.target, Some(cube));
        let world = scene.world_transform(cube).unwrap();
        assert!((world.position.x - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_set_target_resets_session() {
        let (mut scene, cube) = cube_scene();
        let other = scene.add_root("other", Transform::identity());
        let mut engine = engine();
        engine.set_target(cube);
        engine.update(&mut scene, &FrameInput::new(vec![controller(1, Point3D::ORIGIN, 1.0)]));
        assert_eq!(engine.mode(), ManipulationMode::OneHand);

        engine.set_target(other);
        assert_eq!(engine.mode(), ManipulationMode::Idle);
    }

    #[test]
    fn test_smoothing_factor_clamped() {
        let mut engine = engine();
        engine.set_smoothing_factor(3.0);
        assert_eq!(engine.config().smoothing.factor, 1.0);
    }
}
