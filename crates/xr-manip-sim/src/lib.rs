//! Scenario replay for xr-manip
//!
//! A scenario is a TOML document with an engine `[config]`, a scene of
//! `[[nodes]]`, and a scripted list of `[[frames]]` of tracked-source input.
//! [`replay`] drives a [`ManipulationEngine`] through every frame the way a
//! host frame loop would and records what came out.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use xr_manip::{
    Bounds, FrameInput, FrameReport, ManipulationConfig, ManipulationEngine, NodeId, Scene,
    SceneGraph, SessionHandle, Transform,
};

fn default_true() -> bool {
    true
}

/// One scene node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    /// Name of an earlier node
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub transform: Transform,
    /// Local-space mesh bounds
    #[serde(default)]
    pub bounds: Option<Bounds>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub helper: bool,
}

/// One scripted frame, with optional runtime toggles applied before it runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioFrame {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub collision_enabled: Option<bool>,
    #[serde(default)]
    pub per_object_enabled: Option<bool>,
    #[serde(default)]
    pub gizmo_enabled: Option<bool>,
    #[serde(flatten)]
    pub input: FrameInput,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: ManipulationConfig,
    /// Name of the node to manipulate; the first node when omitted
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub frames: Vec<ScenarioFrame>,
}

impl Scenario {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(contents).context("Failed to parse scenario")?;
        scenario.config.validate().context("Invalid scenario config")?;
        Ok(scenario)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("In scenario {}", path.display()))
    }

    /// Build the in-memory scene; returns it with the target node
    pub fn build_scene(&self) -> Result<(Scene, NodeId)> {
        let mut scene = Scene::new();
        for node in &self.nodes {
            if scene.find(&node.name).is_some() {
                bail!("Duplicate node name '{}'", node.name);
            }
            let id = match &node.parent {
                Some(parent) => {
                    let parent_id = scene
                        .find(parent)
                        .ok_or_else(|| anyhow!("Node '{}' has unknown parent '{}'", node.name, parent))?;
                    scene.add_child(parent_id, node.name.as_str(), node.transform)?
                }
                None => scene.add_root(node.name.as_str(), node.transform),
            };
            if let Some(bounds) = node.bounds {
                scene.set_geometry(id, bounds)?;
            }
            scene.set_visible(id, node.visible)?;
            scene.set_helper(id, node.helper)?;
        }

        let target = match &self.target {
            Some(name) => scene
                .find(name)
                .ok_or_else(|| anyhow!("Target node '{}' not found", name))?,
            None => {
                if scene.is_empty() {
                    bail!("Scenario has no nodes");
                }
                NodeId(0)
            }
        };
        Ok((scene, target))
    }
}

/// What one frame produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame: usize,
    #[serde(flatten)]
    pub report: FrameReport,
    /// World transform of the frame's target after the update
    pub transform: Option<Transform>,
}

/// Final world transform of a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeState {
    pub name: String,
    pub transform: Transform,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replay {
    pub frames: Vec<FrameRecord>,
    pub nodes: Vec<NodeState>,
}

/// Run every frame of the scenario through a fresh engine
pub fn replay(scenario: &Scenario) -> Result<Replay> {
    let (mut scene, target) = scenario.build_scene()?;
    let mut engine = ManipulationEngine::new(scenario.config.clone());
    engine.set_target(target);
    engine.start(SessionHandle(1));

    let mut frames = Vec::with_capacity(scenario.frames.len());
    for (index, frame) in scenario.frames.iter().enumerate() {
        if let Some(enabled) = frame.enabled {
            engine.set_enabled(enabled);
        }
        if let Some(enabled) = frame.collision_enabled {
            engine.set_collision_enabled(enabled);
        }
        if let Some(enabled) = frame.per_object_enabled {
            engine.set_per_object_enabled(enabled);
        }
        if let Some(enabled) = frame.gizmo_enabled {
            engine.set_gizmo_enabled(enabled);
        }

        let report = engine.update(&mut scene, &frame.input);
        let transform = report.target.and_then(|t| scene.world_transform(t));
        tracing::debug!("Frame {}: {:?}", index, report.mode);
        frames.push(FrameRecord {
            frame: index,
            report,
            transform,
        });
    }
    engine.stop();

    let nodes = scenario
        .nodes
        .iter()
        .filter_map(|node| {
            let id = scene.find(&node.name)?;
            Some(NodeState {
                name: node.name.clone(),
                transform: scene.world_transform(id)?,
            })
        })
        .collect();

    Ok(Replay { frames, nodes })
}

/// One human-readable line per frame
pub fn format_frame(record: &FrameRecord) -> String {
    let mut line = format!("frame {:>4}  {:<9}", record.frame, format!("{:?}", record.report.mode));
    match record.transform {
        Some(t) => line.push_str(&format!(
            "  pos=({:.3}, {:.3}, {:.3}) rot=({:.3}, {:.3}, {:.3}, {:.3}) scale=({:.3}, {:.3}, {:.3})",
            t.position.x,
            t.position.y,
            t.position.z,
            t.rotation.x,
            t.rotation.y,
            t.rotation.z,
            t.rotation.w,
            t.scale.x,
            t.scale.y,
            t.scale.z,
        )),
        None => line.push_str("  (no target)"),
    }
    line.push_str(&format!("  gizmo={}", record.report.gizmo.len()));
    if !record.report.pulses.is_empty() {
        line.push_str(&format!("  pulses={}", record.report.pulses.len()));
    }
    line
}
