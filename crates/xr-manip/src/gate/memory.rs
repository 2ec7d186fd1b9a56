//! Last known grab state per tracked source

use std::collections::{HashMap, HashSet};

use crate::input::SourceId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrabRecord {
    pub grabbing: bool,
    /// Whether the source exposed a haptic actuator when last seen
    pub has_haptics: bool,
}

/// Edge in a source's grab state between two frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabTransition {
    Started,
    Released,
}

/// Grab state keyed by source, kept across frames for edge detection
#[derive(Debug, Clone, Default)]
pub struct GrabMemory {
    records: HashMap<SourceId, GrabRecord>,
}

impl GrabMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_grabbing(&self, source: SourceId) -> bool {
        self.records.get(&source).map(|r| r.grabbing).unwrap_or(false)
    }

    /// Store this frame's state and report the edge, if any
    pub fn record(&mut self, source: SourceId, grabbing: bool, has_haptics: bool) -> Option<GrabTransition> {
        let record = self.records.entry(source).or_default();
        record.has_haptics = has_haptics;
        let transition = match (record.grabbing, grabbing) {
            (false, true) => Some(GrabTransition::Started),
            (true, false) => Some(GrabTransition::Released),
            _ => None,
        };
        record.grabbing = grabbing;
        transition
    }

    /// Drop records for sources no longer reported. Returns how many went.
    pub fn retain_sources(&mut self, present: impl IntoIterator<Item = SourceId>) -> usize {
        let present: HashSet<SourceId> = present.into_iter().collect();
        let before = self.records.len();
        self.records.retain(|id, _| present.contains(id));
        before - self.records.len()
    }

    /// True while any remembered source holds a grab, including sources
    /// whose pose is missing this frame
    pub fn any_grabbing(&self) -> bool {
        self.records.values().any(|r| r.grabbing)
    }

    /// Forget every source, returning the ones that were still grabbing
    pub fn release_all(&mut self) -> Vec<(SourceId, GrabRecord)> {
        let mut held: Vec<(SourceId, GrabRecord)> = self
            .records
            .drain()
            .filter(|(_, record)| record.grabbing)
            .collect();
        held.sort_by_key(|(id, _)| *id);
        held
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
