//! Per-frame session selection
//!
//! The session kind is derived from scratch every frame from the grabbing
//! points. An anchor survives only while the same sources keep the same
//! role; any change in the qualifying point set captures a fresh anchor.

use super::{ManipulationMode, OneHandAnchor, Session, TranslateAnchor, TwoHandAnchor};
use crate::config::TwoHandConfig;
use crate::input::ManipulationPoint;
use crate::spatial::Transform;

#[derive(Debug, Clone, Default)]
pub struct ManipulationStateMachine {
    session: Session,
    limits: TwoHandConfig,
}

impl ManipulationStateMachine {
    pub fn new(limits: TwoHandConfig) -> Self {
        Self {
            session: Session::Idle,
            limits,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> ManipulationMode {
        self.session.mode()
    }

    pub fn set_limits(&mut self, limits: TwoHandConfig) {
        self.limits = limits;
    }

    /// Drop any live session
    pub fn reset(&mut self) {
        if self.session != Session::Idle {
            tracing::debug!("Manipulation session cleared ({:?})", self.session.mode());
        }
        self.session = Session::Idle;
    }

    /// Desired target transform for this frame, or `None` for no update.
    ///
    /// `grabbing` holds the gated grabbing points (only the first two are
    /// used). `colliding` re-tests a point against the target's current box,
    /// ignoring grab history; it decides whether two grabbing points act
    /// together or degrade to a single translating point.
    pub fn step<F>(
        &mut self,
        grabbing: &[ManipulationPoint],
        current: &Transform,
        colliding: F,
    ) -> Option<Transform>
    where
        F: Fn(&ManipulationPoint) -> bool,
    {
        match grabbing {
            [] => {
                self.reset();
                None
            }
            [point] => Some(self.one_hand(point, current)),
            [a, b, ..] => match (colliding(a), colliding(b)) {
                (true, true) => Some(self.two_hand(a, b, current)),
                (true, false) => Some(self.translate(a, current)),
                (false, true) => Some(self.translate(b, current)),
                (false, false) => {
                    self.reset();
                    None
                }
            },
        }
    }

    fn one_hand(&mut self, point: &ManipulationPoint, current: &Transform) -> Transform {
        let anchor = match self.session {
            Session::OneHand(anchor) if anchor.source == point.source => anchor,
            _ => {
                let anchor = OneHandAnchor::capture(point, current);
                tracing::debug!("One-hand session anchored on {}", point.source);
                self.session = Session::OneHand(anchor);
                anchor
            }
        };
        anchor.desired(point, current)
    }

    fn translate(&mut self, point: &ManipulationPoint, current: &Transform) -> Transform {
        let anchor = match self.session {
            Session::Translate(anchor) if anchor.source == point.source => anchor,
            _ => {
                let anchor = TranslateAnchor::capture(point, current);
                tracing::debug!("Translate-only session anchored on {}", point.source);
                self.session = Session::Translate(anchor);
                anchor
            }
        };
        anchor.desired(point, current)
    }

    fn two_hand(
        &mut self,
        a: &ManipulationPoint,
        b: &ManipulationPoint,
        current: &Transform,
    ) -> Transform {
        let anchor = match self.session {
            Session::TwoHand(anchor) if anchor.sources == [a.source, b.source] => anchor,
            _ => {
                let anchor = TwoHandAnchor::capture(a, b, current, &self.limits);
                tracing::debug!("Two-hand session anchored on {} and {}", a.source, b.source);
                self.session = Session::TwoHand(anchor);
                anchor
            }
        };
        anchor.desired(a, b, &self.limits)
    }
}
