use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ModelError, Result};
use crate::math::Point2;
use crate::model::{Polygon, Ring};

use super::snap::{Snap, SnapGuide};

/// Default per-axis distance under which a draft locks onto its first point.
pub const DEFAULT_CLOSE_DISTANCE: f64 = 10.0;

/// Kind of polygon a draft produces when closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftKind {
    Building,
    Pavement,
}

/// Where the next click of a draft would land.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftCursor {
    pub point: Point2,
    pub guides: Vec<SnapGuide>,
    /// The cursor is locked onto the first point; a click closes the ring.
    pub closes: bool,
}

/// Outcome of clicking with a draft cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftClick {
    /// The point was appended; holds the new point count.
    Extended(usize),
    /// The ring was closed into a finished polygon and the draft reset.
    Closed(Polygon),
}

/// A footprint ring being drawn point by point.
#[derive(Debug, Clone)]
pub struct RingDraft {
    kind: DraftKind,
    points: Vec<Point2>,
}

impl RingDraft {
    #[must_use]
    pub fn new(kind: DraftKind) -> Self {
        Self {
            kind,
            points: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DraftKind {
        self.kind
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Discards all drafted points.
    pub fn cancel(&mut self) {
        self.points.clear();
    }

    /// Snaps a raw pointer position against `reference` and checks whether
    /// it would close the ring.
    #[must_use]
    pub fn cursor(
        &self,
        raw: Point2,
        reference: &[Point2],
        snap_enabled: bool,
        config: &EngineConfig,
    ) -> DraftCursor {
        let snapped = Snap::new(raw, reference)
            .with_enabled(snap_enabled)
            .with_threshold(config.snap_threshold)
            .execute();

        match self.closing_point(&snapped.point, config.close_distance) {
            Some(first) => DraftCursor {
                point: first,
                guides: snapped.guides,
                closes: true,
            },
            None => DraftCursor {
                point: snapped.point,
                guides: snapped.guides,
                closes: false,
            },
        }
    }

    fn closing_point(&self, p: &Point2, close_distance: f64) -> Option<Point2> {
        let first = self.points.first().filter(|_| self.points.len() > 2)?;
        ((first.x - p.x).abs() < close_distance && (first.y - p.y).abs() < close_distance)
            .then_some(*first)
    }

    /// Applies a click at `cursor`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ModelError::DegenerateRing`] if the cursor
    /// claims to close a draft with fewer than three points.
    pub fn click(&mut self, cursor: &DraftCursor) -> Result<DraftClick> {
        if !cursor.closes {
            self.points.push(cursor.point);
            return Ok(DraftClick::Extended(self.points.len()));
        }

        if self.points.len() < Ring::MIN_POINTS {
            return Err(ModelError::DegenerateRing(self.points.len()).into());
        }
        let ring = Ring::new(std::mem::take(&mut self.points))?;
        tracing::debug!(kind = ?self.kind, points = ring.len(), "draft closed");
        Ok(DraftClick::Closed(match self.kind {
            DraftKind::Building => Polygon::building(ring),
            DraftKind::Pavement => Polygon::pavement(ring),
        }))
    }
}
