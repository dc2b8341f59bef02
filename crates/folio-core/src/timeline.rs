//! Experience timeline geometry: an S-curve path through milestone anchors
//! and the scroll-driven reveal of that path.

use crate::constants::{
    TIMELINE_REVEAL_OVERSHOOT, TIMELINE_REVEAL_START, TIMELINE_SAMPLES_PER_SEGMENT,
    TIMELINE_SETTLE_DELAY_MS,
};
use glam::DVec2;
use smallvec::SmallVec;
use std::fmt::Write;

/// One cubic Bezier piece; its start is the previous segment's end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
    pub c1: DVec2,
    pub c2: DVec2,
    pub end: DVec2,
}

impl CubicSegment {
    /// Segment from `p1` to `p2` with both control points on the vertical
    /// midpoint, at `p1.x` and `p2.x` respectively.
    pub fn s_curve(p1: DVec2, p2: DVec2) -> Self {
        let mid_y = (p1.y + p2.y) * 0.5;
        Self {
            c1: DVec2::new(p1.x, mid_y),
            c2: DVec2::new(p2.x, mid_y),
            end: p2,
        }
    }

    #[inline]
    pub fn point(&self, start: DVec2, t: f64) -> DVec2 {
        let u = 1.0 - t;
        start * (u * u * u) + self.c1 * (3.0 * u * u * t) + self.c2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelinePath {
    pub start: DVec2,
    pub segments: SmallVec<[CubicSegment; 8]>,
}

impl TimelinePath {
    /// Path through `anchors` in order, or `None` with fewer than two.
    pub fn through(anchors: &[DVec2]) -> Option<Self> {
        if anchors.len() < 2 {
            return None;
        }
        let segments = anchors
            .windows(2)
            .map(|w| CubicSegment::s_curve(w[0], w[1]))
            .collect();
        Some(Self {
            start: anchors[0],
            segments,
        })
    }

    /// SVG path data: `M x y C c1x c1y, c2x c2y, x y ...`.
    pub fn to_svg_path_data(&self) -> String {
        let mut d = String::with_capacity(16 + self.segments.len() * 48);
        _ = write!(d, "M {} {}", self.start.x, self.start.y);
        for s in &self.segments {
            _ = write!(
                d,
                " C {} {}, {} {}, {} {}",
                s.c1.x, s.c1.y, s.c2.x, s.c2.y, s.end.x, s.end.y
            );
        }
        d
    }

    /// Points along the path, `per_segment` steps per segment, both ends included.
    pub fn sample(&self, per_segment: usize) -> Vec<DVec2> {
        let steps = per_segment.max(1);
        let mut out = Vec::with_capacity(self.segments.len() * steps + 1);
        out.push(self.start);
        let mut from = self.start;
        for s in &self.segments {
            for k in 1..=steps {
                out.push(s.point(from, k as f64 / steps as f64));
            }
            from = s.end;
        }
        out
    }

    /// Polyline length of the flattened path. Used when the host cannot
    /// measure the rendered element.
    pub fn approximate_length(&self) -> f64 {
        self.sample(TIMELINE_SAMPLES_PER_SEGMENT)
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}

/// Scroll-driven draw progress of the timeline path with the default tuning.
pub fn reveal_fraction(viewport_height: f64, container_top: f64, container_height: f64) -> f64 {
    TimelineConfig::default().reveal_fraction(viewport_height, container_top, container_height)
}

/// Stroke dash offset hiding the undrawn `1 - progress` share of the path.
#[inline]
pub fn dash_offset(total_length: f64, progress: f64) -> f64 {
    total_length * (1.0 - progress.clamp(0.0, 1.0))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineConfig {
    pub reveal_start: f64, // fraction of viewport height above the bottom edge
    pub overshoot: f64,
    pub settle_delay_ms: i32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            reveal_start: TIMELINE_REVEAL_START,
            overshoot: TIMELINE_REVEAL_OVERSHOOT,
            settle_delay_ms: TIMELINE_SETTLE_DELAY_MS,
        }
    }
}

impl TimelineConfig {
    /// Draw progress in [0, 1].
    ///
    /// Revealing starts once the container top is 80% of the way down the
    /// viewport, and the overshoot finishes it a little before the container
    /// bottom arrives. A container with no height never reveals.
    pub fn reveal_fraction(
        &self,
        viewport_height: f64,
        container_top: f64,
        container_height: f64,
    ) -> f64 {
        if container_height <= 0.0 || !container_height.is_finite() {
            return 0.0;
        }
        let scrolled = viewport_height - container_top - self.reveal_start * viewport_height;
        let progress = (scrolled / container_height) * self.overshoot;
        if progress.is_nan() {
            return 0.0;
        }
        progress.clamp(0.0, 1.0)
    }
}

/// Measured path length plus the last applied progress.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimelineReveal {
    pub config: TimelineConfig,
    total_length: f64,
    progress: f64,
}

impl TimelineReveal {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            total_length: 0.0,
            progress: 0.0,
        }
    }

    #[inline]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn set_total_length(&mut self, length: f64) {
        self.total_length = if length.is_finite() { length.max(0.0) } else { 0.0 };
    }

    /// Dash offset for the current progress, e.g. right after re-measuring.
    #[inline]
    pub fn current_offset(&self) -> f64 {
        dash_offset(self.total_length, self.progress)
    }

    /// Recompute progress for a scroll position and return the dash offset.
    pub fn on_scroll(
        &mut self,
        viewport_height: f64,
        container_top: f64,
        container_height: f64,
    ) -> f64 {
        self.progress =
            self.config
                .reveal_fraction(viewport_height, container_top, container_height);
        self.current_offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_data_lists_every_segment() {
        let path = TimelinePath::through(&[
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 20.0),
            DVec2::new(0.0, 40.0),
        ])
        .unwrap();
        assert_eq!(
            path.to_svg_path_data(),
            "M 0 0 C 0 10, 10 10, 10 20 C 10 30, 0 30, 0 40"
        );
    }

    #[test]
    fn straight_segment_length_matches_distance() {
        let path =
            TimelinePath::through(&[DVec2::new(5.0, 0.0), DVec2::new(5.0, 100.0)]).unwrap();
        assert!((path.approximate_length() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn reveal_ignores_degenerate_container() {
        assert_eq!(reveal_fraction(800.0, 100.0, 0.0), 0.0);
        assert_eq!(reveal_fraction(800.0, 100.0, -5.0), 0.0);
    }

    #[test]
    fn reveal_state_tracks_length() {
        let mut r = TimelineReveal::default();
        r.set_total_length(f64::NAN);
        assert_eq!(r.total_length(), 0.0);
        r.set_total_length(500.0);
        assert_eq!(r.on_scroll(1000.0, 2000.0, 400.0), 500.0);
        assert_eq!(r.on_scroll(1000.0, -5000.0, 400.0), 0.0);
        assert_eq!(r.progress(), 1.0);
    }
}
