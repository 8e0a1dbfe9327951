//! Planar geometry primitives: points, segments, angles and polygon tests.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::ops::{Add, Mul, Sub};

/// Tolerance for parallel/degenerate tests
pub const EPSILON: f64 = 1e-12;

/// Slack on the crossed segment's parameter so rays through a shared
/// endpoint still register a hit
const ENDPOINT_SLACK: f64 = 1e-9;

/// A point or displacement in the arena plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ORIGIN: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians)
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: cos, y: sin }
    }

    /// Point at `radius` along `angle` from the origin
    pub fn polar(radius: f64, angle: f64) -> Self {
        Self::from_angle(angle) * radius
    }

    pub fn cross(self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// A finite line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Segment from `origin` along `angle` with the given length
    pub fn ray(origin: Vec2, angle: f64, length: f64) -> Self {
        Self::new(origin, origin + Vec2::polar(length, angle))
    }

    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// Parameter `t` along `self` where it crosses `other`, if the two
    /// segments intersect in a single point. Parallel segments never report
    /// an intersection. `other`'s endpoints are matched with a small slack.
    pub fn intersection_param(&self, other: &Segment) -> Option<f64> {
        let r = self.direction();
        let s = other.direction();
        let denom = r.cross(s);
        if denom.abs() < EPSILON {
            return None;
        }

        let qp = other.start - self.start;
        let t = qp.cross(s) / denom;
        let u = qp.cross(r) / denom;
        if (0.0..=1.0).contains(&t) && (-ENDPOINT_SLACK..=1.0 + ENDPOINT_SLACK).contains(&u) {
            Some(t)
        } else {
            None
        }
    }

    /// Point where `self` crosses `other`
    pub fn intersection(&self, other: &Segment) -> Option<Vec2> {
        self.intersection_param(other)
            .map(|t| self.start + self.direction() * t)
    }

    /// Whether `point` lies on the segment (within tolerance)
    pub fn touches(&self, point: Vec2) -> bool {
        let d = self.direction();
        let len_sq = d.dot(d);
        if len_sq == 0.0 {
            return self.start.distance(point) < 1e-9;
        }
        let rel = point - self.start;
        let t = rel.dot(d) / len_sq;
        if !(0.0..=1.0).contains(&t) {
            return false;
        }
        (rel.cross(d).abs() / len_sq.sqrt()) < 1e-9
    }
}

/// Wrap an angle into [0, 2π)
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Bearing from `from` to `to`, wrapped into [0, 2π)
pub fn bearing(from: Vec2, to: Vec2) -> f64 {
    let d = to - from;
    wrap_angle(d.y.atan2(d.x))
}

/// Circular containment: is `angle` strictly inside the slice that starts at
/// `lower` and spans `width` radians counter-clockwise?
///
/// Works across the 0/2π seam, unlike comparing wrapped bounds directly.
pub fn angle_in_slice(angle: f64, lower: f64, width: f64) -> bool {
    let offset = wrap_angle(angle - lower);
    offset > 0.0 && offset < width
}

/// Crossing-number point-in-polygon test over a closed ring.
pub fn point_in_ring(point: Vec2, ring: &[Vec2]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        let crosses = ((a.y > point.y) != (b.y > point.y))
            && (point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x);
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}
