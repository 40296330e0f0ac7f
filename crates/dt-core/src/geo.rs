//! Vector/geometry primitives shared by every stage of the generator.
//!
//! `Point2`/`Point3` are double-precision Cartesian coordinates in meters —
//! the generator works at city scale (single-digit kilometers), so `f64`
//! buys correctly-rounded arc-length integration without the precision
//! games a `f32` lat/lon type would need at planetary scale.

use std::ops::{Add, Mul, Sub};

/// A 2D Cartesian point/vector in meters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point2 = Point2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn dot(self, other: Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        (self - other).norm()
    }

    #[inline]
    pub fn normalize(self) -> Point2 {
        let n = self.norm();
        Point2::new(self.x / n, self.y / n)
    }

    #[inline]
    pub fn lerp(self, other: Point2, t: f64) -> Point2 {
        self + (other - self) * t
    }

    #[inline]
    pub fn to_3d(self, z: f64) -> Point3 {
        Point3::new(self.x, self.y, z)
    }
}

impl Add for Point2 {
    type Output = Point2;
    #[inline]
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    #[inline]
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;
    #[inline]
    fn mul(self, rhs: f64) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

/// A 3D Cartesian point/vector in meters.  `z` is the terrain height
/// (abstractly `height(x, y) → z`); the baseline implementation fixes
/// `z = 0` for every probe (see [`crate::config`]).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const ZERO: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn dot(self, other: Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Point3) -> f64 {
        (self - other).norm()
    }

    #[inline]
    pub fn normalize(self) -> Point3 {
        let n = self.norm();
        Point3::new(self.x / n, self.y / n, self.z / n)
    }

    #[inline]
    pub fn lerp(self, other: Point3, t: f64) -> Point3 {
        self + (other - self) * t
    }

    /// Ground-plane projection, discarding `z`.
    #[inline]
    pub fn to_2d(self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

impl Add for Point3 {
    type Output = Point3;
    #[inline]
    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;
    #[inline]
    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;
    #[inline]
    fn mul(self, rhs: f64) -> Point3 {
        Point3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// A 2D orthonormal basis `[row0, row1]` used to orient a city core's local
/// exponential distribution: `row0 = (cos θ, sin θ)`,
/// `row1 = (sin θ, -cos θ)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Basis2 {
    pub row0: Point2,
    pub row1: Point2,
}

impl Basis2 {
    /// Build the basis from an orientation angle `theta` (radians).
    pub fn from_angle(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Basis2 {
            row0: Point2::new(cos, sin),
            row1: Point2::new(sin, -cos),
        }
    }

    /// Apply the basis to a local 2D offset: `basis · local`.
    #[inline]
    pub fn apply(self, local: Point2) -> Point2 {
        Point2::new(
            self.row0.x * local.x + self.row1.x * local.y,
            self.row0.y * local.x + self.row1.y * local.y,
        )
    }
}

/// Approximate equality within an absolute tolerance — used throughout the
/// test suite for curve/geometry assertions.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}
