//! Small geometry helpers over `cgmath` types.
//!
//! Positions are stored as `Point3<f32>`, but all computations on distances
//! and angles are done in `f64`.

use cgmath::{InnerSpace, Point3, Vector3};


/// Types that can be interpreted to represent some kind of 3D position.
///
/// This type is implemented for the strongly typed `cgmath::Point3<f32>`, as
/// well as for the "weaker" types `(f32, f32, f32)` and `[f32; 3]`. All
/// methods of the mesh that set a position accept any of those.
pub trait Pos3Like: Copy {
    /// Creates the position type from the given three coordinates.
    fn from_coords(x: f32, y: f32, z: f32) -> Self;

    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn z(&self) -> f32;

    fn to_point3(self) -> Point3<f32> {
        Point3::new(self.x(), self.y(), self.z())
    }
}

impl Pos3Like for Point3<f32> {
    fn from_coords(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z)
    }
    fn x(&self) -> f32 { self.x }
    fn y(&self) -> f32 { self.y }
    fn z(&self) -> f32 { self.z }
}

impl Pos3Like for (f32, f32, f32) {
    fn from_coords(x: f32, y: f32, z: f32) -> Self {
        (x, y, z)
    }
    fn x(&self) -> f32 { self.0 }
    fn y(&self) -> f32 { self.1 }
    fn z(&self) -> f32 { self.2 }
}

impl Pos3Like for [f32; 3] {
    fn from_coords(x: f32, y: f32, z: f32) -> Self {
        [x, y, z]
    }
    fn x(&self) -> f32 { self[0] }
    fn y(&self) -> f32 { self[1] }
    fn z(&self) -> f32 { self[2] }
}


fn to_f64(p: Point3<f32>) -> Point3<f64> {
    p.cast::<f64>().unwrap_or_else(|| Point3::new(0.0, 0.0, 0.0))
}

/// Returns the point halfway between `a` and `b`.
pub fn midpoint(a: Point3<f32>, b: Point3<f32>) -> Point3<f32> {
    Point3::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, (a.z + b.z) / 2.0)
}

/// Squared euclidean distance between `a` and `b`.
pub fn distance_squared(a: Point3<f32>, b: Point3<f32>) -> f64 {
    (to_f64(b) - to_f64(a)).magnitude2()
}

/// Returns the average of all given points or the origin if `points` is
/// empty.
pub fn centroid(points: impl IntoIterator<Item = Point3<f32>>) -> Point3<f32> {
    let mut sum = Vector3::new(0.0f64, 0.0, 0.0);
    let mut count = 0;
    for p in points {
        sum += Vector3::new(p.x as f64, p.y as f64, p.z as f64);
        count += 1;
    }

    if count == 0 {
        return Point3::new(0.0, 0.0, 0.0);
    }

    let c = sum / count as f64;
    Point3::new(c.x as f32, c.y as f32, c.z as f32)
}

/// Cosine of the angle between `u` and `v`, clamped to `[-1, 1]`.
///
/// Returns `None` if one of the vectors has length 0.
pub fn cos_angle(u: Vector3<f64>, v: Vector3<f64>) -> Option<f64> {
    let mag_u = u.magnitude();
    let mag_v = v.magnitude();
    if mag_u == 0.0 || mag_v == 0.0 {
        return None;
    }

    Some(num_traits::clamp(u.dot(v) / (mag_u * mag_v), -1.0, 1.0))
}

/// Cosine of the angle at `p1` in the triangle `(p0, p1, p2)`.
///
/// Returns `None` if `p1` coincides with one of the other two points.
pub fn cos_triangle_angle(p0: Point3<f32>, p1: Point3<f32>, p2: Point3<f32>) -> Option<f64> {
    let p1 = to_f64(p1);
    cos_angle(to_f64(p0) - p1, to_f64(p2) - p1)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32, z: f32) -> Point3<f32> {
        Point3::new(x, y, z)
    }

    #[test]
    fn midpoint_and_distance() {
        assert_eq!(midpoint(p(0.0, 0.0, 0.0), p(2.0, 4.0, -2.0)), p(1.0, 2.0, -1.0));
        assert_eq!(distance_squared(p(1.0, 1.0, 1.0), p(2.0, 3.0, 1.0)), 5.0);
    }

    #[test]
    fn centroid_of_square() {
        let square = vec![p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 2.0, 0.0), p(0.0, 2.0, 0.0)];
        assert_eq!(centroid(square), p(1.0, 1.0, 0.0));
        assert_eq!(centroid(Vec::new()), p(0.0, 0.0, 0.0));
    }

    #[test]
    fn angles() {
        let right = cos_triangle_angle(p(1.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        assert_eq!(right, Some(0.0));

        let straight = cos_triangle_angle(p(1.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(-3.0, 0.0, 0.0));
        assert_eq!(straight, Some(-1.0));

        let degenerate = cos_triangle_angle(p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        assert_eq!(degenerate, None);
    }

    #[test]
    fn pos3_like() {
        assert_eq!([1.0f32, 2.0, 3.0].to_point3(), p(1.0, 2.0, 3.0));
        assert_eq!((1.0f32, 2.0f32, 3.0f32).to_point3(), p(1.0, 2.0, 3.0));
        assert_eq!(<[f32; 3]>::from_coords(4.0, 5.0, 6.0), [4.0, 5.0, 6.0]);
    }
}
