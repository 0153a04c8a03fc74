use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Signed dihedral angle in degrees, in the range (-180, 180], for the four points
/// `p0-p1-p2-p3` (IUPAC convention).
///
/// Returns `None` when three consecutive points are collinear and the angle is undefined.
pub fn dihedral_angle(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> Option<f64> {
    let b0 = p0 - p1;
    let b1 = (p2 - p1).try_normalize(f64::EPSILON)?;
    let b2 = p3 - p2;

    // Projections of the outer bonds onto the plane perpendicular to the central bond.
    let v = b0 - b1 * b0.dot(&b1);
    let w = b2 - b1 * b2.dot(&b1);
    if v.norm_squared() < f64::EPSILON || w.norm_squared() < f64::EPSILON {
        return None;
    }

    let x = v.dot(&w);
    let y = b1.cross(&v).dot(&w);
    Some(y.atan2(x).to_degrees())
}

/// Unit vectors evenly distributed over a sphere using the golden-section spiral.
pub fn golden_sphere_points(n: usize) -> Vec<Vector3<f64>> {
    if n == 0 {
        return Vec::new();
    }
    let increment = PI * (3.0 - 5.0_f64.sqrt());
    let offset = 2.0 / n as f64;

    (0..n)
        .map(|k| {
            let y = k as f64 * offset - 1.0 + offset / 2.0;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let phi = k as f64 * increment;
            Vector3::new(phi.cos() * r, y, phi.sin() * r)
        })
        .collect()
}

/// Shortest angular separation between two angles in degrees, accounting for wrap-around.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn dihedral_of_trans_configuration_is_180() {
        let p0 = Point3::new(1.0, 1.0, 0.0);
        let p1 = Point3::new(0.0, 1.0, 0.0);
        let p2 = Point3::new(0.0, 0.0, 0.0);
        let p3 = Point3::new(-1.0, 0.0, 0.0);
        let angle = dihedral_angle(&p0, &p1, &p2, &p3).unwrap();
        assert!((angle.abs() - 180.0).abs() < EPS);
    }

    #[test]
    fn dihedral_of_cis_configuration_is_zero() {
        let p0 = Point3::new(1.0, 1.0, 0.0);
        let p1 = Point3::new(0.0, 1.0, 0.0);
        let p2 = Point3::new(0.0, 0.0, 0.0);
        let p3 = Point3::new(1.0, 0.0, 0.0);
        let angle = dihedral_angle(&p0, &p1, &p2, &p3).unwrap();
        assert!(angle.abs() < EPS);
    }

    #[test]
    fn dihedral_sign_follows_handedness() {
        let p0 = Point3::new(1.0, 0.0, 0.0);
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(0.0, 0.0, 1.0);
        let plus = dihedral_angle(&p0, &p1, &p2, &Point3::new(0.0, 1.0, 1.0)).unwrap();
        let minus = dihedral_angle(&p0, &p1, &p2, &Point3::new(0.0, -1.0, 1.0)).unwrap();
        assert!((plus - 90.0).abs() < EPS);
        assert!((minus + 90.0).abs() < EPS);
    }

    #[test]
    fn dihedral_is_undefined_for_collinear_points() {
        let p = |x: f64| Point3::new(x, 0.0, 0.0);
        assert!(dihedral_angle(&p(0.0), &p(1.0), &p(2.0), &Point3::new(3.0, 1.0, 0.0)).is_none());
    }

    #[test]
    fn golden_sphere_points_are_unit_vectors_and_balanced() {
        let points = golden_sphere_points(200);
        assert_eq!(points.len(), 200);
        for v in &points {
            assert!((v.norm() - 1.0).abs() < 1e-12);
        }
        let mean = points.iter().fold(Vector3::zeros(), |a, v| a + v) / 200.0;
        assert!(mean.norm() < 0.05);
        assert!(golden_sphere_points(0).is_empty());
    }

    #[test]
    fn angular_distance_wraps_around() {
        assert!((angular_distance(170.0, -170.0) - 20.0).abs() < EPS);
        assert!((angular_distance(-90.0, 90.0) - 180.0).abs() < EPS);
        assert!(angular_distance(45.0, 45.0).abs() < EPS);
    }

    #[test]
    fn centroid_of_empty_slice_is_none() {
        assert!(centroid(&[]).is_none());
        let c = centroid(&[Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0)]).unwrap();
        assert_eq!(c, Point3::new(1.0, 2.0, 3.0));
    }
}
