// picking/ray.rs
// Rays and the intersection tests used for pointer picking.
//
// Tests run in each mesh's local space: the world ray is carried through the
// inverse world matrix without renormalizing, so the parameter `t` returned
// by every test is directly the world-space distance along the original
// unit-length ray.

use glam::{Mat4, Vec3};
use crate::components::mesh::Geometry;

/// A ray in 3D space defined by an origin and a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with a unit direction. A zero direction falls back
    /// to -Z (straight into the screen).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec3::NEG_Z);
        Self { origin, direction }
    }

    /// Get a point along the ray at parameter t.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Carry the ray through an affine transform. The direction is not
    /// renormalized, so `t` keeps its meaning.
    pub fn transformed(&self, m: &Mat4) -> Ray {
        Ray {
            origin: m.transform_point3(self.origin),
            direction: m.transform_vector3(self.direction),
        }
    }

    /// Nearest non-negative root of `a t² + b t + c = 0`.
    fn nearest_root(a: f32, b: f32, c: f32) -> Option<f32> {
        if a.abs() < f32::EPSILON {
            return None;
        }
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let (t0, t1) = ((-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a));
        let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }

    /// Distance along the ray to the first intersection with a sphere.
    ///
    /// Returns `None` on a miss or when the sphere is entirely behind the
    /// origin. An origin inside the sphere reports the exit distance.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let a = self.direction.length_squared();
        let b = 2.0 * oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        Self::nearest_root(a, b, c)
    }

    /// Capped cylinder along local Y, centered on the origin.
    pub fn intersect_cylinder(&self, radius: f32, height: f32) -> Option<f32> {
        let half = height * 0.5;
        let (o, d) = (self.origin, self.direction);
        let mut best: Option<f32> = None;
        let mut keep = |t: f32| {
            if t >= 0.0 && best.map_or(true, |b| t < b) {
                best = Some(t);
            }
        };

        // Side wall.
        let a = d.x * d.x + d.z * d.z;
        let b = 2.0 * (o.x * d.x + o.z * d.z);
        let c = o.x * o.x + o.z * o.z - radius * radius;
        if a.abs() >= f32::EPSILON {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant >= 0.0 {
                let sqrt_d = discriminant.sqrt();
                for t in [(-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a)] {
                    if self.point_at(t).y.abs() <= half {
                        keep(t);
                    }
                }
            }
        }

        // End caps.
        if d.y.abs() >= f32::EPSILON {
            for cap in [-half, half] {
                let t = (cap - o.y) / d.y;
                let p = self.point_at(t);
                if p.x * p.x + p.z * p.z <= radius * radius {
                    keep(t);
                }
            }
        }

        best
    }

    /// Flat annulus in the local XZ plane.
    pub fn intersect_annulus(&self, inner: f32, outer: f32) -> Option<f32> {
        if self.direction.y.abs() < f32::EPSILON {
            return None;
        }
        let t = -self.origin.y / self.direction.y;
        if t < 0.0 {
            return None;
        }
        let p = self.point_at(t);
        let r2 = p.x * p.x + p.z * p.z;
        (r2 >= inner * inner && r2 <= outer * outer).then_some(t)
    }

    /// Intersect a local-space geometry. Point clouds are never hit.
    pub fn intersect_geometry(&self, geometry: &Geometry) -> Option<f32> {
        match *geometry {
            Geometry::Sphere { radius } => self.intersect_sphere(Vec3::ZERO, radius),
            Geometry::Cylinder { radius, height } => self.intersect_cylinder(radius, height),
            // A torus is treated as the flat band it sweeps.
            Geometry::Torus { radius, tube } => {
                self.intersect_annulus((radius - tube).max(0.0), radius + tube)
            }
            Geometry::Ring { inner, outer } => self.intersect_annulus(inner, outer),
            Geometry::Points { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_sphere_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -2.0));
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!((ray.point_at(t) - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn misses_offset_sphere() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn ignores_sphere_behind_origin() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn origin_inside_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn transformed_ray_keeps_world_distance() {
        let world = Ray::new(Vec3::new(0.0, 0.0, 20.0), Vec3::NEG_Z);
        // Sphere of local radius 1 scaled by 2 and moved to z = 5.
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::IDENTITY,
            Vec3::new(0.0, 0.0, 5.0),
        );
        let local = world.transformed(&model.inverse());
        let t = local.intersect_geometry(&Geometry::Sphere { radius: 1.0 }).unwrap();
        assert!((t - 13.0).abs() < 1e-4, "t = {t}");
    }

    #[test]
    fn cylinder_side_and_caps() {
        let side = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_X);
        assert!((side.intersect_cylinder(1.0, 4.0).unwrap() - 9.0).abs() < 1e-5);

        let top = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        assert!((top.intersect_cylinder(1.0, 4.0).unwrap() - 8.0).abs() < 1e-5);

        let above = Ray::new(Vec3::new(10.0, 3.0, 0.0), Vec3::NEG_X);
        assert!(above.intersect_cylinder(1.0, 4.0).is_none());
    }

    #[test]
    fn annulus_has_a_hole() {
        let through_hole = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(through_hole.intersect_annulus(1.0, 2.0).is_none());

        let on_band = Ray::new(Vec3::new(1.5, 5.0, 0.0), Vec3::NEG_Y);
        assert!((on_band.intersect_annulus(1.0, 2.0).unwrap() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn zero_direction_falls_back() {
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(ray.direction, Vec3::NEG_Z);
    }
}
