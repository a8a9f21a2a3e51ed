use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use crate::picking::ray::Ray;

/// Orbit camera with damped controls.
///
/// Pointer drags and wheel steps accumulate into pending deltas; `update`
/// applies a `damping` fraction of them each frame and decays the rest, so
/// motion eases out after the pointer is released.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub target: Vec3,
    /// Rotation around the Y axis (radians).
    pub azimuth: f32,
    /// Angle above the XZ plane (radians), clamped short of the poles.
    pub elevation: f32,
    /// Distance from target.
    pub distance: f32,
    /// Vertical field of view (radians).
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of pending motion applied per frame (0 = frozen, 1 = no damping).
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    pending_azimuth: f32,
    pending_elevation: f32,
    pending_zoom: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            azimuth: 0.0,
            elevation: 0.3,
            distance: 50.0,
            fov_y: 75f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            damping: 0.05,
            min_distance: 2.0,
            max_distance: 500.0,
            screen_width: 800.0,
            screen_height: 600.0,
            pending_azimuth: 0.0,
            pending_elevation: 0.0,
            pending_zoom: 0.0,
        }
    }
}

impl OrbitCamera {
    const MAX_ELEVATION: f32 = 1.5; // ~86 degrees
    const ZOOM_SPEED: f32 = 0.1;

    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        let mut camera = Self::default();
        camera.set_screen_size(screen_width, screen_height);
        camera
    }

    /// Jump to a view preset, dropping any pending motion.
    pub fn set_view(&mut self, target: Vec3, distance: f32, elevation: f32) {
        self.target = target;
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self.elevation = elevation.clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
        self.azimuth = 0.0;
        self.pending_azimuth = 0.0;
        self.pending_elevation = 0.0;
        self.pending_zoom = 0.0;
    }

    /// Viewport size in pixels. Zero, negative or NaN sizes become 1 so a
    /// hidden canvas never poisons the projection.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_width = if width.is_finite() { width.max(1.0) } else { 1.0 };
        self.screen_height = if height.is_finite() { height.max(1.0) } else { 1.0 };
    }

    pub fn aspect(&self) -> f32 {
        self.screen_width / self.screen_height
    }

    /// Queue an orbit by a pointer drag of (dx, dy) pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        let per_pixel = std::f32::consts::TAU / self.screen_height;
        self.pending_azimuth -= dx * per_pixel;
        self.pending_elevation += dy * per_pixel;
    }

    /// Queue a zoom step (positive = zoom in).
    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.pending_zoom += delta;
    }

    /// Whether pending motion is still being applied.
    pub fn is_moving(&self) -> bool {
        self.pending_azimuth.abs() > 1e-5
            || self.pending_elevation.abs() > 1e-5
            || self.pending_zoom.abs() > 1e-5
    }

    /// Apply damped motion. Call once per frame.
    pub fn update(&mut self) {
        let k = self.damping.clamp(0.0, 1.0);

        self.azimuth += self.pending_azimuth * k;
        self.elevation = (self.elevation + self.pending_elevation * k)
            .clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
        self.distance = (self.distance * (1.0 - self.pending_zoom * k * Self::ZOOM_SPEED))
            .clamp(self.min_distance, self.max_distance);

        self.pending_azimuth *= 1.0 - k;
        self.pending_elevation *= 1.0 - k;
        self.pending_zoom *= 1.0 - k;
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target + Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az) * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            eye: self.position().extend(1.0).to_array(),
        }
    }

    /// Convert a screen position (pixels, origin top-left) to normalized
    /// device coordinates in [-1, 1], Y up.
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.screen_width * 2.0 - 1.0,
            1.0 - screen.y / self.screen_height * 2.0,
        )
    }

    /// World-space ray from the eye through a screen position. Distances
    /// along it are measured from the camera position.
    pub fn ray(&self, screen: Vec2) -> Ray {
        let ndc = self.screen_to_ndc(screen);
        let inv = self.view_projection().inverse();
        let eye = self.position();
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(eye, far - eye)
    }

    /// Project a world point to screen pixels. `None` if behind the camera.
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.screen_width,
            (1.0 - ndc.y) * 0.5 * self.screen_height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_center_is_ndc_origin() {
        let cam = OrbitCamera::new(800.0, 600.0);
        let ndc = cam.screen_to_ndc(Vec2::new(400.0, 300.0));
        assert!(ndc.length() < 1e-6);
        let corner = cam.screen_to_ndc(Vec2::new(0.0, 0.0));
        assert_eq!(corner, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn center_ray_points_at_target() {
        let mut cam = OrbitCamera::new(800.0, 600.0);
        cam.set_view(Vec3::ZERO, 30.0, 0.4);
        let ray = cam.ray(Vec2::new(400.0, 300.0));
        let to_target = (cam.target - ray.origin).normalize();
        assert!(ray.direction.dot(to_target) > 0.9999);
    }

    #[test]
    fn project_round_trips_target() {
        let cam = OrbitCamera::new(800.0, 600.0);
        let screen = cam.project(cam.target).unwrap();
        assert!((screen - Vec2::new(400.0, 300.0)).length() < 0.01);
    }

    #[test]
    fn damping_eases_orbit() {
        let mut cam = OrbitCamera::new(800.0, 600.0);
        cam.orbit(-100.0, 0.0);
        cam.update();
        let first = cam.azimuth;
        cam.update();
        let second = cam.azimuth - first;
        assert!(first > 0.0);
        assert!(second > 0.0 && second < first);
        assert!(cam.is_moving());
    }

    #[test]
    fn zoom_respects_limits() {
        let mut cam = OrbitCamera::new(800.0, 600.0);
        cam.damping = 1.0;
        cam.zoom(1000.0);
        cam.update();
        assert_eq!(cam.distance, cam.min_distance);
        cam.zoom(-1.0e6);
        cam.update();
        assert_eq!(cam.distance, cam.max_distance);
    }

    #[test]
    fn ray_starts_at_the_eye() {
        let mut cam = OrbitCamera::new(800.0, 600.0);
        cam.set_view(Vec3::ZERO, 30.0, 0.0);
        let ray = cam.ray(Vec2::new(400.0, 300.0));
        assert!((ray.origin - cam.position()).length() < 1e-4);
        assert!((ray.point_at(30.0) - cam.target).length() < 1e-3);
    }

    #[test]
    fn degenerate_viewport_is_clamped() {
        let mut cam = OrbitCamera::new(0.0, 0.0);
        assert_eq!((cam.screen_width, cam.screen_height), (1.0, 1.0));
        assert_eq!(cam.aspect(), 1.0);
        cam.orbit(20.0, 0.0);
        cam.orbit(f32::INFINITY, f32::NAN);
        cam.zoom(f32::NEG_INFINITY);
        cam.update();
        assert!(cam.azimuth.is_finite());
        assert!(cam.distance.is_finite());
        assert!(cam.position().is_finite());
    }

    #[test]
    fn elevation_is_clamped() {
        let mut cam = OrbitCamera::new(800.0, 600.0);
        cam.damping = 1.0;
        cam.orbit(0.0, 1.0e5);
        cam.update();
        assert!(cam.elevation <= OrbitCamera::MAX_ELEVATION);
    }
}
