//! Solar system model: Sun, eight planets on spinning pivots, the Moon,
//! Saturn's rings and a star field.
//!
//! Distances and sizes are exaggerated for readability; speeds are radians
//! per 60 Hz frame.

use glam::{Quat, Vec3};
use lab_engine::{
    CameraView, Color, EngineContext, Geometry, LocalTransform, Material, MeshDesc, ModelBuilder, Spin,
};

pub const TITLE: &str = "Solar System";

pub const SUN_RADIUS: f32 = 8.0;
pub const SUN_COLOR: Color = Color::from_hex(0xffcc33);
pub const SUN_EMISSIVE: Color = Color::from_hex(0xff9900);
pub const SUN_SPIN: f32 = 0.002;

pub const MOON_RADIUS: f32 = 0.45;
pub const MOON_DISTANCE: f32 = 3.0;
pub const MOON_SPEED: f32 = 0.05;

pub const SATURN_RING_INNER: f32 = 4.5;
pub const SATURN_RING_OUTER: f32 = 7.0;
/// Tilt of Saturn's ring plane (radians).
pub const SATURN_RING_TILT: f32 = 0.45;

pub const STAR_COUNT: usize = 1500;
pub const STAR_SHELL_MIN: f32 = 300.0;
pub const STAR_SHELL_MAX: f32 = 700.0;

/// Half-width of the orbit-path rings.
const ORBIT_PATH_HALF_WIDTH: f32 = 0.08;

pub struct Planet {
    pub name: &'static str,
    pub radius: f32,
    pub distance: f32,
    /// Orbital advance per frame.
    pub speed: f32,
    pub color: Color,
    /// Self-rotation per frame.
    pub spin: f32,
}

pub const PLANETS: [Planet; 8] = [
    Planet { name: "Mercury", radius: 0.8, distance: 15.0, speed: 0.040, color: Color::from_hex(0x8c8c8c), spin: 0.004 },
    Planet { name: "Venus", radius: 1.5, distance: 22.0, speed: 0.015, color: Color::from_hex(0xe6b870), spin: 0.002 },
    Planet { name: "Earth", radius: 1.6, distance: 30.0, speed: 0.010, color: Color::from_hex(0x2a6bd1), spin: 0.020 },
    Planet { name: "Mars", radius: 1.0, distance: 38.0, speed: 0.008, color: Color::from_hex(0xc1440e), spin: 0.018 },
    Planet { name: "Jupiter", radius: 4.0, distance: 55.0, speed: 0.002, color: Color::from_hex(0xd8ca9d), spin: 0.040 },
    Planet { name: "Saturn", radius: 3.5, distance: 72.0, speed: 0.0009, color: Color::from_hex(0xf4d47c), spin: 0.038 },
    Planet { name: "Uranus", radius: 2.5, distance: 88.0, speed: 0.0004, color: Color::from_hex(0x7fdbff), spin: 0.030 },
    Planet { name: "Neptune", radius: 2.4, distance: 100.0, speed: 0.0001, color: Color::from_hex(0x3f54ba), spin: 0.032 },
];

pub struct SolarSystem;

impl ModelBuilder for SolarSystem {
    fn title(&self) -> &str {
        TITLE
    }

    fn camera_view(&self) -> CameraView {
        CameraView { target: Vec3::ZERO, distance: 140.0, elevation: 0.5 }
    }

    fn build(&self, ctx: &mut EngineContext) {
        let sun = ctx.spawn_mesh(
            MeshDesc::new(
                "Sun",
                Geometry::Sphere { radius: SUN_RADIUS },
                Material::standard(SUN_COLOR).with_emissive(SUN_EMISSIVE),
            )
            .pickable(),
        );
        ctx.animate(Spin::about_y(sun, SUN_SPIN));

        for planet in &PLANETS {
            // Pivot at the origin; rotating it carries the planet around the Sun.
            let pivot = ctx.spawn_group(format!("{} Orbit", planet.name), LocalTransform::new(), None);
            let body = ctx.spawn_mesh(
                MeshDesc::new(
                    planet.name,
                    Geometry::Sphere { radius: planet.radius },
                    Material::standard(planet.color).with_shininess(16.0),
                )
                .with_parent(pivot)
                .with_position(Vec3::new(planet.distance, 0.0, 0.0))
                .pickable(),
            );
            ctx.animate(Spin::about_y(pivot, planet.speed));
            ctx.animate(Spin::about_y(body, planet.spin));

            ctx.spawn_mesh(MeshDesc::new(
                format!("{} Path", planet.name),
                Geometry::Ring {
                    inner: planet.distance - ORBIT_PATH_HALF_WIDTH,
                    outer: planet.distance + ORBIT_PATH_HALF_WIDTH,
                },
                Material::basic(Color::WHITE).with_opacity(0.2),
            ));

            match planet.name {
                "Earth" => spawn_moon(ctx, pivot, planet.distance),
                "Saturn" => spawn_saturn_rings(ctx, pivot, planet.distance),
                _ => {}
            }
        }

        spawn_star_field(ctx);
    }
}

fn spawn_moon(ctx: &mut EngineContext, earth_pivot: lab_engine::EntityId, distance: f32) {
    // Sits on Earth's orbit pivot so it follows Earth without inheriting its spin.
    let moon_pivot = ctx.spawn_group(
        "Moon Orbit",
        LocalTransform::from_translation(Vec3::new(distance, 0.0, 0.0)),
        Some(earth_pivot),
    );
    ctx.spawn_mesh(
        MeshDesc::new("Moon", Geometry::Sphere { radius: MOON_RADIUS }, Material::standard(Color::from_hex(0xcfcfcf)))
            .with_parent(moon_pivot)
            .with_position(Vec3::new(MOON_DISTANCE, 0.0, 0.0))
            .pickable(),
    );
    ctx.animate(Spin::about_y(moon_pivot, MOON_SPEED));
}

fn spawn_saturn_rings(ctx: &mut EngineContext, saturn_pivot: lab_engine::EntityId, distance: f32) {
    ctx.spawn_mesh(
        MeshDesc::new(
            "Saturn's Rings",
            Geometry::Ring { inner: SATURN_RING_INNER, outer: SATURN_RING_OUTER },
            Material::standard(Color::from_hex(0xc2a878)).with_opacity(0.8),
        )
        .with_parent(saturn_pivot)
        .with_position(Vec3::new(distance, 0.0, 0.0))
        .with_rotation(Quat::from_rotation_x(SATURN_RING_TILT))
        .pickable(),
    );
}

fn spawn_star_field(ctx: &mut EngineContext) {
    let mut stars = Vec::with_capacity(STAR_COUNT);
    for _ in 0..STAR_COUNT {
        let dir = Vec3::new(
            ctx.rng.range(-1.0, 1.0),
            ctx.rng.range(-1.0, 1.0),
            ctx.rng.range(-1.0, 1.0),
        )
        .try_normalize()
        .unwrap_or(Vec3::Y);
        stars.push(dir * ctx.rng.range(STAR_SHELL_MIN, STAR_SHELL_MAX));
    }
    ctx.spawn_points("Stars", stars, 0.7, Material::basic(Color::WHITE));
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_engine::{Viewer, ViewerConfig};

    fn loaded() -> Viewer {
        let mut v = Viewer::new(ViewerConfig::default(), |_| {});
        v.load(&SolarSystem);
        v
    }

    fn active_names(v: &Viewer) -> Vec<String> {
        let ctx = v.context();
        ctx.active_objects().iter().map(|&id| ctx.scene.get(id).unwrap().name.clone()).collect()
    }

    #[test]
    fn bodies_are_pickable() {
        let v = loaded();
        let names = active_names(&v);
        for expected in ["Sun", "Mercury", "Earth", "Neptune", "Moon", "Saturn's Rings"] {
            assert!(names.iter().any(|n| n == expected), "{expected} missing");
        }
        assert_eq!(names.len(), 1 + PLANETS.len() + 2);
    }

    #[test]
    fn paths_and_stars_are_not_pickable() {
        let v = loaded();
        let names = active_names(&v);
        assert!(!names.iter().any(|n| n.ends_with("Path") || n == "Stars"));
        let stars = v.context().scene.find_by_name("Stars").unwrap();
        assert_eq!(stars.points.as_ref().map(Vec::len), Some(STAR_COUNT));
    }

    #[test]
    fn planets_start_at_their_distance() {
        let v = loaded();
        for planet in &PLANETS {
            let e = v.context().scene.find_by_name(planet.name).unwrap();
            assert!((e.world_position().length() - planet.distance).abs() < 1e-3, "{}", planet.name);
        }
    }

    #[test]
    fn planets_orbit_but_keep_distance() {
        let mut v = loaded();
        let start = v.context().scene.find_by_name("Earth").unwrap().world_position();
        for _ in 0..60 {
            v.frame(1.0 / 60.0);
        }
        let earth = v.context().scene.find_by_name("Earth").unwrap().world_position();
        assert!((earth - start).length() > 1.0);
        assert!((earth.length() - 30.0).abs() < 1e-3);

        let moon = v.context().scene.find_by_name("Moon").unwrap().world_position();
        assert!(((moon - earth).length() - MOON_DISTANCE).abs() < 1e-3);
    }

    #[test]
    fn sun_is_emissive_and_highlightable() {
        let v = loaded();
        let sun = v.context().scene.find_by_name("Sun").unwrap();
        assert_eq!(sun.mesh.unwrap().material.emissive, Some(SUN_EMISSIVE));
    }

    #[test]
    fn stars_sit_in_their_shell() {
        let v = loaded();
        let stars = v.context().scene.find_by_name("Stars").unwrap();
        for p in stars.points.as_ref().unwrap() {
            let d = p.length();
            assert!((STAR_SHELL_MIN..=STAR_SHELL_MAX).contains(&d), "star at {d}");
        }
    }
}
