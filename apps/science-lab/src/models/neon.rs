//! Neon atom (Bohr picture): a packed nucleus and two tilted electron shells.

use std::f32::consts::TAU;
use glam::{Quat, Vec3};
use lab_engine::{
    CameraView, Color, EngineContext, EntityId, Geometry, LocalTransform, Material, MeshDesc, ModelBuilder, Spin,
};

pub const TITLE: &str = "Neon Atom";

pub const PROTONS: usize = 10;
pub const NEUTRONS: usize = 10;
/// Radius of the sphere the nucleons are packed on.
pub const NUCLEUS_RADIUS: f32 = 1.4;
const NUCLEON_RADIUS: f32 = 0.6;
const NUCLEUS_SPIN: f32 = 0.004;

const PROTON_COLOR: Color = Color::from_hex(0xff3b3b);
const NEUTRON_COLOR: Color = Color::from_hex(0x9a9a9a);
const ELECTRON_COLOR: Color = Color::from_hex(0x33ffff);
const ELECTRON_GLOW: Color = Color::from_hex(0x0077aa);
const ELECTRON_RADIUS: f32 = 0.35;

pub struct Shell {
    pub electrons: usize,
    pub radius: f32,
    /// Orbital advance per frame.
    pub speed: f32,
    /// Orbital plane tilt about X then Z (radians).
    pub tilt: (f32, f32),
}

pub const SHELLS: [Shell; 2] = [
    Shell { electrons: 2, radius: 4.0, speed: 0.03, tilt: (0.35, 0.0) },
    Shell { electrons: 8, radius: 7.0, speed: 0.015, tilt: (-0.5, 0.3) },
];

pub fn electron_name(shell: usize) -> String {
    format!("Electron (Shell {shell})")
}

/// Evenly spread points on a sphere (Fibonacci spiral).
fn distribute_on_sphere(radius: f32, count: usize) -> Vec<Vec3> {
    let golden_ratio = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let angle_increment = TAU / golden_ratio;

    (0..count)
        .map(|i| {
            let t = i as f32 / (count - 1).max(1) as f32;
            let inclination = (1.0 - 2.0 * t).acos();
            let azimuth = angle_increment * i as f32;

            Vec3::new(
                inclination.sin() * azimuth.cos(),
                inclination.cos(),
                inclination.sin() * azimuth.sin(),
            ) * radius
        })
        .collect()
}

pub struct NeonAtom;

impl ModelBuilder for NeonAtom {
    fn title(&self) -> &str {
        TITLE
    }

    fn camera_view(&self) -> CameraView {
        CameraView { target: Vec3::ZERO, distance: 22.0, elevation: 0.4 }
    }

    fn build(&self, ctx: &mut EngineContext) {
        let nucleus = ctx.spawn_group("Nucleus", LocalTransform::new(), None);
        ctx.animate(Spin::new(nucleus, Vec3::new(0.3, 1.0, 0.0), NUCLEUS_SPIN));

        // Alternate so protons and neutrons interleave over the sphere.
        for (i, pos) in distribute_on_sphere(NUCLEUS_RADIUS, PROTONS + NEUTRONS).into_iter().enumerate() {
            let (name, color) = if i % 2 == 0 { ("Proton", PROTON_COLOR) } else { ("Neutron", NEUTRON_COLOR) };
            ctx.spawn_mesh(
                MeshDesc::new(name, Geometry::Sphere { radius: NUCLEON_RADIUS }, Material::standard(color))
                    .with_parent(nucleus)
                    .with_position(pos)
                    .pickable(),
            );
        }

        for (index, shell) in SHELLS.iter().enumerate() {
            spawn_shell(ctx, index + 1, shell);
        }
    }
}

fn spawn_shell(ctx: &mut EngineContext, number: usize, shell: &Shell) {
    let tilt = Quat::from_rotation_x(shell.tilt.0) * Quat::from_rotation_z(shell.tilt.1);
    let plane = ctx.spawn_group(
        format!("Shell {number}"),
        LocalTransform::new().with_rotation(tilt),
        None,
    );

    ctx.spawn_mesh(
        MeshDesc::new(
            format!("Shell {number} Orbit"),
            Geometry::Torus { radius: shell.radius, tube: 0.04 },
            Material::basic(Color::from_hex(0x88aaff)).with_opacity(0.35),
        )
        .with_parent(plane),
    );

    for _ in 0..shell.electrons {
        let start = ctx.rng.range(0.0, TAU);
        let pivot = spawn_pivot(ctx, plane, start);
        ctx.spawn_mesh(
            MeshDesc::new(
                electron_name(number),
                Geometry::Sphere { radius: ELECTRON_RADIUS },
                Material::standard(ELECTRON_COLOR).with_emissive(ELECTRON_GLOW),
            )
            .with_parent(pivot)
            .with_position(Vec3::new(shell.radius, 0.0, 0.0))
            .pickable(),
        );
        ctx.animate(Spin::about_y(pivot, shell.speed));
    }
}

fn spawn_pivot(ctx: &mut EngineContext, plane: EntityId, start_angle: f32) -> EntityId {
    ctx.spawn_group(
        "",
        LocalTransform::new().with_rotation(Quat::from_rotation_y(start_angle)),
        Some(plane),
    )
}
