//! DNA double helix.
//!
//! Each rung carries two backbone spheres on opposite sides of the axis,
//! two base cylinders reaching inward, and a thin hydrogen bond bridging
//! the gap between them. Base identity is drawn from the context RNG, so a
//! fresh helix is sequenced on every load.

use glam::{Quat, Vec3};
use lab_engine::{
    CameraView, Color, EngineContext, EntityId, Geometry, LocalTransform, Material, MeshDesc, ModelBuilder, Rng,
    Spin,
};

pub const TITLE: &str = "DNA Double Helix";

pub const BASE_PAIR_COUNT: usize = 20;
/// Vertical distance between rungs.
pub const RISE: f32 = 1.5;
/// Rotation between rungs: ten pairs per full turn.
pub const TURN: f32 = std::f32::consts::TAU / 10.0;
pub const HELIX_RADIUS: f32 = 5.0;
/// Gap at the axis spanned by the hydrogen bond.
pub const BOND_GAP: f32 = 0.8;
pub const HELIX_SPIN: f32 = 0.005;

const BACKBONE_RADIUS: f32 = 0.7;
const BASE_RADIUS: f32 = 0.3;
const BOND_RADIUS: f32 = 0.08;

pub const BACKBONE_NAME: &str = "Sugar-Phosphate Backbone";
const BACKBONE_COLOR: Color = Color::from_hex(0xe0e0e0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    Adenine,
    Thymine,
    Guanine,
    Cytosine,
}

impl Base {
    pub fn name(self) -> &'static str {
        match self {
            Base::Adenine => "Adenine",
            Base::Thymine => "Thymine",
            Base::Guanine => "Guanine",
            Base::Cytosine => "Cytosine",
        }
    }

    pub fn from_name(name: &str) -> Option<Base> {
        match name {
            "Adenine" => Some(Base::Adenine),
            "Thymine" => Some(Base::Thymine),
            "Guanine" => Some(Base::Guanine),
            "Cytosine" => Some(Base::Cytosine),
            _ => None,
        }
    }

    /// Watson-Crick partner.
    pub fn complement(self) -> Base {
        match self {
            Base::Adenine => Base::Thymine,
            Base::Thymine => Base::Adenine,
            Base::Guanine => Base::Cytosine,
            Base::Cytosine => Base::Guanine,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Base::Adenine => Color::from_hex(0xff4136),
            Base::Thymine => Color::from_hex(0x2ecc40),
            Base::Guanine => Color::from_hex(0x0074d9),
            Base::Cytosine => Color::from_hex(0xffdc00),
        }
    }
}

/// Pick one rung: A–T or G–C with equal odds, then which strand gets which.
pub fn random_pair(rng: &mut Rng) -> (Base, Base) {
    let first = if rng.chance() { Base::Adenine } else { Base::Guanine };
    if rng.chance() {
        (first, first.complement())
    } else {
        (first.complement(), first)
    }
}

pub struct DnaHelix;

impl ModelBuilder for DnaHelix {
    fn title(&self) -> &str {
        TITLE
    }

    fn camera_view(&self) -> CameraView {
        CameraView { target: Vec3::ZERO, distance: 45.0, elevation: 0.2 }
    }

    fn build(&self, ctx: &mut EngineContext) {
        let helix = ctx.spawn_group("DNA Helix", LocalTransform::new(), None);
        ctx.animate(Spin::about_y(helix, HELIX_SPIN));

        for i in 0..BASE_PAIR_COUNT {
            let y = (i as f32 - BASE_PAIR_COUNT as f32 / 2.0) * RISE;
            let angle = i as f32 * TURN;
            let pair = random_pair(&mut ctx.rng);
            spawn_rung(ctx, helix, y, angle, pair);
        }
    }
}

fn spawn_rung(ctx: &mut EngineContext, helix: EntityId, y: f32, angle: f32, (left, right): (Base, Base)) {
    let out = Vec3::new(angle.cos(), 0.0, angle.sin());
    let center = Vec3::new(0.0, y, 0.0);
    // Cylinders are built along +Y; lay them along the rung.
    let along = Quat::from_rotation_arc(Vec3::Y, out);
    let base_len = HELIX_RADIUS - BOND_GAP / 2.0;

    for (side, base) in [(1.0f32, left), (-1.0f32, right)] {
        let dir = out * side;

        ctx.spawn_mesh(
            MeshDesc::new(
                BACKBONE_NAME,
                Geometry::Sphere { radius: BACKBONE_RADIUS },
                Material::standard(BACKBONE_COLOR),
            )
            .with_parent(helix)
            .with_position(center + dir * HELIX_RADIUS)
            .pickable(),
        );

        ctx.spawn_mesh(
            MeshDesc::new(
                base.name(),
                Geometry::Cylinder { radius: BASE_RADIUS, height: base_len },
                Material::standard(base.color()),
            )
            .with_parent(helix)
            .with_position(center + dir * (BOND_GAP / 2.0 + base_len / 2.0))
            .with_rotation(along)
            .pickable(),
        );
    }

    ctx.spawn_mesh(
        MeshDesc::new(
            "Hydrogen Bond",
            Geometry::Cylinder { radius: BOND_RADIUS, height: BOND_GAP },
            Material::basic(Color::WHITE).with_opacity(0.6),
        )
        .with_parent(helix)
        .with_position(center)
        .with_rotation(along),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use lab_engine::{Viewer, ViewerConfig};

    fn loaded(seed: u64) -> Viewer {
        let mut v = Viewer::new(ViewerConfig { seed, ..Default::default() }, |_| {});
        v.load(&DnaHelix);
        v
    }

    /// Bases grouped by rung height.
    fn rungs(v: &Viewer) -> BTreeMap<i32, Vec<Base>> {
        let mut out: BTreeMap<i32, Vec<Base>> = BTreeMap::new();
        for e in v.context().scene.iter() {
            if let Some(base) = Base::from_name(&e.name) {
                let key = (e.world_position().y / RISE).round() as i32;
                out.entry(key).or_default().push(base);
            }
        }
        out
    }

    #[test]
    fn every_rung_is_complementary() {
        let v = loaded(99);
        let rungs = rungs(&v);
        assert_eq!(rungs.len(), BASE_PAIR_COUNT);
        for bases in rungs.values() {
            assert_eq!(bases.len(), 2);
            assert_eq!(bases[0].complement(), bases[1]);
        }
    }

    #[test]
    fn only_known_names_are_pickable() {
        let v = loaded(1);
        let ctx = v.context();
        assert_eq!(ctx.active_objects().len(), BASE_PAIR_COUNT * 4);
        for &id in ctx.active_objects() {
            let name = &ctx.scene.get(id).unwrap().name;
            assert!(name == BACKBONE_NAME || Base::from_name(name).is_some(), "{name}");
        }
    }

    #[test]
    fn backbone_follows_the_helix() {
        let v = loaded(1);
        let backbone = v.context().scene.find_all_by_name(BACKBONE_NAME);
        assert_eq!(backbone.len(), BASE_PAIR_COUNT * 2);
        for e in backbone {
            let p = e.world_position();
            assert!((Vec3::new(p.x, 0.0, p.z).length() - HELIX_RADIUS).abs() < 1e-3);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        assert_eq!(rungs(&loaded(5)), rungs(&loaded(5)));
    }

    #[test]
    fn reloading_resequences() {
        let mut v = loaded(5);
        let first = rungs(&v);
        v.load(&DnaHelix);
        assert_ne!(first, rungs(&v));
    }

    #[test]
    fn random_pair_covers_all_orientations() {
        let mut rng = Rng::new(2024);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let pair = random_pair(&mut rng);
            assert_eq!(pair.0.complement(), pair.1);
            if !seen.contains(&pair) {
                seen.push(pair);
            }
        }
        assert_eq!(seen.len(), 4);
    }
}
