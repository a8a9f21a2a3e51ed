use glam::Mat4;
use crate::components::entity::Entity;
use crate::components::mesh::{Geometry, MeshComponent};
use crate::renderer::instance::{MeshInstance, RenderBuffer};

fn instance(world: Mat4, mesh: &MeshComponent) -> MeshInstance {
    let material = &mesh.material;
    let [p0, p1] = mesh.geometry.params();
    let emissive = material.emissive.map(|c| c.to_array()).unwrap_or([0.0; 3]);
    let size = match mesh.geometry {
        Geometry::Points { size } => size,
        _ => 0.0,
    };
    MeshInstance {
        model: world.to_cols_array_2d(),
        color: [material.color.r, material.color.g, material.color.b, material.opacity],
        emissive: [emissive[0], emissive[1], emissive[2], material.shininess],
        shape: [mesh.geometry.kind(), p0, p1, size],
    }
}

/// Build the render buffer from a set of entities.
/// Opaque meshes come first, translucent ones after `opaque_split`.
/// Point clouds emit one instance per point.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut opaque: Vec<MeshInstance> = Vec::new();
    let mut translucent: Vec<MeshInstance> = Vec::new();

    for entity in entities {
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };

        let bucket = if mesh.material.opacity < 1.0 {
            &mut translucent
        } else {
            &mut opaque
        };

        match &entity.points {
            Some(points) => {
                for p in points {
                    let world = entity.world * Mat4::from_translation(*p);
                    bucket.push(instance(world, mesh));
                }
            }
            None => bucket.push(instance(entity.world, mesh)),
        }
    }

    let split = opaque.len() as u32;
    for inst in opaque {
        buffer.push(inst);
    }
    buffer.set_opaque_split(split);
    for inst in translucent {
        buffer.push(inst);
    }
}
