use std::collections::HashMap;
use crate::components::mesh::{Geometry, Material};

/// Handle to a geometry allocation in the [`ResourcePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u32);

/// Handle to a material allocation in the [`ResourcePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u32);

/// Registry of live geometry and material allocations.
///
/// The host mirrors these handles as GPU buffers; disposing a handle tells
/// it the buffer can be released. A scene rebuild disposes everything.
pub struct ResourcePool {
    geometries: HashMap<GeometryHandle, Geometry>,
    materials: HashMap<MaterialHandle, Material>,
    next_handle: u32,
    disposed_total: usize,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self {
            geometries: HashMap::new(),
            materials: HashMap::new(),
            next_handle: 1,
            disposed_total: 0,
        }
    }

    fn next(&mut self) -> u32 {
        let h = self.next_handle;
        self.next_handle += 1;
        h
    }

    pub fn create_geometry(&mut self, geometry: Geometry) -> GeometryHandle {
        let handle = GeometryHandle(self.next());
        self.geometries.insert(handle, geometry);
        handle
    }

    pub fn create_material(&mut self, material: Material) -> MaterialHandle {
        let handle = MaterialHandle(self.next());
        self.materials.insert(handle, material);
        handle
    }

    pub fn geometry(&self, handle: GeometryHandle) -> Option<&Geometry> {
        self.geometries.get(&handle)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(&handle)
    }

    /// Release one geometry. Returns false if it was already disposed.
    pub fn dispose_geometry(&mut self, handle: GeometryHandle) -> bool {
        let removed = self.geometries.remove(&handle).is_some();
        if removed {
            self.disposed_total += 1;
        }
        removed
    }

    /// Release one material. Returns false if it was already disposed.
    pub fn dispose_material(&mut self, handle: MaterialHandle) -> bool {
        let removed = self.materials.remove(&handle).is_some();
        if removed {
            self.disposed_total += 1;
        }
        removed
    }

    /// Release every live allocation. Returns how many were released.
    pub fn dispose_all(&mut self) -> usize {
        let count = self.live_count();
        self.geometries.clear();
        self.materials.clear();
        self.disposed_total += count;
        count
    }

    /// Number of geometry + material allocations not yet disposed.
    pub fn live_count(&self) -> usize {
        self.geometries.len() + self.materials.len()
    }

    /// Total allocations disposed over the pool's lifetime.
    pub fn disposed_total(&self) -> usize {
        self.disposed_total
    }
}

impl Default for ResourcePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::Color;

    #[test]
    fn create_and_dispose() {
        let mut pool = ResourcePool::new();
        let g = pool.create_geometry(Geometry::Sphere { radius: 1.0 });
        let m = pool.create_material(Material::standard(Color::WHITE));
        assert_eq!(pool.live_count(), 2);
        assert!(pool.geometry(g).is_some());

        assert!(pool.dispose_geometry(g));
        assert!(!pool.dispose_geometry(g));
        assert!(pool.dispose_material(m));
        assert_eq!(pool.live_count(), 0);
        assert_eq!(pool.disposed_total(), 2);
    }

    #[test]
    fn dispose_all_empties_pool() {
        let mut pool = ResourcePool::new();
        for _ in 0..3 {
            pool.create_geometry(Geometry::Sphere { radius: 1.0 });
        }
        assert_eq!(pool.dispose_all(), 3);
        assert_eq!(pool.live_count(), 0);
    }
}
