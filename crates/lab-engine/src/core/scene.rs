use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Flat entity storage. Models hold at most a few hundred objects, so
/// lookups are linear scans.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Find the first entity with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Find all entities with the given name.
    pub fn find_all_by_name(&self, name: &str) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.name == name).collect()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Remove and return all entities.
    pub fn drain(&mut self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.drain(..)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_name("Earth"));
        assert_eq!(scene.get(id).unwrap().name, "Earth");
    }

    #[test]
    fn find_by_name() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_name("Proton"));
        scene.spawn(Entity::new(EntityId(2)).with_name("Neutron"));
        scene.spawn(Entity::new(EntityId(3)).with_name("Proton"));
        assert_eq!(scene.find_by_name("Neutron").unwrap().id, EntityId(2));
        assert_eq!(scene.find_all_by_name("Proton").len(), 2);
    }

    #[test]
    fn drain_empties_scene() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)));
        scene.spawn(Entity::new(EntityId(2)));
        assert_eq!(scene.drain().count(), 2);
        assert!(scene.is_empty());
    }
}
