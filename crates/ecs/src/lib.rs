//! ECS wrapper.
//!
//! Owns the single `bevy_ecs` world for the engine's lifetime. No components,
//! systems or schedules are defined here; callers work on the world directly.
//!
//! # Invariants
//! - Exactly one `World` per `Ecs`, created in `new` and dropped with it.

use bevy_ecs::world::World;

pub struct Ecs {
    world: World,
}

impl Ecs {
    pub fn new() -> Self {
        let world = World::new();
        tracing::info!("ECS initialized");
        Self { world }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> u32 {
        self.world.entities().len()
    }
}

impl Default for Ecs {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ecs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ecs")
            .field("entities", &self.entity_count())
            .finish()
    }
}

impl Drop for Ecs {
    fn drop(&mut self) {
        tracing::info!("ECS shutdown");
    }
}

pub fn crate_info() -> &'static str {
    "nyanchu-ecs v0.1.0"
}
