//! Binder: keeps series and printed lines in sync with instrumented objects.
//!
//! Each tick the binder
//! 1. drops everything bound to objects that no longer resolve in the arena,
//! 2. registers objects it has not seen yet,
//! 3. polls every binding (unless graphs are frozen).
//!
//! Member lists are cached per concrete type and dropped once the last
//! registered instance of that type is gone.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use downcast_rs::Downcast;

use crate::data::inspect::{
    BindingKey, Inspect, MemberDesc, MemberValue, ObjectArena, ObjectHandle,
};
use crate::data::logs::LogStore;
use crate::data::registry::{SeriesProperties, SeriesRegistry};
use crate::data::series::SeriesKey;

struct TypeEntry {
    members: Rc<[MemberDesc]>,
    instances: usize,
}

struct BoundObject {
    handle: ObjectHandle,
    type_id: TypeId,
    members: Rc<[MemberDesc]>,
    graphs: Vec<u32>,
    prints: Vec<u32>,
}

impl BoundObject {
    fn binding(&self, member: u32) -> BindingKey {
        BindingKey {
            object: self.handle,
            member,
        }
    }
}

#[derive(Default)]
pub struct Binder {
    bound: Vec<BoundObject>,
    seen: HashSet<ObjectHandle>,
    types: HashMap<TypeId, TypeEntry>,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects with at least one live binding.
    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    pub fn is_bound(&self, handle: ObjectHandle) -> bool {
        self.bound.iter().any(|b| b.handle == handle)
    }

    /// Whether a member list for `T` is currently cached.
    pub fn has_cached_type<T: Inspect>(&self) -> bool {
        self.types.contains_key(&TypeId::of::<T>())
    }

    pub fn cached_type_count(&self) -> usize {
        self.types.len()
    }

    /// Run one frame: liveness cleanup, registration, then polling.
    pub fn tick(
        &mut self,
        arena: &ObjectArena,
        registry: &mut SeriesRegistry,
        logs: &mut LogStore,
        frozen: bool,
    ) {
        self.collect_dead(arena, registry, logs);
        self.register_new(arena, registry);
        if !frozen {
            self.poll(arena, registry, logs);
        }
    }

    /// Throw away every binding and rebuild them from the arena's contents.
    pub fn force_rescan(
        &mut self,
        arena: &ObjectArena,
        registry: &mut SeriesRegistry,
        logs: &mut LogStore,
    ) {
        self.release_all(registry, logs);
        self.register_new(arena, registry);
    }

    /// Drop every binding along with its series, reflected lines and the
    /// per-type member cache.
    pub fn release_all(&mut self, registry: &mut SeriesRegistry, logs: &mut LogStore) {
        registry.remove_where(SeriesKey::is_binding);
        logs.clear_reflected();
        self.bound.clear();
        self.seen.clear();
        self.types.clear();
    }

    /// Remove series and lines of objects that no longer resolve.
    pub fn collect_dead(
        &mut self,
        arena: &ObjectArena,
        registry: &mut SeriesRegistry,
        logs: &mut LogStore,
    ) {
        self.seen.retain(|h| arena.is_alive(*h));

        let (alive, dead): (Vec<_>, Vec<_>) = std::mem::take(&mut self.bound)
            .into_iter()
            .partition(|b| arena.is_alive(b.handle));
        self.bound = alive;

        for obj in dead {
            for &member in &obj.graphs {
                registry.remove(&SeriesKey::Binding(obj.binding(member)));
            }
            logs.remove_reflected_for(obj.handle);
            self.release_type(obj.type_id);
            tracing::debug!(object = %obj.handle, "instrumented object collected");
        }
    }

    /// Bind every live object not seen before.
    pub fn register_new(&mut self, arena: &ObjectArena, registry: &mut SeriesRegistry) {
        for handle in arena.handles() {
            if !self.seen.insert(handle) {
                continue;
            }
            if let Some(object) = arena.get(handle) {
                self.register(handle, object, registry);
            }
        }
    }

    fn register(&mut self, handle: ObjectHandle, object: &dyn Inspect, registry: &mut SeriesRegistry) {
        let type_id = Any::type_id(Downcast::as_any(object));
        let members = self
            .types
            .entry(type_id)
            .or_insert_with(|| TypeEntry {
                members: object.members().into(),
                instances: 0,
            })
            .members
            .clone();

        let mut bound = BoundObject {
            handle,
            type_id,
            members: members.clone(),
            graphs: Vec::new(),
            prints: Vec::new(),
        };

        for (idx, member) in members.iter().enumerate() {
            let idx = idx as u32;
            if member.print {
                bound.prints.push(idx);
            }
            let Some(marker) = &member.graph else {
                continue;
            };
            let numeric = object.read(&member.name).and_then(|v| v.as_f32());
            if numeric.is_none() {
                tracing::error!(
                    "Cannot cast {}.{} to float. This member will be ignored.",
                    object.type_name(),
                    member.name
                );
                continue;
            }
            let props = SeriesProperties {
                label: member.name.clone(),
                min: marker.min,
                max: marker.max,
                group: marker.group,
                color: marker.color.unwrap_or_else(|| registry.next_color()),
                auto_scale: marker.auto_scale,
            };
            registry.set_properties(bound.binding(idx), props);
            bound.graphs.push(idx);
        }

        if bound.graphs.is_empty() && bound.prints.is_empty() {
            // nothing to watch; only keep the type cached if others use it
            if self.types.get(&type_id).is_some_and(|t| t.instances == 0) {
                self.types.remove(&type_id);
            }
            return;
        }

        if let Some(entry) = self.types.get_mut(&type_id) {
            entry.instances += 1;
        }
        tracing::debug!(
            object = %handle,
            graphs = bound.graphs.len(),
            prints = bound.prints.len(),
            "instrumented object registered"
        );
        self.bound.push(bound);
    }

    /// Push graph members and refresh printed lines.
    pub fn poll(&self, arena: &ObjectArena, registry: &mut SeriesRegistry, logs: &mut LogStore) {
        for obj in &self.bound {
            let Some(object) = arena.get(obj.handle) else {
                continue;
            };
            for &idx in &obj.graphs {
                let name = &obj.members[idx as usize].name;
                let Some(value) = object.read(name).and_then(|v| v.as_f32()) else {
                    continue;
                };
                if let Some(series) = registry.get_mut(&SeriesKey::Binding(obj.binding(idx))) {
                    series.push(value);
                }
            }
            for &idx in &obj.prints {
                let name = &obj.members[idx as usize].name;
                match object.read(name) {
                    None | Some(MemberValue::None) => {}
                    Some(value) => logs.set_reflected(
                        obj.binding(idx),
                        format!("{} {}: {}", object.object_name(), name, value),
                    ),
                }
            }
        }
    }

    fn release_type(&mut self, type_id: TypeId) {
        if let Some(entry) = self.types.get_mut(&type_id) {
            entry.instances = entry.instances.saturating_sub(1);
            if entry.instances == 0 {
                self.types.remove(&type_id);
            }
        }
    }
}
