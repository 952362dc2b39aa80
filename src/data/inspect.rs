//! Self-describing instrumented objects and the arena that owns them.
//!
//! An instrumented object implements [`Inspect`]: it lists the members it wants
//! graphed or printed and reads them back by name. Objects are stored in an
//! [`ObjectArena`] and referred to by generational [`ObjectHandle`]s, so the
//! binder can tell a dead object from a live one in O(1).

use std::fmt;

use downcast_rs::{impl_downcast, Downcast};
use egui::Color32;

/// Generational handle into an [`ObjectArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle {
    index: u32,
    generation: u32,
}

impl ObjectHandle {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Identity of one bound member: the object plus the member's position in its
/// type's member list. Two bindings are equal only if both parts are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingKey {
    pub object: ObjectHandle,
    pub member: u32,
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.object, self.member)
    }
}

/// Graph intent for a member, with the bounds and look of its series.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphMarker {
    pub min: f32,
    pub max: f32,
    /// `None` keeps the series' default color.
    pub color: Option<Color32>,
    pub group: i32,
    pub auto_scale: bool,
}

impl Default for GraphMarker {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            color: None,
            group: 0,
            auto_scale: false,
        }
    }
}

impl GraphMarker {
    pub fn bounds(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn color(mut self, color: Color32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn group(mut self, group: i32) -> Self {
        self.group = group;
        self
    }

    pub fn auto_scale(mut self, auto_scale: bool) -> Self {
        self.auto_scale = auto_scale;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Property,
}

/// Description of one instrumented member.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDesc {
    pub name: String,
    pub kind: MemberKind,
    pub graph: Option<GraphMarker>,
    pub print: bool,
}

impl MemberDesc {
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            graph: None,
            print: false,
        }
    }

    pub fn property(name: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Property,
            ..Self::field(name)
        }
    }

    pub fn graph(mut self, marker: GraphMarker) -> Self {
        self.graph = Some(marker);
        self
    }

    pub fn print(mut self) -> Self {
        self.print = true;
        self
    }
}

/// Current value of a member as read through [`Inspect::read`].
#[derive(Debug, Clone, PartialEq)]
pub enum MemberValue {
    F32(f32),
    F64(f64),
    I64(i64),
    U64(u64),
    Bool(bool),
    Text(String),
    None,
}

impl MemberValue {
    /// Numeric conversion used for graphing; non-numeric values yield `None`.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            MemberValue::F32(v) => Some(*v),
            MemberValue::F64(v) => Some(*v as f32),
            MemberValue::I64(v) => Some(*v as f32),
            MemberValue::U64(v) => Some(*v as f32),
            MemberValue::Bool(_) | MemberValue::Text(_) | MemberValue::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, MemberValue::None)
    }
}

impl fmt::Display for MemberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberValue::F32(v) => write!(f, "{v}"),
            MemberValue::F64(v) => write!(f, "{v}"),
            MemberValue::I64(v) => write!(f, "{v}"),
            MemberValue::U64(v) => write!(f, "{v}"),
            MemberValue::Bool(v) => write!(f, "{v}"),
            MemberValue::Text(v) => write!(f, "{v}"),
            MemberValue::None => Ok(()),
        }
    }
}

impl From<f32> for MemberValue {
    fn from(v: f32) -> Self {
        MemberValue::F32(v)
    }
}

impl From<f64> for MemberValue {
    fn from(v: f64) -> Self {
        MemberValue::F64(v)
    }
}

impl From<i32> for MemberValue {
    fn from(v: i32) -> Self {
        MemberValue::I64(v as i64)
    }
}

impl From<i64> for MemberValue {
    fn from(v: i64) -> Self {
        MemberValue::I64(v)
    }
}

impl From<u32> for MemberValue {
    fn from(v: u32) -> Self {
        MemberValue::U64(v as u64)
    }
}

impl From<u64> for MemberValue {
    fn from(v: u64) -> Self {
        MemberValue::U64(v)
    }
}

impl From<bool> for MemberValue {
    fn from(v: bool) -> Self {
        MemberValue::Bool(v)
    }
}

impl From<String> for MemberValue {
    fn from(v: String) -> Self {
        MemberValue::Text(v)
    }
}

impl From<&str> for MemberValue {
    fn from(v: &str) -> Self {
        MemberValue::Text(v.to_string())
    }
}

impl<T: Into<MemberValue>> From<Option<T>> for MemberValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(MemberValue::None)
    }
}

/// An object that can be watched by the overlay.
///
/// `members` is consulted once per concrete type while at least one instance
/// is registered, so it must describe the type, not the instance.
pub trait Inspect: Downcast {
    /// Name shown in front of printed members.
    fn object_name(&self) -> String;

    /// Members carrying graph and/or print intent.
    fn members(&self) -> Vec<MemberDesc>;

    /// Current value of the named member.
    fn read(&self, member: &str) -> Option<MemberValue>;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
impl_downcast!(Inspect);

struct Slot {
    generation: u32,
    object: Option<Box<dyn Inspect>>,
}

/// Generational arena of instrumented objects.
///
/// Removing an object bumps its slot's generation, so stale handles stop
/// resolving even after the slot is reused.
#[derive(Default)]
pub struct ObjectArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ObjectArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Inspect>(&mut self, object: T) -> ObjectHandle {
        self.insert_boxed(Box::new(object))
    }

    pub fn insert_boxed(&mut self, object: Box<dyn Inspect>) -> ObjectHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            return ObjectHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            object: Some(object),
        });
        ObjectHandle {
            index,
            generation: 0,
        }
    }

    /// Remove and return the object; `None` for stale handles.
    pub fn remove(&mut self, handle: ObjectHandle) -> Option<Box<dyn Inspect>> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let object = slot.object.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(object)
    }

    pub fn is_alive(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&dyn Inspect> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.object.as_deref()
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut (dyn Inspect + 'static)> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.object.as_deref_mut()
    }

    pub fn get_as<T: Inspect>(&self, handle: ObjectHandle) -> Option<&T> {
        self.get(handle)?.downcast_ref::<T>()
    }

    pub fn get_as_mut<T: Inspect>(&mut self, handle: ObjectHandle) -> Option<&mut T> {
        self.get_mut(handle)?.downcast_mut::<T>()
    }

    /// Handles of every live object, in slot order.
    pub fn handles(&self) -> Vec<ObjectHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.object.is_some())
            .map(|(i, s)| ObjectHandle {
                index: i as u32,
                generation: s.generation,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
