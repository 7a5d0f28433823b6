use generational_arena::Arena;
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::room::{Room, RoomId, RoomName};

/// Arena-backed binary tree of rooms.
///
/// Rooms are created bottom-up: a room's doors can only point at rooms that
/// already exist, so the structure cannot contain cycles. The arena owns every
/// room; children are addressed by [`RoomId`] and never shared by callers that
/// respect the tree shape.
#[derive(Debug, Default)]
pub struct Mansion {
    /// Arena storage for all rooms
    arena: Arena<Room>,
    /// Entrance room, None until the layout is finished
    entrance: Option<RoomId>,
}

impl Mansion {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            entrance: None,
        }
    }

    /// Create a room whose doors lead to the given, previously created rooms.
    ///
    /// The name is truncated to the room name limit. Children are attached as
    /// given; keeping the result tree-shaped is the caller's job.
    #[instrument(level = "trace", skip_all)]
    pub fn create_room(
        &mut self,
        name: impl AsRef<str>,
        left: Option<RoomId>,
        right: Option<RoomId>,
    ) -> DomainResult<RoomId> {
        for child in left.iter().chain(right.iter()) {
            if !self.arena.contains(child.0) {
                return Err(DomainError::UnknownRoom(*child));
            }
        }
        let room = Room {
            name: RoomName::new(name),
            left,
            right,
        };
        trace!(room = %room.name, "created");
        Ok(RoomId(self.arena.insert(room)))
    }

    pub fn set_entrance(&mut self, id: RoomId) -> DomainResult<()> {
        if !self.arena.contains(id.0) {
            return Err(DomainError::UnknownRoom(id));
        }
        self.entrance = Some(id);
        Ok(())
    }

    pub fn entrance(&self) -> Option<RoomId> {
        self.entrance
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.arena.get(id.0)
    }

    /// Like [`Mansion::room`], but an unknown handle is an error.
    pub fn expect_room(&self, id: RoomId) -> DomainResult<&Room> {
        self.room(id).ok_or(DomainError::UnknownRoom(id))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order walk from the entrance, left door before right door.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, self.entrance)
    }

    /// Post-order walk from the entrance: both doors before the room itself.
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, self.entrance)
    }

    /// Number of rooms on the longest path from the entrance to a dead end.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.entrance.map_or(0, |root| self.depth_from(root))
    }

    fn depth_from(&self, id: RoomId) -> usize {
        match self.room(id) {
            Some(room) => {
                let left = room.left.map_or(0, |c| self.depth_from(c));
                let right = room.right.map_or(0, |c| self.depth_from(c));
                1 + left.max(right)
            }
            None => 0,
        }
    }

    /// Names of all dead ends reachable from the entrance, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn dead_ends(&self) -> Vec<&RoomName> {
        self.iter()
            .filter(|(_, room)| room.is_dead_end())
            .map(|(_, room)| &room.name)
            .collect()
    }

    /// First room, in pre-order from the entrance, carrying `name`.
    ///
    /// The lookup compares against the stored (possibly truncated) name.
    pub fn find_by_name(&self, name: &str) -> DomainResult<RoomId> {
        let wanted = RoomName::new(name);
        self.iter()
            .find(|(_, room)| room.name == wanted)
            .map(|(id, _)| id)
            .ok_or_else(|| DomainError::RoomNotFound(name.to_string()))
    }

    /// Tear the mansion down in one post-order pass.
    ///
    /// Every room reachable from the entrance is removed exactly once, both
    /// doors before the room that owns them. Rooms are returned in release
    /// order. A room reached twice through a reused handle is only removed on
    /// the first visit.
    #[instrument(level = "debug", skip(self))]
    pub fn release(mut self) -> Vec<Room> {
        let order: Vec<RoomId> = self.iter_postorder().map(|(id, _)| id).collect();
        let mut released = Vec::with_capacity(order.len());
        for id in order {
            if let Some(room) = self.arena.remove(id.0) {
                trace!(room = %room.name, "released");
                released.push(room);
            }
        }
        self.entrance = None;
        released
    }
}

pub struct PreOrderIterator<'a> {
    mansion: &'a Mansion,
    stack: Vec<RoomId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(mansion: &'a Mansion, start: Option<RoomId>) -> Self {
        Self {
            mansion,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (RoomId, &'a Room);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(room) = self.mansion.room(current) {
                // right first so the left door is visited first
                self.stack.extend(room.right);
                self.stack.extend(room.left);
                return Some((current, room));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    mansion: &'a Mansion,
    stack: Vec<(RoomId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(mansion: &'a Mansion, start: Option<RoomId>) -> Self {
        Self {
            mansion,
            stack: start.map(|id| (id, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (RoomId, &'a Room);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(room) = self.mansion.room(current) {
                if visited {
                    return Some((current, room));
                }
                self.stack.push((current, true));
                self.stack.extend(room.right.map(|c| (c, false)));
                self.stack.extend(room.left.map(|c| (c, false)));
            }
        }
        None
    }
}
