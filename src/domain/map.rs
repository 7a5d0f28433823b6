/*
Rendering a mansion as a termtree::Tree. Each door is labelled with the key
that opens it, so the map doubles as a cheat sheet for the explorer.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::Mansion;
use crate::domain::room::{Direction, RoomId};

pub trait MapRender {
    fn to_map(&self) -> Tree<String>;
}

impl MapRender for Mansion {
    #[instrument(level = "debug", skip(self))]
    fn to_map(&self) -> Tree<String> {
        fn build(mansion: &Mansion, id: RoomId, label: String) -> Tree<String> {
            let mut tree = Tree::new(label);
            if let Some(room) = mansion.room(id) {
                for direction in [Direction::Left, Direction::Right] {
                    if let Some(child) = room.child(direction) {
                        if let Some(child_room) = mansion.room(child) {
                            let label = format!("[{}] {}", direction.key(), child_room.name);
                            tree.push(build(mansion, child, label));
                        }
                    }
                }
            }
            tree
        }

        match self.entrance().and_then(|id| self.room(id).map(|room| (id, room))) {
            Some((id, room)) => build(self, id, room.name.to_string()),
            None => Tree::new("Empty mansion".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::reference_mansion;

    #[test]
    fn given_reference_mansion_when_rendering_then_labels_doors_with_keys() {
        let mansion = reference_mansion().unwrap();

        let map = mansion.to_map().to_string();

        assert!(map.starts_with("Hall de Entrada\n"));
        assert!(map.contains("[e] Sala de Jantar"));
        assert!(map.contains("[d] Sala de Música"));
        assert!(map.contains("[e] Adega"));
        assert_eq!(map.lines().count(), 9);
    }

    #[test]
    fn given_empty_mansion_when_rendering_then_placeholder() {
        let mansion = Mansion::new();
        assert_eq!(mansion.to_map().root, "Empty mansion");
    }
}
