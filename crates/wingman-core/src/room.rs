//! Creatures in the player's current room.

/// Ordered list of creature names such as `a windfang hatchling`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomOccupants {
    creatures: Vec<String>,
}

impl RoomOccupants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a fresh room listing.
    pub fn replace(&mut self, creatures: Vec<String>) {
        self.creatures = creatures;
    }

    pub fn clear(&mut self) {
        self.creatures.clear();
    }

    pub fn add(&mut self, creature: impl Into<String>) {
        self.creatures.push(creature.into());
    }

    /// Remove one occurrence of `creature`. Two identical creatures in a room
    /// are listed twice, and only one of them left.
    pub fn remove_first(&mut self, creature: &str) -> bool {
        match self.creatures.iter().position(|c| c == creature) {
            Some(index) => {
                self.creatures.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, creature: &str) -> bool {
        self.creatures.iter().any(|c| c == creature)
    }

    /// Occupants minus the ignore list, compared case-insensitively.
    pub fn visible<S: AsRef<str>>(&self, ignored: &[S]) -> Vec<&str> {
        self.creatures
            .iter()
            .filter(|c| {
                !ignored
                    .iter()
                    .any(|name| name.as_ref().eq_ignore_ascii_case(c))
            })
            .map(String::as_str)
            .collect()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.creatures
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.creatures.iter()
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }
}
