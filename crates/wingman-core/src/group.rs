//! The player's group roster.

use wingman_types::Character;

/// Ordered group roster. Order is arrival order; the first member leads.
///
/// Two groups are equal when their member sequences are element-wise equal,
/// which is what the display side uses to decide whether to redraw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    members: Vec<Character>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append members as given. No de-duplication is done here.
    pub fn add_members<I>(&mut self, members: I)
    where
        I: IntoIterator<Item = Character>,
    {
        self.members.extend(members);
    }

    /// Replace the member with the same name in place, or append.
    pub fn upsert(&mut self, member: Character) {
        match self.members.iter_mut().find(|m| m.name == member.name) {
            Some(existing) => *existing = member,
            None => self.members.push(member),
        }
    }

    /// Remove every member equal by value to one of `members`. Returns how many went.
    pub fn remove_members(&mut self, members: &[Character]) -> usize {
        let before = self.members.len();
        self.members.retain(|m| !members.contains(m));
        before - self.members.len()
    }

    /// Remove every member whose name matches one of `names`. Returns how many went.
    pub fn remove_named<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let before = self.members.len();
        self.members
            .retain(|m| !names.iter().any(|name| name.as_ref() == m.name));
        before - self.members.len()
    }

    pub fn disband(&mut self) {
        self.members.clear();
    }

    pub fn leader(&self) -> Option<&Character> {
        self.members.first()
    }

    pub fn find(&self, name: &str) -> Option<&Character> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.members.iter()
    }

    pub fn members(&self) -> &[Character] {
        &self.members
    }

    /// True when any member is down to a single hit point.
    pub fn needs_healing(&self) -> bool {
        self.members.iter().any(|m| m.hp.current == 1)
    }
}

impl<'a> IntoIterator for &'a Group {
    type Item = &'a Character;
    type IntoIter = std::slice::Iter<'a, Character>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl From<Vec<Character>> for Group {
    fn from(members: Vec<Character>) -> Self {
        Self { members }
    }
}
