use slotmap::new_key_type;

new_key_type! {
    /// Key of a [`Unit`] in the y-check arena
    pub struct UnitKey;
}

/// Rectangle handled by the y-check: an item of the column assignment, possibly with other items merged into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    /// `idx` of the host item, used for symmetry breaking
    pub idx: usize,
    pub x: usize,
    pub width: usize,
    pub height: usize,
    pub content: Content,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    /// A single item, by its position in the searched item slice
    Simple(usize),
    /// A host item which absorbed other items next to it.
    /// Every member is stored with its vertical offset with respect to the host.
    Merged { host: usize, members: Vec<Member> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Member {
    pub item: usize,
    pub dy: usize,
}

impl Unit {
    pub fn simple(item: usize, idx: usize, x: usize, width: usize, height: usize) -> Self {
        Self {
            idx,
            x,
            width,
            height,
            content: Content::Simple(item),
        }
    }

    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// Every item in this unit with its offset from the bottom of the unit
    pub fn members(&self) -> Vec<Member> {
        match &self.content {
            Content::Simple(item) => vec![Member { item: *item, dy: 0 }],
            Content::Merged { host, members } => std::iter::once(Member { item: *host, dy: 0 })
                .chain(members.iter().copied())
                .collect(),
        }
    }

    /// Takes over all items of `other`, placed `dy` above the bottom of this unit
    pub fn absorb(&mut self, other: &Unit, dy: usize) {
        let absorbed = other
            .members()
            .into_iter()
            .map(|m| Member {
                item: m.item,
                dy: m.dy + dy,
            });
        if let Content::Simple(host) = self.content {
            self.content = Content::Merged {
                host,
                members: absorbed.collect(),
            };
        } else if let Content::Merged { members, .. } = &mut self.content {
            members.extend(absorbed);
        }
    }

    /// Whether this unit lies entirely to the left of `other`
    pub fn left_of(&self, other: &Unit) -> bool {
        self.right() <= other.x
    }
}
