use std::fmt::Display;

/// Rectangular item to be packed in the strip. Items are never rotated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Item {
    /// Position of the item in its [`Instance`](crate::entities::Instance)
    pub id: usize,
    pub width: usize,
    pub height: usize,
}

impl Item {
    pub fn new(id: usize, width: usize, height: usize) -> Self {
        Self { id, width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Integer position of the bottom-left corner of an item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn transposed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
