use super::handle::Handle;
use super::size::Size;

/// Color of the link from a node's parent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns the other color.
    #[inline]
    pub(crate) const fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// Which child link of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

// LLRB: one key/value pair plus the anchor of its subtree.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    left: Option<Handle>,
    right: Option<Handle>,
    color: Color,
    // The number of nodes in the subtree rooted here, this node included.
    size: Size,
}

impl<K, V> Node<K, V> {
    /// Creates a detached red leaf.
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            color: Color::Red,
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Borrows the key and the value at once.
    #[inline]
    pub(crate) fn entry(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Borrows the key shared and the value mutably at once.
    #[inline]
    pub(crate) fn entry_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    /// Replaces the value, returning the old one.
    pub(crate) fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    /// Replaces both key and value, returning the old pair.
    pub(crate) fn replace_entry(&mut self, key: K, value: V) -> (K, V) {
        (core::mem::replace(&mut self.key, key), core::mem::replace(&mut self.value, value))
    }

    /// Consumes the node, returning its key and value.
    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn child(&self, direction: Direction) -> Option<Handle> {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_left(&mut self, link: Option<Handle>) {
        self.left = link;
    }

    #[inline]
    pub(crate) fn set_right(&mut self, link: Option<Handle>) {
        self.right = link;
    }

    #[inline]
    pub(crate) fn set_child(&mut self, direction: Direction, link: Option<Handle>) {
        match direction {
            Direction::Left => self.left = link,
            Direction::Right => self.right = link,
        }
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn flip_color(&mut self) {
        self.color = self.color.flipped();
    }

    #[inline]
    pub(crate) fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}
