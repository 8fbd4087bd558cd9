use super::{DrawCmd, ZIndex};

/// Paint order of a draw item: `z` first, then insertion `order`.
///
/// Field order matters: the derived `Ord` compares `z` before `order`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// The clock and the UI layer record into the same list; renderers pick the
/// commands of their own kind in paint order.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
        });

        self.sorted_dirty = true;
    }

    /// Iterates items in paint order without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;
    use crate::scene::shapes::Stroke;

    fn z_of(list: &mut DrawList) -> Vec<i32> {
        list.iter_in_paint_order().map(|it| it.key.z.0).collect()
    }

    // ── ordering ─────────────────────────────────────────────────────────

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        let stroke = Stroke::new(1.0, Color::WHITE);
        list.push_line(ZIndex(2), Vec2::zero(), Vec2::new(1.0, 0.0), stroke);
        list.push_line(ZIndex(0), Vec2::zero(), Vec2::new(2.0, 0.0), stroke);
        list.push_line(ZIndex(2), Vec2::zero(), Vec2::new(3.0, 0.0), stroke);
        list.push_line(ZIndex(1), Vec2::zero(), Vec2::new(4.0, 0.0), stroke);

        assert_eq!(z_of(&mut list), vec![0, 1, 2, 2]);
        let ends: Vec<f32> = list
            .iter_in_paint_order()
            .filter_map(|it| match &it.cmd {
                DrawCmd::Line(l) => Some(l.to.x),
                _ => None,
            })
            .collect();
        assert_eq!(ends, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn push_after_iteration_resorts() {
        let mut list = DrawList::new();
        list.fill_rect(ZIndex(5), Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        assert_eq!(z_of(&mut list), vec![5]);

        list.fill_rect(ZIndex(1), Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        assert_eq!(z_of(&mut list), vec![1, 5]);
    }

    // ── clear ────────────────────────────────────────────────────────────

    #[test]
    fn clear_resets_items_and_order() {
        let mut list = DrawList::new();
        list.fill_rect(ZIndex(0), Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        list.fill_rect(ZIndex(0), Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        list.clear();
        assert!(list.is_empty());

        list.fill_rect(ZIndex(0), Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(list.len(), 1);
    }
}
