use chronarc_engine::coords::Vec2;

/// Pointer events routed through the widget tree.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Primary button released at `pos`.
    Click { pos: Vec2 },
    /// Cursor position this frame (fired every frame).
    Hover { pos: Vec2 },
    /// Cursor moved while the primary button is held.
    /// `pos` is the current cursor position; `start` is where the press began.
    Drag { pos: Vec2, start: Vec2 },
    /// Primary button released after a press that began at `start`.
    ///
    /// Fires even when `pos` is outside the widget; use `rect.contains(start)`
    /// to check ownership of the drag.
    DragEnd { pos: Vec2, start: Vec2 },
}

/// Result returned by [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; stop routing to siblings.
    Consumed,
    /// Event was not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
