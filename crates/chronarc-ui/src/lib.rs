//! Chronarc UI: immediate-built widget overlay on top of `chronarc-engine`.
//!
//! The host application records its own shapes into the shared draw list,
//! then hands an optional widget tree to [`UiScene::frame`]. The tree is laid
//! out, painted above the host's shapes and receives this frame's pointer
//! events.
//!
//! ```rust,ignore
//! use chronarc_ui::prelude::*;
//!
//! let panel = Column::new()
//!     .spacing(6.0)
//!     .child(Text::new("speed", font, 13.0, Color::WHITE))
//!     .child(Slider::new().min(-2.0).max(2.0).step(0.25).on_change(|v| println!("{v}")));
//!
//! scene.frame(Anchored::top_right(panel, 12.0).into(), viewport, &input);
//! ```
//!
//! # Custom widgets
//!
//! Implement [`Widget`] for any type, then use it anywhere an [`Element`] is accepted.

pub mod app;
pub mod constraints;
pub mod event;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

pub use app::{Application, FontMap, UiApp, UiFrame};

/// Everything needed to build and extend UI.
pub mod prelude {
    pub use crate::app::{Application, FontMap, UiApp, UiFrame};
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::painter::Painter;
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        anchored::{Anchored, Corner},
        checkbox::Checkbox,
        container::Container,
        flex::{Align, Column},
        radio::{RadioGroup, RadioOption},
        slider::Slider,
        text::Text,
    };

    pub use chronarc_engine::coords::{CornerRadii, Rect, Vec2};
    pub use chronarc_engine::paint::Color;
    pub use chronarc_engine::scene::shapes::Border;
    pub use chronarc_engine::text::FontId;
}
