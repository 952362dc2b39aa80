//! Screen placement shared by the overlay windows.

use egui::{Pos2, Rect, Vec2};

use super::PointerSnapshot;
use crate::layout::OUT_OF_SCREEN_CLAMP_PADDING;

/// Corner a window is first placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
}

/// A window that is moved by dragging it with the middle mouse button.
#[derive(Debug, Clone)]
pub struct DraggableWindow {
    anchor: Anchor,
    pos: Option<Pos2>,
    size: Vec2,
    dragging: bool,
}

impl DraggableWindow {
    pub fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            pos: None,
            size: Vec2::ZERO,
            dragging: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn rect(&self) -> Option<Rect> {
        self.pos.map(|p| Rect::from_min_size(p, self.size))
    }

    /// Set this frame's size, placing the window on first use.
    ///
    /// Top-right anchored windows keep their right edge fixed, so they grow
    /// leftwards.
    pub fn resize(&mut self, size: Vec2, screen: Rect) -> Rect {
        let pos = match (self.pos, self.anchor) {
            (None, Anchor::TopLeft) => screen.left_top(),
            (None, Anchor::TopRight) => Pos2::new(screen.right() - size.x, screen.top()),
            (Some(p), Anchor::TopLeft) => p,
            (Some(p), Anchor::TopRight) => Pos2::new(p.x + self.size.x - size.x, p.y),
        };
        self.size = size;
        self.pos = Some(pos);
        Rect::from_min_size(pos, size)
    }

    /// Middle-button drag. `drag_in_progress` is shared by every window so
    /// only one moves at a time.
    pub fn handle_drag(
        &mut self,
        pointer: &PointerSnapshot,
        screen: Rect,
        drag_in_progress: &mut bool,
    ) {
        if pointer.middle_pressed && !*drag_in_progress {
            let hit = match (self.rect(), pointer.pos) {
                (Some(rect), Some(p)) => rect.contains(p),
                _ => false,
            };
            if hit {
                self.dragging = true;
                *drag_in_progress = true;
            }
        } else if !pointer.middle_down && self.dragging {
            self.dragging = false;
            *drag_in_progress = false;
        }

        if self.dragging {
            if let Some(p) = self.pos {
                self.pos = Some(clamp_position(p + pointer.delta, self.size, screen));
            }
        }
    }
}

/// Keep at least [`OUT_OF_SCREEN_CLAMP_PADDING`] px of a window on screen.
pub fn clamp_position(pos: Pos2, size: Vec2, screen: Rect) -> Pos2 {
    let pad = OUT_OF_SCREEN_CLAMP_PADDING;
    let min = screen.min - size + Vec2::splat(pad);
    let max = screen.max - Vec2::splat(pad);
    Pos2::new(
        pos.x.max(min.x).min(max.x),
        pos.y.max(min.y).min(max.y),
    )
}
