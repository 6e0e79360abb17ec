//! Screen-space geometry for the selection menu overlay
//!
//! The typeahead never draws anything itself. It exposes the anchor rectangle of
//! the active match and computes where a menu of a given size should sit so a
//! host renderer can draw it.

/// Rectangle in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge X coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge Y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Which side of the anchor the menu opened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSide {
    Below,
    Above,
}

/// Computed menu bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPlacement {
    pub bounds: Rect,
    pub side: MenuSide,
}

/// Configuration for placing the menu relative to the match anchor
#[derive(Debug, Clone, Copy)]
pub struct OverlayConfig {
    /// Menu width in pixels
    pub width: f32,
    /// Menu height in pixels
    pub height: f32,
    /// Gap between anchor and menu
    pub gap: f32,
}

impl OverlayConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            gap: 4.0,
        }
    }

    /// Set the gap (builder pattern)
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Place the menu under the anchor, flipping above it when there is not
    /// enough room below and more room above. Horizontally the menu is shifted
    /// left to stay inside the viewport.
    pub fn place(&self, anchor: Rect, viewport_width: f32, viewport_height: f32) -> MenuPlacement {
        let space_below = viewport_height - anchor.bottom() - self.gap;
        let space_above = anchor.y - self.gap;

        let side = if space_below >= self.height || space_below >= space_above {
            MenuSide::Below
        } else {
            MenuSide::Above
        };

        let y = match side {
            MenuSide::Below => anchor.bottom() + self.gap,
            MenuSide::Above => (anchor.y - self.gap - self.height).max(0.0),
        };

        let max_x = (viewport_width - self.width).max(0.0);
        let x = anchor.x.clamp(0.0, max_x);

        MenuPlacement {
            bounds: Rect::new(x, y, self.width, self.height),
            side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_below_anchor() {
        let config = OverlayConfig::new(200.0, 100.0).with_gap(2.0);
        let anchor = Rect::new(50.0, 20.0, 1.0, 16.0);
        let placement = config.place(anchor, 800.0, 600.0);

        assert_eq!(placement.side, MenuSide::Below);
        assert_eq!(placement.bounds.x, 50.0);
        assert_eq!(placement.bounds.y, 38.0);
    }

    #[test]
    fn test_flip_above_near_bottom() {
        let config = OverlayConfig::new(200.0, 100.0).with_gap(0.0);
        let anchor = Rect::new(10.0, 560.0, 1.0, 16.0);
        let placement = config.place(anchor, 800.0, 600.0);

        assert_eq!(placement.side, MenuSide::Above);
        assert_eq!(placement.bounds.bottom(), 560.0);
    }

    #[test]
    fn test_shift_left_at_right_edge() {
        let config = OverlayConfig::new(200.0, 100.0);
        let anchor = Rect::new(750.0, 20.0, 1.0, 16.0);
        let placement = config.place(anchor, 800.0, 600.0);

        assert_eq!(placement.bounds.right(), 800.0);
    }
}
