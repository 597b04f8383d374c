// Scroll state shared by the TUI panels
//
// Each component owns its ScrollState; App only routes input.
// Units are whatever the panel scrolls by: grid rows for the gallery,
// text lines for the detail pane, entries for the log panel.

/// Scroll state for a single panel
///
/// Owns all state needed for scrolling: position, content size, viewport size.
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Current scroll offset (line/item index at top of viewport)
    offset: usize,

    /// Total number of items/lines in content
    total: usize,

    /// Number of items/lines visible in viewport
    viewport: usize,

    /// Keep the view pinned to the bottom as content grows
    /// Scrolling up disables this; scrolling to the bottom re-enables it
    pub auto_follow: bool,

    /// Whether reaching the bottom re-enables auto-follow
    can_follow: bool,
}

impl ScrollState {
    /// Create new scroll state with auto-follow enabled (log panel)
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
            can_follow: true,
        }
    }

    /// Create scroll state with auto-follow disabled (gallery, detail)
    pub fn manual() -> Self {
        Self {
            auto_follow: false,
            can_follow: false,
            ..Self::new()
        }
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll up by one unit
    /// Disables auto-follow (user took control)
    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    /// Scroll down by one unit
    pub fn scroll_down(&mut self) {
        // Dimensions not known yet (before first render): render clamps
        if self.total == 0 || self.offset < self.max_offset() {
            self.offset += 1;
        }

        if self.total > 0 && self.offset >= self.max_offset() && self.can_follow {
            self.auto_follow = true;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    /// Jump to bottom (and resume auto-follow where allowed)
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_follow = self.can_follow;
    }

    /// Move the viewport the minimum amount needed to show `index`
    pub fn ensure_visible(&mut self, index: usize) {
        if self.viewport == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start.min(end), end)
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Panels that can be focused for input routing on the gallery screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusablePanel {
    /// Artwork grid (default focus)
    #[default]
    Gallery,
    /// System logs panel (only when visible)
    Logs,
}

impl FocusablePanel {
    pub fn next(self, logs_visible: bool) -> Self {
        match self {
            Self::Gallery if logs_visible => Self::Logs,
            _ => Self::Gallery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follow_on_new_content() {
        let mut scroll = ScrollState::new();
        assert!(scroll.auto_follow);

        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn test_scroll_up_disables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);
    }

    #[test]
    fn test_scroll_to_bottom_enables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        scroll.scroll_up();
        scroll.scroll_up();

        scroll.scroll_to_bottom();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.offset(), 15);
    }

    #[test]
    fn test_manual_scroll_mode_stays_put() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_ensure_visible() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(10, 3);

        scroll.ensure_visible(4);
        assert_eq!(scroll.visible_range(), (2, 5));

        scroll.ensure_visible(3);
        assert_eq!(scroll.offset(), 2); // already visible

        scroll.ensure_visible(0);
        assert_eq!(scroll.visible_range(), (0, 3));
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(20, 5);
        scroll.page_down();
        scroll.page_down();
        assert_eq!(scroll.offset(), 10);

        scroll.update_dimensions(8, 5);
        assert_eq!(scroll.offset(), 3);
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(FocusablePanel::Gallery.next(true), FocusablePanel::Logs);
        assert_eq!(FocusablePanel::Logs.next(true), FocusablePanel::Gallery);
        assert_eq!(FocusablePanel::Gallery.next(false), FocusablePanel::Gallery);
    }
}
