//! Selection menu state: items, highlight, loading flag and scroll position

use super::viewport::MenuViewport;
use crate::candidates::CandidateItem;
use crate::keymap::CommitKey;

/// Behavior flags for the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOptions {
    /// Leave nothing highlighted until the user navigates
    pub no_default_selected_item: bool,
    /// Enter does not commit
    pub disable_enter_key_press: bool,
    pub max_visible_items: usize,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            no_default_selected_item: false,
            disable_enter_key_press: false,
            max_visible_items: 8,
        }
    }
}

/// What a renderer should show for the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuView<'a> {
    /// No items yet and a request is in flight
    Loading,
    /// The source returned nothing for the query
    NoResults,
    Items {
        /// Visible slice of the item list
        items: &'a [CandidateItem],
        /// Index of `items[0]` in the full list
        first_index: usize,
        highlighted: Option<usize>,
        /// A newer request is in flight; the items are from an older query
        loading: bool,
    },
}

/// Navigable list of candidates for the active match
#[derive(Debug, Clone, Default)]
pub struct SelectionMenu {
    items: Vec<CandidateItem>,
    highlighted: Option<usize>,
    is_loading: bool,
    viewport: MenuViewport,
    options: MenuOptions,
}

impl SelectionMenu {
    pub fn new(options: MenuOptions) -> Self {
        Self {
            items: Vec::new(),
            highlighted: None,
            is_loading: false,
            viewport: MenuViewport::new(options.max_visible_items),
            options,
        }
    }

    // === Accessors ===

    pub fn items(&self) -> &[CandidateItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted_item(&self) -> Option<&CandidateItem> {
        self.highlighted.and_then(|idx| self.items.get(idx))
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn viewport(&self) -> &MenuViewport {
        &self.viewport
    }

    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    pub fn view(&self) -> MenuView<'_> {
        if self.items.is_empty() {
            return if self.is_loading {
                MenuView::Loading
            } else {
                MenuView::NoResults
            };
        }
        let range = self.viewport.visible_range(self.items.len());
        MenuView::Items {
            first_index: range.start,
            items: &self.items[range],
            highlighted: self.highlighted,
            loading: self.is_loading,
        }
    }

    // === Updates ===

    /// Replace the item list.
    ///
    /// Going from empty to non-empty highlights the first item unless
    /// `no_default_selected_item` is set; otherwise an in-range highlight is
    /// kept and an out-of-range one is clamped to the last item.
    pub fn set_items(&mut self, items: Vec<CandidateItem>, is_loading: bool) {
        let was_empty = self.items.is_empty();
        self.items = items;
        self.is_loading = is_loading;

        self.highlighted = if self.items.is_empty() {
            None
        } else {
            match self.highlighted {
                Some(idx) => Some(idx.min(self.items.len() - 1)),
                None if was_empty && !self.options.no_default_selected_item => Some(0),
                None => None,
            }
        };

        self.viewport.clamp(self.items.len());
        self.scroll_to_highlight();
    }

    /// Mark a request in flight without touching the items
    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    /// Move the highlight down, wrapping to the top. No-op on an empty list.
    pub fn move_next(&mut self) -> bool {
        let len = self.items.len();
        if len == 0 {
            return false;
        }
        let next = match self.highlighted {
            Some(idx) => (idx + 1) % len,
            None => 0,
        };
        self.set_highlight(next)
    }

    /// Move the highlight up, wrapping to the bottom. No-op on an empty list.
    pub fn move_previous(&mut self) -> bool {
        let len = self.items.len();
        if len == 0 {
            return false;
        }
        let prev = match self.highlighted {
            Some(0) | None => len - 1,
            Some(idx) => idx - 1,
        };
        self.set_highlight(prev)
    }

    /// Highlight a row under the pointer
    pub fn hover(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.set_highlight(index)
    }

    /// The item to commit, if a commit through `key` is allowed right now
    pub fn commit(&self, key: CommitKey) -> Option<&CandidateItem> {
        if key == CommitKey::Enter && self.options.disable_enter_key_press {
            return None;
        }
        self.highlighted_item()
    }

    /// Back to the idle state
    pub fn reset(&mut self) {
        self.items.clear();
        self.highlighted = None;
        self.is_loading = false;
        self.viewport.reset();
    }

    fn set_highlight(&mut self, index: usize) -> bool {
        let changed = self.highlighted != Some(index);
        self.highlighted = Some(index);
        self.scroll_to_highlight();
        changed
    }

    fn scroll_to_highlight(&mut self) {
        if let Some(idx) = self.highlighted {
            self.viewport.ensure_visible(idx, self.items.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<CandidateItem> {
        (0..n)
            .map(|i| CandidateItem::simple(format!("item{i}")))
            .collect()
    }

    fn menu_with(n: usize) -> SelectionMenu {
        let mut menu = SelectionMenu::new(MenuOptions::default());
        menu.set_items(items(n), false);
        menu
    }

    #[test]
    fn test_first_items_highlight_zero() {
        let menu = menu_with(3);
        assert_eq!(menu.highlighted_index(), Some(0));
    }

    #[test]
    fn test_no_default_selected_item() {
        let mut menu = SelectionMenu::new(MenuOptions {
            no_default_selected_item: true,
            ..MenuOptions::default()
        });
        menu.set_items(items(3), false);
        assert_eq!(menu.highlighted_index(), None);
        assert_eq!(menu.commit(CommitKey::Enter), None);

        menu.move_next();
        assert_eq!(menu.highlighted_index(), Some(0));

        let mut menu = SelectionMenu::new(MenuOptions {
            no_default_selected_item: true,
            ..MenuOptions::default()
        });
        menu.set_items(items(3), false);
        menu.move_previous();
        assert_eq!(menu.highlighted_index(), Some(2));
    }

    #[test]
    fn test_wraparound_next() {
        let mut menu = menu_with(3);
        menu.hover(2);
        menu.move_next();
        assert_eq!(menu.highlighted_index(), Some(0));
    }

    #[test]
    fn test_wraparound_previous() {
        let mut menu = menu_with(3);
        menu.move_previous();
        assert_eq!(menu.highlighted_index(), Some(2));
    }

    #[test]
    fn test_move_next_len_times_is_identity() {
        for len in 1..6 {
            for start in 0..len {
                let mut menu = menu_with(len);
                menu.hover(start);
                for _ in 0..len {
                    menu.move_next();
                }
                assert_eq!(menu.highlighted_index(), Some(start));
            }
        }
    }

    #[test]
    fn test_navigation_on_empty_is_noop() {
        let mut menu = menu_with(0);
        assert!(!menu.move_next());
        assert!(!menu.move_previous());
        assert_eq!(menu.highlighted_index(), None);
    }

    #[test]
    fn test_set_items_preserves_and_clamps() {
        let mut menu = menu_with(5);
        menu.hover(3);
        menu.set_items(items(6), false);
        assert_eq!(menu.highlighted_index(), Some(3));

        menu.set_items(items(2), false);
        assert_eq!(menu.highlighted_index(), Some(1));

        menu.set_items(Vec::new(), false);
        assert_eq!(menu.highlighted_index(), None);

        menu.set_items(items(2), false);
        assert_eq!(menu.highlighted_index(), Some(0));
    }

    #[test]
    fn test_empty_list_views() {
        let mut menu = menu_with(0);
        assert_eq!(menu.view(), MenuView::NoResults);
        assert_eq!(menu.commit(CommitKey::Enter), None);

        menu.set_loading(true);
        assert_eq!(menu.view(), MenuView::Loading);
    }

    #[test]
    fn test_loading_does_not_block_navigation() {
        let mut menu = menu_with(3);
        menu.set_loading(true);
        assert!(menu.move_next());
        assert!(matches!(menu.view(), MenuView::Items { loading: true, .. }));
    }

    #[test]
    fn test_disable_enter_only_blocks_enter() {
        let mut menu = SelectionMenu::new(MenuOptions {
            disable_enter_key_press: true,
            ..MenuOptions::default()
        });
        menu.set_items(items(2), false);
        assert_eq!(menu.commit(CommitKey::Enter), None);
        assert_eq!(
            menu.commit(CommitKey::Tab).map(|i| i.id.as_str()),
            Some("item0")
        );
    }

    #[test]
    fn test_highlight_scrolls_into_view() {
        let mut menu = SelectionMenu::new(MenuOptions {
            max_visible_items: 3,
            ..MenuOptions::default()
        });
        menu.set_items(items(10), false);
        for _ in 0..4 {
            menu.move_next();
        }
        assert_eq!(menu.highlighted_index(), Some(4));
        assert_eq!(menu.viewport().top_row, 2);

        // Wrapping to the end scrolls to the bottom
        let mut menu = SelectionMenu::new(MenuOptions {
            max_visible_items: 3,
            ..MenuOptions::default()
        });
        menu.set_items(items(10), false);
        menu.move_previous();
        assert_eq!(menu.viewport().top_row, 7);
        match menu.view() {
            MenuView::Items {
                items, first_index, ..
            } => {
                assert_eq!(first_index, 7);
                assert_eq!(items.len(), 3);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_hover_out_of_range() {
        let mut menu = menu_with(2);
        assert!(!menu.hover(5));
        assert_eq!(menu.highlighted_index(), Some(0));
    }

    #[test]
    fn test_reset() {
        let mut menu = menu_with(4);
        menu.set_loading(true);
        menu.reset();
        assert!(menu.is_empty());
        assert!(!menu.is_loading());
        assert_eq!(menu.highlighted_index(), None);
    }
}
