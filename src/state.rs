use std::sync::Arc;

use crate::data::catalog::Catalog;
use crate::data::filter::{init_filter_state, FilterState};
use crate::view::{render, DashboardView};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// One user's dashboard: the shared catalog, their selection, and the view
/// rendered from it. Independent of any UI toolkit.
pub struct SessionState {
    catalog: Arc<Catalog>,

    /// Selected English categories.
    pub filters: FilterState,

    /// View for the current `filters` (cached).
    pub view: DashboardView,

    /// Last rendering error, shown in the status bar.
    pub status_message: Option<String>,
}

impl SessionState {
    /// Start a session with every category selected.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let filters = init_filter_state(&catalog);
        let mut state = Self {
            catalog,
            filters,
            view: DashboardView::default(),
            status_message: None,
        };
        state.refresh();
        state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Recompute the view after a filter change. On failure the previous
    /// view stays on screen and the error goes to the status bar.
    pub fn refresh(&mut self) {
        match render(&self.filters, &self.catalog) {
            Ok(view) => {
                self.view = view;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Rendering dashboard failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Toggle a single category in the selection.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.filters.remove(category) {
            self.filters.insert(category.to_string());
        }
        self.refresh();
    }

    /// Select every category.
    pub fn select_all(&mut self) {
        self.filters = init_filter_state(&self.catalog);
        self.refresh();
    }

    /// Deselect every category.
    pub fn select_none(&mut self) {
        self.filters.clear();
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn session() -> SessionState {
        SessionState::new(Arc::new(Catalog::from_sources(fixtures::sources()).unwrap()))
    }

    #[test]
    fn starts_with_everything_selected() {
        let s = session();
        assert_eq!(&s.filters, s.catalog().category_options());
        assert_eq!(s.view.visible_rows, 2);
        assert!(s.status_message.is_none());
    }

    #[test]
    fn toggling_rerenders() {
        let mut s = session();
        s.toggle_category("Toys");
        assert!(s.filters.is_empty());
        assert_eq!(s.view.visible_rows, 0);

        s.toggle_category("Toys");
        assert_eq!(s.view.visible_rows, 2);
    }

    #[test]
    fn all_and_none() {
        let mut s = session();
        s.select_none();
        assert_eq!(s.view.visible_rows, 0);
        s.select_all();
        assert_eq!(s.view.visible_rows, 2);
    }

    #[test]
    fn sessions_share_one_catalog() {
        let catalog = Arc::new(Catalog::from_sources(fixtures::sources()).unwrap());
        let mut a = SessionState::new(Arc::clone(&catalog));
        let b = SessionState::new(Arc::clone(&catalog));
        a.select_none();
        assert_eq!(b.view.visible_rows, 2);
        assert_eq!(Arc::strong_count(&catalog), 3);
    }
}
