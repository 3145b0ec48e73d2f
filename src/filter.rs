//! View, text and status filtering applied before layout

use crate::model::{Component, StatusFilter, ViewType};

/// Filter applied to the component list before layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphFilter {
    pub view: ViewType,
    pub query: String,
    pub status: StatusFilter,
}

impl GraphFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(mut self, view: ViewType) -> Self {
        self.view = view;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Whether a single component passes every predicate
    pub fn matches(&self, component: &Component) -> bool {
        self.matches_view(component) && self.matches_query(component) && self.status.accepts(component.status)
    }

    /// Keep matching components, preserving input order
    pub fn apply(&self, components: &[Component]) -> Vec<Component> {
        let kept: Vec<Component> = components
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect();

        log::debug!(
            view = self.view.as_str(),
            input = components.len(),
            kept = kept.len();
            "filtered components"
        );
        kept
    }

    fn matches_view(&self, component: &Component) -> bool {
        match self.view.layer_code() {
            None => true,
            Some(code) => component.layer_code() == code,
        }
    }

    fn matches_query(&self, component: &Component) -> bool {
        let query = self.query.trim();
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        component.name.to_lowercase().contains(&needle)
            || component
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}
