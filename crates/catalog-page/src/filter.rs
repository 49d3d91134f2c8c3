use crate::markup::Element;
use crate::render::{NAME_CLASS, PRODUCT_ITEM_CLASS};
use tracing::debug;

/// Visible/hidden counts after a filter pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub visible: usize,
    pub hidden: usize,
}

/// Name filter over rendered product items.
///
/// Keeps only the last search term; every pass recomputes visibility of
/// all items from scratch, so keystroke and button triggers agree.
#[derive(Debug, Clone, Default)]
pub struct FilterView {
    term: String,
}

impl FilterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_active(&self) -> bool {
        !normalize_term(&self.term).is_empty()
    }

    /// Store `term` and apply it to `container`
    pub fn search(&mut self, term: &str, container: &mut Element) -> FilterSummary {
        self.term = term.to_string();
        self.apply(container)
    }

    /// Apply the current term to every product item in `container`
    pub fn apply(&self, container: &mut Element) -> FilterSummary {
        let needle = normalize_term(&self.term);
        let mut summary = FilterSummary::default();

        container.for_each_by_class_mut(PRODUCT_ITEM_CLASS, &mut |item| {
            let visible = needle.is_empty() || name_matches(item, &needle);
            item.set_hidden(!visible);
            if visible {
                summary.visible += 1;
            } else {
                summary.hidden += 1;
            }
        });

        debug!(
            term = %needle,
            visible = summary.visible,
            hidden = summary.hidden,
            "applied product filter"
        );
        summary
    }
}

/// Trimmed, lowercased search term
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Items without a name label never match a non-empty term
fn name_matches(item: &Element, needle: &str) -> bool {
    item.find_by_class(NAME_CLASS)
        .is_some_and(|label| label.text_content().to_lowercase().contains(needle))
}
