use crate::filter::{FilterSummary, FilterView};
use crate::form::{FormController, FormField, SubmitOutcome, ValidationPolicy};
use crate::html_page::HtmlPage;
use crate::notify::Notifier;
use crate::render::{PRODUCT_ITEM_CLASS, caption_id, render_all};
use catalog_store::{CatalogStore, LoadOutcome, Mirror};
use catalog_types::ProductRecord;

/// One open catalog page: store, rendered product list, search filter and
/// add-product form.
///
/// Every handler runs to completion before returning; the product list is
/// always re-derived from the store and then re-filtered.
pub struct CatalogPage<M: Mirror, N: Notifier> {
    store: CatalogStore<M>,
    page: HtmlPage,
    filter: FilterView,
    form: FormController,
    notifier: N,
    loaded: LoadOutcome,
}

impl<M: Mirror, N: Notifier> CatalogPage<M, N> {
    /// Load (or seed from `page`), render and show every product
    pub fn open(
        mut store: CatalogStore<M>,
        page: HtmlPage,
        notifier: N,
        policy: ValidationPolicy,
    ) -> Self {
        let loaded = store.load(&page);

        let mut session = Self {
            store,
            page,
            filter: FilterView::new(),
            form: FormController::new(policy),
            notifier,
            loaded,
        };
        session.render();
        session
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.loaded
    }

    pub fn store(&self) -> &CatalogStore<M> {
        &self.store
    }

    pub fn records(&self) -> &[ProductRecord] {
        self.store.list()
    }

    pub fn filter(&self) -> &FilterView {
        &self.filter
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn page(&self) -> &HtmlPage {
        &self.page
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Rebuild the product list from the store and re-apply the filter
    pub fn render(&mut self) -> FilterSummary {
        match self.page.product_list_mut() {
            Some(list) => {
                render_all(list, self.store.list());
                self.filter.apply(list)
            }
            None => FilterSummary::default(),
        }
    }

    /// Search field keystroke
    pub fn search_input(&mut self, term: &str) -> FilterSummary {
        self.search(term)
    }

    /// Search button activation
    pub fn search_submit(&mut self, term: &str) -> FilterSummary {
        self.search(term)
    }

    fn search(&mut self, term: &str) -> FilterSummary {
        match self.page.product_list_mut() {
            Some(list) => self.filter.search(term, list),
            None => FilterSummary::default(),
        }
    }

    pub fn toggle_form(&mut self) -> Option<FormField> {
        self.form.toggle()
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn submit_form(&mut self) -> SubmitOutcome {
        let outcome = self.form.submit(&mut self.store, &self.notifier);
        if matches!(outcome, SubmitOutcome::Added { .. }) {
            self.render();
        }
        outcome
    }

    /// Records whose card is currently shown, in list order.
    ///
    /// Cards are matched to records through their `aria-labelledby` caption id.
    pub fn visible_records(&self) -> Vec<&ProductRecord> {
        let Some(list) = self.page.product_list() else {
            return Vec::new();
        };

        let shown: Vec<&str> = list
            .find_all_by_class(PRODUCT_ITEM_CLASS)
            .into_iter()
            .filter(|card| !card.is_hidden())
            .filter_map(|card| card.attr("aria-labelledby"))
            .collect();

        self.store
            .list()
            .iter()
            .enumerate()
            .filter(|(index, record)| shown.contains(&caption_id(record, *index).as_str()))
            .map(|(_, record)| record)
            .collect()
    }

    pub fn to_html(&self) -> String {
        self.page.to_html()
    }

    pub fn into_store(self) -> CatalogStore<M> {
        self.store
    }
}
