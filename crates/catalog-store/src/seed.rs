//! Seeding: rebuild records from product markup already shown on a page.
//!
//! Used only when the mirror holds no usable catalog. The markup convention
//! is: the name label gives the name, the first paragraph not flagged as a
//! price gives the description, the paragraph flagged as price gives the
//! price, and the item's `aria-labelledby` target (if any) gives the id.

use catalog_types::{IdGenerator, ProductRecord};

/// Paragraph inside a product item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupParagraph {
    pub text: String,
    pub is_price: bool,
}

impl MarkupParagraph {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_price: false,
        }
    }

    pub fn price(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_price: true,
        }
    }
}

/// Data extracted from one product item of the page markup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupItem {
    pub name: Option<String>,
    pub paragraphs: Vec<MarkupParagraph>,
    pub image_src: Option<String>,
    pub labelled_by: Option<String>,
}

impl MarkupItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_paragraph(mut self, paragraph: MarkupParagraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn with_image(mut self, src: impl Into<String>) -> Self {
        self.image_src = Some(src.into());
        self
    }

    pub fn labelled_by(mut self, id: impl Into<String>) -> Self {
        self.labelled_by = Some(id.into());
        self
    }

    /// First paragraph not flagged as price
    pub fn description(&self) -> &str {
        self.paragraphs
            .iter()
            .find(|p| !p.is_price)
            .map(|p| p.text.as_str())
            .unwrap_or("")
    }

    /// Last paragraph flagged as price
    pub fn price(&self) -> &str {
        self.paragraphs
            .iter()
            .rev()
            .find(|p| p.is_price)
            .map(|p| p.text.as_str())
            .unwrap_or("")
    }
}

/// Provider of the product items currently shown on the page
pub trait MarkupSource {
    fn product_items(&self) -> Vec<MarkupItem>;
}

impl MarkupSource for [MarkupItem] {
    fn product_items(&self) -> Vec<MarkupItem> {
        self.to_vec()
    }
}

impl MarkupSource for Vec<MarkupItem> {
    fn product_items(&self) -> Vec<MarkupItem> {
        self.clone()
    }
}

/// Markup source for pages without product markup
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMarkup;

impl MarkupSource for NoMarkup {
    fn product_items(&self) -> Vec<MarkupItem> {
        Vec::new()
    }
}

/// Build one record per markup item, in page order
pub fn records_from_markup(items: &[MarkupItem], ids: &mut IdGenerator) -> Vec<ProductRecord> {
    items
        .iter()
        .map(|item| {
            let id = match item.labelled_by.as_deref().map(str::trim) {
                Some(id) if !id.is_empty() => id.into(),
                _ => ids.next_id(),
            };
            let name = item.name.as_deref().unwrap_or("").trim();

            ProductRecord::new(id, name)
                .with_description(item.description())
                .with_price(item.price())
                .with_image_url(item.image_src.as_deref().unwrap_or(""))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_types::FixedClock;

    #[test]
    fn test_description_is_first_non_price_paragraph() {
        let item = MarkupItem::named("Sách A")
            .with_paragraph(MarkupParagraph::price("100000"))
            .with_paragraph(MarkupParagraph::text("Tiểu thuyết"))
            .with_paragraph(MarkupParagraph::text("Bìa cứng"));

        assert_eq!(item.description(), "Tiểu thuyết");
        assert_eq!(item.price(), "100000");
    }

    #[test]
    fn test_last_price_paragraph_wins() {
        let item = MarkupItem::named("x")
            .with_paragraph(MarkupParagraph::price("1"))
            .with_paragraph(MarkupParagraph::price("2"));

        assert_eq!(item.price(), "2");
        assert_eq!(item.description(), "");
    }

    #[test]
    fn test_labelled_by_id_is_reused() {
        let mut ids = IdGenerator::new(FixedClock(10));
        let items = vec![
            MarkupItem::named("  Sách A ").labelled_by("book-1"),
            MarkupItem::named("Sách B").labelled_by(""),
            MarkupItem::named("Sách C"),
        ];

        let records = records_from_markup(&items, &mut ids);

        assert_eq!(records[0].id.as_str(), "book-1");
        assert_eq!(records[0].name, "Sách A");
        assert_eq!(records[1].id.as_str(), "book-10");
        assert_eq!(records[2].id.as_str(), "book-11");
    }

    #[test]
    fn test_item_without_name_or_image() {
        let mut ids = IdGenerator::new(FixedClock(1));
        let records = records_from_markup(&[MarkupItem::default()], &mut ids);

        assert_eq!(records[0].name, "");
        assert_eq!(records[0].image_url, "");
    }
}
