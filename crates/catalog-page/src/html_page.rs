use crate::markup::{Element, parse_html};
use crate::render::{NAME_CLASS, PRICE_CLASS, PRODUCT_ITEM_CLASS};
use crate::{Error, Result};
use catalog_store::{MarkupItem, MarkupParagraph, MarkupSource};

/// Id of the element the product cards are rendered into
pub const PRODUCT_LIST_ID: &str = "productList";

/// Page used when no page markup is supplied
const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="vi">
<head><meta charset="utf-8"><title>Product catalog</title></head>
<body>
<header>
<input id="searchInput" type="search" placeholder="Search products">
<button id="searchBtn" type="button">Search</button>
<button id="addProductBtn" type="button">Add product</button>
</header>
<form id="addProductForm" class="hidden">
<input id="p-name" name="name">
<textarea id="p-desc" name="desc"></textarea>
<input id="p-price" name="price">
<input id="p-img" name="img">
<button type="submit">Save</button>
</form>
<main><section id="productList"></section></main>
</body>
</html>
"#;

/// Parsed catalog page with a `#productList` container
#[derive(Debug, Clone)]
pub struct HtmlPage {
    document: Element,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Result<Self> {
        let document = parse_html(html)?;
        if document.find_by_id(PRODUCT_LIST_ID).is_none() {
            return Err(Error::MissingContainer(PRODUCT_LIST_ID.to_string()));
        }
        Ok(Self { document })
    }

    /// Empty catalog page
    pub fn default_page() -> Self {
        Self {
            document: parse_html(DEFAULT_TEMPLATE)
                .unwrap_or_else(|_| Element::document().with_child(product_list_element())),
        }
    }

    pub fn document(&self) -> &Element {
        &self.document
    }

    pub fn product_list(&self) -> Option<&Element> {
        self.document.find_by_id(PRODUCT_LIST_ID)
    }

    pub fn product_list_mut(&mut self) -> Option<&mut Element> {
        self.document.find_by_id_mut(PRODUCT_LIST_ID)
    }

    pub fn to_html(&self) -> String {
        self.document.to_html()
    }
}

impl Default for HtmlPage {
    fn default() -> Self {
        Self::default_page()
    }
}

fn product_list_element() -> Element {
    Element::new("section").with_attr("id", PRODUCT_LIST_ID)
}

fn markup_item(item: &Element) -> MarkupItem {
    let name = item
        .find_by_class(NAME_CLASS)
        .map(|label| label.text_content());

    let paragraphs = item
        .find_all_by_tag("p")
        .into_iter()
        .map(|p| MarkupParagraph {
            text: p.text_content(),
            is_price: p.has_class(PRICE_CLASS),
        })
        .collect();

    MarkupItem {
        name,
        paragraphs,
        image_src: item
            .find_by_tag("img")
            .and_then(|img| img.attr("src"))
            .map(str::to_string),
        labelled_by: item.attr("aria-labelledby").map(str::to_string),
    }
}

impl MarkupSource for HtmlPage {
    /// Every `.product-item` on the page, in document order
    fn product_items(&self) -> Vec<MarkupItem> {
        self.document
            .find_all_by_class(PRODUCT_ITEM_CLASS)
            .into_iter()
            .map(markup_item)
            .collect()
    }
}
