use crate::markup::Element;
use catalog_types::ProductRecord;
use tracing::debug;

pub const PRODUCT_ITEM_CLASS: &str = "product-item";
pub const NAME_CLASS: &str = "product-name";
pub const PRICE_CLASS: &str = "price";

/// Caption id of the card rendered for `record` at `index`
pub fn caption_id(record: &ProductRecord, index: usize) -> String {
    if record.id.is_empty() {
        format!("product-{}", index)
    } else {
        record.id.to_string()
    }
}

/// Card for one record.
///
/// The caption carries the record id and the article points at it through
/// `aria-labelledby`. Records without an id get `product-{index}`.
pub fn product_card(record: &ProductRecord, index: usize) -> Element {
    let caption_id = caption_id(record, index);

    let figure = Element::new("figure")
        .with_attr("class", "product-figure")
        .with_child(
            Element::new("img")
                .with_attr("src", record.image_src())
                .with_attr("alt", record.name.as_str()),
        )
        .with_child(
            Element::new("figcaption")
                .with_attr("class", NAME_CLASS)
                .with_attr("id", caption_id.as_str())
                .with_text(record.name.as_str()),
        );

    Element::new("article")
        .with_attr("class", format!("card {}", PRODUCT_ITEM_CLASS))
        .with_attr("aria-labelledby", caption_id)
        .with_child(figure)
        .with_child(Element::new("p").with_text(record.description.as_str()))
        .with_child(
            Element::new("p")
                .with_attr("class", PRICE_CLASS)
                .with_text(record.price.as_str()),
        )
}

/// Replace everything in `container` with one card per record, in order
pub fn render_all(container: &mut Element, records: &[ProductRecord]) {
    container.clear_children();
    for (index, record) in records.iter().enumerate() {
        container.append(product_card(record, index));
    }
    debug!(count = records.len(), "rendered product list");
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_types::PLACEHOLDER_IMAGE_URL;

    fn records() -> Vec<ProductRecord> {
        vec![
            ProductRecord::new("book-2", "Sách B").with_price("50000"),
            ProductRecord::new("book-1", "Sách A")
                .with_description("Tiểu thuyết")
                .with_price("100000")
                .with_image_url("https://img.example/a.jpg"),
        ]
    }

    #[test]
    fn test_card_markup() {
        let card = product_card(&records()[1], 0);
        insta::assert_snapshot!(
            card.to_html(),
            @r#"<article class="card product-item" aria-labelledby="book-1"><figure class="product-figure"><img src="https://img.example/a.jpg" alt="Sách A"><figcaption class="product-name" id="book-1">Sách A</figcaption></figure><p>Tiểu thuyết</p><p class="price">100000</p></article>"#
        );
    }

    #[test]
    fn test_card_uses_placeholder_image() {
        let card = product_card(&records()[0], 0);
        let img = card.find_by_tag("img").unwrap();
        assert_eq!(img.attr("src"), Some(PLACEHOLDER_IMAGE_URL));
    }

    #[test]
    fn test_card_without_id_gets_positional_caption_id() {
        let card = product_card(&ProductRecord::new("", "x"), 3);

        assert_eq!(card.attr("aria-labelledby"), Some("product-3"));
        assert_eq!(card.find_by_class(NAME_CLASS).unwrap().id(), Some("product-3"));
    }

    #[test]
    fn test_render_all_replaces_previous_content() {
        let mut container = Element::new("section")
            .with_attr("id", "productList")
            .with_child(Element::new("p").with_text("stale"));

        render_all(&mut container, &records());
        let first = container.to_html();
        render_all(&mut container, &records());

        assert_eq!(container.to_html(), first);
        assert_eq!(container.child_elements().count(), 2);
        assert!(!first.contains("stale"));
    }

    #[test]
    fn test_render_exposes_name_and_price_labels() {
        let mut container = Element::new("section");
        render_all(&mut container, &records());

        for card in container.find_all_by_class(PRODUCT_ITEM_CLASS) {
            assert!(card.find_by_class(NAME_CLASS).is_some());
            assert!(card.find_by_class(PRICE_CLASS).is_some());
        }
        let names: Vec<String> = container
            .find_all_by_class(NAME_CLASS)
            .iter()
            .map(|el| el.text_content())
            .collect();
        assert_eq!(names, ["Sách B", "Sách A"]);
    }
}
