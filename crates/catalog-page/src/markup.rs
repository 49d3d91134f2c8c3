//! Minimal element tree for product pages.
//!
//! Enough HTML to read a catalog page, replace its product list and write
//! it back: elements, text, doctype, void tags, raw-text `script`/`style`
//! and the common character references. Comments are dropped.

use crate::{Error, Result};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Tag of the synthetic element holding a parsed document
pub const DOCUMENT_TAG: &str = "#document";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Doctype(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn document() -> Self {
        Self::new(DOCUMENT_TAG)
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attrs
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_ascii_lowercase(), value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Concatenated text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
                Node::Doctype(_) => {}
            }
        }
    }

    /// Descendants (not self) in document order
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Element>) {
        for el in self.child_elements() {
            out.push(el);
            el.collect_descendants(out);
        }
    }

    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.descendants().into_iter().find(|el| el.has_class(class))
    }

    pub fn find_all_by_class(&self, class: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|el| el.has_class(class))
            .collect()
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Element> {
        self.descendants()
            .into_iter()
            .find(|el| el.tag.eq_ignore_ascii_case(tag))
    }

    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|el| el.tag.eq_ignore_ascii_case(tag))
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.descendants()
            .into_iter()
            .find(|el| el.id() == Some(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        for node in &mut self.children {
            if let Node::Element(el) = node {
                if el.id() == Some(id) {
                    return Some(el);
                }
                if let Some(found) = el.find_by_id_mut(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Call `f` on every descendant carrying `class`, in document order.
    /// Matches are not searched for nested matches.
    pub fn for_each_by_class_mut(&mut self, class: &str, f: &mut impl FnMut(&mut Element)) {
        for node in &mut self.children {
            if let Node::Element(el) = node {
                if el.has_class(class) {
                    f(el);
                } else {
                    el.for_each_by_class_mut(class, f);
                }
            }
        }
    }

    /// True when the inline style hides the element
    pub fn is_hidden(&self) -> bool {
        self.attr("style").is_some_and(|style| {
            style_declarations(style)
                .any(|(prop, value)| prop.eq_ignore_ascii_case("display") && value == "none")
        })
    }

    /// Add or remove the inline `display: none`, keeping other declarations
    pub fn set_hidden(&mut self, hidden: bool) {
        let mut declarations: Vec<String> = self
            .attr("style")
            .map(|style| {
                style_declarations(style)
                    .filter(|(prop, _)| !prop.eq_ignore_ascii_case("display"))
                    .map(|(prop, value)| format!("{}: {}", prop, value))
                    .collect()
            })
            .unwrap_or_default();

        if hidden {
            declarations.push("display: none".to_string());
        }

        if declarations.is_empty() {
            self.remove_attr("style");
        } else {
            self.set_attr("style", declarations.join("; "));
        }
    }

    /// Serialize; a document element serializes its children only
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if self.tag == DOCUMENT_TAG {
            write_children(&self.children, false, &mut out);
        } else {
            write_element(self, &mut out);
        }
        out
    }
}

fn style_declarations(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style.split(';').filter_map(|decl| {
        let (prop, value) = decl.split_once(':')?;
        let prop = prop.trim();
        (!prop.is_empty()).then(|| (prop, value.trim()))
    })
}

fn is_void(tag: &str) -> bool {
    VOID_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    out.push('>');

    if is_void(&el.tag) {
        return;
    }

    write_children(&el.children, is_raw_text(&el.tag), out);
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn write_children(children: &[Node], raw: bool, out: &mut String) {
    for child in children {
        match child {
            Node::Element(el) => write_element(el, out),
            Node::Text(text) if raw => out.push_str(text),
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Doctype(decl) => {
                out.push_str("<!");
                out.push_str(decl);
                out.push('>');
            }
        }
    }
}

pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Decode named (`amp lt gt quot apos nbsp`) and numeric character references.
/// Unknown references are kept as written.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_reference(&rest[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

/// Parse an HTML document into a [`DOCUMENT_TAG`] element
pub fn parse_html(html: &str) -> Result<Element> {
    let bytes = html.as_bytes();
    let mut stack = vec![Element::document()];
    let mut i = 0usize;

    while i < bytes.len() {
        if html[i..].starts_with("<!--") {
            let end = html[i + 4..]
                .find("-->")
                .ok_or_else(|| Error::HtmlParse("unclosed HTML comment".into()))?;
            i = i + 4 + end + 3;
            continue;
        }

        if html[i..].starts_with("<!") {
            let end = find_byte(bytes, i, b'>')
                .ok_or_else(|| Error::HtmlParse("unterminated declaration".into()))?;
            push_node(&mut stack, Node::Doctype(html[i + 2..end].to_string()));
            i = end + 1;
            continue;
        }

        if html[i..].starts_with("</") {
            let end = find_byte(bytes, i, b'>')
                .ok_or_else(|| Error::HtmlParse("unterminated end tag".into()))?;
            let tag = html[i + 2..end].trim().to_ascii_lowercase();
            close_element(&mut stack, &tag);
            i = end + 1;
            continue;
        }

        if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(u8::is_ascii_alphabetic) {
            let (element, self_closing, next) = parse_start_tag(html, i)?;
            i = next;

            if is_raw_text(element.tag()) {
                let close = find_raw_text_end(html, i, element.tag()).ok_or_else(|| {
                    Error::HtmlParse(format!("unclosed <{}>", element.tag()))
                })?;
                let body = &html[i..close];
                let mut element = element;
                if !body.is_empty() {
                    element.children.push(Node::Text(body.to_string()));
                }
                push_node(&mut stack, Node::Element(element));
                i = find_byte(bytes, close, b'>').map_or(bytes.len(), |end| end + 1);
                continue;
            }

            if self_closing || is_void(element.tag()) {
                push_node(&mut stack, Node::Element(element));
            } else {
                stack.push(element);
            }
            continue;
        }

        // Text runs to the next tag-like `<`
        let mut end = i + 1;
        while end < bytes.len() && !starts_markup(bytes, end) {
            end += 1;
        }
        push_node(&mut stack, Node::Text(decode_entities(&html[i..end])));
        i = end;
    }

    while stack.len() > 1 {
        pop_into_parent(&mut stack);
    }

    stack
        .pop()
        .ok_or_else(|| Error::HtmlParse("invalid stack state".into()))
}

fn starts_markup(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'<'
        && bytes
            .get(i + 1)
            .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'/' || *b == b'!')
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from..]
        .iter()
        .position(|b| *b == needle)
        .map(|p| from + p)
}

fn find_raw_text_end(html: &str, from: usize, tag: &str) -> Option<usize> {
    let closing = format!("</{}", tag);
    html[from..]
        .to_ascii_lowercase()
        .find(&closing)
        .map(|p| from + p)
}

fn push_node(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn pop_into_parent(stack: &mut Vec<Element>) {
    if let Some(el) = stack.pop() {
        push_node(stack, Node::Element(el));
    }
}

/// Close the innermost open `tag`; stray end tags are ignored
fn close_element(stack: &mut Vec<Element>, tag: &str) {
    let Some(pos) = stack.iter().rposition(|el| el.tag == tag) else {
        return;
    };
    if pos == 0 {
        return;
    }
    while stack.len() > pos {
        pop_into_parent(stack);
    }
}

fn parse_start_tag(html: &str, start: usize) -> Result<(Element, bool, usize)> {
    let bytes = html.as_bytes();
    let mut i = start + 1;

    let name_start = i;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' && bytes[i] != b'/'
    {
        i += 1;
    }
    let mut element = Element::new(&html[name_start..i]);

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i) {
            None => return Err(Error::HtmlParse(format!("unterminated <{}>", element.tag))),
            Some(b'>') => return Ok((element, false, i + 1)),
            Some(b'/') if bytes.get(i + 1) == Some(&b'>') => return Ok((element, true, i + 2)),
            Some(b'/') => {
                i += 1;
                continue;
            }
            Some(_) => {}
        }

        let attr_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let name = html[attr_start..i].to_ascii_lowercase();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let mut value = String::new();
        if bytes.get(i) == Some(&b'=') {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            match bytes.get(i).copied() {
                Some(quote) if quote == b'"' || quote == b'\'' => {
                    let end = find_byte(bytes, i + 1, quote).ok_or_else(|| {
                        Error::HtmlParse(format!("unterminated attribute '{}'", name))
                    })?;
                    value = decode_entities(&html[i + 1..end]);
                    i = end + 1;
                }
                _ => {
                    let value_start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                        i += 1;
                    }
                    value = decode_entities(&html[value_start..i]);
                }
            }
        }

        if !name.is_empty() && element.attr(&name).is_none() {
            element.attrs.push((name, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements_and_attributes() {
        let doc = parse_html(
            r#"<section id="productList"><article class="card product-item" aria-labelledby=b1><h3 class='product-name'>Sách A</h3></article></section>"#,
        )
        .unwrap();

        let list = doc.find_by_id("productList").unwrap();
        let item = list.find_by_class("product-item").unwrap();
        assert_eq!(item.attr("aria-labelledby"), Some("b1"));
        assert!(item.has_class("card"));
        assert_eq!(item.find_by_class("product-name").unwrap().text_content(), "Sách A");
    }

    #[test]
    fn test_void_and_self_closing_tags_do_not_nest() {
        let doc = parse_html(r#"<div><img src="a.png"><br/><p>text</p></div>"#).unwrap();
        let div = doc.find_by_tag("div").unwrap();

        let tags: Vec<&str> = div.child_elements().map(Element::tag).collect();
        assert_eq!(tags, ["img", "br", "p"]);
    }

    #[test]
    fn test_comments_dropped_and_doctype_kept() {
        let html = "<!DOCTYPE html><html><!-- note --><body>x</body></html>";
        let doc = parse_html(html).unwrap();

        assert_eq!(doc.to_html(), "<!DOCTYPE html><html><body>x</body></html>");
    }

    #[test]
    fn test_unclosed_elements_are_closed_at_end() {
        let doc = parse_html("<ul><li>one<li>two").unwrap();
        assert_eq!(doc.find_by_tag("ul").unwrap().text_content(), "onetwo");
    }

    #[test]
    fn test_stray_end_tag_is_ignored() {
        let doc = parse_html("<p>a</span>b</p>").unwrap();
        assert_eq!(doc.find_by_tag("p").unwrap().text_content(), "ab");
    }

    #[test]
    fn test_script_body_is_raw_text() {
        let doc = parse_html("<script>if (a < b && c) {}</script><p>x</p>").unwrap();
        let script = doc.find_by_tag("script").unwrap();

        assert_eq!(script.text_content(), "if (a < b && c) {}");
        assert!(doc.find_by_tag("p").is_some());
        assert!(doc.to_html().contains("if (a < b && c) {}"));
    }

    #[test]
    fn test_entities_decoded_and_reescaped() {
        let doc = parse_html(r#"<p title="a &quot;b&quot;">Tom &amp; Jerry &lt;3 &#8363; &#x20AB; &copy;</p>"#)
            .unwrap();
        let p = doc.find_by_tag("p").unwrap();

        assert_eq!(p.attr("title"), Some("a \"b\""));
        assert_eq!(p.text_content(), "Tom & Jerry <3 ₫ ₫ &copy;");
        assert_eq!(
            p.to_html(),
            r#"<p title="a &quot;b&quot;">Tom &amp; Jerry &lt;3 ₫ ₫ &amp;copy;</p>"#
        );
    }

    #[test]
    fn test_lone_less_than_is_text() {
        let doc = parse_html("<p>1 < 2</p>").unwrap();
        assert_eq!(doc.find_by_tag("p").unwrap().text_content(), "1 < 2");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_html("<p><!-- open"), Err(Error::HtmlParse(_))));
        assert!(matches!(parse_html("<p class=\"x"), Err(Error::HtmlParse(_))));
        assert!(matches!(parse_html("<script>var a;"), Err(Error::HtmlParse(_))));
    }

    #[test]
    fn test_set_hidden_preserves_other_styles() {
        let mut el = Element::new("article").with_attr("style", "color: red");

        el.set_hidden(true);
        assert!(el.is_hidden());
        assert_eq!(el.attr("style"), Some("color: red; display: none"));

        el.set_hidden(false);
        assert!(!el.is_hidden());
        assert_eq!(el.attr("style"), Some("color: red"));

        let mut plain = Element::new("article");
        plain.set_hidden(true);
        plain.set_hidden(false);
        assert_eq!(plain.attr("style"), None);
    }

    #[test]
    fn test_find_by_id_mut_replaces_children() {
        let mut doc = parse_html(r#"<main><div id="list"><p>old</p></div></main>"#).unwrap();

        let list = doc.find_by_id_mut("list").unwrap();
        list.clear_children();
        list.append(Element::new("p").with_text("new"));

        assert_eq!(doc.to_html(), r#"<main><div id="list"><p>new</p></div></main>"#);
    }
}
