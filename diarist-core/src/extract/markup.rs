//! Parses documents made of `<div class="diarycontent">` entry blocks.
use super::ExtractOptions;
use super::parse_header::{FALLBACK_DATE, InvalidDate, parse_date_title};
use crate::entry::DiaryEntry;
use scraper::{ElementRef, Html, Node};

const UNTITLED: &str = "Untitled";

/// Extracts one entry per entry block, nested blocks included, in document order.
/// An impossible header date fails the whole document.
pub fn parse_markup(html: &str, opts: &ExtractOptions) -> Result<Vec<DiaryEntry>, InvalidDate> {
    let document = Html::parse_document(html);
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| is_entry_block(el, opts.entry_class))
        .map(|block| parse_block(block, opts))
        .collect()
}

fn parse_block(block: ElementRef<'_>, opts: &ExtractOptions) -> Result<DiaryEntry, InvalidDate> {
    let (post_date, title) = match first_descendant(block, "b") {
        Some(header) => parse_date_title(&header_text(header))?,
        None => (FALLBACK_DATE.to_string(), UNTITLED.to_string()),
    };

    let content: String = match first_descendant(block, "hr") {
        // Everything after the rule, up to the next entry block.
        Some(rule) => rule
            .next_siblings()
            .take_while(|node| {
                !ElementRef::wrap(*node).is_some_and(|el| is_entry_block(&el, opts.entry_class))
            })
            .filter_map(|node| serialize_node(node.value(), ElementRef::wrap(node)))
            .collect(),
        None => block
            .children()
            .filter(|node| !ElementRef::wrap(*node).is_some_and(|el| el.value().name() == "b"))
            .filter_map(|node| serialize_node(node.value(), ElementRef::wrap(node)))
            .collect(),
    };

    Ok(DiaryEntry::new(&title, &content, &post_date, opts.category))
}

fn is_entry_block(el: &ElementRef<'_>, entry_class: &str) -> bool {
    el.value().name() == "div" && el.value().classes().any(|class| class == entry_class)
}

fn first_descendant<'a>(block: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    block
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == name)
}

/// Text of the header with every text node trimmed and the pieces joined.
fn header_text(header: ElementRef<'_>) -> String {
    header
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Writes a node back as markup. Text is emitted as-is, elements as their outer HTML.
fn serialize_node(node: &Node, element: Option<ElementRef<'_>>) -> Option<String> {
    match node {
        Node::Text(text) => Some(text.to_string()),
        Node::Comment(comment) => Some(format!("<!--{}-->", &**comment)),
        Node::Element(_) => element.map(|el| el.html()),
        _ => None,
    }
}
