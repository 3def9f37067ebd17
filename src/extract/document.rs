//! Materialized view of one article document.
//!
//! The extraction strategies never walk a live `scraper` tree. Instead the
//! document is flattened once into an [`ArticleDoc`] holding three views of
//! the same content:
//!
//! - an ordered node sequence (text nodes and elements, in document order),
//!   for the marker-adjacency scan
//! - the block-level text elements, for the ordinal-prefix scan
//! - the flattened text lines, for the line-window scan
//!
//! Each strategy is then a pure function over this value, testable against
//! HTML parsed from a string. All views are rooted at the first `<article>`
//! element when one exists, otherwise at the document root.

use once_cell::sync::Lazy;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static BLOCKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4, h5, p, li, strong, div, span").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// One entry of the flattened node sequence.
#[derive(Debug)]
pub enum DocNode {
    /// A raw text node, verbatim.
    Text(String),
    /// An element with its collected text and link target.
    Element(ElementNode),
}

#[derive(Debug)]
pub struct ElementNode {
    pub name: String,
    pub href: Option<String>,
    /// Descendant text fragments, each trimmed, concatenated directly.
    /// `<p>#<b>3</b></p>` collapses to `"#3"`.
    pub compact: String,
    /// Descendant text fragments, each trimmed, joined by single spaces.
    pub spaced: String,
}

/// One block-level text element, for the ordinal-prefix scan.
#[derive(Debug)]
pub struct Block {
    /// Whitespace-normalized text of the whole block.
    pub text: String,
    /// Text of the block's first anchor, kept only when that anchor points
    /// at a `/team/` page and has visible text.
    pub team_link_text: Option<String>,
}

/// The three flattened views of one parsed article.
#[derive(Debug)]
pub struct ArticleDoc {
    pub nodes: Vec<DocNode>,
    pub blocks: Vec<Block>,
    pub lines: Vec<String>,
}

impl ArticleDoc {
    /// Flatten a parsed document into its extraction views.
    pub fn from_html(html: &Html) -> Self {
        let root = article_root(html);

        let mut nodes = Vec::new();
        for node in root.descendants().skip(1) {
            match node.value() {
                Node::Text(text) => nodes.push(DocNode::Text(text.to_string())),
                Node::Element(_) => {
                    if let Some(el) = ElementRef::wrap(node) {
                        nodes.push(DocNode::Element(element_node(el)));
                    }
                }
                _ => {}
            }
        }

        let blocks = root.select(&BLOCKS).map(block).collect();

        let mut lines = Vec::new();
        for fragment in root.text() {
            for line in fragment.split('\n') {
                lines.push(line.trim().to_string());
            }
        }

        ArticleDoc {
            nodes,
            blocks,
            lines,
        }
    }
}

/// Whitespace-normalized text of the article body, for the plausibility
/// check on candidate pages.
pub fn article_text(html: &Html) -> String {
    let root = article_root(html);
    let joined = root.text().collect::<Vec<_>>().join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn article_root(html: &Html) -> ElementRef<'_> {
    html.select(&ARTICLE)
        .next()
        .unwrap_or_else(|| html.root_element())
}

fn element_node(el: ElementRef<'_>) -> ElementNode {
    let fragments: Vec<&str> = el.text().collect();
    let compact: String = fragments.iter().map(|f| f.trim()).collect();
    let spaced = fragments
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    ElementNode {
        name: el.value().name().to_string(),
        href: el.value().attr("href").map(str::to_string),
        compact,
        spaced,
    }
}

fn block(el: ElementRef<'_>) -> Block {
    let text = el
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let team_link_text = el
        .select(&ANCHOR)
        .next()
        .filter(|a| {
            a.value()
                .attr("href")
                .is_some_and(|href| href.contains("/team/"))
        })
        .map(|a| element_node(a).spaced)
        .filter(|t| !t.is_empty());

    Block {
        text,
        team_link_text,
    }
}
