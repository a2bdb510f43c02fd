//! Tab-scoped rendering of the knowledge base
//!
//! Everything here is a pure function of [`KnowledgeBase`]; switching tabs
//! never touches the network.

use std::fmt::Write as _;

use crate::cards::{escape_html_attr, escape_html_text, Card};
use crate::state::{Category, KnowledgeBase, Status};
use crate::types::Catalog;

/// Page heading
pub const PAGE_TITLE: &str = "Wisdom Traditions Database";

const SEARCH_PLACEHOLDER: &str = "Search across all traditions...";

/// Project the sequence for `category` into cards, in held order.
pub fn render_cards(category: Category, catalog: &Catalog) -> Vec<Card> {
    match category {
        Category::Philosophy => catalog.philosophies.iter().map(Card::from).collect(),
        Category::Religion => catalog.religions.iter().map(Card::from).collect(),
        Category::Astrology => catalog.astrological_systems.iter().map(Card::from).collect(),
    }
}

/// Render cards for a raw tag. Unknown tags render nothing.
pub fn render_tab(tag: &str, state: &KnowledgeBase) -> Vec<Card> {
    match tag.parse::<Category>() {
        Ok(category) => render_cards(category, state.catalog()),
        Err(_) => Vec::new(),
    }
}

/// Cards for the active tab
pub fn render_active(state: &KnowledgeBase) -> Vec<Card> {
    render_cards(state.active(), state.catalog())
}

/// Render the whole knowledge-base view as HTML.
///
/// While loading, or after a failed load, the message replaces the view.
pub fn render_page(state: &KnowledgeBase) -> String {
    match state.status() {
        Status::Idle | Status::Loading => {
            r#"<div class="text-center mt-5">Loading...</div>"#.to_string()
        }
        Status::Error => format!(
            r#"<div class="text-center mt-5 text-danger">{}</div>"#,
            escape_html_text(state.error().unwrap_or_default())
        ),
        Status::Ready => render_ready_page(state),
    }
}

fn render_ready_page(state: &KnowledgeBase) -> String {
    let mut html = String::new();
    html.push_str(r#"<div class="container mt-4">"#);
    let _ = write!(html, r#"<h1 class="text-center mb-4">{}</h1>"#, PAGE_TITLE);

    html.push_str(r#"<div class="row mb-4"><div class="col-md-8 mx-auto"><div class="input-group">"#);
    let _ = write!(
        html,
        r#"<input type="text" class="form-control" placeholder="{}" value="{}"/>"#,
        SEARCH_PLACEHOLDER,
        escape_html_attr(state.query())
    );
    html.push_str(r#"<button class="btn btn-primary">Search</button>"#);
    html.push_str("</div></div></div>");

    if let Some(message) = state.search_error() {
        let _ = write!(
            html,
            r#"<div class="alert alert-warning text-center" role="alert">{}</div>"#,
            escape_html_text(message)
        );
    }

    html.push_str(r#"<ul class="nav nav-tabs mb-4">"#);
    for category in Category::ALL {
        let class = if category == state.active() {
            "nav-link active"
        } else {
            "nav-link"
        };
        let _ = write!(
            html,
            r#"<li class="nav-item"><button class="{}" data-tab="{}">{}</button></li>"#,
            class,
            category.tag(),
            category.label()
        );
    }
    html.push_str("</ul>");

    html.push_str(r#"<div class="row">"#);
    for card in render_active(state) {
        let _ = write!(
            html,
            r#"<div class="col-md-6 mb-4" data-key="{}">{}</div>"#,
            card.key,
            card.to_html()
        );
    }
    html.push_str("</div></div>");
    html
}

/// Render the view as plain text for terminals.
pub fn render_page_text(state: &KnowledgeBase) -> String {
    match state.status() {
        Status::Idle | Status::Loading => "Loading...\n".to_string(),
        Status::Error => format!("{}\n", state.error().unwrap_or_default()),
        Status::Ready => {
            let mut text = String::new();
            let _ = writeln!(text, "{}", PAGE_TITLE);
            let tabs: Vec<String> = Category::ALL
                .iter()
                .map(|category| {
                    if *category == state.active() {
                        format!("[{}]", category.label())
                    } else {
                        category.label().to_string()
                    }
                })
                .collect();
            let _ = writeln!(text, "{}", tabs.join(" | "));
            if let Some(message) = state.search_error() {
                let _ = writeln!(text, "! {}", message);
            }
            for card in render_active(state) {
                let _ = write!(text, "\n{}", card);
            }
            text
        }
    }
}
