//! Presentational cards
//!
//! One [`Card`] per record. Projections copy fields as received: no
//! trimming, truncation or sorting, and list items keep their order.

use std::fmt::{self, Write as _};

use crate::types::{AstrologicalSystem, Philosophy, Religion};

/// A titled list inside a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSection {
    pub heading: &'static str,
    pub items: Vec<String>,
}

/// View model for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Render key, the record id
    pub key: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub sections: Vec<CardSection>,
}

impl From<&Philosophy> for Card {
    fn from(philosophy: &Philosophy) -> Self {
        Self {
            key: philosophy.id,
            title: philosophy.name.clone(),
            subtitle: Some(format!("Origin: {}", philosophy.origin)),
            description: philosophy.description.clone(),
            sections: vec![CardSection {
                heading: "Key Principles",
                items: philosophy.key_principles.clone(),
            }],
        }
    }
}

impl From<&Religion> for Card {
    fn from(religion: &Religion) -> Self {
        Self {
            key: religion.id,
            title: religion.name.clone(),
            subtitle: None,
            description: religion.description.clone(),
            sections: vec![
                CardSection {
                    heading: "Sacred Texts",
                    items: religion.sacred_texts.clone(),
                },
                CardSection {
                    heading: "Practices",
                    items: religion.practices.clone(),
                },
            ],
        }
    }
}

impl From<&AstrologicalSystem> for Card {
    fn from(system: &AstrologicalSystem) -> Self {
        Self {
            key: system.id,
            title: system.name.clone(),
            subtitle: Some(format!("Origin: {}", system.origin)),
            description: system.description.clone(),
            sections: vec![
                CardSection {
                    heading: "Key Concepts",
                    items: system.key_concepts.clone(),
                },
                CardSection {
                    heading: "Zodiac Signs",
                    items: system.zodiac_signs.clone(),
                },
            ],
        }
    }
}

impl Card {
    /// Render as an HTML fragment. All record text is escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str(r#"<div class="card h-100 shadow-sm"><div class="card-body">"#);
        let _ = write!(
            html,
            r#"<h3 class="card-title">{}</h3>"#,
            escape_html_text(&self.title)
        );
        if let Some(subtitle) = &self.subtitle {
            let _ = write!(
                html,
                r#"<h6 class="card-subtitle mb-2 text-muted">{}</h6>"#,
                escape_html_text(subtitle)
            );
        }
        let _ = write!(
            html,
            r#"<p class="card-text">{}</p>"#,
            escape_html_text(&self.description)
        );

        // A single list spans the card; pairs sit side by side.
        let split = self.sections.len() > 1;
        html.push_str(if split {
            r#"<div class="row mt-3">"#
        } else {
            r#"<div class="mt-3">"#
        });
        for section in &self.sections {
            if split {
                html.push_str(r#"<div class="col-md-6">"#);
            }
            let _ = write!(html, "<h6>{}:</h6>", section.heading);
            html.push_str(r#"<ul class="list-group list-group-flush">"#);
            for (index, item) in section.items.iter().enumerate() {
                let _ = write!(
                    html,
                    r#"<li class="list-group-item" data-key="{}">{}</li>"#,
                    index,
                    escape_html_text(item)
                );
            }
            html.push_str("</ul>");
            if split {
                html.push_str("</div>");
            }
        }
        html.push_str("</div></div></div>");
        html
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if let Some(subtitle) = &self.subtitle {
            writeln!(f, "{}", subtitle)?;
        }
        writeln!(f, "{}", self.description)?;
        for section in &self.sections {
            writeln!(f, "{}:", section.heading)?;
            for item in &section.items {
                writeln!(f, "  - {}", item)?;
            }
        }
        Ok(())
    }
}

pub(crate) fn escape_html_text(text: &str) -> String {
    text.chars()
        .fold(String::with_capacity(text.len()), |mut escaped, ch| {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                _ => escaped.push(ch),
            }
            escaped
        })
}

pub(crate) fn escape_html_attr(text: &str) -> String {
    text.chars()
        .fold(String::with_capacity(text.len()), |mut escaped, ch| {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(ch),
            }
            escaped
        })
}
