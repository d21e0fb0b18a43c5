use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as served by the backend. `blocks` is the block-based editor
/// format used by the admin blog editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// Payload of the admin blog editor for create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDraft {
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub author: Option<String>,
    pub blocks: Vec<ContentBlock>,
    pub is_published: bool,
}

/// One block of rich content. Block types the editor grows later deserialize
/// as `Unknown` and render to nothing instead of failing the whole post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Paragraph {
        text: String,
    },
    Heading {
        level: u8,
        text: String,
    },
    Image {
        url: String,
        #[serde(default)]
        caption: Option<String>,
    },
    List {
        #[serde(default)]
        ordered: bool,
        items: Vec<String>,
    },
    Quote {
        text: String,
        #[serde(default)]
        attribution: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

/// Renders blocks to an HTML fragment for the server-rendered blog views.
/// All text content is escaped; URLs come from our own media library but are
/// escaped anyway.
pub fn render_blocks(blocks: &[ContentBlock]) -> String {
    let mut html = String::new();

    for block in blocks {
        match block {
            ContentBlock::Paragraph { text } => {
                html.push_str(&format!("<p>{}</p>", escape_html(text)));
            }
            ContentBlock::Heading { level, text } => {
                let level = (*level).clamp(1, 6);
                html.push_str(&format!("<h{0}>{1}</h{0}>", level, escape_html(text)));
            }
            ContentBlock::Image { url, caption } => {
                html.push_str("<figure>");
                html.push_str(&format!("<img src=\"{}\">", escape_html(url)));
                if let Some(caption) = caption {
                    html.push_str(&format!(
                        "<figcaption>{}</figcaption>",
                        escape_html(caption)
                    ));
                }
                html.push_str("</figure>");
            }
            ContentBlock::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                html.push_str(&format!("<{}>", tag));
                for item in items {
                    html.push_str(&format!("<li>{}</li>", escape_html(item)));
                }
                html.push_str(&format!("</{}>", tag));
            }
            ContentBlock::Quote { text, attribution } => {
                html.push_str(&format!("<blockquote>{}", escape_html(text)));
                if let Some(attribution) = attribution {
                    html.push_str(&format!("<cite>{}</cite>", escape_html(attribution)));
                }
                html.push_str("</blockquote>");
            }
            ContentBlock::Unknown => {}
        }
    }

    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
