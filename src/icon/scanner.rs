use super::error::IconError;
use scraper::{ElementRef, Html, Selector};

/// Icon `rel` values, highest priority first. Compared exactly, case included.
const ICON_RELS: [&str; 4] = ["shortcut icon", "Shortcut Icon", "icon shortcut", "icon"];

/// A parsed HTML document that can be queried with CSS selectors.
pub struct Document {
    html: Html,
}

/// One element matched by [`Document::find`].
#[derive(Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Returns every element matching `query`, in document order.
    pub fn find(&self, query: &str) -> Result<Vec<Element<'_>>, IconError> {
        let selector = Selector::parse(query)
            .map_err(|e| IconError::Parse(format!("invalid selector {query:?}: {e:?}")))?;

        Ok(self.html.select(&selector).map(Element).collect())
    }
}

impl<'a> Element<'a> {
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }
}

/// Finds the icon URL declared by an HTML page.
///
/// `rel` values are tried in priority order. Within one value every matching
/// link is visited and the last `href` seen wins. The first value that ends
/// with a non-empty href stops the scan.
///
/// Returns an empty string when the page declares no icon.
pub fn find_icon_url_in_html(html: &str) -> Result<String, IconError> {
    let document = Document::parse(html);
    // HTML selectors match `rel` case-insensitively, so filter on the exact value
    let links = document.find("link[rel]")?;
    let mut icon_url = String::new();

    for rel in ICON_RELS {
        for element in links.iter().filter(|el| el.attribute("rel") == Some(rel)) {
            if let Some(href) = element.attribute("href") {
                icon_url = href.trim().to_owned();
            }
        }

        if !icon_url.is_empty() {
            break;
        }
    }

    Ok(icon_url)
}
