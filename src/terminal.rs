//! Terminal rendition of the front page.

use crate::present::{DisplaySurface, NewsCard, Page, Slot};
use crate::util::sanitize::sanitize_for_terminal;
use console::{Term, style};

/// Keeps a `Page` model and repaints the whole screen on `present`.
pub struct TerminalSurface {
    page: Page,
    term: Term,
    header: Option<String>,
    clear: bool,
}

impl TerminalSurface {
    pub fn new(header: Option<String>, clear: bool) -> Self {
        Self {
            page: Page::loading(),
            term: Term::stdout(),
            header,
            clear,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    fn paint(&self) -> std::io::Result<()> {
        if self.clear {
            let _ = self.term.clear_screen();
        }
        let t = &self.term;
        if let Some(h) = &self.header {
            t.write_line(h)?;
        }
        for line in render_lines(&self.page) {
            t.write_line(&line)?;
        }
        Ok(())
    }
}

impl DisplaySurface for TerminalSurface {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.page.set_text(slot, text);
    }

    fn set_featured_href(&mut self, href: &str) {
        self.page.set_featured_href(href);
    }

    fn clear_list(&mut self) {
        self.page.clear_list();
    }

    fn append_card(&mut self, card: NewsCard) {
        self.page.append_card(card);
    }

    fn present(&mut self) {
        if let Err(err) = self.paint() {
            tracing::warn!(error = %err, "terminal paint failed");
        }
    }
}

/// Text lines for a page, styled for a color terminal. Feed text is
/// sanitized before it reaches the terminal.
pub fn render_lines(page: &Page) -> Vec<String> {
    let mut out = Vec::new();
    if !page.loading_text.is_empty() {
        out.push(style(sanitize_for_terminal(&page.loading_text)).dim().to_string());
    }
    out.push(format!(
        "{} {}",
        style(format!("[{}]", page.featured_meta)).cyan().bold(),
        style(sanitize_for_terminal(&page.featured_source)).dim()
    ));
    let title = style(sanitize_for_terminal(&page.featured_title)).bold();
    let has_link = !page.featured_href.is_empty() && page.featured_href != "#";
    if has_link {
        // Numbered like the cards so the picker's numbers line up.
        out.push(format!("{:>2}. {}", 1, title));
        out.push(format!("    {}", style(sanitize_for_terminal(&page.featured_href)).underlined()));
    } else {
        out.push(title.to_string());
    }
    for (i, card) in page.list.iter().enumerate() {
        out.push(String::new());
        out.push(format!(
            "{:>2}. {}",
            i + 2,
            style(sanitize_for_terminal(&card.meta)).dim()
        ));
        out.push(format!("    {}", sanitize_for_terminal(&card.title)));
    }
    out
}
