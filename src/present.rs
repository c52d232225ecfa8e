//! Writes ranked items into a display surface: one featured story and a
//! list of cards.

use crate::news::NewsItem;
use crate::window::Clock;
use time::{OffsetDateTime, UtcOffset};

pub const FEATURED_MARKER: &str = "Destaque";
pub const UPDATING_MARKER: &str = "Atualizando...";
pub const EMPTY_MESSAGE: &str = "Sem noticias agora. Tente novamente mais tarde.";
pub const CONTINUE_READING: &str = "Continuar lendo";

const MONTHS_PT_BR: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    FeaturedTitle,
    FeaturedSource,
    FeaturedMeta,
    LoadingText,
}

/// One entry of the list slot. External links open in a new context with
/// no opener reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsCard {
    pub meta: String,
    pub title: String,
    pub href: String,
    pub link_text: String,
    pub target: String,
    pub rel: String,
}

/// The display operations rendering needs. `present` marks the end of one
/// render pass; surfaces that paint eagerly can ignore it.
pub trait DisplaySurface {
    fn set_text(&mut self, slot: Slot, text: &str);
    fn set_featured_href(&mut self, href: &str);
    fn clear_list(&mut self);
    fn append_card(&mut self, card: NewsCard);
    fn present(&mut self) {}
}

/// In-memory model of every slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub featured_title: String,
    pub featured_source: String,
    pub featured_meta: String,
    pub featured_href: String,
    pub loading_text: String,
    pub list: Vec<NewsCard>,
}

impl Page {
    pub fn loading() -> Self {
        Page {
            loading_text: "Carregando...".into(),
            ..Page::default()
        }
    }

    pub fn is_empty_state(&self) -> bool {
        self.featured_title == EMPTY_MESSAGE && self.featured_href == "#" && self.list.is_empty()
    }
}

impl DisplaySurface for Page {
    fn set_text(&mut self, slot: Slot, text: &str) {
        let target = match slot {
            Slot::FeaturedTitle => &mut self.featured_title,
            Slot::FeaturedSource => &mut self.featured_source,
            Slot::FeaturedMeta => &mut self.featured_meta,
            Slot::LoadingText => &mut self.loading_text,
        };
        *target = text.to_string();
    }

    fn set_featured_href(&mut self, href: &str) {
        self.featured_href = href.to_string();
    }

    fn clear_list(&mut self) {
        self.list.clear();
    }

    fn append_card(&mut self, card: NewsCard) {
        self.list.push(card);
    }
}

/// Two-digit day and abbreviated pt-BR month in the viewer's offset,
/// e.g. `18 de out.`
pub fn format_date(date: OffsetDateTime, offset: UtcOffset) -> String {
    let local = date.to_offset(offset);
    let month = MONTHS_PT_BR[usize::from(u8::from(local.month())) - 1];
    format!("{:02} de {}", local.day(), month)
}

/// `source · date`, or the bare source for dateless items. The date is
/// shown in the local offset in effect when the item was published.
pub fn meta_label(item: &NewsItem, clock: &dyn Clock) -> String {
    match item.date {
        Some(d) => format!("{} · {}", item.source, format_date(d, clock.offset_at(d))),
        None => item.source.clone(),
    }
}

pub fn render_featured(surface: &mut dyn DisplaySurface, item: &NewsItem, clock: &dyn Clock) {
    surface.set_text(Slot::FeaturedTitle, &item.title);
    surface.set_text(Slot::FeaturedSource, &meta_label(item, clock));
    surface.set_text(Slot::FeaturedMeta, FEATURED_MARKER);
    surface.set_featured_href(&item.link);
    surface.set_text(Slot::LoadingText, "");
}

pub fn news_card(item: &NewsItem, clock: &dyn Clock) -> NewsCard {
    NewsCard {
        meta: meta_label(item, clock),
        title: item.title.clone(),
        href: item.link.clone(),
        link_text: CONTINUE_READING.into(),
        target: "_blank".into(),
        rel: "noopener noreferrer".into(),
    }
}

pub fn render_news(surface: &mut dyn DisplaySurface, items: &[NewsItem], clock: &dyn Clock) {
    surface.clear_list();
    for item in items {
        surface.append_card(news_card(item, clock));
    }
}

pub fn render_empty(surface: &mut dyn DisplaySurface) {
    surface.set_text(Slot::FeaturedTitle, EMPTY_MESSAGE);
    surface.set_text(Slot::FeaturedSource, "");
    surface.set_text(Slot::FeaturedMeta, FEATURED_MARKER);
    surface.set_featured_href("#");
    surface.set_text(Slot::LoadingText, "");
    surface.clear_list();
}

pub fn render_updating(surface: &mut dyn DisplaySurface) {
    surface.set_text(Slot::FeaturedMeta, UPDATING_MARKER);
}
