use super::{CatalogError, Episode, Record, Result};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Turns listing documents into records
pub struct Extractor;

impl Extractor {
    /// Extract schedule entries from the `html` fragment of the schedule endpoint
    pub fn schedule(html: &str) -> Result<Vec<Record>> {
        let document = Html::parse_fragment(html);
        let item_selector = selector("li")?;
        let link_selector = selector(".film-name a")?;
        let time_selector = selector(".time")?;

        let records = document.select(&item_selector).filter_map(|item| {
            let link = item.select(&link_selector).next()?;
            let time = item
                .select(&time_selector)
                .next()
                .map(|t| text_of(&t))
                .unwrap_or_default();

            Some(record_from_link(&link)?.with_time(time))
        });

        Ok(dedup(records))
    }

    /// Extract results from a full search page
    pub fn search(html: &str) -> Result<Vec<Record>> {
        let document = Html::parse_document(html);
        let item_selector = selector(".flw-item")?;
        let link_selector = selector(".film-name a")?;

        let records = document.select(&item_selector).filter_map(|item| {
            let link = item.select(&link_selector).next()?;
            record_from_link(&link)
        });

        Ok(dedup(records))
    }

    /// Extract the episode list from the `html` fragment of the episode endpoint
    pub fn episodes(html: &str) -> Result<Vec<Episode>> {
        let document = Html::parse_fragment(html);
        let item_selector = selector(".ep-item")?;

        Ok(document
            .select(&item_selector)
            .map(|item| {
                let attr = |name: &str| item.value().attr(name).map(str::to_string);
                Episode {
                    number: attr("data-number"),
                    id: attr("data-id"),
                    title: attr("title"),
                }
            })
            .collect())
    }

    /// Split a watch link into `(id, full_id)`.
    ///
    /// `/watch/one-piece-100?ref=search` gives `("100", "one-piece-100")`.
    pub fn ids_from_href(href: &str) -> (String, String) {
        let path = href.split_once('?').map_or(href, |(path, _)| path);
        let path = path.trim_end_matches('/');

        let full_id = path.rsplit('/').next().unwrap_or(path);
        let id = full_id.rsplit('-').next().unwrap_or(full_id);

        (id.to_string(), full_id.to_string())
    }

    /// Numeric id accepted by the episode endpoint, from either a slug or an id
    pub fn numeric_id(anime_id: &str) -> &str {
        anime_id.rsplit('-').next().unwrap_or(anime_id)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| CatalogError::Parse(e.to_string()))
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn record_from_link(link: &ElementRef<'_>) -> Option<Record> {
    let href = link.value().attr("href")?;
    let (id, full_id) = Extractor::ids_from_href(href);
    if id.is_empty() {
        return None;
    }

    Some(Record::new(text_of(link), id, full_id))
}

fn dedup(records: impl Iterator<Item = Record>) -> Vec<Record> {
    let mut seen = HashSet::new();
    records.filter(|r| seen.insert(r.id.clone())).collect()
}
