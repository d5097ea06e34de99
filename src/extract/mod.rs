pub mod aliases;
pub mod text;

use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use tracing::debug;

use crate::error::StructuralParseError;
use crate::record::LabRecord;
pub use aliases::LocationAliases;
use text::{element_text, region_name};

/// Label the page puts in front of every region heading.
pub const REGION_PREFIX: &str = "Região ";

struct Selectors {
    region: Selector,
    heading: Selector,
    card: Selector,
    name: Selector,
    paragraph: Selector,
    link: Selector,
}

fn selectors() -> &'static Selectors {
    static SEL: OnceLock<Selectors> = OnceLock::new();
    SEL.get_or_init(|| {
        let parse = |css: &str| Selector::parse(css).unwrap();
        Selectors {
            region: parse("div.region-section"),
            heading: parse("h3"),
            card: parse("div.lab-card"),
            name: parse("h4"),
            paragraph: parse("p"),
            link: parse("a.btn-outline"),
        }
    })
}

/// Records in document order plus how many cards each region section held.
#[derive(Debug, Default)]
pub struct Extraction {
    pub labs: Vec<LabRecord>,
    pub regions: Vec<(String, usize)>,
}

/// Parse the network page into lab records.
///
/// Every card must carry a name heading, a location and a description
/// paragraph, and an outbound link with an `href`; the first card that
/// doesn't aborts the whole extraction. Sections without cards are fine.
pub fn extract_labs(html: &str, aliases: &LocationAliases) -> Result<Extraction, StructuralParseError> {
    let document = Html::parse_document(html);
    let sel = selectors();
    let mut out = Extraction::default();

    for (s_idx, section) in document.select(&sel.region).enumerate() {
        let heading = section
            .select(&sel.heading)
            .next()
            .ok_or(StructuralParseError::MissingRegionHeading { section: s_idx + 1 })?;
        let region = region_name(&element_text(heading), REGION_PREFIX);

        let before = out.labs.len();
        for (c_idx, card) in section.select(&sel.card).enumerate() {
            let lab = parse_card(card, &region, c_idx + 1, aliases)?;
            out.labs.push(lab);
        }
        let count = out.labs.len() - before;
        debug!(region = %region, cards = count, "region parsed");
        out.regions.push((region, count));
    }

    Ok(out)
}

fn parse_card(
    card: ElementRef<'_>,
    region: &str,
    card_no: usize,
    aliases: &LocationAliases,
) -> Result<LabRecord, StructuralParseError> {
    let sel = selectors();
    let missing = |element: &'static str| StructuralParseError::MissingCardElement {
        region: region.to_string(),
        card: card_no,
        element,
    };

    let name = card
        .select(&sel.name)
        .next()
        .map(element_text)
        .ok_or_else(|| missing("name heading <h4>"))?;
    if name.is_empty() {
        return Err(StructuralParseError::EmptyName {
            region: region.to_string(),
            card: card_no,
        });
    }

    let mut paragraphs = card.select(&sel.paragraph).map(element_text);
    let location = paragraphs.next().ok_or_else(|| missing("location paragraph <p>"))?;
    let description = paragraphs
        .next()
        .ok_or_else(|| missing("description paragraph (second <p>)"))?;

    let link = card
        .select(&sel.link)
        .next()
        .ok_or_else(|| missing("outbound link <a class=\"btn-outline\">"))?
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .ok_or_else(|| missing("href on outbound link"))?
        .to_string();

    Ok(LabRecord {
        name,
        location: aliases.normalize(&location),
        description,
        link,
        region: region.to_string(),
    })
}

// ── Tests ──
