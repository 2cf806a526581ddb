//! Accordion rendering: category sections of membership items.
//!
//! Rendering happens in two steps. `build_view` walks the host once (categories,
//! then items per category, then availability per item) and produces an
//! `AccordionView`; `render_view` turns that into a self-contained HTML
//! fragment. Host errors never escape: a failed category enumeration renders
//! the "no categories" message, a failed item enumeration or detail lookup
//! drops that category or item.

mod html;

pub use html::{ACCORDION_SCRIPT, ACCORDION_STYLE, escape_attr, escape_html};

use crate::availability::{Availability, AvailabilityClassifier};
use crate::catalog::{Category, CategoryId, ItemId};
use crate::host::MembershipHost;
use serde::Serialize;
use tracing::{debug, warn};

pub const NO_CATEGORIES_MESSAGE: &str = "No membership categories found.";
pub const NO_ITEMS_MESSAGE: &str = "No memberships found.";

#[derive(Clone, Debug)]
/// Presentation knobs; defaults reproduce the stock fragment.
pub struct AccordionConfig {
    pub book_label: String,
    pub sold_out_label: String,
    /// Emit the inline `<style>` and `<script>` blocks around the markup.
    pub include_assets: bool,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            book_label: "Book Now".to_string(),
            sold_out_label: "SOLD OUT".to_string(),
            include_assets: true,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
/// Everything one render pass decided, before markup.
pub struct AccordionView {
    pub status: ViewStatus,
    pub sections: Vec<SectionView>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    Ready,
    /// The host returned no categories, failed to, or lacks the capability.
    NoCategories,
    /// Categories exist but none of them yielded an item.
    NoItems,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionView {
    pub category_id: CategoryId,
    pub name: String,
    /// Only the first non-empty section starts open.
    pub expanded: bool,
    pub entries: Vec<EntryView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EntryView {
    pub item_id: ItemId,
    pub title: String,
    pub permalink: String,
    pub availability: Availability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl AccordionView {
    fn empty(status: ViewStatus) -> Self {
        Self {
            status,
            sections: Vec::new(),
        }
    }
}

/// Walk the host and decide sections, entries and availability.
pub fn build_view<H: MembershipHost + ?Sized>(host: &H) -> AccordionView {
    if !host.membership_products_available() {
        debug!("membership products unavailable; rendering empty accordion");
        return AccordionView::empty(ViewStatus::NoCategories);
    }

    let mut categories = match host.categories() {
        Ok(categories) => categories,
        Err(err) => {
            warn!("category enumeration failed: {err:#}");
            return AccordionView::empty(ViewStatus::NoCategories);
        }
    };
    if categories.is_empty() {
        return AccordionView::empty(ViewStatus::NoCategories);
    }
    categories.sort_by(Category::cmp_by_name);

    let classifier = AvailabilityClassifier::new(host);
    let mut sections = Vec::new();
    for category in categories {
        let entries = build_entries(host, &classifier, &category);
        if entries.is_empty() {
            debug!(category = %category.id, "skipping category without items");
            continue;
        }
        sections.push(SectionView {
            expanded: sections.is_empty(),
            category_id: category.id,
            name: category.name,
            entries,
        });
    }

    if sections.is_empty() {
        return AccordionView::empty(ViewStatus::NoItems);
    }
    AccordionView {
        status: ViewStatus::Ready,
        sections,
    }
}

fn build_entries<H: MembershipHost + ?Sized>(
    host: &H,
    classifier: &AvailabilityClassifier<'_, H>,
    category: &Category,
) -> Vec<EntryView> {
    let ids = match host.items_in(&category.id) {
        Ok(ids) => ids,
        Err(err) => {
            warn!(category = %category.id, "item enumeration failed: {err:#}");
            return Vec::new();
        }
    };

    let mut entries = Vec::with_capacity(ids.len());
    for id in ids {
        let item = match host.item(&id) {
            Ok(Some(item)) => item,
            Ok(None) => {
                warn!(item = %id, "item listed in category but not found");
                continue;
            }
            Err(err) => {
                warn!(item = %id, "item lookup failed: {err:#}");
                continue;
            }
        };
        let availability = classifier.classify_item(&item);
        entries.push(EntryView {
            item_id: item.id,
            title: item.title,
            permalink: item.permalink,
            availability,
            reason: availability.reason().map(|reason| reason.as_str()),
        });
    }
    entries
}

/// Render the complete accordion fragment for `host`.
pub fn render_accordion<H: MembershipHost + ?Sized>(host: &H, config: &AccordionConfig) -> String {
    render_view(&build_view(host), config)
}

/// Render an already-built view as HTML.
pub fn render_view(view: &AccordionView, config: &AccordionConfig) -> String {
    html::render(view, config)
}
