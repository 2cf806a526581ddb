use super::{AccordionConfig, AccordionView, NO_CATEGORIES_MESSAGE, NO_ITEMS_MESSAGE, ViewStatus};
use std::fmt::Write;

/// Inline stylesheet shipped with the fragment.
pub const ACCORDION_STYLE: &str = r#"<style>
.membership-accordion { width: 100%; margin-bottom: 20px; }
.accordion-section { border: 1px solid #ddd; margin-bottom: 10px; border-radius: 4px; overflow: hidden; }
.accordion-header { background-color: #f5f5f5; padding: 15px; cursor: pointer; position: relative; font-weight: bold; font-size: 18px; }
.accordion-header:after { content: '\002B'; color: #777; font-weight: bold; float: right; margin-left: 5px; transition: transform 0.3s ease; }
.accordion-header.active:after { content: '\2212'; }
.accordion-content { padding: 0 15px; max-height: 0; overflow: hidden; transition: max-height 0.3s ease; }
.accordion-content.show { max-height: 2000px; padding: 15px; }
.membership-item { margin-bottom: 20px; padding-bottom: 20px; border-bottom: 1px solid #eee; }
.membership-item:last-child { border-bottom: none; }
.membership-item h3 { margin-bottom: 10px; text-transform: capitalize; }
.book-now-button { display: inline-block; background-color: #4CAF50; color: white; padding: 5px 10px; text-decoration: none; border-radius: 4px; font-weight: bold; text-align: center; margin-top: 5px; transition: background-color 0.3s ease; }
.book-now-button:hover { background-color: #3e8e41; color: #FFF; }
.sold-out-message { background-color: #f8d7da; color: #721c24; padding: 5px 10px; border-radius: 4px; font-weight: bold; text-align: center; margin-top: 5px; max-width: 115px; }
@media (max-width: 768px) {
  .accordion-header { padding: 12px; font-size: 16px; }
  .accordion-content.show { padding: 12px; }
}
</style>
"#;

/// Click-to-toggle behavior; purely cosmetic, nothing is sent back.
pub const ACCORDION_SCRIPT: &str = r#"<script>
document.addEventListener('DOMContentLoaded', function() {
  document.querySelectorAll('.accordion-header').forEach(function(header) {
    header.addEventListener('click', function() {
      this.classList.toggle('active');
      this.nextElementSibling.classList.toggle('show');
    });
  });
});
</script>
"#;

/// Escape text for element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text for a double- or single-quoted attribute value.
pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(super) fn render(view: &AccordionView, config: &AccordionConfig) -> String {
    let mut html = String::with_capacity(4096);
    if config.include_assets {
        html.push_str(ACCORDION_STYLE);
    }
    html.push_str("<div class=\"membership-accordion\">\n");

    match view.status {
        ViewStatus::NoCategories => {
            let _ = writeln!(html, "<p>{NO_CATEGORIES_MESSAGE}</p>");
        }
        ViewStatus::NoItems => {
            let _ = writeln!(html, "<p>{NO_ITEMS_MESSAGE}</p>");
        }
        ViewStatus::Ready => {
            for section in &view.sections {
                let (active, show) = if section.expanded {
                    (" active", " show")
                } else {
                    ("", "")
                };
                html.push_str("<div class=\"accordion-section\">\n");
                let _ = writeln!(
                    html,
                    "<div class=\"accordion-header{active}\">{}</div>",
                    escape_html(&section.name)
                );
                let _ = writeln!(html, "<div class=\"accordion-content{show}\">");
                for entry in &section.entries {
                    html.push_str("<div class=\"membership-item\">\n");
                    let _ = writeln!(html, "<h3>{}</h3>", escape_html(&entry.title));
                    if entry.availability.is_sold_out() {
                        let _ = writeln!(
                            html,
                            "<div class=\"sold-out-message\">{}</div>",
                            escape_html(&config.sold_out_label)
                        );
                    } else {
                        let _ = writeln!(
                            html,
                            "<a href=\"{}\" class=\"book-now-button\">{}</a>",
                            escape_attr(&entry.permalink),
                            escape_html(&config.book_label)
                        );
                    }
                    html.push_str("</div>\n");
                }
                html.push_str("</div>\n</div>\n");
            }
        }
    }

    html.push_str("</div>\n");
    if config.include_assets {
        html.push_str(ACCORDION_SCRIPT);
    }
    html
}
