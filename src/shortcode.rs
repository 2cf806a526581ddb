//! Named insertion points inside page content.
//!
//! Page authors drop `[tag]` into their content and the registered handler's
//! output replaces it. Handlers take no parameters: attributes written inside
//! the brackets are accepted and ignored, an enclosing `[tag]...[/tag]` pair is
//! replaced whole, and a doubled `[[tag]]` escapes to the literal `[tag]`.

use crate::host::MembershipHost;
use crate::render::{AccordionConfig, render_accordion};
use std::collections::BTreeMap;

/// Tag that inserts the membership accordion.
pub const ACCORDION_TAG: &str = "display_memberships_by_category";

type Handler<'h> = Box<dyn Fn() -> String + 'h>;

#[derive(Default)]
pub struct ShortcodeRegistry<'h> {
    handlers: BTreeMap<String, Handler<'h>>,
}

impl<'h> ShortcodeRegistry<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `tag`, replacing any previous handler.
    pub fn register<F>(&mut self, tag: &str, handler: F)
    where
        F: Fn() -> String + 'h,
    {
        self.handlers.insert(tag.to_string(), Box::new(handler));
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Substitute every registered shortcode in `content`.
    pub fn expand(&self, content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find('[') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];

            if let Some(escaped) = tail.strip_prefix("[[") {
                if let Some(end) = escaped.find("]]") {
                    let inner = &escaped[..end];
                    if self.parse_tag(inner).is_some() {
                        out.push('[');
                        out.push_str(inner);
                        out.push(']');
                        rest = &escaped[end + 2..];
                        continue;
                    }
                }
            }

            let matched = tail[1..].find(']').and_then(|end| {
                let inner = &tail[1..1 + end];
                self.parse_tag(inner)
                    .map(|(tag, self_closing)| (tag, self_closing, end + 2))
            });

            match matched {
                Some((tag, self_closing, consumed)) => {
                    tracing::debug!(tag, "expanding shortcode");
                    out.push_str(&(self.handlers[tag])());
                    rest = &tail[consumed..];
                    if !self_closing {
                        let closing = format!("[/{tag}]");
                        if let Some(close) = rest.find(&closing) {
                            rest = &rest[close + closing.len()..];
                        }
                    }
                }
                None => {
                    out.push('[');
                    rest = &tail[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }

    /// Registered tag name inside brackets plus whether it self-closes.
    fn parse_tag<'c>(&self, inner: &'c str) -> Option<(&'c str, bool)> {
        let name_end = inner
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(inner.len());
        let (name, after) = inner.split_at(name_end);
        if !self.is_registered(name) {
            return None;
        }
        let after = after.trim_end();
        if after.is_empty() {
            return Some((name, false));
        }
        if after.starts_with('/') && after != "/" {
            return None;
        }
        Some((name, after.ends_with('/')))
    }
}

/// Register the accordion under `ACCORDION_TAG`, rendering from `host`.
pub fn register_accordion<'h, H>(
    registry: &mut ShortcodeRegistry<'h>,
    host: &'h H,
    config: AccordionConfig,
) where
    H: MembershipHost + ?Sized,
{
    registry.register(ACCORDION_TAG, move || render_accordion(host, &config));
}
