//! Sold-out determination for a single membership item.
//!
//! Two rules, first match wins: the item's full text or summary contains the
//! exact phrase `Registration is full`, or a positive declared capacity has
//! been reached by the active enrollment count. Missing inputs disable their
//! rule rather than raising an error.

use crate::catalog::{Capacity, MembershipItem};
use crate::host::{CapacitySource, EnrollmentSource, HostFeatures};
use serde::Serialize;
use tracing::{debug, warn};

/// Literal marker hosts put in an item's text once registration closes.
/// Matched case-sensitively with no normalization.
pub const SOLD_OUT_PHRASE: &str = "Registration is full";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Why an item was classified as sold out.
pub enum SoldOutReason {
    TextMatch,
    CapacityReached,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Availability {
    Available,
    SoldOut(SoldOutReason),
}

impl Availability {
    pub fn is_sold_out(self) -> bool {
        matches!(self, Availability::SoldOut(_))
    }

    pub fn reason(self) -> Option<SoldOutReason> {
        match self {
            Availability::Available => None,
            Availability::SoldOut(reason) => Some(reason),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::SoldOut(_) => "sold_out",
        }
    }
}

impl SoldOutReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SoldOutReason::TextMatch => "text_match",
            SoldOutReason::CapacityReached => "capacity_reached",
        }
    }
}

impl Serialize for Availability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Everything the availability rule looks at for one item.
pub struct AvailabilityInput<'a> {
    pub content: &'a str,
    pub summary: &'a str,
    pub capacity: Capacity,
    /// Active enrollments, when a lookup was possible.
    pub enrolled: Option<u64>,
}

/// True when `text` carries the registration-closed marker.
pub fn mentions_full_registration(text: &str) -> bool {
    text.contains(SOLD_OUT_PHRASE)
}

/// Classify one item from already-resolved inputs.
pub fn classify(input: &AvailabilityInput<'_>) -> Availability {
    if mentions_full_registration(input.content) || mentions_full_registration(input.summary) {
        return Availability::SoldOut(SoldOutReason::TextMatch);
    }

    match (input.capacity.limit(), input.enrolled) {
        (Some(limit), Some(enrolled)) if enrolled >= limit => {
            Availability::SoldOut(SoldOutReason::CapacityReached)
        }
        _ => Availability::Available,
    }
}

/// Classifier bound to a host, resolving capacity and enrollment on demand.
///
/// Enrollment counts cost a host query, so they are only requested once the
/// text rule has not matched, registration limits are enabled, and the item
/// declares a usable capacity.
pub struct AvailabilityClassifier<'h, H: ?Sized> {
    host: &'h H,
}

impl<'h, H> AvailabilityClassifier<'h, H>
where
    H: CapacitySource + EnrollmentSource + HostFeatures + ?Sized,
{
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }

    pub fn classify_item(&self, item: &MembershipItem) -> Availability {
        let summary = item.summary();
        let mut input = AvailabilityInput {
            content: &item.content,
            summary: &summary,
            capacity: Capacity::Unlimited,
            enrolled: None,
        };

        let text_matched =
            mentions_full_registration(input.content) || mentions_full_registration(input.summary);
        if !text_matched && self.host.registration_limits_enabled() {
            input.capacity = self.host.declared_capacity(&item.id);
            if input.capacity.is_limited() {
                input.enrolled = match self.host.active_enrollments(&item.id) {
                    Ok(count) => Some(count),
                    Err(err) => {
                        warn!(item = %item.id, "enrollment lookup failed: {err:#}");
                        None
                    }
                };
            }
        }

        let availability = classify(&input);
        if let Some(reason) = availability.reason() {
            debug!(item = %item.id, reason = reason.as_str(), "item sold out");
        }
        availability
    }
}
