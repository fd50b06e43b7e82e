//! Business profile — static facts about the business used by every reply.

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;

/// Immutable business record, loaded once at startup.
///
/// Missing fields deserialize to empty strings so partially filled profiles
/// still produce complete replies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    pub name: String,
    /// e.g. "Monday-Friday 9AM-6PM".
    pub operating_hours: String,
    /// Free-text list of what the business offers.
    pub service_summary: String,
    /// One-line MOQ summary across all products.
    pub minimum_order_quantities: String,
    pub contact_email: String,
    pub contact_phone: String,
    /// When the WhatsApp line is answered, e.g. "24/7".
    pub availability_note: String,
    /// What the business is known for; fed to the fallback prompt.
    pub specialties: String,
}

impl BusinessProfile {
    /// The packaging company's built-in profile.
    pub fn packaging(catalog: &Catalog) -> Self {
        Self {
            name: "Customized_Box Packaging".into(),
            operating_hours: "Monday-Friday 9AM-6PM".into(),
            service_summary: "Custom packaging paper boxes, branding design, empty wine bottles, \
                              glass jars, corrugated boxes, paper bags"
                .into(),
            minimum_order_quantities: catalog.moq_summary(),
            contact_email: "orders@customizedbox.com".into(),
            contact_phone: "+1-234-567-8900".into(),
            availability_note: "24/7".into(),
            specialties: "Custom branding, bulk orders, eco-friendly packaging".into(),
        }
    }
}
