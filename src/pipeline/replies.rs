//! Canned reply templates.
//!
//! Pure functions of the business profile and catalog. Empty fields render
//! as empty text; nothing here can fail.

use crate::business::{BusinessProfile, Catalog, ProductEntry};

pub fn greeting(profile: &BusinessProfile, catalog: &Catalog) -> String {
    let mut reply = format!(
        "Hello! 👋 Welcome to {}!\n\nI can help you with:\n",
        profile.name
    );
    for (_, entry) in catalog.iter() {
        reply.push_str(&format!("{} {}\n", entry.emoji, entry.menu_name()));
    }
    reply.push_str("\nWhat packaging do you need?");
    reply
}

pub fn hours(profile: &BusinessProfile) -> String {
    format!(
        "🕒 Business Hours: {}\n📱 WhatsApp: {} (I'm always here!)\n\nWhat can I help you with?",
        profile.operating_hours, profile.availability_note
    )
}

/// MOQ summary for every product, in catalog order.
pub fn minimum_orders(catalog: &Catalog) -> String {
    let mut reply = String::from("📊 **Minimum Order Quantities:**\n\n");
    for (_, entry) in catalog.iter() {
        reply.push_str(&format!(
            "{} {}: {}\n",
            entry.emoji,
            entry.list_name(),
            entry.moq_short()
        ));
    }
    reply.push_str("\nWhich product interests you?");
    reply
}

pub fn product(entry: &ProductEntry) -> String {
    let mut reply = format!(
        "{} **{}**\n• MOQ: {}\n",
        entry.emoji,
        entry.display_name,
        entry.moq_label()
    );
    for feature in &entry.features {
        reply.push_str(&format!("• {feature}\n"));
    }
    reply.push_str(&format!("• Lead time: {}\n\n{}", entry.lead_time, entry.follow_up));
    reply
}

pub fn pricing() -> String {
    "💰 **Custom Pricing**\n\n\
     For accurate quotes, I need:\n\
     • Product type\n\
     • Quantity needed\n\
     • Size/specifications\n\
     • Custom requirements\n\n\
     ⚡ Quick quote in 2 hours!\n\n\
     What product are you interested in?"
        .to_string()
}

pub fn contact(profile: &BusinessProfile) -> String {
    format!(
        "📞 **Contact Info:**\n\
         • WhatsApp: {} (right here!)\n\
         • Email: {}\n\
         • Phone: {}\n\
         • Hours: {}\n\n\
         How can I help you today?",
        profile.availability_note,
        profile.contact_email,
        profile.contact_phone,
        profile.operating_hours
    )
}
