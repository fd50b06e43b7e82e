//! Product catalog — the fixed, key-ordered set of products the business sells.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Unique product identifier.
///
/// Variant order is the catalog order used everywhere a product list is
/// rendered (greeting, MOQ summary, fallback prompt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKey {
    PaperBoxes,
    WineBottles,
    Jars,
    Corrugated,
    PaperBags,
}

impl ProductKey {
    /// All keys in catalog order.
    pub const ALL: [ProductKey; 5] = [
        ProductKey::PaperBoxes,
        ProductKey::WineBottles,
        ProductKey::Jars,
        ProductKey::Corrugated,
        ProductKey::PaperBags,
    ];

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PaperBoxes => "paper_boxes",
            Self::WineBottles => "wine_bottles",
            Self::Jars => "jars",
            Self::Corrugated => "corrugated",
            Self::PaperBags => "paper_bags",
        }
    }
}

/// A single product line.
///
/// Every field may be left out of a profile file; absent values render as
/// empty text in replies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductEntry {
    /// Customer-facing name, e.g. "Custom Paper Boxes".
    pub display_name: String,
    /// Name used in the MOQ list, e.g. "Paper Boxes". Falls back to
    /// `display_name` when empty.
    pub short_name: String,
    /// Line shown in the greeting menu, e.g. "Custom paper boxes & branding".
    /// Falls back to `display_name` when empty.
    pub menu_label: String,
    /// Emoji shown in front of the product in list replies.
    pub emoji: String,
    /// Minimum order quantity in pieces.
    pub minimum_order_quantity: Option<u32>,
    /// Bullet points shown on the product reply.
    pub features: Vec<String>,
    /// Lead time range, e.g. "5-10 days".
    pub lead_time: String,
    /// Closing question asked after the product details.
    pub follow_up: String,
}

impl ProductEntry {
    pub fn list_name(&self) -> &str {
        if self.short_name.is_empty() {
            &self.display_name
        } else {
            &self.short_name
        }
    }

    pub fn menu_name(&self) -> &str {
        if self.menu_label.is_empty() {
            &self.display_name
        } else {
            &self.menu_label
        }
    }

    /// MOQ rendered for replies ("500 pieces"), empty when unknown.
    pub fn moq_label(&self) -> String {
        self.minimum_order_quantity
            .map(|qty| format!("{qty} pieces"))
            .unwrap_or_default()
    }

    /// MOQ in the compact list form ("500 pcs"), empty when unknown.
    pub fn moq_short(&self) -> String {
        self.minimum_order_quantity
            .map(|qty| format!("{qty} pcs"))
            .unwrap_or_default()
    }
}

/// Key-ordered product catalog. Immutable after load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: BTreeMap<ProductKey, ProductEntry>,
}

impl Catalog {
    pub fn new(products: impl IntoIterator<Item = (ProductKey, ProductEntry)>) -> Self {
        Self {
            products: products.into_iter().collect(),
        }
    }

    pub fn get(&self, key: ProductKey) -> Option<&ProductEntry> {
        self.products.get(&key)
    }

    /// Iterate products in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &ProductEntry)> {
        self.products.iter().map(|(key, entry)| (*key, entry))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// One-line MOQ summary, e.g. "Paper Boxes: 500 pcs, ...".
    pub fn moq_summary(&self) -> String {
        self.iter()
            .map(|(_, entry)| format!("{}: {}", entry.list_name(), entry.moq_short()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The packaging company's built-in product line.
    pub fn packaging() -> Self {
        Self::new([
            (
                ProductKey::PaperBoxes,
                product(
                    ["Custom Paper Boxes", "Paper Boxes", "Custom paper boxes & branding"],
                    "📦",
                    500,
                    &["Custom sizes & full color printing", "Logo branding available"],
                    "7-14 days",
                    "Tell me:\n- Box size needed?\n- Quantity?\n- Branding requirements?",
                ),
            ),
            (
                ProductKey::WineBottles,
                product(
                    ["Empty Wine Bottles", "Wine Bottles", "Empty wine bottles"],
                    "🍷",
                    100,
                    &["Sizes: 375ml, 750ml, 1L", "Colors: Clear, green, amber"],
                    "5-10 days",
                    "What size and color do you need?",
                ),
            ),
            (
                ProductKey::Jars,
                product(
                    ["Glass Jars", "Glass Jars", "Glass jars"],
                    "🫙",
                    200,
                    &[
                        "Sizes: 4oz, 8oz, 16oz, 32oz",
                        "Mason, honey, spice jars available",
                        "Custom labels, metal/plastic lids",
                    ],
                    "5-10 days",
                    "Which size and type?",
                ),
            ),
            (
                ProductKey::Corrugated,
                product(
                    ["Corrugated Boxes", "Corrugated Boxes", "Corrugated boxes"],
                    "📋",
                    300,
                    &["Single/double wall", "Custom printing", "Shipping boxes"],
                    "5-12 days",
                    "What dimensions and wall strength do you need?",
                ),
            ),
            (
                ProductKey::PaperBags,
                product(
                    ["Custom Paper Bags", "Paper Bags", "Paper bags"],
                    "🛍️",
                    1000,
                    &["Shopping bags, gift bags", "Handles available", "Custom printing"],
                    "7-10 days",
                    "What bag style and quantity?",
                ),
            ),
        ])
    }
}

/// `names` is `[display, short, menu]`.
fn product(
    names: [&str; 3],
    emoji: &str,
    moq: u32,
    features: &[&str],
    lead_time: &str,
    follow_up: &str,
) -> ProductEntry {
    let [display_name, short_name, menu_label] = names;
    ProductEntry {
        display_name: display_name.to_string(),
        short_name: short_name.to_string(),
        menu_label: menu_label.to_string(),
        emoji: emoji.to_string(),
        minimum_order_quantity: Some(moq),
        features: features.iter().map(|f| f.to_string()).collect(),
        lead_time: lead_time.to_string(),
        follow_up: follow_up.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_follows_key_order_not_insertion_order() {
        let catalog = Catalog::new([
            (ProductKey::PaperBags, ProductEntry::default()),
            (ProductKey::PaperBoxes, ProductEntry::default()),
            (ProductKey::Jars, ProductEntry::default()),
        ]);
        let keys: Vec<_> = catalog.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![ProductKey::PaperBoxes, ProductKey::Jars, ProductKey::PaperBags]
        );
    }

    #[test]
    fn packaging_catalog_has_all_products() {
        let catalog = Catalog::packaging();
        assert_eq!(catalog.len(), ProductKey::ALL.len());
        for key in ProductKey::ALL {
            assert!(catalog.get(key).is_some(), "missing {}", key.label());
        }
        assert_eq!(
            catalog.get(ProductKey::PaperBags).unwrap().minimum_order_quantity,
            Some(1000)
        );
    }

    #[test]
    fn missing_moq_renders_empty() {
        let entry = ProductEntry::default();
        assert_eq!(entry.moq_label(), "");
        assert_eq!(entry.moq_short(), "");
    }

    #[test]
    fn moq_summary_lists_products_in_order() {
        let summary = Catalog::packaging().moq_summary();
        assert!(summary.starts_with("Paper Boxes: 500 pcs"));
        assert!(summary.ends_with("Paper Bags: 1000 pcs"));
    }

    #[test]
    fn list_and_menu_names_fall_back_to_display_name() {
        let entry = ProductEntry {
            display_name: "Tins".into(),
            ..Default::default()
        };
        assert_eq!(entry.list_name(), "Tins");
        assert_eq!(entry.menu_name(), "Tins");

        let catalog = Catalog::packaging();
        let boxes = catalog.get(ProductKey::PaperBoxes).unwrap();
        assert_eq!(boxes.list_name(), "Paper Boxes");
        assert_eq!(boxes.menu_name(), "Custom paper boxes & branding");
    }

    #[test]
    fn deserializes_from_snake_case_keys() {
        let json = r#"{"jars": {"display_name": "Jars", "minimum_order_quantity": 50}}"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        let jars = catalog.get(ProductKey::Jars).unwrap();
        assert_eq!(jars.display_name, "Jars");
        assert_eq!(jars.minimum_order_quantity, Some(50));
        assert!(jars.features.is_empty());
    }
}
