//! Ordered intent rules.
//!
//! Each rule pairs a predicate over the normalized (lowercased, untrimmed)
//! message with a responder that renders the canned reply. The table is
//! evaluated top to bottom and the first match wins, so position encodes
//! priority:
//!
//! greeting > hours > MOQ > paper boxes > wine bottles > jars > pricing > contact
//!
//! Product rules sit above pricing so "quote for paper boxes" gets the
//! product reply. Matching is plain substring search; short tokens such as
//! `jar` or `hi ` can match inside unrelated words ("sushi box" greets).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::business::{BusinessProfile, Catalog, ProductEntry, ProductKey};
use crate::pipeline::replies;

/// Customer intent a rule answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Hours,
    MinimumOrder,
    PaperBoxes,
    WineBottles,
    Jars,
    Pricing,
    Contact,
}

impl Intent {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Hours => "hours",
            Self::MinimumOrder => "minimum_order",
            Self::PaperBoxes => "paper_boxes",
            Self::WineBottles => "wine_bottles",
            Self::Jars => "jars",
            Self::Pricing => "pricing",
            Self::Contact => "contact",
        }
    }
}

/// Keyword set for a substring predicate.
///
/// Matches when the normalized text contains any `contains` keyword or,
/// once trimmed, equals any `exact` keyword.
#[derive(Debug, Clone, Copy)]
pub struct Keywords {
    pub contains: &'static [&'static str],
    pub exact: &'static [&'static str],
}

impl Keywords {
    pub const fn any(contains: &'static [&'static str]) -> Self {
        Self {
            contains,
            exact: &[],
        }
    }

    pub const fn with_exact(mut self, exact: &'static [&'static str]) -> Self {
        self.exact = exact;
        self
    }

    /// `normalized` must already be lowercased. It is searched untrimmed so
    /// keywords with trailing spaces still match at the end of a message.
    pub fn matches(&self, normalized: &str) -> bool {
        let whole = normalized.trim();
        self.exact.iter().any(|kw| whole == *kw)
            || self.contains.iter().any(|kw| normalized.contains(kw))
    }
}

const GREETING: Keywords = Keywords::any(&["hello", "hi "]).with_exact(&["hi"]);
const HOURS: Keywords = Keywords::any(&["hours", "open"]);
const MINIMUM_ORDER: Keywords = Keywords::any(&["moq", "minimum"]);
const PAPER_BOXES: Keywords = Keywords::any(&["paper box", "custom box"]);
const WINE_BOTTLES: Keywords = Keywords::any(&["wine bottle", "empty bottle"]);
const JARS: Keywords = Keywords::any(&["jar", "glass jar"]);
const PRICING: Keywords = Keywords::any(&["price", "cost", "quote"]);
const CONTACT: Keywords = Keywords::any(&["contact", "phone"]);

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;
type Responder = Box<dyn Fn() -> String + Send + Sync>;

/// A single (predicate, responder) pair.
pub struct Rule {
    intent: Intent,
    predicate: Predicate,
    responder: Responder,
}

impl Rule {
    pub fn new<P, R>(intent: Intent, predicate: P, responder: R) -> Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
        R: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            intent,
            predicate: Box::new(predicate),
            responder: Box::new(responder),
        }
    }

    /// Rule with a keyword predicate.
    pub fn keywords<R>(intent: Intent, keywords: Keywords, responder: R) -> Self
    where
        R: Fn() -> String + Send + Sync + 'static,
    {
        Self::new(intent, move |text| keywords.matches(text), responder)
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn matches(&self, normalized: &str) -> bool {
        (self.predicate)(normalized)
    }

    pub fn respond(&self) -> String {
        (self.responder)()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("intent", &self.intent)
            .finish_non_exhaustive()
    }
}

/// Immutable, ordered rule table.
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build a table from rules in priority order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Table with no rules; everything falls through to the fallback.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard packaging-business table.
    pub fn for_business(profile: Arc<BusinessProfile>, catalog: Arc<Catalog>) -> Self {
        let rules = vec![
            {
                let profile = Arc::clone(&profile);
                let catalog = Arc::clone(&catalog);
                Rule::keywords(Intent::Greeting, GREETING, move || {
                    replies::greeting(&profile, &catalog)
                })
            },
            {
                let profile = Arc::clone(&profile);
                Rule::keywords(Intent::Hours, HOURS, move || replies::hours(&profile))
            },
            {
                let catalog = Arc::clone(&catalog);
                Rule::keywords(Intent::MinimumOrder, MINIMUM_ORDER, move || {
                    replies::minimum_orders(&catalog)
                })
            },
            product_rule(Intent::PaperBoxes, PAPER_BOXES, ProductKey::PaperBoxes, &catalog),
            product_rule(Intent::WineBottles, WINE_BOTTLES, ProductKey::WineBottles, &catalog),
            product_rule(Intent::Jars, JARS, ProductKey::Jars, &catalog),
            Rule::keywords(Intent::Pricing, PRICING, replies::pricing),
            Rule::keywords(Intent::Contact, CONTACT, move || replies::contact(&profile)),
        ];

        Self::new(rules)
    }

    /// First rule whose predicate accepts `normalized`. Later rules are not
    /// evaluated once one matches.
    pub fn first_match(&self, normalized: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(normalized))
    }

    /// Intents in evaluation order.
    pub fn intents(&self) -> Vec<Intent> {
        self.rules.iter().map(Rule::intent).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn product_rule(
    intent: Intent,
    keywords: Keywords,
    key: ProductKey,
    catalog: &Arc<Catalog>,
) -> Rule {
    let catalog = Arc::clone(catalog);
    Rule::keywords(intent, keywords, move || match catalog.get(key) {
        Some(entry) => replies::product(entry),
        None => replies::product(&ProductEntry::default()),
    })
}
