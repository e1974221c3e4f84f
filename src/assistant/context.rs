use serde::{Deserialize, Serialize};
use std::fmt;

/// Product the customer is asking about. Every field is optional; absent or
/// empty values are left out of prompts and fallback replies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
}

/// Storefronts send prices as numbers, older clients as preformatted strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Label(String),
}

impl Price {
    fn is_present(&self) -> bool {
        match self {
            Self::Amount(amount) => *amount != 0.0,
            Self::Label(label) => !label.trim().is_empty(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(amount) => write!(f, "{}", amount),
            Self::Label(label) => write!(f, "{}", label.trim_start_matches('$')),
        }
    }
}

impl ProductInfo {
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref().filter(|price| price.is_present())
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(self.category.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    pub fn stock(&self) -> Option<i64> {
        self.stock
    }

    pub fn is_empty(&self) -> bool {
        self.name().is_none()
            && self.price().is_none()
            && self.category().is_none()
            && self.description().is_none()
            && self.stock.is_none()
    }
}

/// What the shopper is looking at when they open the website helper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    #[serde(default)]
    pub current_page: Option<String>,
    #[serde(default)]
    pub page_title: Option<String>,
    #[serde(default)]
    pub page_content: Option<String>,
    #[serde(default)]
    pub product_info: Option<ProductInfo>,
}

impl PageContext {
    pub fn current_page(&self) -> &str {
        self.current_page.as_deref().unwrap_or("")
    }

    pub fn page_title(&self) -> Option<&str> {
        non_empty(self.page_title.as_deref())
    }

    pub fn page_content(&self) -> Option<&str> {
        non_empty(self.page_content.as_deref())
    }

    pub fn product_name(&self) -> Option<&str> {
        self.product_info.as_ref().and_then(ProductInfo::name)
    }

    pub fn is_empty(&self) -> bool {
        self.current_page().is_empty()
            && self.page_title().is_none()
            && self.page_content().is_none()
            && self.product_info.as_ref().is_none_or(ProductInfo::is_empty)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Truncates to `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
