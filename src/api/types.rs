use serde::{Deserialize, Serialize};

/// Offset pagination request; pages are zero-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn query(&self) -> [(&'static str, String); 2] {
        [("page", self.page.to_string()), ("size", self.size.to_string())]
    }
}

/// Search filters for the public listing search, kept as the raw text a user typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// City or neighborhood
    pub location: Option<String>,
    /// `SALE` or `RENT`
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// Matched against title and description
    pub keywords: Option<String>,
}

impl SearchFilters {
    /// Drop absent and empty fields
    pub fn sanitized(&self) -> Self {
        fn keep(value: &Option<String>) -> Option<String> {
            value.as_ref().filter(|v| !v.is_empty()).cloned()
        }

        Self {
            location: keep(&self.location),
            property_type: keep(&self.property_type),
            min_price: keep(&self.min_price),
            max_price: keep(&self.max_price),
            keywords: keep(&self.keywords),
        }
    }

    /// True when no field would reach the search endpoint
    pub fn is_empty(&self) -> bool {
        self.query().is_empty()
    }

    /// Query pairs for the non-empty fields, in wire names
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let clean = self.sanitized();
        [
            ("location", clean.location),
            ("type", clean.property_type),
            ("minPrice", clean.min_price),
            ("maxPrice", clean.max_price),
            ("keywords", clean.keywords),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}
