use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort keys the backend validates. Anything else is rejected before a request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortSpec {
    PriceAsc,
    PriceDesc,
    RatingDesc,
    Newest,
    Popular,
    DepartureAsc,
    DurationAsc,
    DiscountDesc,
    NameAsc,
}

impl SortSpec {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortSpec::PriceAsc => "price_asc",
            SortSpec::PriceDesc => "price_desc",
            SortSpec::RatingDesc => "rating_desc",
            SortSpec::Newest => "newest",
            SortSpec::Popular => "popular",
            SortSpec::DepartureAsc => "departure_asc",
            SortSpec::DurationAsc => "duration_asc",
            SortSpec::DiscountDesc => "discount_desc",
            SortSpec::NameAsc => "name_asc",
        }
    }
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price_asc" => Ok(SortSpec::PriceAsc),
            "price_desc" => Ok(SortSpec::PriceDesc),
            "rating_desc" => Ok(SortSpec::RatingDesc),
            "newest" => Ok(SortSpec::Newest),
            "popular" => Ok(SortSpec::Popular),
            "departure_asc" => Ok(SortSpec::DepartureAsc),
            "duration_asc" => Ok(SortSpec::DurationAsc),
            "discount_desc" => Ok(SortSpec::DiscountDesc),
            "name_asc" => Ok(SortSpec::NameAsc),
            other => Err(other.to_string()),
        }
    }
}

/// Free text plus the domain's location/keyword inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    pub locations: BTreeMap<String, String>,
}

impl SearchQuery {
    pub fn clear(&mut self) {
        self.text.clear();
        self.locations.clear();
    }

    pub fn location(&self, field: &str) -> Option<&str> {
        self.locations
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn trimmed_text(&self) -> Option<&str> {
        Some(self.text.trim()).filter(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed_text().is_none() && self.locations.values().all(|v| v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_keys_parse_back() {
        for sort in [
            SortSpec::PriceAsc,
            SortSpec::RatingDesc,
            SortSpec::DepartureAsc,
            SortSpec::DiscountDesc,
        ] {
            assert_eq!(sort.as_str().parse::<SortSpec>(), Ok(sort));
        }
        assert!("price; DROP TABLE".parse::<SortSpec>().is_err());
    }

    #[test]
    fn test_blank_search_counts_as_empty() {
        let mut query = SearchQuery::default();
        query.text = "   ".into();
        query.locations.insert("destination".into(), "".into());
        assert!(query.is_empty());
        assert_eq!(query.location("destination"), None);
    }
}
