//! Client-side refinement for criteria the backend does not understand.
//!
//! Everything here is a pure function of (rows, criteria, now) and is re-run
//! from scratch whenever either input changes.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Months, Utc};
use regex::Regex;

use crate::models::criteria::FilterCriteria;
use crate::models::listing::Refinable;
use crate::models::search::SortSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spring" | "xuân" => Ok(Season::Spring),
            "summer" | "hè" | "hạ" => Ok(Season::Summer),
            "autumn" | "fall" | "thu" => Ok(Season::Autumn),
            "winter" | "đông" => Ok(Season::Winter),
            other => Err(other.to_string()),
        }
    }
}

impl Season {
    /// Substrings that mark a "best time to visit" text as fitting this season.
    pub fn tokens(&self) -> &'static [&'static str] {
        match self {
            Season::Spring => &["1", "2", "3", "tháng 1", "tháng 2", "tháng 3", "xuân", "spring"],
            Season::Summer => &["4", "5", "6", "tháng 4", "tháng 5", "tháng 6", "hè", "hạ", "summer"],
            Season::Autumn => &["7", "8", "9", "tháng 7", "tháng 8", "tháng 9", "thu", "autumn"],
            Season::Winter => &[
                "10", "11", "12", "tháng 10", "tháng 11", "tháng 12", "đông", "winter",
            ],
        }
    }

    /// Items without the field fit every season.
    pub fn matches(&self, best_time_to_visit: Option<&str>) -> bool {
        let Some(text) = best_time_to_visit.map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let text = text.to_lowercase();
        self.tokens().iter().any(|token| text.contains(token))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBucket {
    /// Under 3 hours.
    Short,
    /// 3 to under 6 hours.
    HalfDay,
    /// 6 to under 12 hours.
    FullDay,
    /// 12 hours or more.
    Extended,
}

impl FromStr for DurationBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0-3" | "<3" | "short" => Ok(DurationBucket::Short),
            "3-6" | "medium" => Ok(DurationBucket::HalfDay),
            "6-12" | "long" => Ok(DurationBucket::FullDay),
            "12+" | ">=12" | "full" => Ok(DurationBucket::Extended),
            other => Err(other.to_string()),
        }
    }
}

impl DurationBucket {
    pub fn for_hours(hours: u32) -> Self {
        match hours {
            0..=2 => DurationBucket::Short,
            3..=5 => DurationBucket::HalfDay,
            6..=11 => DurationBucket::FullDay,
            _ => DurationBucket::Extended,
        }
    }

    /// Items with an unknown opening span fit every bucket.
    pub fn matches(&self, open_time: Option<&str>, close_time: Option<&str>) -> bool {
        match open_span_hours(open_time, close_time) {
            Some(hours) => DurationBucket::for_hours(hours) == *self,
            None => true,
        }
    }
}

fn hour_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*(\d{1,2})(?::(\d{2}))?").expect("valid hour regex"))
}

/// Leading hour of an `HH:MM[:SS]` string.
pub fn parse_hour(raw: &str) -> Option<u32> {
    let captures = hour_pattern().captures(raw)?;
    let hour: u32 = captures.get(1)?.as_str().parse().ok()?;
    (hour <= 24).then_some(hour)
}

/// `close - open` in whole hours, wrapping overnight ranges by a day.
pub fn open_span_hours(open_time: Option<&str>, close_time: Option<&str>) -> Option<u32> {
    let open = parse_hour(open_time?)? as i32;
    let close = parse_hour(close_time?)? as i32;
    let mut span = close - open;
    if span < 0 {
        span += 24;
    }
    Some(span as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popularity {
    Trending,
    New,
    Popular,
}

impl FromStr for Popularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "trending" => Ok(Popularity::Trending),
            "new" => Ok(Popularity::New),
            "popular" => Ok(Popularity::Popular),
            other => Err(other.to_string()),
        }
    }
}

pub const TRENDING_MIN_RATING: f64 = 4.0;
pub const TRENDING_MIN_COUNT: u32 = 5;
pub const POPULAR_MIN_COUNT: u32 = 10;
pub const NEW_WINDOW_MONTHS: u32 = 3;

impl Popularity {
    pub fn matches<T: Refinable>(&self, item: &T, now: DateTime<Utc>) -> bool {
        match self {
            Popularity::Trending => {
                item.rating().unwrap_or(0.0) >= TRENDING_MIN_RATING
                    && item.rating_count() >= TRENDING_MIN_COUNT
            }
            Popularity::New => {
                let cutoff = now
                    .checked_sub_months(Months::new(NEW_WINDOW_MONTHS))
                    .unwrap_or(now);
                item.created_at().is_some_and(|created| created >= cutoff)
            }
            Popularity::Popular => item.rating_count() >= POPULAR_MIN_COUNT,
        }
    }

    fn sort<T: Refinable>(&self, items: &mut [T]) {
        match self {
            Popularity::Trending => items.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
            Popularity::Popular => items.sort_by(|a, b| b.rating_count().cmp(&a.rating_count())),
            Popularity::New => {}
        }
    }
}

/// Case-insensitive substring match over every search field.
pub fn text_matches<T: Refinable>(item: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Client-side criteria pulled out of the filter state.
#[derive(Debug, Clone, Default)]
pub struct RefineCriteria {
    pub season: Option<Season>,
    pub duration: Option<DurationBucket>,
    pub popularity: Option<Popularity>,
    pub category: Option<String>,
    pub text: Option<String>,
    /// Only applied when the domain paginates locally.
    pub sort: Option<SortSpec>,
}

impl RefineCriteria {
    /// Unrecognised values are treated as "no filter".
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            season: criteria.text("season").and_then(|s| s.parse().ok()),
            duration: criteria.text("duration").and_then(|s| s.parse().ok()),
            popularity: criteria.text("popularity").and_then(|s| s.parse().ok()),
            category: criteria
                .text("service_type")
                .or_else(|| criteria.text("category"))
                .map(str::to_string),
            text: None,
            sort: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.season.is_none()
            && self.duration.is_none()
            && self.popularity.is_none()
            && self.category.is_none()
            && self.text.as_deref().map_or(true, |t| t.trim().is_empty())
            && self.sort.is_none()
    }
}

pub fn refine<T: Refinable + Clone>(items: &[T], criteria: &RefineCriteria, now: DateTime<Utc>) -> Vec<T> {
    let mut refined: Vec<T> = items
        .iter()
        .filter(|item| {
            criteria
                .season
                .map_or(true, |season| season.matches(item.best_time_to_visit()))
        })
        .filter(|item| {
            let (open, close) = item.opening_hours();
            criteria
                .duration
                .map_or(true, |bucket| bucket.matches(open, close))
        })
        .filter(|item| {
            criteria
                .popularity
                .map_or(true, |popularity| popularity.matches(*item, now))
        })
        .filter(|item| {
            criteria.category.as_deref().map_or(true, |wanted| {
                item.category()
                    .is_some_and(|category| category.eq_ignore_ascii_case(wanted))
            })
        })
        .filter(|item| {
            criteria
                .text
                .as_deref()
                .map_or(true, |query| text_matches(*item, query))
        })
        .cloned()
        .collect();

    if let Some(sort) = criteria.sort {
        sort_items(&mut refined, sort);
    }
    // Popularity ordering wins over the plain sort key
    if let Some(popularity) = criteria.popularity {
        popularity.sort(&mut refined);
    }
    refined
}

fn cmp_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Local ordering for client-paginated listings. Stable, missing values first
/// on ascending keys.
pub fn sort_items<T: Refinable>(items: &mut [T], sort: SortSpec) {
    match sort {
        SortSpec::PriceAsc => items.sort_by(|a, b| cmp_f64(a.price(), b.price())),
        SortSpec::PriceDesc => items.sort_by(|a, b| cmp_f64(b.price(), a.price())),
        SortSpec::RatingDesc => items.sort_by(|a, b| cmp_f64(b.rating(), a.rating())),
        SortSpec::DiscountDesc => items.sort_by(|a, b| cmp_f64(b.discount(), a.discount())),
        SortSpec::Newest => items.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        SortSpec::Popular => items.sort_by(|a, b| b.rating_count().cmp(&a.rating_count())),
        SortSpec::NameAsc => items.sort_by(|a, b| a.name().to_lowercase().cmp(&b.name().to_lowercase())),
        SortSpec::DepartureAsc | SortSpec::DurationAsc => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Clone, Default)]
    struct Place {
        name: String,
        location: String,
        best_time: Option<String>,
        open: Option<String>,
        close: Option<String>,
        rating: Option<f64>,
        rating_count: u32,
        created_at: Option<DateTime<Utc>>,
    }

    impl Refinable for Place {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name.as_str(), self.location.as_str()]
        }
        fn best_time_to_visit(&self) -> Option<&str> {
            self.best_time.as_deref()
        }
        fn opening_hours(&self) -> (Option<&str>, Option<&str>) {
            (self.open.as_deref(), self.close.as_deref())
        }
        fn rating(&self) -> Option<f64> {
            self.rating
        }
        fn rating_count(&self) -> u32 {
            self.rating_count
        }
        fn created_at(&self) -> Option<DateTime<Utc>> {
            self.created_at
        }
    }

    fn hours(open: &str, close: &str) -> Place {
        Place {
            open: Some(open.into()),
            close: Some(close.into()),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_duration_bucket_boundaries() {
        assert_eq!(DurationBucket::for_hours(2), DurationBucket::Short);
        assert_eq!(DurationBucket::for_hours(3), DurationBucket::HalfDay);
        assert_eq!(DurationBucket::for_hours(5), DurationBucket::HalfDay);
        assert_eq!(DurationBucket::for_hours(6), DurationBucket::FullDay);
        assert_eq!(DurationBucket::for_hours(11), DurationBucket::FullDay);
        assert_eq!(DurationBucket::for_hours(12), DurationBucket::Extended);
    }

    #[test]
    fn test_six_hour_span_is_not_half_day() {
        let place = hours("08:00", "14:00");
        let half_day: DurationBucket = "3-6".parse().unwrap();
        let full_day: DurationBucket = "6-12".parse().unwrap();
        assert!(!half_day.matches(place.open.as_deref(), place.close.as_deref()));
        assert!(full_day.matches(place.open.as_deref(), place.close.as_deref()));
    }

    #[test]
    fn test_overnight_span_wraps() {
        assert_eq!(open_span_hours(Some("18:00"), Some("02:00")), Some(8));
        assert_eq!(open_span_hours(Some("00:00"), Some("23:59")), Some(23));
        assert_eq!(open_span_hours(Some("07:30:00"), Some("10:00:00")), Some(3));
    }

    #[test]
    fn test_missing_hours_match_every_bucket() {
        let place = Place {
            open: Some("08:00".into()),
            ..Default::default()
        };
        for bucket in ["0-3", "3-6", "6-12", "12+"] {
            let bucket: DurationBucket = bucket.parse().unwrap();
            assert!(bucket.matches(place.open.as_deref(), None));
            assert!(bucket.matches(Some("cả ngày"), Some("tối")));
        }
    }

    #[test]
    fn test_missing_best_time_matches_every_season() {
        for season in [Season::Spring, Season::Summer, Season::Autumn, Season::Winter] {
            assert!(season.matches(None));
            assert!(season.matches(Some("  ")));
        }
    }

    #[test]
    fn test_season_tokens() {
        assert!(Season::Autumn.matches(Some("Tháng 9 đến tháng 11")));
        assert!(Season::Summer.matches(Some("Mùa hè")));
        assert!(Season::Winter.matches(Some("Winter, when it snows")));
        assert!(!Season::Summer.matches(Some("Mùa thu")));
        // substring matching: "1" hits "10"
        assert!(Season::Spring.matches(Some("tháng 10")));
    }

    #[test]
    fn test_text_search_matches_any_field() {
        let hanoi = Place {
            name: "Phố cổ".into(),
            location: "Hà Nội, Việt Nam".into(),
            ..Default::default()
        };
        let danang = Place {
            name: "Cầu Rồng".into(),
            location: "Đà Nẵng".into(),
            ..Default::default()
        };
        let criteria = RefineCriteria {
            text: Some("Hà Nội".into()),
            ..Default::default()
        };
        let refined = refine(&[hanoi, danang], &criteria, now());
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].location, "Hà Nội, Việt Nam");

        let lower = Place {
            name: "HỒ GƯƠM".into(),
            ..Default::default()
        };
        assert!(text_matches(&lower, "hồ gươm"));
    }

    #[test]
    fn test_trending_requires_rating_and_count_sorted_by_newest() {
        let older = Place {
            name: "older".into(),
            rating: Some(4.5),
            rating_count: 8,
            created_at: Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let newer = Place {
            name: "newer".into(),
            rating: Some(4.0),
            rating_count: 5,
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let too_few = Place {
            rating: Some(5.0),
            rating_count: 4,
            ..Default::default()
        };
        let low = Place {
            rating: Some(3.9),
            rating_count: 100,
            ..Default::default()
        };
        let criteria = RefineCriteria {
            popularity: Some(Popularity::Trending),
            ..Default::default()
        };
        let refined = refine(&[older, too_few, newer, low], &criteria, now());
        let names: Vec<&str> = refined.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["newer", "older"]);
    }

    #[test]
    fn test_new_means_within_three_months() {
        let recent = Place {
            name: "recent".into(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let stale = Place {
            name: "stale".into(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let undated = Place::default();
        let criteria = RefineCriteria {
            popularity: Some(Popularity::New),
            ..Default::default()
        };
        let refined = refine(&[recent, stale, undated], &criteria, now());
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].name, "recent");
    }

    #[test]
    fn test_popular_sorted_by_rating_count() {
        let items: Vec<Place> = [12, 9, 40, 10]
            .iter()
            .map(|count| Place {
                rating_count: *count,
                ..Default::default()
            })
            .collect();
        let criteria = RefineCriteria {
            popularity: Some(Popularity::Popular),
            ..Default::default()
        };
        let counts: Vec<u32> = refine(&items, &criteria, now())
            .iter()
            .map(|p| p.rating_count)
            .collect();
        assert_eq!(counts, vec![40, 12, 10]);
    }

    #[test]
    fn test_empty_criteria_keeps_everything_in_order() {
        let items = vec![
            Place {
                name: "b".into(),
                ..Default::default()
            },
            Place {
                name: "a".into(),
                ..Default::default()
            },
        ];
        let criteria = RefineCriteria::default();
        assert!(criteria.is_empty());
        let refined = refine(&items, &criteria, now());
        assert_eq!(refined[0].name, "b");
    }
}
