use serde::{Deserialize, Serialize};

use super::search::SortSpec;

/// The five browsable listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Tours,
    Hotels,
    Transport,
    Destinations,
    Promotions,
}

impl Domain {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "tours" => Some(Domain::Tours),
            "hotels" => Some(Domain::Hotels),
            "transport" => Some(Domain::Transport),
            "destinations" => Some(Domain::Destinations),
            "promotions" => Some(Domain::Promotions),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Tours => "tours",
            Domain::Hotels => "hotels",
            Domain::Transport => "transport",
            Domain::Destinations => "destinations",
            Domain::Promotions => "promotions",
        }
    }

    pub fn spec(&self) -> &'static DomainSpec {
        match self {
            Domain::Tours => &TOURS,
            Domain::Hotels => &HOTELS,
            Domain::Transport => &TRANSPORT,
            Domain::Destinations => &DESTINATIONS,
            Domain::Promotions => &PROMOTIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// Each page is its own request; totals come from the response.
    Server,
    /// Everything is fetched once and sliced locally.
    Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    /// Multi-select; serialised comma-joined.
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    /// Sent to the backend as a query parameter.
    Server,
    /// Evaluated by the refiner on fetched rows.
    Client,
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub scope: FilterScope,
    /// Value an unset field contributes before the user ever touched it.
    pub default: Option<&'static str>,
}

const fn server(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Scalar,
        scope: FilterScope::Server,
        default: None,
    }
}

/// Server field that loads pre-filtered until the user picks a value.
const fn server_default(name: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Scalar,
        scope: FilterScope::Server,
        default: Some(default),
    }
}

const fn client(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Scalar,
        scope: FilterScope::Client,
        default: None,
    }
}

const fn server_set(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Set,
        scope: FilterScope::Server,
        default: None,
    }
}

#[derive(Debug)]
pub struct SuggestSpec {
    pub path: &'static str,
    /// Characters required before a suggestion request is worth making.
    pub min_chars: usize,
    /// Extra endpoint for entity-name suggestions (e.g. tour names).
    pub names_path: Option<&'static str>,
}

/// Fetches compatible counterparts once one side of a from/to pair is chosen.
#[derive(Debug)]
pub struct NarrowingSpec {
    pub field: &'static str,
    pub opposite: &'static str,
    pub path: &'static str,
    pub param: &'static str,
}

#[derive(Debug)]
pub struct OptionSource {
    pub key: &'static str,
    pub path: &'static str,
}

/// Everything the generic controller needs to know about one listing.
#[derive(Debug)]
pub struct DomainSpec {
    pub domain: Domain,
    pub path: &'static str,
    pub fallback_path: Option<&'static str>,
    pub items_key: &'static str,
    pub pagination: PaginationMode,
    pub default_limit: u32,
    pub fields: &'static [FieldSpec],
    /// Query parameter the free-text search travels in.
    pub text_param: &'static str,
    pub text_scope: FilterScope,
    pub location_fields: &'static [&'static str],
    pub sorts: &'static [SortSpec],
    pub default_sort: Option<SortSpec>,
    pub suggest: Option<SuggestSpec>,
    pub narrowing: &'static [NarrowingSpec],
    pub options: &'static [OptionSource],
}

impl DomainSpec {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_location_field(&self, name: &str) -> bool {
        self.location_fields.contains(&name)
    }

    pub fn allows_sort(&self, sort: SortSpec) -> bool {
        self.sorts.contains(&sort)
    }
}

pub static TOURS: DomainSpec = DomainSpec {
    domain: Domain::Tours,
    path: "tours",
    fallback_path: None,
    items_key: "tours",
    pagination: PaginationMode::Server,
    default_limit: 9,
    fields: &[
        server("region"),
        server("type"),
        server("price_range"),
        server("rating"),
        server("duration"),
        server("start_date"),
        client("season"),
        client("popularity"),
    ],
    text_param: "search",
    text_scope: FilterScope::Server,
    location_fields: &["destination"],
    sorts: &[
        SortSpec::Newest,
        SortSpec::PriceAsc,
        SortSpec::PriceDesc,
        SortSpec::RatingDesc,
        SortSpec::Popular,
    ],
    default_sort: Some(SortSpec::Newest),
    suggest: Some(SuggestSpec {
        path: "tours/locations/suggest",
        min_chars: 2,
        names_path: Some("tours/suggestions"),
    }),
    narrowing: &[],
    options: &[
        OptionSource {
            key: "available_dates",
            path: "tours/available-dates",
        },
        OptionSource {
            key: "available_types",
            path: "tours/available-types",
        },
    ],
};

pub static HOTELS: DomainSpec = DomainSpec {
    domain: Domain::Hotels,
    path: "hotels",
    fallback_path: None,
    items_key: "hotels",
    pagination: PaginationMode::Server,
    default_limit: 12,
    fields: &[
        server("star_rating"),
        server("price_range"),
        server("hotel_type"),
        server_set("hotel_amenities"),
    ],
    text_param: "search",
    text_scope: FilterScope::Server,
    location_fields: &["location"],
    sorts: &[
        SortSpec::RatingDesc,
        SortSpec::PriceAsc,
        SortSpec::PriceDesc,
        SortSpec::NameAsc,
    ],
    default_sort: Some(SortSpec::RatingDesc),
    suggest: Some(SuggestSpec {
        path: "hotels/locations/suggest",
        min_chars: 1,
        names_path: None,
    }),
    narrowing: &[],
    options: &[],
};

pub static TRANSPORT: DomainSpec = DomainSpec {
    domain: Domain::Transport,
    path: "transport",
    fallback_path: None,
    items_key: "transports",
    pagination: PaginationMode::Server,
    default_limit: 10,
    fields: &[
        server("vehicle_type"),
        server("vehicle_name"),
        server("company"),
        server("departure_date"),
        server("departure_time"),
        server("price_range"),
    ],
    text_param: "search",
    text_scope: FilterScope::Server,
    location_fields: &["from_location", "to_location"],
    sorts: &[
        SortSpec::DepartureAsc,
        SortSpec::PriceAsc,
        SortSpec::PriceDesc,
        SortSpec::DurationAsc,
    ],
    default_sort: Some(SortSpec::DepartureAsc),
    suggest: Some(SuggestSpec {
        path: "transport/locations/suggest",
        min_chars: 2,
        names_path: None,
    }),
    narrowing: &[
        NarrowingSpec {
            field: "from_location",
            opposite: "to_location",
            path: "transport/destinations/from",
            param: "from",
        },
        NarrowingSpec {
            field: "to_location",
            opposite: "from_location",
            path: "transport/origins/to",
            param: "to",
        },
    ],
    options: &[
        OptionSource {
            key: "available_dates",
            path: "transport/available-dates",
        },
        OptionSource {
            key: "available_times",
            path: "transport/available-times",
        },
        OptionSource {
            key: "vehicle_names",
            path: "transport/vehicle-names",
        },
        OptionSource {
            key: "companies",
            path: "transport/companies",
        },
    ],
};

pub static DESTINATIONS: DomainSpec = DomainSpec {
    domain: Domain::Destinations,
    path: "destinations",
    fallback_path: None,
    items_key: "destinations",
    pagination: PaginationMode::Client,
    default_limit: 9,
    fields: &[
        server("region"),
        client("season"),
        client("duration"),
        client("popularity"),
    ],
    text_param: "search",
    text_scope: FilterScope::Client,
    location_fields: &[],
    sorts: &[],
    default_sort: None,
    suggest: None,
    narrowing: &[],
    options: &[],
};

pub static PROMOTIONS: DomainSpec = DomainSpec {
    domain: Domain::Promotions,
    path: "promotions/global",
    fallback_path: Some("promotions/services"),
    items_key: "services",
    pagination: PaginationMode::Client,
    default_limit: 8,
    // Expired deals stay hidden until the user asks for "all".
    fields: &[server_default("status", "active"), client("service_type")],
    text_param: "search",
    text_scope: FilterScope::Client,
    location_fields: &[],
    sorts: &[SortSpec::DiscountDesc, SortSpec::PriceAsc],
    default_sort: Some(SortSpec::DiscountDesc),
    suggest: None,
    narrowing: &[],
    options: &[],
};
