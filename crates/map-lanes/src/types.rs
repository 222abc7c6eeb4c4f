//! `LaneType`, `Material`, and `RoadCategory`: free-form external strings
//! reconciled against closed, fallback-carrying dictionaries.

/// A lane's traffic type, parsed from a `BorderFeed` record's free-form
/// `linetype` string.
///
/// Non-exhaustive: new variants may be added without breaking callers that
/// already match on `Other(_)` as a catch-all, the same shape
/// `dt_core::TransportMode` uses.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LaneType {
    Driving,
    Parking,
    Restricted,
    Sidewalk,
    Shoulder,
    Bus,
    Biking,
    Tram,
    /// Anything that doesn't match a known type. Falls back to the `none`
    /// speed-limit row (2.0 m/s) in `set_type`.
    Other(String),
}

impl LaneType {
    /// Parse a free-form type string, normalizing the known external
    /// aliases (`walking` → `sidewalk`, `Bicycle` → `biking`) case-
    /// insensitively. Anything else becomes `Other(original string)`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "driving" => Self::Driving,
            "parking" => Self::Parking,
            "restricted" => Self::Restricted,
            "sidewalk" | "walking" => Self::Sidewalk,
            "shoulder" => Self::Shoulder,
            "bus" => Self::Bus,
            "biking" | "bicycle" => Self::Biking,
            "tram" => Self::Tram,
            _ => Self::Other(raw.to_string()),
        }
    }

    fn table_key(&self) -> &str {
        match self {
            Self::Driving => "driving",
            Self::Parking => "parking",
            Self::Restricted => "restricted",
            Self::Sidewalk => "sidewalk",
            Self::Shoulder => "shoulder",
            Self::Bus => "bus",
            Self::Biking => "biking",
            Self::Tram => "tram",
            Self::Other(_) => "none",
        }
    }
}

/// A lane surface material, parsed from a `BorderFeed` lane-border record.
/// Unknown materials fall back to `Asphalt`.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Asphalt,
    Concrete,
    Pavement,
    Cobble,
    Vegetation,
    Soil,
    Gravel,
}

impl Material {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "concrete" => Self::Concrete,
            "pavement" => Self::Pavement,
            "cobble" => Self::Cobble,
            "vegetation" => Self::Vegetation,
            "soil" => Self::Soil,
            "gravel" => Self::Gravel,
            _ => Self::Asphalt,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::Asphalt
    }
}

/// A road's category, as found on its reference-line record.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadCategory {
    Unknown,
    Rural,
    Motorway,
    Town,
    LowSpeed,
    Pedestrian,
    Bicycle,
}

impl RoadCategory {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "rural" => Self::Rural,
            "motorway" => Self::Motorway,
            "town" => Self::Town,
            "low_speed" => Self::LowSpeed,
            "pedestrian" => Self::Pedestrian,
            "bicycle" => Self::Bicycle,
            _ => Self::Unknown,
        }
    }

    /// The speed-limit table's row key for this category: `rural`,
    /// `motorway`, `town`, `low_speed`, or `other` for anything else
    /// (`unknown`, `pedestrian`, `bicycle`).
    fn table_key(&self) -> &'static str {
        match self {
            Self::Rural => "rural",
            Self::Motorway => "motorway",
            Self::Town => "town",
            Self::LowSpeed => "low_speed",
            Self::Unknown | Self::Pedestrian | Self::Bicycle => "other",
        }
    }
}

/// `(lane_type_key, road_category_key, limit_mps)`. `road_category_key`
/// `"any"` matches every category. Values are `km/h × 0.27778`, taken
/// directly from the external speed-limit table rather than re-derived from
/// rounded km/h figures. Scanned linearly by [`speed_limit_mps`]; three
/// independent axes (lane type, road category, fallback) don't compress
/// into a single match arm as cleanly as a one-axis tag lookup would.
const SPEED_LIMIT_TABLE_MPS: &[(&str, &str, f32)] = &[
    ("driving", "rural", 27.78),
    ("driving", "motorway", 36.11),
    ("driving", "town", 13.89),
    ("driving", "low_speed", 8.33),
    ("driving", "other", 27.78),
    ("parking", "any", 1.39),
    ("restricted", "any", 2.78),
    ("sidewalk", "any", 1.39),
    ("shoulder", "any", 1.39),
    ("bus", "any", 1.39),
    ("biking", "any", 6.94),
    ("tram", "any", 13.89),
    ("none", "any", 2.00),
];

/// Derive the speed limit (m/s) for a `(lane_type, road_category)` pair from
/// the fixed table, falling back to the `none`/`any` row (2.0 m/s) when
/// nothing matches.
pub(crate) fn speed_limit_mps(lane_type: &LaneType, road_category: RoadCategory) -> f64 {
    let type_key = lane_type.table_key();
    let category_key = road_category.table_key();

    for &(t, c, limit) in SPEED_LIMIT_TABLE_MPS {
        if t == type_key && (c == category_key || c == "any") {
            return limit as f64;
        }
    }
    SPEED_LIMIT_TABLE_MPS.last().unwrap().2 as f64
}
