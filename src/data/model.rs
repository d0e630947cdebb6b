// Source records for page generation
//
// Locations, services and vehicles as supplied by the surrounding
// application. Field names serialize as camelCase to match the data files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative tier of a location, from state level down to district
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationType {
    Bundesland,
    Regierungsbezirk,
    Landkreis,
    KreisfreieStadt,
    Gemeinde,
    Stadtbezirk,
    Stadtteil,
}

impl LocationType {
    /// All tiers, outermost first
    pub const ALL: [LocationType; 7] = [
        LocationType::Bundesland,
        LocationType::Regierungsbezirk,
        LocationType::Landkreis,
        LocationType::KreisfreieStadt,
        LocationType::Gemeinde,
        LocationType::Stadtbezirk,
        LocationType::Stadtteil,
    ];

    /// The identifier used in data files
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Bundesland => "bundesland",
            LocationType::Regierungsbezirk => "regierungsbezirk",
            LocationType::Landkreis => "landkreis",
            LocationType::KreisfreieStadt => "kreisfreie-stadt",
            LocationType::Gemeinde => "gemeinde",
            LocationType::Stadtbezirk => "stadtbezirk",
            LocationType::Stadtteil => "stadtteil",
        }
    }

    /// Human readable German label
    pub fn label(&self) -> &'static str {
        match self {
            LocationType::Bundesland => "Bundesland",
            LocationType::Regierungsbezirk => "Regierungsbezirk",
            LocationType::Landkreis => "Landkreis",
            LocationType::KreisfreieStadt => "Kreisfreie Stadt",
            LocationType::Gemeinde => "Gemeinde",
            LocationType::Stadtbezirk => "Stadtbezirk",
            LocationType::Stadtteil => "Stadtteil",
        }
    }

    /// Parse the data-file identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WGS84 coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in kilometres (haversine)
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

/// Traffic volume around a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLevel {
    Low,
    Medium,
    High,
}

/// Optional attributes that unlock additional copy for a location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationEnrichment {
    pub landmarks: Vec<String>,
    pub nearby_highways: Vec<String>,
    pub traffic_level: Option<TrafficLevel>,
    pub industrial: bool,
    pub university: bool,
}

/// A piece of enrichment that is actually present
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Capability<'a> {
    Landmarks(&'a [String]),
    Highways(&'a [String]),
    Traffic(TrafficLevel),
    Industrial,
    University,
}

impl LocationEnrichment {
    /// Present capabilities in a fixed order
    pub fn capabilities(&self) -> Vec<Capability<'_>> {
        let mut caps = Vec::new();
        if !self.landmarks.is_empty() {
            caps.push(Capability::Landmarks(&self.landmarks));
        }
        if !self.nearby_highways.is_empty() {
            caps.push(Capability::Highways(&self.nearby_highways));
        }
        if let Some(level) = self.traffic_level {
            caps.push(Capability::Traffic(level));
        }
        if self.industrial {
            caps.push(Capability::Industrial);
        }
        if self.university {
            caps.push(Capability::University);
        }
        caps
    }
}

/// A node in the administrative hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Globally unique identifier, also the URL fragment
    pub slug: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LocationType,
    pub parent_slug: Option<String>,
    /// Importance score 1-10
    pub priority: u8,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub postal_codes: Vec<String>,
    #[serde(default)]
    pub enrichment: Option<LocationEnrichment>,
}

impl Location {
    /// Create a location with default priority and no optional data
    pub fn new(slug: &str, name: &str, kind: LocationType, parent_slug: Option<&str>) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            kind,
            parent_slug: parent_slug.map(str::to_string),
            priority: 5,
            coordinates: None,
            population: None,
            postal_codes: Vec::new(),
            enrichment: None,
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(GeoPoint::new(lat, lng));
        self
    }

    pub fn with_enrichment(mut self, enrichment: LocationEnrichment) -> Self {
        self.enrichment = Some(enrichment);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_slug.is_none()
    }

    /// Enrichment capabilities, empty when the record has none
    pub fn capabilities(&self) -> Vec<Capability<'_>> {
        self.enrichment
            .as_ref()
            .map(LocationEnrichment::capabilities)
            .unwrap_or_default()
    }
}

/// A service offered at every location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub slug: String,
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub description: String,
    /// Alternative phrasings, also used as anchor-text synonyms
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub insurance_covered: bool,
    /// Main services get a page per qualifying location
    #[serde(default)]
    pub main: bool,
}

impl Service {
    pub fn new(slug: &str, name: &str, main: bool) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            short_name: name.to_string(),
            description: String::new(),
            keywords: Vec::new(),
            duration: None,
            price_range: None,
            insurance_covered: false,
            main,
        }
    }

    /// Name plus short name plus keywords, deduplicated, in that order
    pub fn synonyms(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for candidate in std::iter::once(self.name.as_str())
            .chain(std::iter::once(self.short_name.as_str()))
            .chain(self.keywords.iter().map(String::as_str))
        {
            if !candidate.is_empty() && !out.contains(&candidate) {
                out.push(candidate);
            }
        }
        out
    }
}

/// A vehicle manufacturer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleBrand {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub country: String,
}

impl VehicleBrand {
    pub fn new(slug: &str, name: &str, country: &str) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            country: country.to_string(),
        }
    }
}

/// Glass-relevant equipment of a vehicle model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VehicleDetails {
    pub adas_camera: bool,
    pub rain_sensor: bool,
    pub heads_up_display: bool,
}

/// A model of a vehicle brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleModel {
    pub slug: String,
    pub name: String,
    pub brand_slug: String,
    #[serde(default)]
    pub year_from: Option<u16>,
    #[serde(default)]
    pub year_to: Option<u16>,
    /// Only popular models get a page
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub details: Option<VehicleDetails>,
}

impl VehicleModel {
    pub fn new(slug: &str, name: &str, brand_slug: &str, popular: bool) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            brand_slug: brand_slug.to_string(),
            year_from: None,
            year_to: None,
            popular,
            details: None,
        }
    }

    /// "2012-2019", "seit 2020" or empty
    pub fn year_range(&self) -> String {
        match (self.year_from, self.year_to) {
            (Some(from), Some(to)) => format!("{}-{}", from, to),
            (Some(from), None) => format!("seit {}", from),
            (None, Some(to)) => format!("bis {}", to),
            (None, None) => String::new(),
        }
    }
}

/// The three source stores handed to the build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSet {
    pub locations: Vec<Location>,
    pub services: Vec<Service>,
    pub brands: Vec<VehicleBrand>,
    pub models: Vec<VehicleModel>,
}
