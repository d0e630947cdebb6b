// Page copy
//
// Assembles varied text for a resolved page. Every slot draws from its pool
// with a seed of `{page slug}-{slot}`, so a page keeps its wording across
// builds while neighbouring pages read differently. Optional sentences are
// driven by the capabilities a record actually has.

use crate::content::pools::*;
use crate::content::variation::{substitute, PageSeed};
use crate::data::{Capability, Location, TrafficLevel, VehicleBrand, VehicleDetails, VehicleModel};
use crate::graph::LocationGraph;
use crate::index::router::ResolvedPage;
use serde::Serialize;

/// Number of FAQ entries per page
pub const FAQ_PER_PAGE: usize = 3;

/// A question with its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Generated text for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCopy {
    pub headline: String,
    pub intro: String,
    pub details: Vec<String>,
    pub faq: Vec<FaqEntry>,
    pub call_to_action: String,
}

/// Composes page copy from resolved entities
pub struct ProseGenerator<'a> {
    locations: &'a LocationGraph,
}

impl<'a> ProseGenerator<'a> {
    pub fn new(locations: &'a LocationGraph) -> Self {
        Self { locations }
    }

    pub fn compose(&self, page: &ResolvedPage<'_>) -> PageCopy {
        let seed = PageSeed::new(page.target().slug());
        match *page {
            ResolvedPage::Location { location } => self.location_copy(&seed, location),
            ResolvedPage::ServiceLocation { service, location } => {
                let region = self.region_name(location);
                let values = [
                    ("service", service.name.as_str()),
                    ("city", location.name.as_str()),
                    ("region", region),
                ];
                PageCopy {
                    headline: substitute(*seed.pick(SERVICE_HEADLINES, "headline"), &values),
                    intro: substitute(*seed.pick(SERVICE_INTROS, "intro"), &values),
                    details: capability_sentences(&seed, location),
                    faq: faq(&seed, &values),
                    call_to_action: substitute(*seed.pick(CALLS_TO_ACTION, "cta"), &values),
                }
            }
            ResolvedPage::Vehicle { brand, model } => vehicle_copy(&seed, brand, model),
        }
    }

    fn location_copy(&self, seed: &PageSeed, location: &Location) -> PageCopy {
        let region = self.region_name(location);
        let values = [
            ("service", "Autoglas-Service"),
            ("city", location.name.as_str()),
            ("region", region),
        ];
        PageCopy {
            headline: substitute(*seed.pick(LOCATION_HEADLINES, "headline"), &values),
            intro: substitute(*seed.pick(LOCATION_INTROS, "intro"), &values),
            details: capability_sentences(seed, location),
            faq: faq(seed, &values),
            call_to_action: substitute(*seed.pick(CALLS_TO_ACTION, "cta"), &values),
        }
    }

    /// Name of the closest ancestor, or the location's own name at the root
    fn region_name<'l>(&self, location: &'l Location) -> &'l str
    where
        'a: 'l,
    {
        self.locations
            .ancestors(&location.slug)
            .pop()
            .map(|parent| parent.name.as_str())
            .unwrap_or(location.name.as_str())
    }
}

fn faq(seed: &PageSeed, values: &[(&str, &str)]) -> Vec<FaqEntry> {
    seed.pick_distinct(FAQ, "faq", FAQ_PER_PAGE)
        .into_iter()
        .map(|(question, answer)| FaqEntry {
            question: substitute(question, values),
            answer: substitute(answer, values),
        })
        .collect()
}

fn capability_sentences(seed: &PageSeed, location: &Location) -> Vec<String> {
    let city = [("city", location.name.as_str())];
    location
        .capabilities()
        .into_iter()
        .map(|capability| match capability {
            Capability::Landmarks(landmarks) => {
                let landmark = seed.pick(landmarks, "landmark");
                substitute(
                    *seed.pick(LANDMARK_SENTENCES, "landmark-text"),
                    &[("landmark", landmark.as_str()), ("city", location.name.as_str())],
                )
            }
            Capability::Highways(highways) => {
                let highway = seed.pick(highways, "highway");
                substitute(
                    *seed.pick(HIGHWAY_SENTENCES, "highway-text"),
                    &[("highway", highway.as_str()), ("city", location.name.as_str())],
                )
            }
            Capability::Traffic(level) => {
                let pool = match level {
                    TrafficLevel::High => TRAFFIC_HIGH_SENTENCES,
                    TrafficLevel::Medium => TRAFFIC_MEDIUM_SENTENCES,
                    TrafficLevel::Low => TRAFFIC_LOW_SENTENCES,
                };
                substitute(*seed.pick(pool, "traffic"), &city)
            }
            Capability::Industrial => substitute(*seed.pick(INDUSTRIAL_SENTENCES, "industrial"), &city),
            Capability::University => substitute(*seed.pick(UNIVERSITY_SENTENCES, "university"), &city),
        })
        .collect()
}

fn vehicle_copy(seed: &PageSeed, brand: &VehicleBrand, model: &VehicleModel) -> PageCopy {
    let years = model.year_range();
    let years = if years.is_empty() { "alle Baujahre".to_string() } else { years };
    let values = [
        ("brand", brand.name.as_str()),
        ("model", model.name.as_str()),
        ("years", years.as_str()),
        ("service", "Scheibenwechsel"),
        ("city", "Ihrer Nähe"),
        ("region", "Ihrer Region"),
    ];

    let mut details = Vec::new();
    if let Some(VehicleDetails {
        adas_camera,
        rain_sensor,
        heads_up_display,
    }) = &model.details
    {
        if *adas_camera {
            details.push(substitute(*seed.pick(ADAS_SENTENCES, "adas"), &values));
        }
        if *rain_sensor {
            details.push(substitute(*seed.pick(RAIN_SENSOR_SENTENCES, "rain"), &values));
        }
        if *heads_up_display {
            details.push(substitute(*seed.pick(HUD_SENTENCES, "hud"), &values));
        }
    }

    PageCopy {
        headline: substitute(*seed.pick(VEHICLE_HEADLINES, "headline"), &values),
        intro: substitute(*seed.pick(VEHICLE_INTROS, "intro"), &values),
        details,
        faq: faq(seed, &values),
        call_to_action: substitute(*seed.pick(CALLS_TO_ACTION, "cta"), &values),
    }
}
