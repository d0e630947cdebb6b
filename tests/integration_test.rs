// Integration tests for seo-atlas

use seo_atlas::content::{pick, ProseGenerator};
use seo_atlas::data::LocationType;
use seo_atlas::index::generator::qualifies_for_service_pages;
use seo_atlas::index::{PageTarget, PageType, ResolvedPage, Violation};
use seo_atlas::links::LinkLimits;
use seo_atlas::output::SitemapWriter;
use seo_atlas::{Config, DataLoader, DataSet, Error, SharedSite, Site};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

// Helper to load the fixture data set with the default data layout
fn load_fixture_data() -> DataSet {
    let config = Config::default();
    let loader = DataLoader::new(&config.data).expect("Failed to create loader");
    loader.load(&fixtures_path("data")).expect("Failed to load fixtures")
}

fn build_fixture_site() -> Site {
    Site::build(load_fixture_data()).expect("Fixture site failed to build")
}

// ============================================================================
// Loading Tests
// ============================================================================

#[test]
fn test_load_fixture_data() {
    let data = load_fixture_data();

    assert_eq!(data.locations.len(), 12);
    assert_eq!(data.services.len(), 4);
    assert_eq!(data.brands.len(), 3);
    assert_eq!(data.models.len(), 6);

    // files are read in sorted path order
    assert_eq!(data.locations[0].slug, "berlin");
    assert_eq!(data.locations[3].slug, "oberbayern");
    assert_eq!(data.locations[8].slug, "berlin-mitte");
}

#[test]
fn test_load_missing_directory() {
    let config = Config::default();
    let loader = DataLoader::new(&config.data).unwrap();
    let result = loader.load(&fixtures_path("does-not-exist"));
    assert!(matches!(result, Err(Error::PathNotFound(_))));
}

#[test]
fn test_load_config_fixture() {
    let config = Config::load(&fixtures_path("seo-atlas.toml")).unwrap();
    assert_eq!(config.site.name, "Autoglas Test");
    assert_eq!(config.base_url(), "https://autoglas.test");
    assert_eq!(LinkLimits::from(&config.links).children, 3);
    assert_eq!(config.links.max_nearby, 6);
}

// ============================================================================
// Location Graph Tests
// ============================================================================

#[test]
fn test_scenario_ancestors_and_children() {
    let site = build_fixture_site();
    let graph = site.locations();

    let ancestors: Vec<&str> = graph
        .ancestors("berlin-mitte")
        .iter()
        .map(|l| l.slug.as_str())
        .collect();
    assert_eq!(ancestors, vec!["berlin"]);

    let children: Vec<&str> = graph.children("berlin").iter().map(|l| l.slug.as_str()).collect();
    assert!(children.contains(&"berlin-mitte"));
}

#[test]
fn test_every_parent_resolves_and_contains_child() {
    let site = build_fixture_site();
    let graph = site.locations();

    for location in graph.all() {
        if let Some(parent) = &location.parent_slug {
            assert!(graph.get(parent).is_some(), "dangling parent for {}", location.slug);
            assert!(graph
                .children(parent)
                .iter()
                .any(|child| child.slug == location.slug));
        }
    }
}

#[test]
fn test_ancestors_terminate_without_revisits() {
    let site = build_fixture_site();
    let graph = site.locations();

    for location in graph.all() {
        let ancestors = graph.ancestors(&location.slug);
        assert!(ancestors.len() <= 7);
        let unique: HashSet<&str> = ancestors.iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(unique.len(), ancestors.len());
        assert!(!unique.contains(location.slug.as_str()));
    }

    let chain: Vec<&str> = graph.ancestors("schwabing").iter().map(|l| l.slug.as_str()).collect();
    assert_eq!(chain, vec!["bayern", "oberbayern", "muenchen"]);
}

#[test]
fn test_siblings_share_parent() {
    let site = build_fixture_site();
    let graph = site.locations();

    for location in graph.all() {
        for sibling in graph.siblings(&location.slug, 100) {
            assert_ne!(sibling.slug, location.slug);
            assert_eq!(sibling.parent_slug, location.parent_slug);
        }
    }

    let siblings: Vec<&str> = graph
        .siblings("berlin-mitte", 10)
        .iter()
        .map(|l| l.slug.as_str())
        .collect();
    assert_eq!(siblings, vec!["berlin-spandau", "berlin-pankow"]);
}

#[test]
fn test_nearest_by_distance() {
    let site = build_fixture_site();
    let nearby: Vec<&str> = site
        .locations()
        .nearest("berlin-mitte", 3)
        .iter()
        .map(|l| l.slug.as_str())
        .collect();
    assert_eq!(nearby, vec!["berlin", "berlin-wedding", "berlin-pankow"]);

    // no coordinates, no neighbours
    assert!(site.locations().nearest("oberbayern", 3).is_empty());
}

#[test]
fn test_location_stats() {
    let site = build_fixture_site();
    let stats = site.locations().stats();
    assert_eq!(stats.total, 12);
    assert_eq!(stats.roots, 3);
    assert_eq!(stats.max_depth, 3);
    assert_eq!(stats.by_type.get(&LocationType::Bundesland), Some(&3));
}

// ============================================================================
// Page Index Tests
// ============================================================================

#[test]
fn test_scenario_low_priority_gemeinde_has_no_service_pages() {
    let site = build_fixture_site();
    let index = site.index();

    assert!(index.contains("autoglas-gauting"));
    assert!(!index.contains("scheibenwechsel-gauting"));
    assert!(!index
        .of_type(PageType::ServiceLocation)
        .iter()
        .any(|e| e.target.location_slug() == Some("gauting")));
}

#[test]
fn test_scenario_tier_sizes_match_naive_refilter() {
    let data = load_fixture_data();
    let site = Site::build(data.clone()).unwrap();
    let counts = site.index().count_by_type();

    let naive_locations = data.locations.len();
    let naive_main_services = data.services.iter().filter(|s| s.main).count();
    let naive_qualifying = data
        .locations
        .iter()
        .filter(|l| {
            matches!(l.kind, LocationType::Bundesland | LocationType::KreisfreieStadt) || l.priority >= 7
        })
        .count();
    let naive_vehicles = data.models.iter().filter(|m| m.popular).count();

    assert_eq!(counts.location, naive_locations);
    assert_eq!(counts.service_location, naive_main_services * naive_qualifying);
    assert_eq!(counts.vehicle, naive_vehicles);
    assert_eq!(site.index().len(), counts.total());

    assert_eq!((counts.location, counts.service_location, counts.vehicle), (12, 14, 4));
}

#[test]
fn test_qualification_rule_matches_index() {
    let site = build_fixture_site();
    for location in site.locations().all() {
        let slug = format!("scheibenwechsel-{}", location.slug);
        assert_eq!(
            site.index().contains(&slug),
            qualifies_for_service_pages(location),
            "{}",
            location.slug
        );
    }
}

#[test]
fn test_index_is_pure() {
    let first = build_fixture_site();
    let second = build_fixture_site();

    assert_eq!(first.index().entries(), second.index().entries());
    assert_eq!(first.index().fingerprint(), second.index().fingerprint());
    assert_eq!(first.paths(), second.paths());
}

#[test]
fn test_paths_are_unique_and_ordered() {
    let site = build_fixture_site();
    let paths = site.paths();

    let unique: HashSet<&str> = paths.iter().copied().collect();
    assert_eq!(unique.len(), paths.len());
    assert_eq!(paths.len(), 30);

    // location tier first, then service-major, then vehicles
    assert_eq!(paths[0], "autoglas-berlin");
    assert_eq!(paths[12], "scheibenwechsel-berlin");
    assert_eq!(paths[19], "steinschlag-reparatur-berlin");
    assert_eq!(paths[26], "scheibenwechsel-vw-golf");
}

#[test]
fn test_min_priority_filter() {
    let site = build_fixture_site();
    let index = site.index();

    assert_eq!(index.with_min_priority(1).len(), index.len());
    assert_eq!(index.with_min_priority(6).len(), 23);
    assert!(index.with_min_priority(6).iter().all(|e| e.priority >= 6));
}

// ============================================================================
// Routing Tests
// ============================================================================

#[test]
fn test_scenario_router() {
    let site = build_fixture_site();
    let router = site.router();

    assert_eq!(router.resolve("autoglas-berlin"), Some(PageTarget::location("berlin")));
    assert_eq!(
        router.resolve("scheibenwechsel-vw-golf"),
        Some(PageTarget::vehicle("vw", "golf"))
    );
    assert_eq!(
        router.resolve("scheibenwechsel-berlin"),
        Some(PageTarget::service_location("scheibenwechsel", "berlin"))
    );
}

#[test]
fn test_every_index_slug_round_trips() {
    let site = build_fixture_site();
    let router = site.router();

    for entry in site.index().iter() {
        let resolved = router
            .resolve(&entry.slug)
            .unwrap_or_else(|| panic!("{} did not resolve", entry.slug));
        assert_eq!(resolved, entry.target, "{}", entry.slug);
        assert_eq!(resolved.page_type(), entry.page_type);
    }
}

#[test]
fn test_router_not_found() {
    let site = build_fixture_site();
    let router = site.router();

    for slug in [
        "",
        "autoglas-atlantis",
        "scheibenwechsel-vw-kaefer",
        "reifenwechsel-berlin",
        "Autoglas-Berlin",
        "autoglas-berlin/../etc",
    ] {
        assert!(router.resolve(slug).is_none(), "{:?} should not resolve", slug);
    }

    let err = router.require("autoglas-atlantis").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_router_accepts_leading_slash() {
    let site = build_fixture_site();
    assert_eq!(
        site.router().resolve("/steinschlag-reparatur-muenchen/"),
        Some(PageTarget::service_location("steinschlag-reparatur", "muenchen"))
    );
}

// ============================================================================
// Link Graph Tests
// ============================================================================

#[test]
fn test_breadcrumbs_follow_hierarchy() {
    let site = build_fixture_site();
    let config = Config::default();
    let links = site
        .links(&config.links, &config.site.home_label)
        .page_links(&PageTarget::location("schwabing"))
        .unwrap();

    let labels: Vec<&str> = links.breadcrumbs.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Startseite", "Bayern", "Oberbayern", "München", "Schwabing"]);
    assert_eq!(links.breadcrumbs[1].href.as_deref(), Some("/autoglas-bayern"));
    assert!(links.breadcrumbs.last().unwrap().href.is_none());
}

#[test]
fn test_children_capped_by_config() {
    let site = build_fixture_site();
    let config = Config::load(&fixtures_path("seo-atlas.toml")).unwrap();
    let mut links_config = config.links.clone();
    links_config.max_children = 2;

    let links = site
        .links(&links_config, "Home")
        .page_links(&PageTarget::location("berlin"))
        .unwrap();
    let children: Vec<&str> = links.children.iter().map(|l| l.href.as_str()).collect();
    assert_eq!(children, vec!["/autoglas-berlin-mitte", "/autoglas-berlin-spandau"]);
    assert_eq!(links.breadcrumbs[0].label, "Home");
}

#[test]
fn test_links_only_point_at_indexed_pages() {
    let site = build_fixture_site();
    let config = Config::default();
    let builder = site.links(&config.links, "Startseite");

    for entry in site.index().iter() {
        let links = builder.page_links(&entry.target).unwrap();
        for link in links.outgoing() {
            let slug = link.href.trim_start_matches('/');
            assert!(site.index().contains(slug), "{} links to missing {}", entry.slug, slug);
            assert_ne!(slug, entry.slug, "{} links to itself", entry.slug);
        }
    }
}

#[test]
fn test_sitemap_links_match_index() {
    let site = build_fixture_site();
    let config = Config::default();
    let links = site.links(&config.links, "Startseite").sitemap_links();

    let hrefs: Vec<String> = links.iter().map(|l| l.href.clone()).collect();
    let expected: Vec<String> = site.paths().iter().map(|p| format!("/{}", p)).collect();
    assert_eq!(hrefs, expected);
}

// ============================================================================
// Content Tests
// ============================================================================

#[test]
fn test_pick_is_deterministic() {
    let pool = ["eins", "zwei", "drei", "vier"];
    let first = pick(&pool, "berlin-mitte-headline");
    for _ in 0..1000 {
        assert_eq!(pick(&pool, "berlin-mitte-headline"), first);
    }
}

#[test]
fn test_pick_spreads_across_seeds() {
    let pool = ["eins", "zwei", "drei", "vier"];
    let picked: HashSet<&&str> = (0..50)
        .map(|i| pick(&pool, &format!("seed-{}", i)))
        .collect();
    assert!(picked.len() >= 2);
}

#[test]
fn test_prose_for_every_page() {
    let site = build_fixture_site();
    let prose: ProseGenerator<'_> = site.prose();
    let router = site.router();

    for slug in site.paths() {
        let page = router.require(slug).unwrap();
        let copy = prose.compose(&page);
        assert!(!copy.headline.is_empty());
        assert!(!copy.headline.contains('{'), "{}: {}", slug, copy.headline);
        assert!(!copy.intro.contains('{'), "{}: {}", slug, copy.intro);

        if let ResolvedPage::Vehicle { model, .. } = page {
            if model.slug == "golf" {
                // ADAS camera and rain sensor
                assert_eq!(copy.details.len(), 2);
            }
        }
    }
}

// ============================================================================
// Build Context Tests
// ============================================================================

#[test]
fn test_integrity_violation_aborts_build() {
    let mut data = load_fixture_data();
    data.locations[11].parent_slug = Some("atlantis".to_string());
    data.models[0].brand_slug = "trabant".to_string();

    match Site::build(data) {
        Err(Error::Integrity(report)) => {
            assert_eq!(report.violations().len(), 2);
            assert!(report
                .violations()
                .iter()
                .any(|v| matches!(v, Violation::DanglingBrand { brand, .. } if brand == "trabant")));
        }
        other => panic!("expected integrity error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_shared_site_loads_once() {
    static SITE: SharedSite = SharedSite::new();

    let first = SITE.get_or_try_build(|| Ok(load_fixture_data())).unwrap();
    let second = SITE
        .get_or_try_build(|| panic!("site must not be rebuilt"))
        .unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(second.index().len(), 30);
}

// ============================================================================
// Output Tests
// ============================================================================

#[test]
fn test_write_outputs() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::load(&fixtures_path("seo-atlas.toml")).unwrap();
    config.output.directory = dir.path().join("dist");

    let site = build_fixture_site();
    let report = SitemapWriter::new(&config).unwrap().write(&site).unwrap();

    assert_eq!(report.paths, 30);
    assert_eq!(report.sitemap_urls, 23);
    assert_eq!(report.fingerprint, site.index().fingerprint());

    let xml = fs::read_to_string(dir.path().join("dist/sitemap.xml")).unwrap();
    assert!(xml.contains("<loc>https://autoglas.test/autoglas-berlin</loc>"));
    assert!(xml.contains("<changefreq>monthly</changefreq>"));
    assert!(!xml.contains("autoglas-gauting"));
    assert!(!xml.contains("scheibenwechsel-vw-golf"));

    let stats = fs::read_to_string(dir.path().join("dist/stats.txt")).unwrap();
    assert!(stats.contains("Autoglas Test"));
    assert!(stats.contains("30 pages"));
    assert!(stats.contains(&site.index().fingerprint()));
}
