// Service and vehicle catalog
//
// Flat lookups, no hierarchy. Catalog order is preserved everywhere it
// matters (main services, brands, models per brand) because both the page
// index and the slug router iterate in that order.

use crate::data::{Service, VehicleBrand, VehicleModel};
use std::collections::HashMap;

/// Read-only service and vehicle catalog
#[derive(Debug, Default)]
pub struct CatalogStore {
    services: Vec<Service>,
    brands: Vec<VehicleBrand>,
    models: Vec<VehicleModel>,
    service_index: HashMap<String, usize>,
    brand_index: HashMap<String, usize>,
    /// (brand slug, model slug) -> model position
    model_index: HashMap<(String, String), usize>,
    /// brand slug -> model positions in catalog order
    models_by_brand: HashMap<String, Vec<usize>>,
}

impl CatalogStore {
    /// Build the catalog and its lookup indexes. First occurrence wins on
    /// duplicate keys; integrity validation reports them.
    pub fn new(services: Vec<Service>, brands: Vec<VehicleBrand>, models: Vec<VehicleModel>) -> Self {
        let mut service_index = HashMap::new();
        for (idx, service) in services.iter().enumerate() {
            service_index.entry(service.slug.clone()).or_insert(idx);
        }

        let mut brand_index = HashMap::new();
        for (idx, brand) in brands.iter().enumerate() {
            brand_index.entry(brand.slug.clone()).or_insert(idx);
        }

        let mut model_index = HashMap::new();
        let mut models_by_brand: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, model) in models.iter().enumerate() {
            let key = (model.brand_slug.clone(), model.slug.clone());
            if model_index.contains_key(&key) {
                continue;
            }
            model_index.insert(key, idx);
            models_by_brand
                .entry(model.brand_slug.clone())
                .or_default()
                .push(idx);
        }

        Self {
            services,
            brands,
            models,
            service_index,
            brand_index,
            model_index,
            models_by_brand,
        }
    }

    pub fn service(&self, slug: &str) -> Option<&Service> {
        self.service_index.get(slug).map(|&idx| &self.services[idx])
    }

    /// All services in catalog order
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Services flagged as main, in catalog order
    pub fn main_services(&self) -> Vec<&Service> {
        self.services.iter().filter(|s| s.main).collect()
    }

    pub fn brand(&self, slug: &str) -> Option<&VehicleBrand> {
        self.brand_index.get(slug).map(|&idx| &self.brands[idx])
    }

    /// All brands in catalog order
    pub fn brands(&self) -> &[VehicleBrand] {
        &self.brands
    }

    pub fn model(&self, brand_slug: &str, model_slug: &str) -> Option<&VehicleModel> {
        self.model_index
            .get(&(brand_slug.to_string(), model_slug.to_string()))
            .map(|&idx| &self.models[idx])
    }

    /// Models of one brand in catalog order
    pub fn models_by_brand(&self, brand_slug: &str) -> Vec<&VehicleModel> {
        self.models_by_brand
            .get(brand_slug)
            .map(|ids| ids.iter().map(|&idx| &self.models[idx]).collect())
            .unwrap_or_default()
    }

    /// Popular models of one brand in catalog order
    pub fn popular_models_by_brand(&self, brand_slug: &str) -> Vec<&VehicleModel> {
        self.models_by_brand(brand_slug)
            .into_iter()
            .filter(|m| m.popular)
            .collect()
    }

    /// All popular models in catalog order
    pub fn popular_models(&self) -> Vec<&VehicleModel> {
        self.models.iter().filter(|m| m.popular).collect()
    }

    /// All models in catalog order, including duplicates
    pub fn models(&self) -> &[VehicleModel] {
        &self.models
    }

    /// Service slugs that occur more than once
    pub fn duplicate_services(&self) -> Vec<&str> {
        duplicates(self.services.iter().map(|s| s.slug.as_str()))
    }

    /// Brand slugs that occur more than once
    pub fn duplicate_brands(&self) -> Vec<&str> {
        duplicates(self.brands.iter().map(|b| b.slug.as_str()))
    }
}

fn duplicates<'a>(slugs: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashMap::new();
    let mut dups = Vec::new();
    for slug in slugs {
        let count = seen.entry(slug).or_insert(0usize);
        *count += 1;
        if *count == 2 {
            dups.push(slug);
        }
    }
    dups
}
