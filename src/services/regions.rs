//! Cascading region lookups. Failures never propagate: they are logged and
//! the affected level, with everything below it, comes back empty.

use crate::clients::regions::{Region, RegionDirectory, RegionScope};
use crate::dto::regions::{RegionOptions, RegionSelection};

/// Lists one level of the cascade, degrading to an empty list on failure.
pub async fn list_regions<D>(directory: &D, scope: RegionScope) -> Vec<Region>
where
    D: RegionDirectory,
{
    match directory.list(&scope).await {
        Ok(regions) => regions,
        Err(err) => {
            log::warn!("Failed to load regions from {}: {err}", scope.path());
            Vec::new()
        }
    }
}

fn pick(regions: &[Region], id: Option<&str>) -> Option<String> {
    let id = id?;
    regions
        .iter()
        .any(|region| region.id == id)
        .then(|| id.to_string())
}

/// Loads the options of every selector for `requested`.
///
/// A selected id missing from its parent's children is dropped together
/// with everything below it, and the dependent lists are not fetched.
pub async fn load_region_options<D>(directory: &D, requested: &RegionSelection) -> RegionOptions
where
    D: RegionDirectory,
{
    let mut options = RegionOptions {
        provinces: list_regions(directory, RegionScope::Provinces).await,
        ..RegionOptions::default()
    };

    let Some(province_id) = pick(&options.provinces, requested.province.as_deref()) else {
        return options;
    };
    options.selection.province = Some(province_id.clone());
    options.regencies = list_regions(directory, RegionScope::Regencies { province_id }).await;

    let Some(regency_id) = pick(&options.regencies, requested.regency.as_deref()) else {
        return options;
    };
    options.selection.regency = Some(regency_id.clone());
    options.districts = list_regions(directory, RegionScope::Districts { regency_id }).await;

    let Some(district_id) = pick(&options.districts, requested.district.as_deref()) else {
        return options;
    };
    options.selection.district = Some(district_id.clone());
    options.villages = list_regions(directory, RegionScope::Villages { district_id }).await;

    options.selection.village = pick(&options.villages, requested.village.as_deref());
    options
}
