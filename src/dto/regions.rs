//! State of the cascading province / city / district / village selectors.

use serde::{Deserialize, Serialize};

use crate::clients::regions::Region;
use crate::domain::location::Location;
use crate::domain::types::LocationName;

/// Region ids picked by the user, parent first.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSelection {
    pub province: Option<String>,
    pub regency: Option<String>,
    pub district: Option<String>,
    pub village: Option<String>,
}

impl RegionSelection {
    /// Builds a selection, ignoring blank ids and anything below the first gap.
    pub fn new(
        province: Option<String>,
        regency: Option<String>,
        district: Option<String>,
        village: Option<String>,
    ) -> Self {
        let mut selection = Self::default();
        selection.select_province(province);
        selection.select_regency(regency);
        selection.select_district(district);
        selection.select_village(village);
        selection
    }

    /// Changing or clearing the province clears every dependent level.
    pub fn select_province(&mut self, id: Option<String>) {
        let id = non_blank(id);
        if self.province != id {
            self.regency = None;
            self.district = None;
            self.village = None;
        }
        self.province = id;
    }

    pub fn select_regency(&mut self, id: Option<String>) {
        let id = non_blank(id).filter(|_| self.province.is_some());
        if self.regency != id {
            self.district = None;
            self.village = None;
        }
        self.regency = id;
    }

    pub fn select_district(&mut self, id: Option<String>) {
        let id = non_blank(id).filter(|_| self.regency.is_some());
        if self.district != id {
            self.village = None;
        }
        self.district = id;
    }

    pub fn select_village(&mut self, id: Option<String>) {
        self.village = non_blank(id).filter(|_| self.district.is_some());
    }
}

fn non_blank(id: Option<String>) -> Option<String> {
    id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Options for every selector plus the selection validated against them.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RegionOptions {
    pub provinces: Vec<Region>,
    pub regencies: Vec<Region>,
    pub districts: Vec<Region>,
    pub villages: Vec<Region>,
    pub selection: RegionSelection,
}

fn name_of(regions: &[Region], id: Option<&str>) -> Option<LocationName> {
    let id = id?;
    regions
        .iter()
        .find(|region| region.id == id)
        .and_then(|region| LocationName::new(region.name.as_str()).ok())
}

impl RegionOptions {
    /// Names of the selected regions; `None` until at least a city is chosen.
    pub fn location(&self) -> Option<Location> {
        let city = name_of(&self.regencies, self.selection.regency.as_deref())?;
        let mut location = Location::new(city);
        location.province = name_of(&self.provinces, self.selection.province.as_deref());
        location.district = name_of(&self.districts, self.selection.district.as_deref());
        location.village = name_of(&self.villages, self.selection.village.as_deref());
        Some(location)
    }
}
