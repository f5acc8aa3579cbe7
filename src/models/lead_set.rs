use chrono::NaiveDateTime;
use diesel::prelude::*;
use thiserror::Error;

use crate::domain::lead::Lead;
use crate::domain::lead_set::LeadSet as DomainLeadSet;
use crate::domain::location::Location;
use crate::domain::types::{Keyword, LocationName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::lead_sets)]
#[diesel(primary_key(session_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::lead_set::LeadSet`]. Leads are stored as a
/// JSON array so their response order survives the round trip.
pub struct LeadSet {
    pub session_key: String,
    pub keyword: String,
    pub province: Option<String>,
    pub city: String,
    pub district: Option<String>,
    pub village: Option<String>,
    pub leads: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::lead_sets)]
/// Insertable form of [`LeadSet`].
pub struct NewLeadSet<'a> {
    pub session_key: &'a str,
    pub keyword: &'a str,
    pub province: Option<&'a str>,
    pub city: &'a str,
    pub district: Option<&'a str>,
    pub village: Option<&'a str>,
    pub leads: String,
    pub created_at: NaiveDateTime,
}

/// Reasons a stored lead set cannot be turned back into a domain value.
#[derive(Debug, Error)]
pub enum LeadSetDecodeError {
    #[error("malformed leads payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid stored value: {0}")]
    Constraint(#[from] TypeConstraintError),
}

impl<'a> NewLeadSet<'a> {
    pub fn from_domain(
        session_key: &'a str,
        lead_set: &'a DomainLeadSet,
    ) -> Result<Self, serde_json::Error> {
        let location = &lead_set.location;
        Ok(Self {
            session_key,
            keyword: lead_set.keyword.as_str(),
            province: location.province.as_ref().map(LocationName::as_str),
            city: location.city.as_str(),
            district: location.district.as_ref().map(LocationName::as_str),
            village: location.village.as_ref().map(LocationName::as_str),
            leads: serde_json::to_string(&lead_set.leads)?,
            created_at: lead_set.created_at,
        })
    }
}

fn optional_name(value: Option<String>) -> Option<LocationName> {
    value.and_then(|v| LocationName::new(v).ok())
}

impl TryFrom<LeadSet> for DomainLeadSet {
    type Error = LeadSetDecodeError;

    fn try_from(row: LeadSet) -> Result<Self, Self::Error> {
        let leads: Vec<Lead> = serde_json::from_str(&row.leads)?;
        let location = Location {
            province: optional_name(row.province),
            city: LocationName::new(row.city)?,
            district: optional_name(row.district),
            village: optional_name(row.village),
        };

        Ok(Self {
            keyword: Keyword::new(row.keyword)?,
            location,
            leads,
            created_at: row.created_at,
        })
    }
}
