use validator::Validate;

use crate::clients::places::{PlacesQuery, PlacesSearch};
use crate::clients::regions::RegionDirectory;
use crate::domain::lead::{Lead, LeadField};
use crate::domain::lead_set::LeadSet;
use crate::domain::listing::{LEADS_PER_PAGE, visible_leads};
use crate::domain::messaging::messaging_link;
use crate::domain::types::{MessageTemplate, SessionKey};
use crate::dto::main::{ExportFile, IndexPageData, IndexQuery, LeadRow, PageLink, SortHeader};
use crate::export;
use crate::forms::main::{SearchForm, SearchPayload};
use crate::pagination::Paginated;
use crate::repository::{LeadSetReader, LeadSetWriter, SessionReader, SessionWriter};
use crate::services::regions::load_region_options;
use crate::services::{ServiceError, ServiceResult};

pub fn column_label(field: LeadField) -> &'static str {
    match field {
        LeadField::Name => "Name",
        LeadField::Address => "Address",
        LeadField::Phone => "Phone",
        LeadField::Website => "Website",
        LeadField::Rating => "Rating",
        LeadField::Reviews => "Reviews",
    }
}

fn link(path: &str, query: &IndexQuery) -> String {
    let query_string = query.to_query_string();
    if query_string.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query_string}")
    }
}

/// Filters, sorts and cuts the requested page out of `leads`, attaching a
/// messaging link to every row.
pub(crate) fn lead_rows(
    leads: &[Lead],
    query: &IndexQuery,
    template: &MessageTemplate,
) -> Paginated<LeadRow> {
    let visible = visible_leads(leads, &query.filter(), query.sort_config().as_ref());

    Paginated::from_slice(&visible, query.page(), LEADS_PER_PAGE, |position, lead| {
        LeadRow {
            position,
            lead: (*lead).clone(),
            messaging_link: messaging_link(lead.phone.as_deref(), &lead.name, template),
        }
    })
}

/// Loads the settings, the last results and the table view for the index page.
pub fn load_index_page<R>(repo: &R, key: &SessionKey, query: IndexQuery) -> ServiceResult<IndexPageData>
where
    R: SessionReader + LeadSetReader + ?Sized,
{
    let settings = repo
        .get_session_settings(key)
        .map_err(|err| {
            log::error!("Failed to load session settings: {err}");
            err
        })?
        .unwrap_or_default();

    let lead_set = repo.get_lead_set(key).map_err(|err| {
        log::error!("Failed to load lead set: {err}");
        err
    })?;

    let (total, leads) = match &lead_set {
        Some(set) => (
            set.leads.len(),
            lead_rows(&set.leads, &query, &settings.message_template),
        ),
        None => (0, lead_rows(&[], &query, &settings.message_template)),
    };

    let active_sort = query.sort_config();
    let headers = LeadField::ALL
        .into_iter()
        .map(|field| SortHeader {
            field,
            label: column_label(field),
            url: link("/", &query.sorted_by(field)),
            direction: active_sort
                .filter(|sort| sort.key == field)
                .map(|sort| sort.direction.as_str()),
        })
        .collect();

    let page_links = leads
        .pages
        .iter()
        .map(|page| PageLink {
            page: *page,
            url: page.map(|page| link("/", &query.on_page(page))),
            current: *page == Some(leads.page),
        })
        .collect();

    let export_url = link("/leads/export", &query.view_only());

    Ok(IndexPageData {
        settings,
        lead_set: lead_set.map(|set| LeadSet {
            leads: Vec::new(),
            ..set
        }),
        total,
        leads,
        headers,
        page_links,
        query,
        export_url,
    })
}

/// Runs a places search and stores the results as the session's lead set.
///
/// A key typed into the form is remembered for the session. On any failure the
/// previously stored lead set is left untouched.
pub async fn run_search<R, P, D>(
    repo: &R,
    places: &P,
    regions: &D,
    key: &SessionKey,
    form: SearchForm,
) -> ServiceResult<LeadSet>
where
    R: SessionReader + SessionWriter + LeadSetWriter + ?Sized,
    P: PlacesSearch,
    D: RegionDirectory,
{
    if let Err(err) = form.validate() {
        log::error!("Failed to validate search form: {err}");
        return Err(ServiceError::Form(
            "Keyword, province and city are required".to_string(),
        ));
    }

    let payload = SearchPayload::try_from(form)?;

    let mut settings = repo.get_session_settings(key)?.unwrap_or_default();
    if let Some(api_key) = payload.api_key {
        if settings.api_key.as_ref() != Some(&api_key) {
            settings = repo.save_session_settings(key, &settings.with_api_key(api_key))?;
        }
    }
    let Some(api_key) = settings.api_key else {
        return Err(ServiceError::Form("API key is required".to_string()));
    };

    let options = load_region_options(regions, &payload.selection).await;
    let Some(location) = options.location() else {
        return Err(ServiceError::Form(
            "Selected location is not available".to_string(),
        ));
    };

    let query = PlacesQuery::new(api_key, payload.keyword, location);
    let leads = places.search(&query).await.map_err(|err| {
        log::error!("Places search failed: {err}");
        ServiceError::Search(err.to_string())
    })?;

    let lead_set = LeadSet::new(query.keyword, query.location, leads);
    repo.replace_lead_set(key, &lead_set).map_err(|err| {
        log::error!("Failed to store lead set: {err}");
        err
    })?;

    log::info!(
        "Stored {} leads for '{}' in {}",
        lead_set.leads.len(),
        lead_set.keyword,
        lead_set.location.describe()
    );

    Ok(lead_set)
}

/// Forgets the session's last results.
pub fn clear_leads<R>(repo: &R, key: &SessionKey) -> ServiceResult<()>
where
    R: LeadSetWriter + ?Sized,
{
    repo.clear_lead_set(key).map_err(|err| {
        log::error!("Failed to clear lead set: {err}");
        err
    })?;
    Ok(())
}

/// Builds the spreadsheet of the current filtered and sorted view.
///
/// Returns `None` when the session has no results to export.
pub fn export_leads<R>(repo: &R, key: &SessionKey, query: &IndexQuery) -> ServiceResult<Option<ExportFile>>
where
    R: LeadSetReader + ?Sized,
{
    let Some(lead_set) = repo.get_lead_set(key)? else {
        return Ok(None);
    };

    let visible = visible_leads(&lead_set.leads, &query.filter(), query.sort_config().as_ref());
    let bytes = export::export_leads(&visible).map_err(|err| {
        log::error!("Failed to generate export: {err}");
        ServiceError::Export(err.to_string())
    })?;

    Ok(Some(ExportFile {
        filename: lead_set.export_filename(),
        bytes,
    }))
}
