//! Read-side case listing and reporting.
//!
//! The resume and weekly-report screens read through [`CaseRepository`]. The
//! listing rule: matching records are grouped by patient name (resolved via
//! the alias-priority lookup), each group keeps only its highest-status
//! record (`draft < submitted < completed`), and only groups whose retained
//! record is submitted or completed are returned. Records without a patient
//! name cannot be grouped safely and are excluded - which also means
//! draft-only patients never appear here.

use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::mapping;
use crate::remote::{AuthProvider, RemoteStore, StaticAuth};
use crate::storage::LocalStore;
use crate::sync::DEFAULT_REMOTE_TIMEOUT;
use crate::types::{CaseRecord, CaseStatus, CaseSummary, Disease, FormKind};

/// Listing filter; unset members match everything.
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub disease: Option<Disease>,
    pub form: Option<FormKind>,
    pub owner_user_id: Option<String>,
    /// Narrows the listing to one reportable status.
    pub status: Option<CaseStatus>,
}

impl CaseFilter {
    pub fn for_form(disease: Disease, form: FormKind) -> Self {
        Self {
            disease: Some(disease),
            form: Some(form),
            ..Self::default()
        }
    }

    fn matches_identity(&self, summary: &CaseSummary) -> bool {
        self.disease.is_none_or(|d| summary.disease == d)
            && self.form.is_none_or(|f| summary.form == f)
            && self
                .owner_user_id
                .as_deref()
                .is_none_or(|owner| summary.owner_user_id == owner)
    }
}

/// One calendar week of the aggregate report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyBucket {
    /// Monday of the week.
    pub week_start: NaiveDate,
    pub total: usize,
    pub by_disease: BTreeMap<Disease, usize>,
}

/// Weekly case counts for chart consumption, weeks ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub weeks: Vec<WeeklyBucket>,
}

/// Read-side aggregation over the local store, optionally merged with
/// remote reads.
pub struct CaseRepository {
    store: Arc<LocalStore>,
    remote: Option<Arc<dyn RemoteStore>>,
    auth: Arc<dyn AuthProvider>,
    remote_timeout: Duration,
}

impl CaseRepository {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self {
            store,
            remote: None,
            auth: Arc::new(StaticAuth::anonymous()),
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    /// Deduplicated reportable cases from the local store, in index order.
    pub fn list_cases(&self, filter: &CaseFilter) -> Result<Vec<CaseSummary>> {
        Ok(dedupe_cases(self.store.list_summaries()?, filter))
    }

    /// Like [`list_cases`](Self::list_cases) but merged with the remote
    /// store's records for the current owner. The remote copy wins on id
    /// collisions; a failed or timed-out remote read degrades to the
    /// local-only listing.
    pub async fn list_cases_merged(&self, filter: &CaseFilter) -> Result<Vec<CaseSummary>> {
        let mut summaries = self.store.list_summaries()?;
        if let Some(remote) = &self.remote {
            let owner = filter
                .owner_user_id
                .clone()
                .or_else(|| self.auth.current_user().map(|user| user.id));
            if let Some(owner) = owner {
                match tokio::time::timeout(self.remote_timeout, remote.list_by_owner(&owner)).await
                {
                    Ok(Ok(rows)) => merge_remote_rows(&mut summaries, rows),
                    Ok(Err(err)) => {
                        tracing::warn!(error = %err, "remote list failed, using local cases only");
                    }
                    Err(_) => {
                        tracing::warn!("remote list timed out, using local cases only");
                    }
                }
            }
        }
        Ok(dedupe_cases(summaries, filter))
    }

    /// Weekly aggregation of the local listing.
    pub fn weekly_report(&self, filter: &CaseFilter) -> Result<WeeklyReport> {
        Ok(aggregate_weekly(&self.list_cases(filter)?))
    }

    /// Weekly aggregation of the remote-merged listing; the week convention
    /// is identical to [`weekly_report`](Self::weekly_report).
    pub async fn weekly_report_merged(&self, filter: &CaseFilter) -> Result<WeeklyReport> {
        Ok(aggregate_weekly(&self.list_cases_merged(filter).await?))
    }

    pub fn get_case(&self, id: &str) -> Result<Option<CaseRecord>> {
        self.store.get_case(id)
    }

    /// Explicit user deletion; removes the local record and its index row.
    pub fn delete_case(&self, id: &str) -> Result<()> {
        self.store.delete_case(id)
    }
}

fn merge_remote_rows(summaries: &mut Vec<CaseSummary>, rows: Vec<mapping::CaseRow>) {
    for row in rows {
        let Some(summary) = mapping::summarize_row(&row) else {
            continue;
        };
        match summaries.iter_mut().find(|s| s.id == summary.id) {
            Some(local) => *local = summary,
            None => summaries.push(summary),
        }
    }
}

fn dedupe_cases(summaries: Vec<CaseSummary>, filter: &CaseFilter) -> Vec<CaseSummary> {
    let mut by_patient: Vec<(String, CaseSummary)> = Vec::new();
    for summary in summaries {
        if !filter.matches_identity(&summary) {
            continue;
        }
        let Some(name) = summary
            .patient_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
        else {
            continue;
        };
        match by_patient.iter_mut().find(|(kept_name, _)| *kept_name == name) {
            // Strictly-greater keeps the first record seen on equal status.
            Some((_, kept)) => {
                if summary.status > kept.status {
                    *kept = summary;
                }
            }
            None => by_patient.push((name, summary)),
        }
    }
    by_patient
        .into_iter()
        .map(|(_, summary)| summary)
        .filter(|summary| summary.status.is_reportable())
        .filter(|summary| filter.status.is_none_or(|status| summary.status == status))
        .collect()
}

/// Bucket reportable cases by the calendar week (starting Monday) of their
/// effective timestamp.
pub fn aggregate_weekly(cases: &[CaseSummary]) -> WeeklyReport {
    let mut buckets: BTreeMap<NaiveDate, WeeklyBucket> = BTreeMap::new();
    for case in cases {
        let week_start = case
            .effective_date()
            .date_naive()
            .week(Weekday::Mon)
            .first_day();
        let bucket = buckets.entry(week_start).or_insert_with(|| WeeklyBucket {
            week_start,
            total: 0,
            by_disease: BTreeMap::new(),
        });
        bucket.total += 1;
        *bucket.by_disease.entry(case.disease).or_insert(0) += 1;
    }
    WeeklyReport {
        weeks: buckets.into_values().collect(),
    }
}
