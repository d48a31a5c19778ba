use std::str::FromStr;

use super::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportAction {
    Start,
    Status,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown import action: {0}")]
pub struct UnknownImportAction(String);

impl FromStr for ImportAction {
    type Err = UnknownImportAction;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "status" => Ok(Self::Status),
            _ => Err(UnknownImportAction(s.to_owned())),
        }
    }
}

/// Starts a new import job unless one is still active,
/// in which case the active one is returned.
pub fn start_import_job<R: ImportJobRepo>(repo: &R) -> Result<ImportJob> {
    if let Some(job) = repo.latest_import_job()? {
        if job.status.is_active() {
            log::info!("Import job {} is still {}", job.id, job.status.as_str());
            return Ok(job);
        }
    }
    let job = ImportJob::new_pending(Timestamp::now());
    repo.create_import_job(&job)?;
    log::info!("Created import job {}", job.id);
    Ok(job)
}

pub fn import_job_status<R: ImportJobRepo>(repo: &R) -> Result<Option<ImportJob>> {
    Ok(repo.latest_import_job()?)
}

pub fn control_import_job<R: ImportJobRepo>(repo: &R, action: ImportAction) -> Result<Option<ImportJob>> {
    match action {
        ImportAction::Start => start_import_job(repo).map(Some),
        ImportAction::Status => import_job_status(repo),
    }
}

/// Progress reported by the worker that executes an import job.
#[derive(Debug, Clone)]
pub struct ImportJobProgress {
    pub status: ImportJobStatus,
    /// Replaces the current counters if present.
    pub counters: Option<ImportJobCounters>,
    pub last_city: Option<String>,
    /// Appended to the accumulated errors.
    pub errors: Vec<String>,
}

pub fn report_import_job_progress<R: ImportJobRepo>(
    repo: &R,
    id: &str,
    progress: ImportJobProgress,
) -> Result<ImportJob> {
    let mut job = repo.get_import_job(id)?;
    if !job.status.can_transition_to(progress.status) {
        return Err(Error::InvalidJobTransition {
            from: job.status.as_str(),
            to: progress.status.as_str(),
        });
    }
    let now = Timestamp::now();
    if progress.status == ImportJobStatus::Running && job.started_at.is_none() {
        job.started_at = Some(now);
    }
    if progress.status.is_terminal() {
        job.finished_at = Some(now);
    }
    if progress.status != job.status {
        log::info!(
            "Import job {} changed from {} to {}",
            job.id,
            job.status.as_str(),
            progress.status.as_str()
        );
    }
    job.status = progress.status;
    if let Some(counters) = progress.counters {
        job.counters = counters;
    }
    if progress.last_city.is_some() {
        job.last_city = progress.last_city;
    }
    job.errors.extend(progress.errors);
    job.updated_at = now;
    repo.update_import_job(&job)?;
    Ok(job)
}
