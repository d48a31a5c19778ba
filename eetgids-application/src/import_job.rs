use super::*;

pub fn control_import_job(
    connections: &sqlite::Connections,
    action: usecases::ImportAction,
) -> Result<Option<ImportJob>> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::control_import_job(conn, action))?)
}

pub fn report_import_job_progress(
    connections: &sqlite::Connections,
    job_id: &str,
    progress: usecases::ImportJobProgress,
) -> Result<ImportJob> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::report_import_job_progress(conn, job_id, progress).inspect_err(|err| {
            debug!("Rejected progress of import job {job_id}: {err}");
        })
    })?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn progress(status: ImportJobStatus, processed_cities: u32) -> usecases::ImportJobProgress {
        usecases::ImportJobProgress {
            status,
            counters: Some(ImportJobCounters {
                processed_cities,
                ..Default::default()
            }),
            last_city: Some("utrecht".into()),
            errors: vec![],
        }
    }

    #[test]
    fn one_active_job_at_a_time() {
        let fixture = BackendFixture::new();
        let db = &fixture.db_connections;
        assert!(flows::control_import_job(db, usecases::ImportAction::Status)
            .unwrap()
            .is_none());
        let first = flows::control_import_job(db, usecases::ImportAction::Start)
            .unwrap()
            .unwrap();
        let second = flows::control_import_job(db, usecases::ImportAction::Start)
            .unwrap()
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(ImportJobStatus::Pending, second.status);
    }

    #[test]
    fn terminal_job_rejects_progress() {
        let fixture = BackendFixture::new();
        let db = &fixture.db_connections;
        let job = flows::control_import_job(db, usecases::ImportAction::Start)
            .unwrap()
            .unwrap();
        let id = job.id.as_str();
        flows::report_import_job_progress(db, id, progress(ImportJobStatus::Running, 1)).unwrap();
        let job =
            flows::report_import_job_progress(db, id, progress(ImportJobStatus::Completed, 3))
                .unwrap();
        assert_eq!(3, job.counters.processed_cities);
        assert!(job.finished_at.is_some());

        assert!(matches!(
            flows::report_import_job_progress(db, id, progress(ImportJobStatus::Running, 4)),
            Err(AppError::Business(BError::Parameter(
                usecases::Error::InvalidJobTransition { .. }
            )))
        ));

        // A new job may start once the previous one has finished
        let next = flows::control_import_job(db, usecases::ImportAction::Start)
            .unwrap()
            .unwrap();
        assert_ne!(job.id, next.id);
        let status = flows::control_import_job(db, usecases::ImportAction::Status)
            .unwrap()
            .unwrap();
        assert_eq!(next.id, status.id);
    }
}
