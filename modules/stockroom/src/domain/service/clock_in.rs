use super::{
    ClockInFilter, ClockInRecord, DomainError, NewClockIn, RecordId, Resource, Service, now,
};

pub(super) async fn create_clock_in(
    svc: &Service,
    new_record: NewClockIn,
) -> Result<ClockInRecord, DomainError> {
    tracing::info!("Creating clock-in record");

    let insert_datetime = now();
    let id = svc.clock_ins.insert(&new_record, insert_datetime).await?;

    tracing::info!("Successfully created clock-in record with id={}", id);
    Ok(new_record.into_record(id, insert_datetime))
}

pub(super) async fn get_clock_in(
    svc: &Service,
    id: &RecordId,
) -> Result<ClockInRecord, DomainError> {
    tracing::debug!("Getting clock-in record by id");

    svc.clock_ins
        .get(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Resource::ClockIn, id.as_str()))
}

pub(super) async fn filter_clock_ins(
    svc: &Service,
    filter: &ClockInFilter,
) -> Result<Vec<ClockInRecord>, DomainError> {
    let records = svc.clock_ins.find(filter).await?;
    tracing::debug!("Filter matched {} clock-in records", records.len());
    Ok(records)
}

pub(super) async fn update_clock_in(
    svc: &Service,
    id: &RecordId,
    patch: NewClockIn,
) -> Result<ClockInRecord, DomainError> {
    tracing::info!("Updating clock-in record");

    if !svc.clock_ins.update(id, &patch).await? {
        return Err(DomainError::not_found(Resource::ClockIn, id.as_str()));
    }

    svc.clock_ins
        .get(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Resource::ClockIn, id.as_str()))
}

pub(super) async fn delete_clock_in(svc: &Service, id: &RecordId) -> Result<(), DomainError> {
    tracing::info!("Deleting clock-in record");

    if svc.clock_ins.delete(id).await? {
        Ok(())
    } else {
        Err(DomainError::not_found(Resource::ClockIn, id.as_str()))
    }
}
