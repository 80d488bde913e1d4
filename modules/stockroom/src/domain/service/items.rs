use super::{
    DomainError, EmailCount, Item, ItemFilter, NewItem, RecordId, Resource, Service, now,
};

pub(super) async fn create_item(svc: &Service, new_item: NewItem) -> Result<Item, DomainError> {
    tracing::info!("Creating item");

    let insert_date = now();
    let id = svc.items.insert(&new_item, insert_date).await?;

    tracing::info!("Successfully created item with id={}", id);
    Ok(new_item.into_item(id, insert_date))
}

pub(super) async fn get_item(svc: &Service, id: &RecordId) -> Result<Item, DomainError> {
    tracing::debug!("Getting item by id");

    svc.items
        .get(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Resource::Item, id.as_str()))
}

pub(super) async fn filter_items(
    svc: &Service,
    filter: &ItemFilter,
) -> Result<Vec<Item>, DomainError> {
    let items = svc.items.find(filter).await?;
    tracing::debug!("Filter matched {} items", items.len());
    Ok(items)
}

pub(super) async fn update_item(
    svc: &Service,
    id: &RecordId,
    patch: NewItem,
) -> Result<Item, DomainError> {
    tracing::info!("Updating item");

    if !svc.items.update(id, &patch).await? {
        return Err(DomainError::not_found(Resource::Item, id.as_str()));
    }

    // re-read: the stored insert_date is not part of the patch
    let item = svc
        .items
        .get(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Resource::Item, id.as_str()))?;

    tracing::info!("Successfully updated item");
    Ok(item)
}

pub(super) async fn delete_item(svc: &Service, id: &RecordId) -> Result<(), DomainError> {
    tracing::info!("Deleting item");

    if svc.items.delete(id).await? {
        tracing::info!("Successfully deleted item");
        Ok(())
    } else {
        Err(DomainError::not_found(Resource::Item, id.as_str()))
    }
}

pub(super) async fn count_items_by_email(svc: &Service) -> Result<Vec<EmailCount>, DomainError> {
    let counts = svc.items.count_by_email().await?;
    tracing::debug!("Aggregated items into {} email groups", counts.len());
    Ok(counts)
}
