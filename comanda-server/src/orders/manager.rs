//! OrdersManager - order ticket operations
//!
//! Every operation is one `mutate()` on the orders collection: lookup,
//! guard checks, change, lifecycle recompute, write. A rejected operation
//! returns before anything is written.

use crate::store::OrderStore;
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_items, validate_optional_text,
    validate_required_text,
};
use chrono::Utc;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::order::{
    AddItemsRequest, CloseOrderRequest, CreateOrderRequest, DEFAULT_SCHEDULING_CODE, ItemStatus,
    MarkAllReadyResponse, Order, OrderStatus, recompute_status, recompute_total,
};
use shared::util::next_id;

#[derive(Debug, Clone)]
pub struct OrdersManager {
    store: OrderStore,
}

fn find_order(orders: &mut [Order], id: u64) -> AppResult<&mut Order> {
    orders
        .iter_mut()
        .find(|o| o.id == id)
        .ok_or_else(|| AppError::order_not_found(id))
}

fn ensure_not_closed(order: &Order) -> AppResult<()> {
    if order.is_closed() {
        return Err(AppError::order_closed(order.id));
    }
    Ok(())
}

impl OrdersManager {
    pub fn new(store: OrderStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub async fn list(&self) -> AppResult<Vec<Order>> {
        Ok(self.store.load().await?)
    }

    pub async fn get(&self, id: u64) -> AppResult<Order> {
        self.store
            .load()
            .await?
            .into_iter()
            .find(|o| o.id == id)
            .ok_or_else(|| AppError::order_not_found(id))
    }

    /// Open a new ticket; every item starts in the kitchen
    pub async fn create(&self, req: CreateOrderRequest) -> AppResult<Order> {
        if req.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        let items = validate_items(&req.items)?;
        validate_optional_text(&req.note, "note", MAX_NOTE_LEN)?;
        validate_optional_text(&req.scheduling_code, "schedulingCode", MAX_SHORT_TEXT_LEN)?;

        let scheduling_code = req
            .scheduling_code
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SCHEDULING_CODE.to_string());

        let order = self
            .store
            .mutate(|orders| {
                let mut order = Order {
                    id: next_id(orders.iter().map(|o| o.id)),
                    created_at: Utc::now(),
                    scheduling_code,
                    status: OrderStatus::Preparing,
                    items: items
                        .into_iter()
                        .zip(1..)
                        .map(|(item, id)| item.into_line_item(id))
                        .collect(),
                    total: 0.0,
                    note: req.note.unwrap_or_default(),
                    closed_at: None,
                    payment_method: None,
                };
                recompute_total(&mut order);
                orders.push(order.clone());
                Ok::<_, AppError>(order)
            })
            .await?;

        tracing::info!(
            order_id = order.id,
            items = order.items.len(),
            total = order.total,
            "Order created"
        );
        Ok(order)
    }

    /// Append items and/or update note and scheduling code
    pub async fn add_items(&self, id: u64, req: AddItemsRequest) -> AppResult<Order> {
        let order = self
            .store
            .mutate(|orders| {
                let order = find_order(orders, id)?;
                ensure_not_closed(order)?;

                if req.items.is_empty() && req.note.is_none() && req.scheduling_code.is_none() {
                    return Err(AppError::new(ErrorCode::NothingToUpdate));
                }
                let items = validate_items(&req.items)?;
                validate_optional_text(&req.note, "note", MAX_NOTE_LEN)?;
                validate_optional_text(&req.scheduling_code, "schedulingCode", MAX_SHORT_TEXT_LEN)?;

                if let Some(note) = req.note {
                    order.note = note;
                }
                if let Some(code) = req.scheduling_code {
                    order.scheduling_code = code;
                }
                if !items.is_empty() {
                    let first_id = order.next_item_id();
                    order.items.extend(
                        items
                            .into_iter()
                            .zip(first_id..)
                            .map(|(item, item_id)| item.into_line_item(item_id)),
                    );
                    recompute_total(order);
                    recompute_status(order);
                }
                Ok(order.clone())
            })
            .await?;

        tracing::info!(order_id = id, items = order.items.len(), total = order.total, "Order updated");
        Ok(order)
    }

    pub async fn mark_item_ready(&self, order_id: u64, item_id: u64) -> AppResult<Order> {
        let order = self
            .store
            .mutate(|orders| {
                let order = find_order(orders, order_id)?;
                ensure_not_closed(order)?;
                let item = order
                    .find_item_mut(item_id)
                    .ok_or_else(|| AppError::item_not_found(order_id, item_id))?;
                if item.item_status == ItemStatus::Ready {
                    return Err(AppError::new(ErrorCode::ItemAlreadyReady)
                        .with_detail("order_id", order_id)
                        .with_detail("item_id", item_id));
                }
                item.item_status = ItemStatus::Ready;
                recompute_status(order);
                Ok(order.clone())
            })
            .await?;

        tracing::info!(order_id, item_id, status = %order.status, "Item marked ready");
        Ok(order)
    }

    /// Every OPEN/PREPARING item becomes READY
    pub async fn mark_all_ready(&self, order_id: u64) -> AppResult<MarkAllReadyResponse> {
        let (count, order) = self
            .store
            .mutate(|orders| {
                let order = find_order(orders, order_id)?;
                ensure_not_closed(order)?;

                let mut count = 0;
                for item in order.items.iter_mut().filter(|i| i.item_status.is_in_kitchen()) {
                    item.item_status = ItemStatus::Ready;
                    count += 1;
                }
                if count == 0 {
                    return Err(AppError::new(ErrorCode::NoItemsToMark)
                        .with_detail("order_id", order_id));
                }
                recompute_status(order);
                Ok((count, order.clone()))
            })
            .await?;

        tracing::info!(order_id, count, "All kitchen items marked ready");
        Ok(MarkAllReadyResponse {
            message: format!("{count} item(s) marked ready"),
            count,
            order,
        })
    }

    pub async fn mark_item_delivered(&self, order_id: u64, item_id: u64) -> AppResult<Order> {
        let order = self
            .store
            .mutate(|orders| {
                let order = find_order(orders, order_id)?;
                ensure_not_closed(order)?;
                let item = order
                    .find_item_mut(item_id)
                    .ok_or_else(|| AppError::item_not_found(order_id, item_id))?;
                if item.item_status.is_resolved() {
                    return Err(AppError::new(ErrorCode::ItemAlreadyResolved)
                        .with_detail("order_id", order_id)
                        .with_detail("item_id", item_id)
                        .with_detail("item_status", item.item_status.as_str()));
                }
                item.item_status = ItemStatus::Delivered;
                recompute_status(order);
                Ok(order.clone())
            })
            .await?;

        tracing::info!(order_id, item_id, status = %order.status, "Item delivered");
        Ok(order)
    }

    /// Close and record payment. All items must be delivered or cancelled.
    pub async fn close(&self, id: u64, req: CloseOrderRequest) -> AppResult<Order> {
        let payment_method = req.payment_method.unwrap_or_default();
        if payment_method.trim().is_empty() {
            return Err(AppError::new(ErrorCode::PaymentMethodRequired));
        }
        validate_required_text(&payment_method, "paymentMethod", MAX_SHORT_TEXT_LEN)?;
        let payment_method = payment_method.trim().to_string();

        let order = self
            .store
            .mutate(|orders| {
                let order = find_order(orders, id)?;
                ensure_not_closed(order)?;
                if order.has_pending_items() {
                    let pending: Vec<u64> = order
                        .items
                        .iter()
                        .filter(|i| i.item_status.is_pending())
                        .map(|i| i.id)
                        .collect();
                    return Err(AppError::new(ErrorCode::OrderHasPendingItems)
                        .with_detail("order_id", id)
                        .with_detail("pending_item_ids", pending));
                }

                order.status = OrderStatus::Closed;
                order.closed_at = Some(Utc::now());
                order.payment_method = Some(payment_method);
                for item in order
                    .items
                    .iter_mut()
                    .filter(|i| i.item_status != ItemStatus::Cancelled)
                {
                    item.item_status = ItemStatus::Delivered;
                }
                Ok(order.clone())
            })
            .await?;

        tracing::info!(
            order_id = id,
            total = order.total,
            payment_method = ?order.payment_method,
            "Order closed"
        );
        Ok(order)
    }

    /// Only closed orders may be deleted
    pub async fn delete(&self, id: u64) -> AppResult<()> {
        self.store
            .mutate(|orders| {
                let index = orders
                    .iter()
                    .position(|o| o.id == id)
                    .ok_or_else(|| AppError::order_not_found(id))?;
                if !orders[index].is_closed() {
                    return Err(AppError::new(ErrorCode::OrderNotClosed).with_detail("order_id", id));
                }
                orders.remove(index);
                Ok::<_, AppError>(())
            })
            .await?;

        tracing::info!(order_id = id, "Order deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, JsonCodec};
    use serde_json::json;
    use tempfile::TempDir;

    async fn manager() -> (TempDir, OrdersManager) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("comandas.json"), JsonCodec)
            .await
            .unwrap();
        (dir, OrdersManager::new(store))
    }

    fn create_req(body: serde_json::Value) -> CreateOrderRequest {
        serde_json::from_value(body).unwrap()
    }

    async fn soda_order(m: &OrdersManager) -> Order {
        m.create(create_req(json!({
            "items": [{"name": "Soda", "price": 5.00, "quantity": 3}]
        })))
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_sets_preparing_and_total() {
        let (_dir, m) = manager().await;
        let order = m
            .create(create_req(json!({
                "schedulingCode": "050820250830",
                "items": [
                    {"name": "Soda", "price": 5, "quantity": 3},
                    {"name": "Burger", "price": 8, "quantity": 2}
                ]
            })))
            .await
            .unwrap();

        assert_eq!(order.id, 1);
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.total, 31.0);
        assert_eq!(order.scheduling_code, "050820250830");
        assert!(order.items.iter().all(|i| i.item_status == ItemStatus::Preparing));
        assert_eq!(order.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);

        let second = soda_order(&m).await;
        assert_eq!(second.id, 2);
        assert_eq!(second.scheduling_code, DEFAULT_SCHEDULING_CODE);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_and_invalid_items() {
        let (_dir, m) = manager().await;
        let err = m.create(create_req(json!({"items": []}))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);

        let err = m
            .create(create_req(json!({"items": [{"name": "Soda", "price": -5, "quantity": 1}]})))
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
        assert!(m.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let (_dir, m) = manager().await;
        let order = soda_order(&m).await;
        assert_eq!(order.total, 15.0);

        let order = m.mark_item_delivered(order.id, 1).await.unwrap();
        assert_eq!(order.status, OrderStatus::InConsumption);

        let closed = m
            .close(order.id, CloseOrderRequest {
                payment_method: Some("Cash".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(closed.status, OrderStatus::Closed);
        assert!(closed.closed_at.is_some());
        assert_eq!(closed.payment_method.as_deref(), Some("Cash"));

        let err = m
            .close(order.id, CloseOrderRequest {
                payment_method: Some("Cash".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderAlreadyClosed);

        m.delete(order.id).await.unwrap();
        assert!(m.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ready_then_delivered() {
        let (_dir, m) = manager().await;
        let order = soda_order(&m).await;

        let order = m.mark_item_ready(order.id, 1).await.unwrap();
        assert_eq!(order.status, OrderStatus::Ready);
        let err = m.mark_item_ready(order.id, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ItemAlreadyReady);

        let order = m.mark_item_delivered(order.id, 1).await.unwrap();
        assert_eq!(order.status, OrderStatus::InConsumption);
        let err = m.mark_item_delivered(order.id, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ItemAlreadyResolved);

        let err = m.mark_item_ready(order.id, 99).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderItemNotFound);
        let err = m.mark_item_ready(99, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_mark_all_ready() {
        let (_dir, m) = manager().await;
        let order = m
            .create(create_req(json!({"items": [
                {"name": "A", "price": 1, "quantity": 1},
                {"name": "B", "price": 1, "quantity": 1},
                {"name": "C", "price": 1, "quantity": 1}
            ]})))
            .await
            .unwrap();
        m.mark_item_delivered(order.id, 3).await.unwrap();

        let resp = m.mark_all_ready(order.id).await.unwrap();
        assert_eq!(resp.count, 2);
        assert_eq!(resp.order.status, OrderStatus::Ready);
        assert_eq!(resp.order.items[2].item_status, ItemStatus::Delivered);

        let err = m.mark_all_ready(order.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoItemsToMark);
    }

    #[tokio::test]
    async fn test_close_rejects_pending_items_and_missing_payment() {
        let (_dir, m) = manager().await;
        let order = soda_order(&m).await;
        let before = std::fs::read(m.store().path()).unwrap();

        let err = m
            .close(order.id, CloseOrderRequest {
                payment_method: Some("Pix".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderHasPendingItems);

        // payment method is checked before the lookup
        let err = m
            .close(999, CloseOrderRequest {
                payment_method: Some("  ".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentMethodRequired);

        assert_eq!(std::fs::read(m.store().path()).unwrap(), before);
        assert_eq!(m.get(order.id).await.unwrap().status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn test_delete_open_order_leaves_file_untouched() {
        let (_dir, m) = manager().await;
        let order = soda_order(&m).await;
        let before = std::fs::read(m.store().path()).unwrap();

        let err = m.delete(order.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotClosed);
        assert_eq!(std::fs::read(m.store().path()).unwrap(), before);

        let err = m.delete(42).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_add_items() {
        let (_dir, m) = manager().await;
        let order = soda_order(&m).await;
        m.mark_item_delivered(order.id, 1).await.unwrap();

        let req: AddItemsRequest = serde_json::from_value(json!({
            "itens": [{"nome": "Burger", "preco": "8,00", "quantidade": 2}],
            "observacao": "no onions"
        }))
        .unwrap();
        let order = m.add_items(order.id, req).await.unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[1].id, 2);
        assert_eq!(order.items[1].item_status, ItemStatus::Preparing);
        assert_eq!(order.total, 31.0);
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.note, "no onions");

        // note-only update keeps items and status
        let req: AddItemsRequest = serde_json::from_value(json!({"mesa": "010120251200"})).unwrap();
        let updated = m.add_items(order.id, req).await.unwrap();
        assert_eq!(updated.scheduling_code, "010120251200");
        assert_eq!(updated.items.len(), 2);

        let err = m.add_items(order.id, AddItemsRequest::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NothingToUpdate);
    }

    #[tokio::test]
    async fn test_cancelled_item_is_resolved_but_counted() {
        let (_dir, m) = manager().await;
        let order = m
            .create(create_req(json!({"items": [
                {"name": "Soda", "price": 5, "quantity": 3},
                {"name": "Burger", "price": 8, "quantity": 2}
            ]})))
            .await
            .unwrap();
        m.store()
            .mutate(|orders| {
                let order = find_order(orders, order.id)?;
                if let Some(item) = order.find_item_mut(2) {
                    item.item_status = ItemStatus::Cancelled;
                }
                recompute_status(order);
                Ok::<_, AppError>(())
            })
            .await
            .unwrap();

        let err = m.mark_item_delivered(order.id, 2).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ItemAlreadyResolved);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);

        // the cancelled item does not block the order
        let delivered = m.mark_item_delivered(order.id, 1).await.unwrap();
        assert_eq!(delivered.status, OrderStatus::InConsumption);

        let closed = m
            .close(order.id, CloseOrderRequest {
                payment_method: Some("Pix".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(closed.status, OrderStatus::Closed);
        assert_eq!(closed.items[0].item_status, ItemStatus::Delivered);
        assert_eq!(closed.items[1].item_status, ItemStatus::Cancelled);
        assert_eq!(closed.total, 31.0);
        assert_eq!(m.get(order.id).await.unwrap(), closed);
    }

    #[tokio::test]
    async fn test_closed_order_is_frozen() {
        let (_dir, m) = manager().await;
        let order = soda_order(&m).await;
        m.mark_item_delivered(order.id, 1).await.unwrap();
        m.close(order.id, CloseOrderRequest {
            payment_method: Some("Cash".to_string()),
        })
        .await
        .unwrap();

        let req: AddItemsRequest = serde_json::from_value(json!({
            "items": [{"name": "Burger", "price": 8, "quantity": 2}]
        }))
        .unwrap();
        let err = m.add_items(order.id, req).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderAlreadyClosed);
        assert_eq!(m.get(order.id).await.unwrap().items.len(), 1);

        let err = m.mark_all_ready(order.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderAlreadyClosed);
        let err = m.mark_item_ready(order.id, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderAlreadyClosed);
    }
}
