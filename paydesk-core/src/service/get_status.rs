use kanau::processor::Processor;

use super::OrderService;
use crate::entities::{OrderId, OrderStatus};
use crate::error::OrderError;
use crate::store::OrderStore;

/// Fetch the polling view of one order.
#[derive(Debug, Clone)]
pub struct GetOrderStatus {
    pub id: OrderId,
}

/// What the polling endpoint shows: the status plus the immutable credit
/// grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderStatusView {
    pub status: OrderStatus,
    pub credits: u32,
}

impl<S: OrderStore> Processor<GetOrderStatus> for OrderService<S> {
    type Output = OrderStatusView;
    type Error = OrderError;

    async fn process(&self, msg: GetOrderStatus) -> Result<OrderStatusView, OrderError> {
        let order = self
            .store
            .get(&msg.id)
            .await?
            .ok_or(OrderError::NotFound(msg.id))?;
        Ok(OrderStatusView {
            status: order.status,
            credits: order.credits,
        })
    }
}
