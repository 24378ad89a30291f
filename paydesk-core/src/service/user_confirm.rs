use kanau::processor::Processor;
use tracing::info;

use super::OrderService;
use crate::entities::{OrderId, OrderStatus};
use crate::error::OrderError;
use crate::store::{OrderStore, StatusAdvance};

/// Record the user's self-report that payment was sent.
#[derive(Debug, Clone)]
pub struct UserConfirmPayment {
    pub id: OrderId,
}

impl<S: OrderStore> Processor<UserConfirmPayment> for OrderService<S> {
    type Output = OrderStatus;
    type Error = OrderError;

    /// Moves `pending` to `user_confirmed` and reports the resulting
    /// status. An order that already advanced reports success unchanged —
    /// the self-report never fails for arriving late.
    async fn process(&self, msg: UserConfirmPayment) -> Result<OrderStatus, OrderError> {
        let outcome = self
            .store
            .advance_status(&msg.id, &[OrderStatus::Pending], OrderStatus::UserConfirmed)
            .await?;
        match outcome {
            StatusAdvance::Applied { .. } => {
                info!(order_id = %msg.id, "user confirmed payment");
                Ok(OrderStatus::UserConfirmed)
            }
            StatusAdvance::Rejected { current } => Ok(current),
            StatusAdvance::Missing => Err(OrderError::NotFound(msg.id)),
        }
    }
}
