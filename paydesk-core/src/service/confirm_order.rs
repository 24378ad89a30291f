use kanau::processor::Processor;
use tracing::info;

use super::OrderService;
use crate::entities::{OrderId, OrderStatus};
use crate::error::OrderError;
use crate::store::{OrderStore, StatusAdvance};

/// Operator confirmation — the one transition that mints credits.
#[derive(Debug, Clone)]
pub struct ConfirmOrder {
    pub id: OrderId,
}

/// Acknowledgment of a completed confirmation.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub id: OrderId,
    /// Status the order held immediately before completion.
    pub previous: OrderStatus,
}

impl Confirmation {
    /// Operator-facing acknowledgment line.
    pub fn message(&self) -> String {
        format!("Order {} has been confirmed.", self.id)
    }
}

impl<S: OrderStore> Processor<ConfirmOrder> for OrderService<S> {
    type Output = Confirmation;
    type Error = OrderError;

    /// Completes an order from `pending` or `user_confirmed` — an order
    /// the user never self-confirmed is still confirmable.
    ///
    /// Deliberately not idempotent: a repeat confirmation reports
    /// `AlreadyCompleted` so credits cannot be granted twice.
    async fn process(&self, msg: ConfirmOrder) -> Result<Confirmation, OrderError> {
        let outcome = self
            .store
            .advance_status(
                &msg.id,
                &[OrderStatus::Pending, OrderStatus::UserConfirmed],
                OrderStatus::Completed,
            )
            .await?;
        match outcome {
            StatusAdvance::Applied { previous } => {
                info!(order_id = %msg.id, previous = %previous, "order confirmed");
                Ok(Confirmation {
                    id: msg.id,
                    previous,
                })
            }
            StatusAdvance::Rejected { .. } => Err(OrderError::AlreadyCompleted(msg.id)),
            StatusAdvance::Missing => Err(OrderError::NotFound(msg.id)),
        }
    }
}
