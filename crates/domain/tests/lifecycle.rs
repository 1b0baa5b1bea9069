//! Integration tests for the order and payment aggregates together.
//!
//! These walk whole lifecycles through the public API, the way the
//! orchestrator drives them.

use chrono::Utc;
use common::{Money, OrderNumber};
use domain::{
    Order, OrderError, OrderItem, OrderStatus, Payment, PaymentMethod, PaymentStatus,
};

fn order_with_items() -> Order {
    let mut order = Order::new(OrderNumber::generate());
    order
        .add_item(OrderItem::new("SKU-001", 2, Money::from_cents(1000)))
        .unwrap();
    order
        .add_item(OrderItem::new("SKU-002", 1, Money::from_cents(2500)))
        .unwrap();
    order.calculate_total();
    order
}

#[test]
fn full_happy_path() {
    let mut order = order_with_items();
    assert_eq!(order.total_amount(), Money::from_cents(4500));

    // payment creation confirms the order and fixes the amount
    let mut payment = Payment::new(order.id(), order.total_amount(), PaymentMethod::CreditCard);
    order.transition(OrderStatus::Confirmed).unwrap();
    order.attach_payment(payment.id()).unwrap();
    assert_eq!(payment.amount(), Money::from_cents(4500));

    // completion advances the order
    payment.complete(Utc::now()).unwrap();
    order.transition(OrderStatus::Processing).unwrap();
    assert_eq!(payment.status(), PaymentStatus::Completed);

    // external fulfillment events
    order.transition(OrderStatus::Shipped).unwrap();
    order.transition(OrderStatus::Delivered).unwrap();
    assert_eq!(order.status(), OrderStatus::Delivered);
    assert!(order.status().is_terminal());
}

#[test]
fn failed_payment_path() {
    let mut order = order_with_items();
    let mut payment = Payment::new(order.id(), order.total_amount(), PaymentMethod::BankTransfer);
    order.transition(OrderStatus::Confirmed).unwrap();
    order.attach_payment(payment.id()).unwrap();

    payment.fail().unwrap();
    assert!(order.can_be_cancelled());
    order.transition(OrderStatus::Cancelled).unwrap();

    assert_eq!(order.status(), OrderStatus::Cancelled);
    assert!(payment.paid_at().is_none());
}

#[test]
fn delivered_order_can_still_be_returned() {
    let mut order = order_with_items();
    order.transition(OrderStatus::Confirmed).unwrap();
    order.transition(OrderStatus::Processing).unwrap();
    order.transition(OrderStatus::Shipped).unwrap();
    order.transition(OrderStatus::Delivered).unwrap();

    order.transition(OrderStatus::Returned).unwrap();
    assert_eq!(order.status(), OrderStatus::Returned);
}

#[test]
fn total_stays_consistent_after_recalculation() {
    let mut order = order_with_items();
    let before = order.total_amount();
    order.calculate_total();
    assert_eq!(order.total_amount(), before);

    let summed: Money = order.items().iter().map(OrderItem::subtotal).sum();
    assert_eq!(order.total_amount(), summed);
}

#[test]
fn cancelled_order_rejects_everything() {
    let mut order = order_with_items();
    order.transition(OrderStatus::Cancelled).unwrap();

    for target in [
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Cancelled,
    ] {
        let result = order.transition(target);
        assert!(matches!(
            result,
            Err(OrderError::InvalidStateTransition { .. })
        ));
    }
    assert_eq!(order.status(), OrderStatus::Cancelled);
}
