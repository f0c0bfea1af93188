//! Plain-text order summary for outbound messaging channels.

use std::fmt::Write;

use domain::Order;

/// Renders `order` as a message body listing items, total, payment method
/// and delivery details.
pub fn order_message(order: &Order) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "New order {}", order.id);
    let _ = writeln!(body, "Customer: {}", order.customer_name);
    let _ = writeln!(body, "Items:");
    for item in &order.items {
        let _ = writeln!(
            body,
            "- {} x{} = {}",
            item.product.name,
            item.quantity,
            item.line_total()
        );
    }
    let _ = writeln!(body, "Total: {}", order.total);
    let _ = writeln!(body, "Payment: {}", order.payment_method);

    let details = &order.delivery_details;
    let _ = writeln!(body, "Deliver to: {}, {}", details.address, details.city);
    let _ = write!(body, "Phone: {}", details.phone);
    body
}
