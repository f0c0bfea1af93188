//! Demo catalog and order history for a fresh store.

use chrono::{DateTime, TimeZone, Utc};
use common::{OrderId, UserId};

use crate::aggregate::Aggregate;
use crate::cart::CartItem;
use crate::catalog::{Category, Product};
use crate::money::Money;
use crate::order::{DeliveryDetails, Order, OrderStatus, PaymentMethod, StatusPolicy};

use super::{StoreEvent, Storefront};

const IMG: &str = "https://images.unsplash.com/photo-";

fn categories() -> Vec<Category> {
    [
        ("cat_1", "Fruits & Veg", "1610832958506-aa56368176cf"),
        ("cat_2", "Dairy & Eggs", "1628088062854-d1870b4553da"),
        ("cat_3", "Beverages", "1625772299848-391b6a87d7b3"),
        ("cat_4", "Snacks", "1621939514649-28b12e81658b"),
        ("cat_5", "Household", "1563453392212-326f5e854473"),
    ]
    .into_iter()
    .map(|(id, name, photo)| Category::new(name).with_id(id).with_image(format!("{IMG}{photo}")))
    .collect()
}

fn products() -> Vec<Product> {
    [
        ("prod_1", "Fresh Bananas", "Sweet organic bananas from local farms.", 150, "Fruits & Veg", 50, 4.5, "1603833665858-e61d17a86224"),
        ("prod_2", "Whole Milk", "Farm fresh whole milk, 1 gallon.", 320, "Dairy & Eggs", 20, 4.8, "1563636619-e9143da7973b"),
        ("prod_3", "Orange Juice", "100% pure squeezed orange juice with pulp.", 499, "Beverages", 15, 4.2, "1600271886742-f049cd451bba"),
        ("prod_4", "Potato Chips", "Classic salted potato chips, family size.", 250, "Snacks", 100, 4.0, "1566478988047-b8f0660d6380"),
        ("prod_5", "Red Apples", "Crisp and sweet red apples, 1kg bag.", 300, "Fruits & Veg", 40, 4.6, "1560806887-1e4cd0b6cbd6"),
        ("prod_6", "Laundry Detergent", "Powerful stain remover detergent, 2L.", 1299, "Household", 10, 4.9, "1585833552500-50199a1561b9"),
    ]
    .into_iter()
    .map(|(id, name, description, cents, category, stock, rating, photo)| {
        Product::new(name, Money::from_cents(cents), category)
            .with_id(id)
            .with_description(description)
            .with_stock(stock)
            .with_rating(rating)
            .with_image(format!("{IMG}{photo}"))
    })
    .collect()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

/// Historical orders keep the totals they were recorded with.
fn orders(products: &[Product]) -> Vec<Order> {
    let line = |index: usize, quantity: u32| {
        products
            .get(index)
            .cloned()
            .map(|product| CartItem::new(product, quantity))
    };

    let history = [
        (
            "ORD-1709301",
            "user_1",
            "Mohamed Ali",
            vec![line(0, 2), line(1, 1)],
            620,
            OrderStatus::Delivered,
            PaymentMethod::Evc,
            at(2024, 3, 10, 10, 0),
            DeliveryDetails::new("123 Wadnaha St", "Mogadishu", "+252 61 555 0101"),
        ),
        (
            "ORD-1709302",
            "user_2",
            "Amina Yusuf",
            vec![line(2, 1)],
            499,
            OrderStatus::Pending,
            PaymentMethod::Sahal,
            at(2024, 3, 11, 14, 30),
            DeliveryDetails::new("456 Maka Al Mukarama", "Mogadishu", "+252 61 555 0102"),
        ),
        (
            "ORD-1709303",
            "user_3",
            "Hassan Nur",
            vec![line(3, 3), line(5, 1)],
            2049,
            OrderStatus::Processing,
            PaymentMethod::Cod,
            at(2024, 3, 12, 9, 15),
            DeliveryDetails::new("789 Taleex", "Mogadishu", "+252 61 555 0103"),
        ),
    ];

    history
        .into_iter()
        .map(
            |(id, user, name, items, cents, status, payment_method, created_at, delivery_details)| {
                Order {
                    id: OrderId::from(id),
                    user_id: UserId::from(user),
                    customer_name: name.to_string(),
                    items: items.into_iter().flatten().collect(),
                    total: Money::from_cents(cents),
                    status,
                    payment_method,
                    created_at,
                    delivery_details,
                }
            },
        )
        .collect()
}

/// Events that populate a fresh store with the demo catalog and history.
///
/// Orders are emitted oldest first so the ledger ends up most recent first.
pub fn seed_events() -> Vec<StoreEvent> {
    let products = products();
    let orders = orders(&products);

    categories()
        .into_iter()
        .map(StoreEvent::CategoryAdded)
        .chain(products.into_iter().map(StoreEvent::ProductAdded))
        .chain(orders.into_iter().map(|order| StoreEvent::OrderPlaced {
            order: Box::new(order),
        }))
        .collect()
}

impl Storefront {
    /// A store holding the demo catalog and order history.
    pub fn seeded(status_policy: StatusPolicy) -> Self {
        Storefront::with_policy(status_policy).evolve(&seed_events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_contents() {
        let store = Storefront::seeded(StatusPolicy::Permissive);
        assert_eq!(store.catalog().categories().len(), 5);
        assert_eq!(store.catalog().products().len(), 6);
        assert!(store.catalog().dangling_category_refs().is_empty());
        assert!(store.cart().is_empty());

        let ids: Vec<_> = store.orders().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["ORD-1709303", "ORD-1709302", "ORD-1709301"]);
        assert_eq!(store.orders().revenue().cents(), 620 + 499 + 2049);
    }

    #[test]
    fn seeded_orders_carry_their_lines() {
        let store = Storefront::seeded(StatusPolicy::Permissive);
        let order = store.orders().get(&OrderId::from("ORD-1709303")).unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.item_count(), 4);
        assert_eq!(order.status, OrderStatus::Processing);
    }
}
