//! Catalog of products and categories.
//!
//! Products reference their category by *name*, not id. Renaming or deleting
//! a category never cascades; [`Catalog::dangling_category_refs`] reports the
//! products left pointing at a name no category carries.

use common::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Stock level below which a product counts as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: String,
    /// Category *name*; not checked against the category list.
    pub category: String,
    /// Informational only. Nothing in the engine decrements it.
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Product {
    /// Creates a product with a freshly generated id.
    pub fn new(name: impl Into<String>, price: Money, category: impl Into<String>) -> Self {
        Self {
            id: ProductId::generate(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            category: category.into(),
            stock: 0,
            rating: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ProductId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Case-insensitive match of `needle` against name, description and category.
    fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    /// Creates a category with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            image: String::new(),
            description: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<CategoryId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Shop-front filter: an optional category name plus an optional search text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Exact category name; `None` means every category.
    pub category: Option<String>,
    /// Free text matched against name, description and category.
    pub query: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| product.category == c);
        let query_ok = self
            .query
            .as_deref()
            .map(str::trim)
            .is_none_or(|q| q.is_empty() || product.matches_text(q));
        category_ok && query_ok
    }
}

/// A product whose category name matches no category in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingCategoryRef {
    pub product_id: ProductId,
    pub category: String,
}

/// Products and categories, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Appends a product. Returns false (and changes nothing) if the id is taken.
    pub fn add_product(&mut self, product: Product) -> bool {
        if self.product(&product.id).is_some() {
            return false;
        }
        self.products.push(product);
        true
    }

    /// Replaces the product with the same id. Returns false if absent.
    pub fn update_product(&mut self, product: Product) -> bool {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    /// Removes a product. Returns false if absent.
    pub fn delete_product(&mut self, id: &ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|p| &p.id != id);
        self.products.len() != before
    }

    pub fn add_category(&mut self, category: Category) -> bool {
        if self.category(&category.id).is_some() {
            return false;
        }
        self.categories.push(category);
        true
    }

    pub fn update_category(&mut self, category: Category) -> bool {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(slot) => {
                *slot = category;
                true
            }
            None => false,
        }
    }

    /// Removes a category. Products naming it are left untouched.
    pub fn delete_category(&mut self, id: &CategoryId) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| &c.id != id);
        self.categories.len() != before
    }

    /// Products matching the filter, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a ProductFilter) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    /// Products whose stock is below `threshold`.
    pub fn low_stock(&self, threshold: u32) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.stock < threshold)
    }

    pub fn dangling_category_refs(&self) -> Vec<DanglingCategoryRef> {
        self.products
            .iter()
            .filter(|p| !self.categories.iter().any(|c| c.name == p.category))
            .map(|p| DanglingCategoryRef {
                product_id: p.id.clone(),
                category: p.category.clone(),
            })
            .collect()
    }
}
