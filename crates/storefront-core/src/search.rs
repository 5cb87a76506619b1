//! # Catalog Search
//!
//! Case-insensitive filtering of the catalog by a free-text term.

use crate::types::Product;

/// Products whose name or description contains `term`, ignoring case.
///
/// A blank term returns the whole catalog in its original order.
///
/// ## Example
/// ```rust
/// use storefront_core::search::filter_products;
/// use storefront_core::Product;
///
/// let catalog = vec![
///     Product::new("p1", "Steel Tumbler", 12_000, 5),
///     Product::new("p2", "Mug", 8_000, 5).with_description("Glazed stoneware"),
/// ];
/// assert_eq!(filter_products(&catalog, "tumbler").len(), 1);
/// assert_eq!(filter_products(&catalog, "STONE")[0].id, "p2");
/// assert_eq!(filter_products(&catalog, "").len(), 2);
/// ```
pub fn filter_products<'a>(catalog: &'a [Product], term: &str) -> Vec<&'a Product> {
    let term = term.trim();
    if term.is_empty() {
        return catalog.iter().collect();
    }

    let needle = term.to_lowercase();
    catalog
        .iter()
        .filter(|product| {
            product.name.to_lowercase().contains(&needle)
                || product
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Looks up a product by id.
pub fn find_product<'a>(catalog: &'a [Product], id: &str) -> Option<&'a Product> {
    catalog.iter().find(|product| product.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "Premium Tumbler", 10_000, 20)
                .with_description("Double-walled steel"),
            Product::new("p2", "Travel Mug", 20_000, 20),
            Product::new("p3", "Tea Set", 30_000, 20).with_description("Porcelain, for travel"),
        ]
    }

    #[test]
    fn test_matches_name_and_description() {
        let catalog = catalog();
        let ids: Vec<_> = filter_products(&catalog, "travel")
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["p2", "p3"]);
    }

    #[test]
    fn test_blank_term_returns_everything() {
        let catalog = catalog();
        assert_eq!(filter_products(&catalog, "   ").len(), 3);
    }

    #[test]
    fn test_no_match() {
        let catalog = catalog();
        assert!(filter_products(&catalog, "kettle").is_empty());
    }

    #[test]
    fn test_find_product() {
        let catalog = catalog();
        assert_eq!(find_product(&catalog, "p2").map(|p| p.name.as_str()), Some("Travel Mug"));
        assert!(find_product(&catalog, "p9").is_none());
    }
}
