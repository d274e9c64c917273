//! # Sample Catalog
//!
//! The launch catalog a fresh install starts with: four products, the four
//! shop categories, and the brand list used by the shop sidebar.
//!
//! Used by the storefront when no products record exists yet, by the
//! `seed` binary, and as the fixture for most unit tests.

use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{Category, Product, ProductVariation, StockStatus};

/// Brands listed in the shop sidebar filter.
pub const BRANDS: [&str; 6] = [
    "The Ordinary",
    "CeraVe",
    "MAC",
    "Fenty Beauty",
    "Laneige",
    "Neutrogena",
];

const UNSPLASH: &str = "https://images.unsplash.com";

fn image(photo: &str, w: u32, h: u32) -> String {
    format!("{UNSPLASH}/{photo}?q=80&w={w}&h={h}&fit=crop")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn specs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn variation(id: &str, name: &str, options: &[&str]) -> ProductVariation {
    ProductVariation {
        id: id.to_string(),
        name: name.to_string(),
        options: strings(options),
    }
}

/// Shop categories in menu order.
pub fn categories() -> Vec<Category> {
    let category = |id: &str, name: &str, photo: &str, subs: &[&str]| Category {
        id: id.to_string(),
        name: name.to_string(),
        image: image(photo, 400, 400),
        sub_categories: strings(subs),
    };

    vec![
        category(
            "skincare",
            "Skincare",
            "photo-1556228720-195a672e8a03",
            &["Cleansers", "Moisturizers", "Serums", "Sunscreen"],
        ),
        category(
            "makeup",
            "Makeup",
            "photo-1522335789203-aabd1fc54bc9",
            &["Face", "Eyes", "Lips", "Brushes"],
        ),
        category(
            "fragrance",
            "Fragrance",
            "photo-1541643600914-78b084683601",
            &["Men", "Women", "Unisex"],
        ),
        category(
            "haircare",
            "Haircare",
            "photo-1527799822367-474857a3f447",
            &["Shampoo", "Conditioner", "Styling"],
        ),
    ]
}

/// The four launch products, ids "1" to "4", in catalog order.
pub fn sample_catalog() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "The Ordinary Niacinamide 10% + Zinc 1%".to_string(),
            short_description: "High-strength vitamin and mineral blemish formula.".to_string(),
            description: "Niacinamide (Vitamin B3) is indicated to reduce the appearance of skin \
                blemishes and congestion. A high 10% concentration of this vitamin is supported \
                in the formula by zinc salt of pyrrolidone carboxylic acid to balance visible \
                aspects of sebum activity."
                .to_string(),
            category: "skincare".to_string(),
            sub_category: "Serums".to_string(),
            brand: "The Ordinary".to_string(),
            sku: "TO-NZ-01".to_string(),
            price: Money::from_major(950),
            sale_price: Some(Money::from_major(850)),
            stock_count: 50,
            stock_status: StockStatus::InStock,
            images: vec![
                image("photo-1601049541289-9b1b7bbbfe19", 600, 800),
                image("photo-1620916566398-39f1143ab7be", 600, 800),
            ],
            variations: vec![variation("v1", "Size", &["30ml", "60ml"])],
            specifications: specs(&[("Skin Type", "All types"), ("Concerns", "Blemishes, Sebum")]),
            rating: 4.8,
            reviews: Vec::new(),
            warranty: None,
            is_featured: true,
        },
        Product {
            id: "2".to_string(),
            name: "CeraVe Hydrating Facial Cleanser".to_string(),
            short_description: "Daily face wash with hyaluronic acid, ceramides and glycerin."
                .to_string(),
            description: "CeraVe Hydrating Facial Cleanser is a gentle face wash with ingredients \
                like ceramides and hyaluronic acid that work to restore the skins natural barrier \
                to help the skin lock in moisture."
                .to_string(),
            category: "skincare".to_string(),
            sub_category: "Cleansers".to_string(),
            brand: "CeraVe".to_string(),
            sku: "CV-HC-01".to_string(),
            price: Money::from_major(1450),
            sale_price: None,
            stock_count: 20,
            stock_status: StockStatus::InStock,
            images: vec![image("photo-1556228720-195a672e8a03", 600, 800)],
            variations: vec![variation("v2", "Size", &["236ml", "473ml"])],
            specifications: specs(&[("Skin Type", "Normal to Dry"), ("Texture", "Creamy")]),
            rating: 4.9,
            reviews: Vec::new(),
            warranty: None,
            is_featured: true,
        },
        Product {
            id: "3".to_string(),
            name: "MAC Matte Lipstick - Ruby Woo".to_string(),
            short_description: "The iconic product that made M·A·C famous.".to_string(),
            description: "Ruby Woo is a very bright, cool-toned red with a matte finish. It is \
                the perfect red for almost any skin tone."
                .to_string(),
            category: "makeup".to_string(),
            sub_category: "Lips".to_string(),
            brand: "MAC".to_string(),
            sku: "MAC-RW-01".to_string(),
            price: Money::from_major(2200),
            sale_price: Some(Money::from_major(1950)),
            stock_count: 15,
            stock_status: StockStatus::InStock,
            images: vec![image("photo-1586776977607-310e9c725c37", 600, 800)],
            variations: vec![variation("v3", "Shade", &["Ruby Woo", "Velvet Teddy", "Chili"])],
            specifications: specs(&[("Finish", "Matte"), ("Long-wearing", "Yes")]),
            rating: 4.7,
            reviews: Vec::new(),
            warranty: None,
            is_featured: false,
        },
        Product {
            id: "4".to_string(),
            name: "Laneige Lip Sleeping Mask".to_string(),
            short_description: "Leave-on lip mask that soothes and moisturizes.".to_string(),
            description: "A leave-on lip mask that soothes and moisturizes for smoother, more \
                supple lips overnight. Vitamin C-rich Berry Mix Complex, containing raspberry, \
                strawberry, cranberry, and blueberry extracts, erases dry, flaky dead skin on \
                the lips during the night."
                .to_string(),
            category: "skincare".to_string(),
            sub_category: "Lips".to_string(),
            brand: "Laneige".to_string(),
            sku: "LN-LM-01".to_string(),
            price: Money::from_major(1850),
            sale_price: None,
            stock_count: 5,
            stock_status: StockStatus::PreOrder,
            images: vec![image("photo-1620916566398-39f1143ab7be", 600, 800)],
            variations: vec![variation("v4", "Flavor", &["Berry", "Grapefruit", "Vanilla"])],
            specifications: specs(&[("Skin Concern", "Dryness"), ("Usage", "Overnight")]),
            rating: 4.9,
            reviews: Vec::new(),
            warranty: None,
            is_featured: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_shape() {
        let products = sample_catalog();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);

        // Every product's brand and category appear in the sidebar lists.
        let cats = categories();
        for p in &products {
            assert!(BRANDS.contains(&p.brand.as_str()), "unknown brand {}", p.brand);
            assert!(cats.iter().any(|c| c.id == p.category));
        }
    }

    #[test]
    fn test_image_urls() {
        let cats = categories();
        assert_eq!(
            cats[0].image,
            "https://images.unsplash.com/photo-1556228720-195a672e8a03?q=80&w=400&h=400&fit=crop"
        );
        assert_eq!(sample_catalog()[0].images.len(), 2);
    }
}
