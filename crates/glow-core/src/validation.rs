//! # Form Validation
//!
//! Checks used by the admin product form and the checkout address form.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin form ──► validate_product ──► Storefront::create_product        │
//! │  Checkout   ──► validate_address ──► Storefront::place_order           │
//! │                                                                         │
//! │  The stores trust their callers and never call these; a product that   │
//! │  skipped validation is stored as given.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use glow_core::validation::{validate_sku, validate_quantity};
//!
//! validate_sku("TO-NZ-01").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Address, Product};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, digits, hyphens and underscores only
///
/// ```rust
/// use glow_core::validation::validate_sku;
///
/// assert!(validate_sku("MAC-RW-01").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("MAC RW").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();
    required("sku", sku)?;

    if sku.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name: required, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    required("name", name)?;

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the quantity picker on the product page.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Regular price must be above zero.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// A sale price, when given, must be positive and strictly below the price.
///
/// ```rust
/// use glow_core::validation::validate_sale_price;
/// use glow_core::Money;
///
/// let price = Money::from_major(950);
/// assert!(validate_sale_price(price, Some(Money::from_major(850))).is_ok());
/// assert!(validate_sale_price(price, Some(Money::from_major(950))).is_err());
/// assert!(validate_sale_price(price, None).is_ok());
/// ```
pub fn validate_sale_price(price: Money, sale_price: Option<Money>) -> ValidationResult<()> {
    let Some(sale) = sale_price else {
        return Ok(());
    };

    if !sale.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "sale price".to_string(),
        });
    }

    if sale >= price {
        return Err(ValidationError::SalePriceNotBelowPrice {
            price: price.minor(),
            sale: sale.minor(),
        });
    }

    Ok(())
}

/// Rating must lie in 0..=5.
pub fn validate_rating(rating: f32) -> ValidationResult<()> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }
    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Everything the admin product form checks before saving.
///
/// Returns the first failure, in form order.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    required("id", &product.id)?;
    validate_product_name(&product.name)?;
    validate_sku(&product.sku)?;
    required("category", &product.category)?;
    validate_price(product.price)?;
    validate_sale_price(product.price, product.sale_price)?;
    validate_rating(product.rating)?;
    Ok(())
}

/// Shipping address on the checkout form: street and city are required.
pub fn validate_address(address: &Address) -> ValidationResult<()> {
    required("street", &address.street)?;
    required("city", &address.city)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_catalog;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("TO-NZ-01").is_ok());
        assert!(validate_sku("glow_42").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Laneige Lip Sleeping Mask").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_sale_price() {
        let price = Money::from_major(2200);
        assert_eq!(
            validate_sale_price(price, Some(Money::from_major(2500))),
            Err(ValidationError::SalePriceNotBelowPrice {
                price: 220000,
                sale: 250000
            })
        );
        assert!(validate_sale_price(price, Some(Money::zero())).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.8).is_ok());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(f32::NAN).is_err());
    }

    #[test]
    fn test_sample_products_are_valid() {
        for product in sample_catalog() {
            assert_eq!(validate_product(&product), Ok(()), "product {}", product.id);
        }
    }

    #[test]
    fn test_validate_product_reports_first_failure() {
        let mut product = sample_catalog().remove(0);
        product.name = String::new();
        product.price = Money::zero();

        assert_eq!(
            validate_product(&product),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
    }

    #[test]
    fn test_validate_address() {
        let mut address = Address {
            id: "new".to_string(),
            label: "Shipping".to_string(),
            street: "House 7, Road 2".to_string(),
            area: String::new(),
            city: "Sylhet".to_string(),
            district: "Sylhet".to_string(),
            is_default: false,
        };
        assert!(validate_address(&address).is_ok());

        address.city = " ".to_string();
        assert!(matches!(
            validate_address(&address),
            Err(ValidationError::Required { .. })
        ));
    }
}
