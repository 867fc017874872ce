//! Validation and rounding utilities for the Merchant Inventory Service

/// Decimal places used for movement quantities and shortage reporting
pub const QUANTITY_DECIMALS: u32 = 6;

/// Round a quantity to 6 decimal places
///
/// Requirements are accumulated in full double precision; rounding happens
/// only at movement creation and when reporting shortages.
pub fn round6(value: f64) -> f64 {
    let factor = 10f64.powi(QUANTITY_DECIMALS as i32);
    (value * factor).round() / factor
}

/// Validate a movement magnitude: finite and non-negative
pub fn validate_quantity(quantity: f64) -> Result<(), &'static str> {
    if !quantity.is_finite() {
        return Err("Quantity must be a finite number");
    }
    if quantity < 0.0 {
        return Err("Quantity must not be negative");
    }
    Ok(())
}

/// Validate a unit precision (decimal places meaningful for a unit)
pub fn validate_unit_precision(precision: u32) -> Result<(), &'static str> {
    if precision > QUANTITY_DECIMALS {
        return Err("Unit precision must be at most 6 decimal places");
    }
    Ok(())
}

/// Validate a waste factor: finite and non-negative
pub fn validate_waste_factor(waste_factor: f64) -> Result<(), &'static str> {
    if !waste_factor.is_finite() || waste_factor < 0.0 {
        return Err("Waste factor must be a non-negative number");
    }
    Ok(())
}
