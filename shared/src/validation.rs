//! Validation utilities for the FranchiseConnect platform

use rust_decimal::Decimal;

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate username (1-50 characters, no leading/trailing whitespace)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() {
        return Err("Username cannot be empty");
    }
    if username.len() > 50 {
        return Err("Username must be at most 50 characters");
    }
    if username.trim() != username {
        return Err("Username cannot start or end with whitespace");
    }
    Ok(())
}

/// Validate a business name
pub fn validate_business_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Business name cannot be empty");
    }
    if name.len() > 100 {
        return Err("Business name must be at most 100 characters");
    }
    Ok(())
}

/// Validate an investment amount (must be strictly positive)
pub fn validate_investment_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Investment amount must be greater than 0");
    }
    Ok(())
}

/// Validate an income amount (zero is allowed; negative is not)
pub fn validate_income_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Income amount cannot be negative");
    }
    Ok(())
}
