use rust_decimal::Decimal;
use validator::ValidationError;

/// Digits, spaces and `+ - ( ) .` only
pub(crate) fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.');
    if phone.chars().all(allowed) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("Invalid phone number format".into());
        Err(err)
    }
}

pub(crate) fn validate_non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("Price must be a non-negative value".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case("+1 (555) 010-2030", true)]
    #[case("030.1234.5678", true)]
    #[case("call me", false)]
    #[case("555#1234", false)]
    fn phone_number_charset(#[case] phone: &str, #[case] ok: bool) {
        assert_eq!(validate_phone_number(phone).is_ok(), ok);
    }

    #[test]
    fn zero_price_is_allowed_negative_is_not() {
        assert!(validate_non_negative_price(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative_price(&Decimal::new(1999, 2)).is_ok());
        assert!(validate_non_negative_price(&Decimal::new(-1, 2)).is_err());
    }
}
