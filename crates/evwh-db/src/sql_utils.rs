//! SQL identifier quoting
//!
//! Warehouse column names such as `vin_1-10` and `2020_census_tract` are not
//! valid bare identifiers, so every generated statement quotes them.

/// Quote a SQL identifier, doubling embedded double quotes.
///
/// # Examples
/// ```
/// use evwh_db::sql_utils::quote_ident;
/// assert_eq!(quote_ident("vin_1-10"), r#""vin_1-10""#);
/// assert_eq!(quote_ident(r#"my"table"#), r#""my""table""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_simple() {
        assert_eq!(quote_ident("dim_vehicle"), r#""dim_vehicle""#);
    }

    #[test]
    fn test_quote_ident_leading_digit() {
        assert_eq!(quote_ident("2020_census_tract"), r#""2020_census_tract""#);
    }

    #[test]
    fn test_quote_ident_with_embedded_quotes() {
        assert_eq!(quote_ident(r#"a"b"#), r#""a""b""#);
    }
}
