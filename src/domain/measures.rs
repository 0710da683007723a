use bigdecimal::BigDecimal;
use chrono::NaiveDate;

/// Money measures derived from one order line.
///
/// All three are exact decimals, so `gross_revenue == discount_amount + net_revenue`
/// holds without tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMeasures {
    pub gross_revenue: BigDecimal,
    pub discount_amount: BigDecimal,
    pub net_revenue: BigDecimal,
}

impl LineMeasures {
    /// `discount` is a fraction of gross revenue (0.15 means 15 %).
    pub fn compute(unit_price: &BigDecimal, quantity: i32, discount: &BigDecimal) -> Self {
        let gross_revenue = unit_price * &BigDecimal::from(quantity);
        let discount_amount = &gross_revenue * discount;
        let net_revenue = &gross_revenue - &discount_amount;
        Self {
            gross_revenue,
            discount_amount,
            net_revenue,
        }
    }
}

/// Calendar days between order placement and shipment, `None` until shipped.
pub fn days_to_ship(order_date: Option<NaiveDate>, shipped_date: Option<NaiveDate>) -> Option<i32> {
    match (order_date, shipped_date) {
        (Some(ordered), Some(shipped)) => i32::try_from((shipped - ordered).num_days()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
    }

    #[test]
    fn gross_is_price_times_quantity() {
        let m = LineMeasures::compute(&dec("10"), 2, &dec("0.1"));
        assert_eq!(m.gross_revenue, dec("20"));
        assert_eq!(m.discount_amount, dec("2"));
        assert_eq!(m.net_revenue, dec("18"));
    }

    #[test]
    fn zero_discount_leaves_net_equal_to_gross() {
        let m = LineMeasures::compute(&dec("20"), 1, &dec("0"));
        assert_eq!(m.discount_amount, dec("0"));
        assert_eq!(m.net_revenue, m.gross_revenue);
    }

    #[test]
    fn gross_splits_exactly_into_discount_and_net() {
        let lines = [
            ("14.4", 7, "0.15"),
            ("9.65", 13, "0.05"),
            ("263.5", 3, "0.25"),
            ("0.01", 1, "0.333"),
        ];
        for (price, qty, discount) in lines {
            let m = LineMeasures::compute(&dec(price), qty, &dec(discount));
            assert_eq!(
                &m.discount_amount + &m.net_revenue,
                m.gross_revenue,
                "price {price} qty {qty} discount {discount}"
            );
        }
    }

    #[test]
    fn days_to_ship_counts_calendar_days() {
        assert_eq!(
            days_to_ship(Some(date("1997-01-01")), Some(date("1997-01-05"))),
            Some(4)
        );
        assert_eq!(
            days_to_ship(Some(date("1996-12-30")), Some(date("1997-01-02"))),
            Some(3)
        );
    }

    #[test]
    fn days_to_ship_is_undefined_without_both_dates() {
        assert_eq!(days_to_ship(Some(date("1997-02-01")), None), None);
        assert_eq!(days_to_ship(None, Some(date("1997-02-01"))), None);
        assert_eq!(days_to_ship(None, None), None);
    }
}
