//! Property-based tests for the invoice total calculator.
//!
//! Run with: `cargo test -p nimbus-core --test invoice_properties`

use chrono::{NaiveDate, Utc};
use nimbus_core::invoice::{calculate_totals, InvoiceDraft, LineItem};
use nimbus_core::validation::validate_non_negative;
use nimbus_core::{Money, Product, MAX_AMOUNT, MAX_INVOICE_LINES, MAX_ITEM_QUANTITY};
use proptest::prelude::*;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Amounts from 0.00 to 99 999.99.
fn arb_amount() -> impl Strategy<Value = Money> {
    (0i64..10_000_000).prop_map(Money::from_cents)
}

/// Anything the validators accept, up to the limit itself.
fn arb_accepted_amount() -> impl Strategy<Value = Money> {
    prop_oneof![
        (0..=MAX_AMOUNT.cents()).prop_map(Money::from_cents),
        Just(MAX_AMOUNT),
    ]
}

fn arb_line() -> impl Strategy<Value = LineItem> {
    (arb_amount(), 1i64..=MAX_ITEM_QUANTITY, arb_amount(), arb_amount()).prop_map(
        |(unit_price, quantity, tax, discount)| LineItem {
            product_id: Some("p".to_string()),
            quantity,
            unit_price,
            tax,
            discount,
        },
    )
}

fn product(price_cents: i64) -> Product {
    Product {
        id: "p".to_string(),
        name: "Widget".to_string(),
        description: None,
        price_cents,
        stock: 1,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

proptest! {
    #[test]
    fn total_is_subtotal_plus_tax_minus_discount(lines in prop::collection::vec(arb_line(), 0..30)) {
        let totals = calculate_totals(&lines);
        prop_assert_eq!(totals.total, totals.subtotal + totals.tax - totals.discount);
    }

    #[test]
    fn invoice_total_equals_sum_of_line_totals(lines in prop::collection::vec(arb_line(), 0..30)) {
        let totals = calculate_totals(&lines);
        let line_sum: Money = lines.iter().map(LineItem::line_total).sum();
        prop_assert_eq!(totals.total, line_sum);
    }

    #[test]
    fn sums_are_componentwise(lines in prop::collection::vec(arb_line(), 1..30)) {
        let totals = calculate_totals(&lines);
        let subtotal: Money = lines.iter().map(|l| l.unit_price * l.quantity).sum();
        let tax: Money = lines.iter().map(|l| l.tax).sum();
        let discount: Money = lines.iter().map(|l| l.discount).sum();
        prop_assert_eq!(totals.subtotal, subtotal);
        prop_assert_eq!(totals.tax, tax);
        prop_assert_eq!(totals.discount, discount);
    }

    #[test]
    fn order_does_not_matter(mut lines in prop::collection::vec(arb_line(), 0..30)) {
        let before = calculate_totals(&lines);
        lines.reverse();
        prop_assert_eq!(calculate_totals(&lines), before);
    }

    #[test]
    fn selected_product_tax_is_ten_percent_of_unit_price(price in 0i64..10_000_000, qty in 1i64..100) {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut draft = InvoiceDraft::new("INV", date, None);
        draft.add_product_line(&product(price), qty).unwrap();

        let line = &draft.lines()[0];
        // |tax − price/10| ≤ half a cent
        prop_assert!((line.tax.cents() * 10 - price).abs() <= 5);
        prop_assert_eq!(draft.totals().subtotal.cents(), price * qty);
    }

    #[test]
    fn amounts_round_trip_through_text(cents in -10_000_000i64..10_000_000) {
        let money = Money::from_cents(cents);
        prop_assert_eq!(money.to_decimal_string().parse::<Money>().unwrap(), money);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn accepted_amounts_never_overflow_totals(
        price in arb_accepted_amount(),
        tax in arb_accepted_amount(),
        discount in arb_accepted_amount(),
        qty in 1i64..=MAX_ITEM_QUANTITY,
        lines in 1usize..=MAX_INVOICE_LINES,
    ) {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut draft = InvoiceDraft::new("INV", date, None);
        for _ in 0..lines {
            let i = draft.add_product_line(&product(price.cents()), qty).unwrap();
            draft.set_tax(i, tax).unwrap();
            draft.set_discount(i, discount).unwrap();
        }

        let n = lines as i128;
        let expected = n * (price.cents() as i128 * qty as i128 + tax.cents() as i128
            - discount.cents() as i128);
        let totals = draft.totals();
        prop_assert_eq!(totals.total.cents() as i128, expected);
        prop_assert_eq!(totals.total, totals.subtotal + totals.tax - totals.discount);
    }

    #[test]
    fn amounts_above_the_limit_are_rejected(excess in 1i64..i64::MAX - MAX_AMOUNT.cents()) {
        let amount = Money::from_cents(MAX_AMOUNT.cents() + excess);
        prop_assert!(validate_non_negative("price", amount).is_err());
        prop_assert!(amount.to_decimal_string().parse::<Money>().is_err());
    }
}

#[test]
fn empty_invoice_totals_are_zero() {
    let totals = calculate_totals(&[]);
    assert!(totals.subtotal.is_zero());
    assert!(totals.tax.is_zero());
    assert!(totals.discount.is_zero());
    assert!(totals.total.is_zero());
}
