//! # Invoice Module
//!
//! The invoice total calculator and the draft an invoice is built in.
//!
//! ## Totals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line total = unit price × quantity + tax − discount                    │
//! │                                                                         │
//! │  subtotal   = Σ unit price × quantity                                   │
//! │  tax        = Σ tax                                                     │
//! │  discount   = Σ discount                                                │
//! │  total      = subtotal + tax − discount                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax and discount are absolute amounts per line, not rates. Selecting a
//! product pre-fills the tax with the default rate applied to one unit; the
//! user may overwrite it.
//!
//! ## Draft Lifecycle
//! ```text
//! InvoiceDraft::new ──► add_line / select_product / set_* ──► into_new_invoice
//!        │                          │                               │
//!        │                    totals() after                  validated
//!        │                    every change                   NewInvoice
//!        ▼                                                          ▼
//!   in memory only                                      nimbus-db writes it
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{NewInvoice, NewInvoiceItem, Product, TaxRate};
use crate::validation::{
    validate_identifier, validate_line_count, validate_non_negative, validate_optional_text,
    validate_quantity,
};

// =============================================================================
// Line Item
// =============================================================================

/// One line on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// `None` until a product is selected.
    pub product_id: Option<String>,
    pub quantity: i64,
    pub unit_price: Money,
    pub tax: Money,
    pub discount: Money,
}

impl LineItem {
    /// A blank line: no product, quantity 1, all amounts zero.
    pub fn blank() -> Self {
        LineItem {
            product_id: None,
            quantity: 1,
            unit_price: Money::zero(),
            tax: Money::zero(),
            discount: Money::zero(),
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn gross(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Unit price × quantity + tax − discount.
    ///
    /// ```rust
    /// use nimbus_core::invoice::LineItem;
    /// use nimbus_core::money::Money;
    ///
    /// let line = LineItem {
    ///     product_id: None,
    ///     quantity: 2,
    ///     unit_price: Money::from_cents(1000),
    ///     tax: Money::from_cents(200),
    ///     discount: Money::from_cents(100),
    /// };
    /// assert_eq!(line.line_total().cents(), 2100);
    /// ```
    #[inline]
    pub fn line_total(&self) -> Money {
        self.gross() + self.tax - self.discount
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Subtotal, tax, discount and grand total of a set of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
}

impl InvoiceTotals {
    /// Sums the given lines. An empty sequence gives all zeros.
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        let mut subtotal = Money::zero();
        let mut tax = Money::zero();
        let mut discount = Money::zero();

        for item in items {
            subtotal += item.gross();
            tax += item.tax;
            discount += item.discount;
        }

        InvoiceTotals {
            subtotal,
            tax,
            discount,
            total: subtotal + tax - discount,
        }
    }
}

/// Calculates invoice totals over `items`.
///
/// Lines whose amounts are within [`MAX_AMOUNT`](crate::MAX_AMOUNT), with at
/// most [`MAX_ITEM_QUANTITY`](crate::MAX_ITEM_QUANTITY) units and at most
/// [`MAX_INVOICE_LINES`](crate::MAX_INVOICE_LINES) of them, cannot overflow.
/// [`InvoiceDraft`] only ever holds such lines.
pub fn calculate_totals(items: &[LineItem]) -> InvoiceTotals {
    InvoiceTotals::from_items(items)
}

// =============================================================================
// Draft
// =============================================================================

/// An invoice being filled in.
///
/// Line totals and invoice totals are never stored here; they are derived
/// from the lines whenever asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    lines: Vec<LineItem>,
    tax_rate: TaxRate,
}

impl InvoiceDraft {
    pub fn new(
        invoice_number: impl Into<String>,
        date: NaiveDate,
        description: Option<String>,
    ) -> Self {
        InvoiceDraft {
            invoice_number: invoice_number.into(),
            date,
            description,
            lines: Vec::new(),
            tax_rate: TaxRate::default(),
        }
    }

    /// Overrides the rate used to pre-fill tax when a product is selected.
    pub fn with_tax_rate(mut self, rate: TaxRate) -> Self {
        self.tax_rate = rate;
        self
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends a blank line and returns its index.
    pub fn add_line(&mut self) -> CoreResult<usize> {
        validate_line_count(self.lines.len())
            .map_err(|_| CoreError::TooManyLines { max: crate::MAX_INVOICE_LINES })?;
        self.lines.push(LineItem::blank());
        Ok(self.lines.len() - 1)
    }

    pub fn remove_line(&mut self, index: usize) -> CoreResult<LineItem> {
        self.check_index(index)?;
        Ok(self.lines.remove(index))
    }

    /// Selects a product for a line.
    ///
    /// Sets the unit price to the product price, the tax to the draft's tax
    /// rate applied once to that unit price, and clears the discount. The
    /// quantity is kept.
    pub fn select_product(&mut self, index: usize, product: &Product) -> CoreResult<()> {
        let rate = self.tax_rate;
        let price = product.price();
        validate_non_negative("price", price)?;
        let line = self.line_mut(index)?;
        line.product_id = Some(product.id.clone());
        line.unit_price = price;
        line.tax = price.calculate_tax(rate);
        line.discount = Money::zero();
        Ok(())
    }

    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        self.line_mut(index)?.quantity = quantity;
        Ok(())
    }

    pub fn set_tax(&mut self, index: usize, tax: Money) -> CoreResult<()> {
        validate_non_negative("tax", tax)?;
        self.line_mut(index)?.tax = tax;
        Ok(())
    }

    pub fn set_discount(&mut self, index: usize, discount: Money) -> CoreResult<()> {
        validate_non_negative("discount", discount)?;
        self.line_mut(index)?.discount = discount;
        Ok(())
    }

    /// Adds a line for `product` with the given quantity in one step.
    pub fn add_product_line(&mut self, product: &Product, quantity: i64) -> CoreResult<usize> {
        validate_quantity(quantity)?;
        validate_non_negative("price", product.price())?;
        let index = self.add_line()?;
        self.select_product(index, product)?;
        self.set_quantity(index, quantity)?;
        Ok(index)
    }

    pub fn totals(&self) -> InvoiceTotals {
        calculate_totals(&self.lines)
    }

    /// Checks the draft can be submitted.
    pub fn validate(&self) -> CoreResult<()> {
        validate_identifier("invoice_number", &self.invoice_number)?;
        validate_optional_text("description", self.description.as_deref(), 1000)?;

        if self.lines.is_empty() {
            return Err(CoreError::EmptyInvoice);
        }

        for (index, line) in self.lines.iter().enumerate() {
            if line.product_id.is_none() {
                return Err(CoreError::LineWithoutProduct { index });
            }
            validate_quantity(line.quantity)?;
            validate_non_negative("price", line.unit_price)?;
            validate_non_negative("tax", line.tax)?;
            validate_non_negative("discount", line.discount)?;
        }

        Ok(())
    }

    /// Validates and converts the draft into records to persist.
    pub fn into_new_invoice(self) -> CoreResult<NewInvoice> {
        self.validate()?;
        let totals = self.totals();
        let description = validate_optional_text("description", self.description.as_deref(), 1000)?;

        let items = self
            .lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| -> CoreResult<NewInvoiceItem> {
                let line_total = line.line_total();
                let product_id = line
                    .product_id
                    .ok_or(CoreError::LineWithoutProduct { index })?;
                Ok(NewInvoiceItem {
                    product_id,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    tax: line.tax,
                    discount: line.discount,
                    line_total,
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(NewInvoice {
            invoice_number: self.invoice_number.trim().to_string(),
            date: self.date,
            description,
            subtotal: totals.subtotal,
            tax: totals.tax,
            discount: totals.discount,
            total: totals.total,
            items,
        })
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index >= self.lines.len() {
            return Err(CoreError::LineNotFound {
                index,
                len: self.lines.len(),
            });
        }
        Ok(())
    }

    fn line_mut(&mut self, index: usize) -> CoreResult<&mut LineItem> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(CoreError::LineNotFound { index, len })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn line(price: i64, qty: i64, tax: i64, discount: i64) -> LineItem {
        LineItem {
            product_id: Some("p".to_string()),
            quantity: qty,
            unit_price: Money::from_cents(price),
            tax: Money::from_cents(tax),
            discount: Money::from_cents(discount),
        }
    }

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: None,
            price_cents,
            stock: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_totals_reference_example() {
        let items = vec![line(1000, 2, 200, 100), line(500, 1, 50, 0)];
        let totals = calculate_totals(&items);

        assert_eq!(totals.subtotal.cents(), 2500);
        assert_eq!(totals.tax.cents(), 250);
        assert_eq!(totals.discount.cents(), 100);
        assert_eq!(totals.total.cents(), 2650);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line(1000, 2, 200, 100).line_total().cents(), 2100);
    }

    #[test]
    fn test_empty_totals_are_zero() {
        assert_eq!(calculate_totals(&[]), InvoiceTotals::default());
    }

    #[test]
    fn test_discount_may_exceed_line() {
        let totals = calculate_totals(&[line(100, 1, 0, 500)]);
        assert_eq!(totals.total.cents(), -400);
    }

    #[test]
    fn test_select_product_prefills_ten_percent_tax() {
        let mut draft = InvoiceDraft::new("INV-1", date(), None);
        let i = draft.add_line().unwrap();
        draft.set_discount(i, Money::from_cents(50)).unwrap();
        draft.set_quantity(i, 3).unwrap();

        draft.select_product(i, &product("a", 999)).unwrap();

        let line = &draft.lines()[i];
        assert_eq!(line.product_id.as_deref(), Some("a"));
        assert_eq!(line.unit_price.cents(), 999);
        assert_eq!(line.tax.cents(), 100);
        assert!(line.discount.is_zero());
        // quantity survives, tax is per unit price and not multiplied
        assert_eq!(line.quantity, 3);
        assert_eq!(draft.totals().total.cents(), 999 * 3 + 100);
    }

    #[test]
    fn test_custom_tax_rate() {
        let mut draft = InvoiceDraft::new("INV-1", date(), None).with_tax_rate(TaxRate::zero());
        draft.add_product_line(&product("a", 1000), 1).unwrap();
        assert!(draft.totals().tax.is_zero());
    }

    #[test]
    fn test_totals_follow_every_change() {
        let mut draft = InvoiceDraft::new("INV-1", date(), None);
        let a = draft.add_product_line(&product("a", 1000), 2).unwrap();
        draft.add_product_line(&product("b", 500), 1).unwrap();
        assert_eq!(draft.totals().subtotal.cents(), 2500);

        draft.set_tax(a, Money::from_cents(200)).unwrap();
        draft.set_discount(a, Money::from_cents(100)).unwrap();
        assert_eq!(draft.totals().total.cents(), 2500 + 200 + 50 - 100);

        draft.remove_line(a).unwrap();
        assert_eq!(draft.totals().subtotal.cents(), 500);
    }

    #[test]
    fn test_setters_reject_invalid_values() {
        let mut draft = InvoiceDraft::new("INV-1", date(), None);
        let i = draft.add_line().unwrap();

        assert!(matches!(
            draft.set_quantity(i, 0),
            Err(CoreError::Validation(_))
        ));
        assert!(draft.set_tax(i, Money::from_cents(-1)).is_err());
        assert!(draft.set_discount(i, Money::from_cents(-1)).is_err());
        assert!(matches!(
            draft.set_quantity(5, 1),
            Err(CoreError::LineNotFound { index: 5, len: 1 })
        ));
    }

    #[test]
    fn test_remove_line_out_of_range() {
        let mut draft = InvoiceDraft::new("INV-1", date(), None);
        assert!(matches!(
            draft.remove_line(0),
            Err(CoreError::LineNotFound { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_validate() {
        let draft = InvoiceDraft::new("INV-1", date(), None);
        assert!(matches!(draft.validate(), Err(CoreError::EmptyInvoice)));

        let mut draft = InvoiceDraft::new("INV-1", date(), None);
        draft.add_line().unwrap();
        assert!(matches!(
            draft.validate(),
            Err(CoreError::LineWithoutProduct { index: 0 })
        ));

        let mut draft = InvoiceDraft::new("  ", date(), None);
        draft.add_product_line(&product("a", 100), 1).unwrap();
        assert!(matches!(draft.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_into_new_invoice() {
        let mut draft = InvoiceDraft::new(" INV-7 ", date(), Some(" walk-in ".to_string()));
        let a = draft.add_product_line(&product("a", 1000), 2).unwrap();
        draft.set_tax(a, Money::from_cents(200)).unwrap();
        draft.set_discount(a, Money::from_cents(100)).unwrap();
        let b = draft.add_product_line(&product("b", 500), 1).unwrap();
        draft.set_tax(b, Money::from_cents(50)).unwrap();

        let invoice = draft.into_new_invoice().unwrap();

        assert_eq!(invoice.invoice_number, "INV-7");
        assert_eq!(invoice.description.as_deref(), Some("walk-in"));
        assert_eq!(invoice.subtotal.cents(), 2500);
        assert_eq!(invoice.tax.cents(), 250);
        assert_eq!(invoice.discount.cents(), 100);
        assert_eq!(invoice.total.cents(), 2650);
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.items[0].line_total.cents(), 2100);
        assert_eq!(invoice.items[1].product_id, "b");
    }

    #[test]
    fn test_line_limit() {
        let mut draft = InvoiceDraft::new("INV-1", date(), None);
        for _ in 0..crate::MAX_INVOICE_LINES {
            draft.add_line().unwrap();
        }
        assert!(matches!(
            draft.add_line(),
            Err(CoreError::TooManyLines { .. })
        ));
    }

    #[test]
    fn test_oversized_product_price_is_rejected() {
        let mut draft = InvoiceDraft::new("INV-1", date(), None);
        let huge = product("a", 9_223_372_036_854_775_800);

        let err = draft.add_product_line(&huge, 2).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(crate::error::ValidationError::TooLarge { .. })
        ));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_largest_draft_does_not_overflow() {
        let max = crate::MAX_AMOUNT;
        let mut draft = InvoiceDraft::new("INV-1", date(), None);
        for _ in 0..crate::MAX_INVOICE_LINES {
            let i = draft
                .add_product_line(&product("a", max.cents()), crate::MAX_ITEM_QUANTITY)
                .unwrap();
            draft.set_tax(i, max).unwrap();
        }

        let totals = draft.totals();
        let lines = crate::MAX_INVOICE_LINES as i64;
        assert_eq!(
            totals.subtotal.cents(),
            max.cents() * crate::MAX_ITEM_QUANTITY * lines
        );
        assert_eq!(totals.tax.cents(), max.cents() * lines);
        assert_eq!(totals.total, totals.subtotal + totals.tax - totals.discount);
    }
}
