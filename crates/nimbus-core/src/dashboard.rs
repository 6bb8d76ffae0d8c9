//! Dashboard statistics.
//!
//! The storage layer supplies raw counts and the sum of invoice totals; the
//! derived figures are computed here so they can be tested without a
//! database.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Invoice count and Σ invoice total, as reported by storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub invoice_count: u64,
    pub total_sales: Money,
}

impl SalesSummary {
    /// Summarizes a set of invoice totals.
    pub fn from_totals<I>(totals: I) -> Self
    where
        I: IntoIterator<Item = Money>,
    {
        totals
            .into_iter()
            .fold(SalesSummary::default(), |acc, total| SalesSummary {
                invoice_count: acc.invoice_count + 1,
                total_sales: acc.total_sales + total,
            })
    }

    /// Total sales ÷ invoice count, rounded half away from zero to the cent.
    /// Zero when there are no invoices.
    pub fn average_invoice(&self) -> Money {
        self.total_sales.divide_rounded(self.invoice_count)
    }
}

/// The figures on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub employee_count: u64,
    pub product_count: u64,
    pub invoice_count: u64,
    pub total_sales: Money,
    pub average_invoice: Money,
}

impl DashboardStats {
    pub fn compute(employee_count: u64, product_count: u64, sales: SalesSummary) -> Self {
        DashboardStats {
            employee_count,
            product_count,
            invoice_count: sales.invoice_count,
            total_sales: sales.total_sales,
            average_invoice: sales.average_invoice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_invoice() {
        let sales = SalesSummary::from_totals([1000, 2000, 501].map(Money::from_cents));
        assert_eq!(sales.invoice_count, 3);
        assert_eq!(sales.total_sales.cents(), 3501);

        let stats = DashboardStats::compute(4, 7, sales);
        assert_eq!(stats.average_invoice.cents(), 1167);
        assert_eq!(stats.employee_count, 4);
        assert_eq!(stats.product_count, 7);
    }

    #[test]
    fn test_no_invoices() {
        let stats = DashboardStats::compute(0, 0, SalesSummary::default());
        assert!(stats.total_sales.is_zero());
        assert!(stats.average_invoice.is_zero());
    }

    #[test]
    fn test_negative_totals_are_averaged() {
        let sales = SalesSummary::from_totals([Money::from_cents(-300), Money::from_cents(100)]);
        assert_eq!(sales.average_invoice().cents(), -100);
    }
}
