//! Derived ratios, KPIs and the product profitability matrix.

use sales_domain::{
    GroupBy, KpiSummary, ProductProfitability, ProfitabilityMatrix, Quadrant, QuadrantLines,
    QuickStats, SaleRecord,
};

use crate::aggregate::aggregate;

/// `numerator / denominator`, or `0.0` when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Profit as a percentage of sales.
pub fn profit_margin(profit: f64, sales: f64) -> f64 {
    ratio(profit, sales) * 100.0
}

pub fn average_order_value(sales: f64, orders: usize) -> f64 {
    ratio(sales, orders as f64)
}

pub fn average_profit_per_order(profit: f64, orders: usize) -> f64 {
    ratio(profit, orders as f64)
}

pub fn average_price(sales: f64, quantity: u64) -> f64 {
    ratio(sales, quantity as f64)
}

pub fn profit_per_unit(profit: f64, quantity: u64) -> f64 {
    ratio(profit, quantity as f64)
}

/// Middle value of `values`; the mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Headline figures for the filtered view. All ratios are `0.0` on an empty view.
pub fn kpi_summary<'a, I>(records: I) -> KpiSummary
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let (total_sales, total_profit, total_orders) = records
        .into_iter()
        .fold((0.0, 0.0, 0usize), |(sales, profit, orders), record| {
            (sales + record.sales, profit + record.profit, orders + 1)
        });
    KpiSummary {
        total_sales,
        total_profit,
        total_orders,
        average_order_value: average_order_value(total_sales, total_orders),
        profit_margin: profit_margin(total_profit, total_sales),
        average_profit_per_order: average_profit_per_order(total_profit, total_orders),
    }
}

/// Totals over every stored record, ignoring any filter.
pub fn quick_stats(records: &[SaleRecord]) -> QuickStats {
    let kpis = kpi_summary(records);
    QuickStats {
        record_count: kpis.total_orders,
        total_sales: kpis.total_sales,
        total_profit: kpis.total_profit,
        profit_margin: kpis.profit_margin,
    }
}

/// Per-product margin, average price and profit per unit, placed against the
/// median sales and median margin of the products present.
pub fn profitability_matrix<'a, I>(records: I) -> ProfitabilityMatrix
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let products = aggregate(records, GroupBy::Product);
    let margins: Vec<f64> = products
        .iter()
        .map(|row| profit_margin(row.profit, row.sales))
        .collect();
    let sales: Vec<f64> = products.iter().map(|row| row.sales).collect();
    let lines = QuadrantLines {
        median_sales: median(&sales).unwrap_or(0.0),
        median_margin: median(&margins).unwrap_or(0.0),
    };

    let rows = products
        .into_iter()
        .zip(margins)
        .map(|(row, margin)| ProductProfitability {
            product: row.key.label(),
            sales: row.sales,
            profit: row.profit,
            quantity: row.quantity,
            profit_margin: margin,
            average_price: average_price(row.sales, row.quantity),
            profit_per_unit: profit_per_unit(row.profit, row.quantity),
            quadrant: quadrant(row.sales, margin, lines),
        })
        .collect();

    ProfitabilityMatrix { rows, lines }
}

/// Values on a median line count as high.
pub fn quadrant(sales: f64, margin: f64, lines: QuadrantLines) -> Quadrant {
    match (sales >= lines.median_sales, margin >= lines.median_margin) {
        (true, true) => Quadrant::HighSalesHighMargin,
        (true, false) => Quadrant::HighSalesLowMargin,
        (false, true) => Quadrant::LowSalesHighMargin,
        (false, false) => Quadrant::LowSalesLowMargin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn record(id: u64, product: &str, sales: f64, profit: f64, quantity: u32) -> SaleRecord {
        SaleRecord {
            id,
            order_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            product: product.into(),
            customer: "Acme".into(),
            quantity,
            sales,
            profit,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio(5.0, 0.0), 0.0);
        assert_eq!(profit_margin(20.0, 100.0), 20.0);
    }

    #[test]
    fn median_handles_odd_and_even_lengths() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn kpis_on_empty_view_are_zero() {
        let kpis = kpi_summary(&Vec::<SaleRecord>::new());
        assert_eq!(kpis.total_orders, 0);
        assert_eq!(kpis.average_order_value, 0.0);
        assert_eq!(kpis.profit_margin, 0.0);
        assert_eq!(kpis.average_profit_per_order, 0.0);
    }

    #[test]
    fn kpis_sum_the_view() {
        let records = vec![
            record(1, "Widget", 100.0, 20.0, 2),
            record(2, "Widget", 200.0, 50.0, 3),
            record(3, "Gadget", 150.0, 0.0, 1),
        ];
        let kpis = kpi_summary(&records);
        assert_eq!(kpis.total_sales, 450.0);
        assert_eq!(kpis.total_profit, 70.0);
        assert_eq!(kpis.total_orders, 3);
        assert_eq!(kpis.average_order_value, 150.0);
        assert!((kpis.profit_margin - 15.555_555).abs() < 1e-4);
    }

    #[test]
    fn matrix_places_products_against_medians() {
        let records = vec![
            record(1, "Anvil", 400.0, 200.0, 4),
            record(2, "Bolt", 100.0, 50.0, 10),
            record(3, "Crate", 300.0, 30.0, 3),
        ];
        let matrix = profitability_matrix(&records);
        assert_eq!(matrix.lines.median_sales, 300.0);
        assert_eq!(matrix.lines.median_margin, 50.0);

        let anvil = &matrix.rows[0];
        assert_eq!(anvil.product, "Anvil");
        assert_eq!(anvil.average_price, 100.0);
        assert_eq!(anvil.profit_per_unit, 50.0);
        assert_eq!(anvil.quadrant, Quadrant::HighSalesHighMargin);
        assert_eq!(matrix.rows[1].quadrant, Quadrant::LowSalesHighMargin);
        assert_eq!(matrix.rows[2].quadrant, Quadrant::HighSalesLowMargin);
    }

    #[test]
    fn zero_quantity_product_has_zero_unit_metrics() {
        assert_eq!(average_price(100.0, 0), 0.0);
        assert_eq!(profit_per_unit(10.0, 0), 0.0);
    }
}
