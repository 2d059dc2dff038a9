pub mod reporting;
pub mod sku_table;
