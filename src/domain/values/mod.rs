pub mod cik;
pub mod form_type;
pub mod item_budget;
pub mod sentiment;
