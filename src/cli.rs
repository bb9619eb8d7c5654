pub mod check;
pub mod groceries;
pub mod plan;
