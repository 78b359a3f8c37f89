pub mod detail;
pub mod help;
pub mod listing;
pub mod root;
