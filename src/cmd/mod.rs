pub mod holidays;
pub mod root;
pub mod status;
