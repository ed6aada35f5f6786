pub mod dataset;
pub mod edit;
pub mod filter;
pub mod view_state;
