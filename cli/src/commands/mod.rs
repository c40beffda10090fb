pub mod batch;
pub mod cli;
pub mod edit;
pub mod generate;
