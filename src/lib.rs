pub mod cli;
pub mod gardisto;
