pub mod engine;
pub mod evaluator;
pub mod models;
pub mod population;
pub mod progress;
pub mod selection;
pub mod settings;
pub mod utils;
