mod affordability;
mod common;
mod engine;
