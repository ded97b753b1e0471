//! `SeaORM` Entity, hand-maintained to match the `migration` crate

pub mod prelude;

pub mod task;
