#![allow(dead_code)]

pub mod builders;

#[allow(unused_imports)]
pub use builders::*;
