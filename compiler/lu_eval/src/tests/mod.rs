#![allow(clippy::unwrap_used)]

mod unary_operators_tests;
