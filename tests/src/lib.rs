#![cfg(test)]

mod check;
mod util;
