pub mod check;
pub mod dump;
pub mod input;
pub mod lane;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod test_utils;
