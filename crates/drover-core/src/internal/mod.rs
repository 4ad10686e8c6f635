#[macro_use]
pub(crate) mod common;
pub mod admission;
pub mod allocator;
pub mod sorter;

#[cfg(test)]
pub mod tests;
