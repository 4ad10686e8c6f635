pub mod allocator;
pub mod sorter;
