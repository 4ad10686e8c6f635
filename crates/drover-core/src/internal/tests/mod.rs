mod test_sorter;

pub mod utils;
