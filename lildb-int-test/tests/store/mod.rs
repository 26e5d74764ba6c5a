mod persistence_test;
mod save_as_test;
