pub mod customer_reader;
