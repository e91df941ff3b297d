pub mod checkout_reader;
