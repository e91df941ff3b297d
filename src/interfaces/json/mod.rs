pub mod request_writer;
