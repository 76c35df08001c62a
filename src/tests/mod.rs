mod common;

mod atomic_file_write;
mod token_request_form;
