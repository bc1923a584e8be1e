pub mod error;
pub mod form;
pub mod request_controller;
pub mod terminal;
pub mod transport;

#[cfg(test)]
mod test_support;
