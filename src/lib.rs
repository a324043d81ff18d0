pub mod adapters;
pub mod app;
pub mod domain;
pub mod view;

#[cfg(test)]
mod test_support;
