pub mod media;

#[cfg(test)]
pub mod test_helpers;
