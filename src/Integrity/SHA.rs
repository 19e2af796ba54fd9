pub mod SHA1;

#[cfg(test)]
mod tests;
