use core::fmt::Debug;

use crate::error::Error;

pub fn assert_eq<T: Eq + Debug + ?Sized>(message: &str, left: &T, right: &T) -> Result<(), Error> {
    if left == right {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "expect left ({:?}) to be equal to right ({:?}): {}",
            left, right, message
        )))
    }
}

pub fn assert_gt<T: Ord + Debug>(message: &str, left: &T, right: &T) -> Result<(), Error> {
    if left > right {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "expect left ({:?}) to be greater than right ({:?}): {}",
            left, right, message
        )))
    }
}

pub fn assert_empty<T: Debug>(message: &str, items: &[T]) -> Result<(), Error> {
    if items.is_empty() {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "expect {:?} to be empty: {}",
            items, message
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_failures_are_errors() {
        assert!(assert_eq("same", &1, &1).is_ok());
        assert!(assert_eq("different", "a", "b").is_err());
        assert!(assert_gt("bigger", &2, &1).is_ok());
        assert!(assert_gt("smaller", &1, &2).is_err());
        assert!(assert_empty::<u8>("empty", &[]).is_ok());
        assert!(assert_empty("not empty", &[1]).is_err());
    }
}
