pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[macro_export]
macro_rules! verify_bounds {
    ($index:expr, $len:expr) => {{
        $crate::result::verify_bounds($index, $len)?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[inline]
pub fn verify_bounds(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        index_out_of_bounds(index, len)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
pub fn index_out_of_bounds(index: usize, len: usize) -> Result<()> {
    Err(crate::error::ErrorKind::IndexOutOfBounds { index, len }.into())
}
