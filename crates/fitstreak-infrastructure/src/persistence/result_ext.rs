use fitstreak_domain::shared::DomainError;

/// Extension trait for mapping driver errors into `DomainError`
pub trait ResultExt<T, E> {
    /// Usage: `result.to_repo_err()?`
    fn to_repo_err(self) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_repo_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Repository(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_repo_err() {
        let result: Result<i32, &str> = Err("pool timed out");
        match result.to_repo_err() {
            Err(DomainError::Repository(msg)) => assert_eq!(msg, "pool timed out"),
            _ => panic!("Expected Repository error"),
        }
    }

    #[test]
    fn test_to_repo_err_passes_ok_through() {
        let result: Result<i32, &str> = Ok(3);
        assert_eq!(result.to_repo_err().unwrap(), 3);
    }
}
