use fitstreak_domain::shared::DomainError;

/// Wrap foreign errors raised while wiring the application
pub trait ResultExt<T, E> {
    fn to_infra_err(self) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_infra_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(format!("{:#}", e)))
    }
}
