use crate::domain::error::DomainError;
use crate::domain::model::{Identity, PassengerId};
use crate::domain::validation;

/// 乗客エンティティ
/// 生成後は変更されない
#[derive(Debug, Clone)]
pub struct Passenger {
    id: Identity<PassengerId>,
    name: String,
    email: String,
}

impl Passenger {
    fn build(id: Identity<PassengerId>, name: String, email: String) -> Result<Self, DomainError> {
        validation::not_blank(&name, "Passenger name cannot be empty or blank.")?;
        validation::not_blank(&email, "Passenger email cannot be empty or blank.")?;
        Ok(Self { id, name, email })
    }

    /// 未永続化の乗客を作成
    pub fn create(name: impl Into<String>, email: impl Into<String>) -> Result<Self, DomainError> {
        Self::build(Identity::Transient, name.into(), email.into())
    }

    /// ストアから取得したデータで乗客を再構築
    pub fn from_persistence(
        id: PassengerId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::build(Identity::Persisted(id), name.into(), email.into())
    }

    pub fn id(&self) -> Identity<PassengerId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl PartialEq for Passenger {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.id.same_as(&other.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_transient_passenger() {
        let passenger = Passenger::create("John Doe", "john.doe@example.com").unwrap();
        assert_eq!(passenger.id(), Identity::Transient);
        assert_eq!(passenger.name(), "John Doe");
        assert_eq!(passenger.email(), "john.doe@example.com");
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = Passenger::create("   ", "john.doe@example.com");
        assert_eq!(
            result.unwrap_err(),
            DomainError::InvalidArgument("Passenger name cannot be empty or blank.".to_string())
        );
    }

    #[test]
    fn test_blank_email_rejected() {
        let result = Passenger::from_persistence(PassengerId::new(1), "John Doe", "");
        assert_eq!(
            result.unwrap_err(),
            DomainError::InvalidArgument("Passenger email cannot be empty or blank.".to_string())
        );
    }

    #[test]
    fn test_identity_based_equality() {
        let a = Passenger::from_persistence(PassengerId::new(101), "John Doe", "a@example.com").unwrap();
        let b = Passenger::from_persistence(PassengerId::new(101), "Jane Roe", "b@example.com").unwrap();
        let c = Passenger::from_persistence(PassengerId::new(102), "John Doe", "a@example.com").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_transient_passengers_are_never_equal() {
        let a = Passenger::create("John Doe", "john.doe@example.com").unwrap();
        let b = a.clone();
        assert_eq!(a, a);
        assert_ne!(a, b);
    }
}
