use crate::modules::student::model::Student;
use crate::store::{StoreError, StoreHandle};

#[derive(Debug, thiserror::Error)]
pub enum StudentError {
    #[error("A student with this email already exists in the class")]
    DuplicateEmail,

    #[error("Invalid verification token")]
    InvalidToken,

    #[error("Student already verified")]
    AlreadyVerified,
}

pub struct StudentCrud {
    store: StoreHandle,
}

impl StudentCrud {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Insert a freshly enrolled student. Uniqueness on (email, class_id)
    /// is checked and committed under one lock, so two concurrent
    /// enrollments with the same email cannot both land.
    pub async fn create(&self, student: Student) -> Result<(), StudentError> {
        let email = student.email.clone();
        let class_id = student.class_id.clone();
        self.store
            .students
            .insert_unique(student, |existing| {
                existing.email == email && existing.class_id == class_id
            })
            .await
            .map_err(|StoreError::Duplicate| StudentError::DuplicateEmail)
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Student> {
        self.store.students.get(id).await
    }

    pub async fn find_by_class(&self, class_id: &str) -> Vec<Student> {
        let mut students = self
            .store
            .students
            .find_all(|s| s.class_id == class_id)
            .await;
        students.sort_by(|a, b| a.roll_no.cmp(&b.roll_no));
        students
    }

    /// Redeem a verification token: binds the device fingerprint and subnet
    /// observed on the redeeming request and clears the token, all under
    /// one write lock. Of N concurrent redemptions of the same token
    /// exactly one wins; the rest see the token already gone.
    ///
    /// The caller must have derived a network identity before redeeming; a
    /// verified student always carries a bound device and subnet.
    pub async fn redeem_token(
        &self,
        token: &str,
        device_id: &str,
        ip_address: &str,
        subnet: &str,
    ) -> Result<Student, StudentError> {
        let updated = self
            .store
            .students
            .update_where(
                |s| s.verification_token.as_deref() == Some(token) && !s.is_verified,
                |s| {
                    s.is_verified = true;
                    s.verified_device_id = Some(device_id.to_string());
                    s.verified_ip_address = Some(ip_address.to_string());
                    s.verified_subnet = Some(subnet.to_string());
                    s.verification_token = None;
                },
            )
            .await;

        match updated {
            Some(student) => Ok(student),
            None => {
                // The token was either never issued or already consumed. A
                // record still holding the token but marked verified would
                // violate the one-shot invariant; report it as a replay.
                let holder = self
                    .store
                    .students
                    .find(|s| s.verification_token.as_deref() == Some(token))
                    .await;
                match holder {
                    Some(_) => Err(StudentError::AlreadyVerified),
                    None => Err(StudentError::InvalidToken),
                }
            }
        }
    }

    /// Delete a student and cascade to their attendance log entries.
    pub async fn delete(&self, id: &str) -> Option<Student> {
        let student = self.store.students.delete(id).await?;
        let removed = self.store.logs.delete_where(|l| l.student_id == id).await;
        tracing::debug!(student_id = id, removed, "cascaded student log entries");
        Some(student)
    }
}
