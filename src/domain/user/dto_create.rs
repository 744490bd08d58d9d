#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Already hashed; the repository never sees plaintext.
    pub password_hash: String,
    pub is_staff: bool,
}
