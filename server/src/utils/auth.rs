use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

/// Hashes a password with Argon2id and a fresh random salt.
///
/// Returns the PHC string (`$argon2id$v=19$...`), which carries the salt and
/// parameters, so it's all we need to store in the credentials file.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Checks a plain-text password against a stored hash.
///
/// New hashes are Argon2, but credential files written by the old deployment hold
/// bcrypt hashes (`$2b$...`). We accept both so existing users can still log in.
/// Anything we can't parse is a mismatch, never an error.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    if is_bcrypt(hashed) {
        return bcrypt::verify(password, hashed).unwrap_or(false);
    }

    match PasswordHash::new(hashed) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

fn is_bcrypt(hashed: &str) -> bool {
    ["$2a$", "$2b$", "$2x$", "$2y$"]
        .iter()
        .any(|prefix| hashed.starts_with(prefix))
}
