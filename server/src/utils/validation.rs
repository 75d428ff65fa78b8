/// Validates a vehicle name.
///
/// The only rule is that it can't be empty. Whitespace-only names are accepted,
/// and so are duplicates; the store doesn't treat `nome` as a real key.
pub fn validate_vehicle_name(nome: &str) -> Result<(), String> {
    if nome.is_empty() {
        return Err("Nome não pode ser vazio".to_string());
    }
    Ok(())
}

/// Validates a username before it is written to the credentials file.
///
/// Rules:
/// 1. Not empty
/// 2. No ':' (it separates the username from the hash on each line)
/// 3. No line breaks (one user per line)
/// 4. No leading or trailing whitespace (lines are trimmed when read back)
pub fn validate_username(username: &str) -> Result<(), String> {
    // 1. Empty check
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }

    // 2. Separator check
    // Splitting happens on the first colon, so "a:b" would come back as user "a".
    if username.contains(':') {
        return Err("Username cannot contain ':'".to_string());
    }

    // 3. Line break check
    if username.contains('\n') || username.contains('\r') {
        return Err("Username cannot contain line breaks".to_string());
    }

    // 4. Edge whitespace check
    // " ana" would be stored as a line that reads back as "ana".
    if username.trim() != username {
        return Err("Username cannot start or end with whitespace".to_string());
    }

    Ok(())
}
