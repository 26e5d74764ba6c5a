use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generates a random alphanumeric identifier of the given length.
///
/// Identifiers draw from `[a-zA-Z0-9]`, so a 32 character id carries about 190 bits of
/// randomness. Uniqueness is not checked against any collection here; the store's
/// duplicate check catches the (negligible) collision case.
pub fn generate_id(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
