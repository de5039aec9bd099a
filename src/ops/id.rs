use uuid::Uuid;

/// Length of generated identifiers
pub const ID_LEN: usize = 8;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a short random identifier for a column or task.
///
/// Eight base-36 characters taken from a v4 UUID. Collisions are not checked.
pub fn new_id() -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(ID_LEN);
    for _ in 0..ID_LEN {
        id.push(ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }
    id
}
