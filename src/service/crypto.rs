use sha3::{Digest, Sha3_256};

pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha3_256::default();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    hash_password(password).eq_ignore_ascii_case(password_hash)
}
