use anyhow::Result;

/// Work factor for hashes minted during onboarding.
pub const ONBOARDING_COST: u32 = 14;

pub fn hash(password: &str, cost: u32) -> Result<String> {
    let hashed = bcrypt::hash(password, cost)?;
    Ok(hashed)
}

pub fn verify(password: &str, hash: &str) -> Result<bool> {
    let ok = bcrypt::verify(password, hash)?;
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cost 4 keeps these tests fast; production paths use ONBOARDING_COST.
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_and_verify() {
        let hashed = hash("s3cret-pass", TEST_COST).unwrap();
        assert!(verify("s3cret-pass", &hashed).unwrap());
        assert!(!verify("wrong-pass", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash("same-input", TEST_COST).unwrap();
        let b = hash("same-input", TEST_COST).unwrap();
        assert_ne!(a, b);
    }
}
