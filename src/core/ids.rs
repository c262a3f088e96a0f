//! Identifier generation for accounts and transactions

use crate::types::{AccountId, TransactionId};
use rand::Rng;

/// Fixed prefix of every account number
pub const ACCOUNT_ID_PREFIX: &str = "1000";

const TRANSACTION_ID_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `"1000"` followed by a random number in `100000..=999999`
///
/// Only 900,000 distinct values exist, so collisions become likely once a
/// store holds a few thousand accounts; callers that care check the store
/// before accepting the id.
pub fn account_id<R: Rng + ?Sized>(rng: &mut R) -> AccountId {
    format!("{}{}", ACCOUNT_ID_PREFIX, rng.gen_range(100_000..=999_999))
}

/// Nine random upper-case base-36 characters
pub fn transaction_id<R: Rng + ?Sized>(rng: &mut R) -> TransactionId {
    (0..TRANSACTION_ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_account_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let id = account_id(&mut rng);
            assert_eq!(id.len(), 10);
            assert!(id.starts_with(ACCOUNT_ID_PREFIX));
            let suffix: u32 = id[4..].parse().unwrap();
            assert!((100_000..=999_999).contains(&suffix));
        }
    }

    #[test]
    fn test_transaction_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = transaction_id(&mut rng);
        assert_eq!(id.len(), TRANSACTION_ID_LEN);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
