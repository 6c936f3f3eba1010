//! Fixed proof-of-work test vectors.

use color_eyre::eyre::Report;

use mkt_chain::{
    block::Hash,
    parameters::{Network, NetworkParameters},
    work::difficulty::{CompactDifficulty, ExpandedDifficulty, U256},
};

use crate::{block::check::check_proof_of_work, error::PowError};

/// Returns the hash that has the same integer value as `value`.
fn hash_from_u256(value: U256) -> Hash {
    let mut bytes = [0; 32];
    value.to_little_endian(&mut bytes);
    Hash(bytes)
}

#[test]
fn hash_at_threshold_boundary() -> Result<(), Report> {
    mkt_test::init();

    for network in Network::iter() {
        let parameters = network.parameters();
        let difficulty_threshold = parameters.genesis_difficulty_threshold();
        let target = U256::from(
            difficulty_threshold
                .to_expanded()
                .expect("genesis thresholds are valid"),
        );

        check_proof_of_work(&hash_from_u256(U256::zero()), difficulty_threshold, &parameters)?;
        check_proof_of_work(&hash_from_u256(target - 1), difficulty_threshold, &parameters)?;

        // Equal hashes pass
        check_proof_of_work(&hash_from_u256(target), difficulty_threshold, &parameters)?;

        let hash = hash_from_u256(target + 1);
        assert_eq!(
            check_proof_of_work(&hash, difficulty_threshold, &parameters),
            Err(PowError::HashExceedsTarget {
                hash,
                difficulty_threshold,
            })
        );

        let hash = Hash([0xff; 32]);
        assert_eq!(
            check_proof_of_work(&hash, difficulty_threshold, &parameters),
            Err(PowError::HashExceedsTarget {
                hash,
                difficulty_threshold,
            })
        );
    }

    Ok(())
}

#[test]
fn hash_byte_order() -> Result<(), Report> {
    mkt_test::init();

    let parameters = Network::Mainnet.parameters();
    let difficulty_threshold = CompactDifficulty::from_bits(0x1d00_ffff);

    // The last byte is the most significant.
    let mut bytes = [0xff; 32];
    bytes[26..].fill(0x00);
    check_proof_of_work(&Hash(bytes), difficulty_threshold, &parameters)?;

    // The first byte is the least significant.
    let mut bytes = [0x00; 32];
    bytes[0] = 0xff;
    bytes[31] = 0x01;
    assert!(matches!(
        check_proof_of_work(&Hash(bytes), difficulty_threshold, &parameters),
        Err(PowError::HashExceedsTarget { .. })
    ));

    Ok(())
}

#[test]
fn invalid_thresholds_are_rejected() {
    mkt_test::init();

    let parameters = Network::Mainnet.parameters();
    let hash = Hash([0; 32]);

    for bits in [
        // Zero
        0x0000_0000,
        0x0100_3456,
        0x0300_0000,
        // Every mantissa bit is shifted out of range
        0x2300_0000,
        // Negative
        0x01fe_dcba,
        0x0492_3456,
        0x1e8f_ffff,
        // Overflow
        0xff12_3456,
        0x2300_0100,
        0x2201_0000,
    ] {
        let difficulty_threshold = CompactDifficulty::from_bits(bits);

        assert_eq!(
            check_proof_of_work(&hash, difficulty_threshold, &parameters),
            Err(PowError::BadRange(difficulty_threshold)),
            "unexpected result for {difficulty_threshold:?}",
        );
    }
}

#[test]
fn skip_pow_check_accepts_any_hash() -> Result<(), Report> {
    mkt_test::init();

    let zero = CompactDifficulty::from_bits(0);
    let hash = Hash([0xff; 32]);

    for network in [Network::Regtest, Network::Unittest] {
        assert_eq!(
            check_proof_of_work(&hash, zero, &network.parameters()),
            Err(PowError::BadRange(zero))
        );

        let parameters = NetworkParameters::build(network)
            .skip_pow_check(true)
            .finish()?;

        check_proof_of_work(&hash, zero, &parameters)?;
        check_proof_of_work(&hash, CompactDifficulty::from_bits(0xff12_3456), &parameters)?;
        check_proof_of_work(&hash, CompactDifficulty::from_bits(0x0100_0001), &parameters)?;
    }

    Ok(())
}

#[test]
fn smallest_threshold() -> Result<(), Report> {
    mkt_test::init();

    let parameters = Network::Mainnet.parameters();
    let one = ExpandedDifficulty::from(U256::one()).to_compact();
    assert_eq!(one, CompactDifficulty::from_bits(0x0101_0000));

    check_proof_of_work(&hash_from_u256(U256::zero()), one, &parameters)?;
    check_proof_of_work(&hash_from_u256(U256::one()), one, &parameters)?;
    assert!(check_proof_of_work(&hash_from_u256(U256::from(2)), one, &parameters).is_err());

    Ok(())
}
