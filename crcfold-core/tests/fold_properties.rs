//! Integration tests for the folding engine against the table reference.

use crcfold_core::clmul::Backend;
use crcfold_core::fold::{self, MIN_FOLD_LEN};
use crcfold_core::table::update_bytewise;
use crcfold_core::{Crc64, CrcError, Crc64Dispatcher};
use proptest::collection::size_range;
use proptest::prelude::*;

/// CRC-64/XZ through the bytewise table.
fn reference(data: &[u8]) -> u64 {
    !update_bytewise(!0, data)
}

/// Continue a finalized CRC-64/XZ over more data through the bytewise table.
fn reference_from(crc: u64, data: &[u8]) -> u64 {
    !update_bytewise(!crc, data)
}

fn pseudo_random(size: usize) -> Vec<u8> {
    let mut seed: u64 = 0x123456789ABCDEF0;
    (0..size)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as u8
        })
        .collect()
}

#[test]
fn test_standard_vectors() {
    let sequential: Vec<u8> = (0u8..32).collect();
    let cases: &[(&[u8], u64)] = &[
        (b"123456789", 0x995DC9BBDF1939FA),
        (b"", 0),
        (b"hello world!", 0x8483C0FA32607D61),
        (b"123456789abcdefghijk", 0xF15A2CB8D0CFE5BC),
        (&[0; 16], 0xE9A13F17FB6A2363),
        (&[0; 32], 0xC95AF8617CD5330C),
        (&[255; 32], 0xE95DCE9EFAA09ACF),
        (&sequential, 0x7FE571A587084D10),
        (&[0; 1024], 0xC37863972069270C),
        (&[0; 4096], 0x26D3D39425EAF0A5),
        (&[255; 4096], 0x81225F948D780652),
    ];

    for (input, expected) in cases {
        assert_eq!(reference(input), *expected, "table, input {:x?}", input);
        assert_eq!(Crc64::compute(input), *expected, "compute, input {:x?}", input);
        for backend in Backend::supported() {
            let mut crc = Crc64::with_backend(backend);
            crc.update(input);
            assert_eq!(crc.finalize(), *expected, "{backend}, input {:x?}", input);
        }
    }
}

#[test]
fn test_step_is_deterministic() {
    let data = pseudo_random(4096 + 5);
    let first = fold::step(0x0123_4567_89AB_CDEF, &data, data.len() as u32).unwrap();
    for _ in 0..8 {
        let again = fold::step(0x0123_4567_89AB_CDEF, &data, data.len() as u32).unwrap();
        assert_eq!(again, first);
    }
}

#[test]
fn test_step_zero_block() {
    let data = [0u8; 32];
    assert_eq!(fold::step(0, &data, 32).unwrap(), 0xC95AF8617CD5330C);
}

#[test]
fn test_step_minimum_length() {
    let data = [0xA5u8; 16];
    assert_eq!(
        fold::step(0, &data, MIN_FOLD_LEN as u32).unwrap(),
        reference(&data)
    );

    let err = fold::step(0, &data, 15).unwrap_err();
    assert!(matches!(
        err,
        CrcError::LengthTooShort {
            length: 15,
            minimum: 16
        }
    ));

    let err = fold::step(0, &data, 17).unwrap_err();
    assert!(matches!(err, CrcError::LengthOutOfBounds { .. }));
}

#[test]
fn test_step_one_mebibyte() {
    let data = pseudo_random(1024 * 1024);
    let expected = reference(&data);
    for backend in Backend::supported() {
        let crc = fold::step_on(backend, 0, &data, data.len() as u32).unwrap();
        assert_eq!(crc, expected, "backend {backend}");
    }
}

#[test]
fn test_step_seed_sensitivity() {
    let data = pseudo_random(256);
    let a = fold::step(0, &data, 256).unwrap();
    let b = fold::step(1, &data, 256).unwrap();
    let c = fold::step(u64::MAX, &data, 256).unwrap();
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_ne!(b, c);
}

#[test]
fn test_dispatcher_software_only_matches() {
    let data = pseudo_random(10_000);
    let software = Crc64::with_dispatcher(Crc64Dispatcher::software_only());
    let mut crc = software.clone();
    crc.update(&data);
    assert_eq!(crc.finalize(), reference(&data));
    assert_eq!(software.implementation_name(), "slicing-by-8");
}

fn any_buffer() -> <Box<[u8]> as Arbitrary>::Strategy {
    any_with::<Box<[u8]>>(size_range(..16384).lift())
}

prop_compose! {
    fn fold_split()
        (bytes in any_with::<Box<[u8]>>(size_range(32..8192).lift()))
        (split in MIN_FOLD_LEN..=bytes.len() - MIN_FOLD_LEN, bytes in Just(bytes))
        -> (Box<[u8]>, usize)
    {
        (bytes, split)
    }
}

prop_compose! {
    fn bytes_and_split_index()
        (bytes in any_buffer())
        (index in 0..=bytes.len(), bytes in Just(bytes)) -> (Box<[u8]>, usize)
    {
        (bytes, index)
    }
}

proptest! {
    #[test]
    fn step_matches_table(seed in any::<u64>(), bytes in any_with::<Box<[u8]>>(size_range(16..4096).lift())) {
        let crc = fold::step(seed, &bytes, bytes.len() as u32).unwrap();
        prop_assert_eq!(crc, reference_from(seed, &bytes));
    }

    #[test]
    fn step_split_equivalence((bytes, split) in fold_split()) {
        let (left, right) = bytes.split_at(split);
        let whole = fold::step(0, &bytes, bytes.len() as u32).unwrap();
        let first = fold::step(0, left, left.len() as u32).unwrap();
        let chained = fold::step(first, right, right.len() as u32).unwrap();
        prop_assert_eq!(whole, chained);
    }

    #[test]
    fn concatenation((bytes, split_index) in bytes_and_split_index()) {
        let mut hasher_1 = Crc64::new();
        hasher_1.update(&bytes);
        let mut hasher_2 = Crc64::new();
        let (left, right) = bytes.split_at(split_index);
        hasher_2.update(left);
        hasher_2.update(right);
        prop_assert_eq!(hasher_1.value(), hasher_2.value());
        prop_assert_eq!(
            Crc64::combine(Crc64::compute(left), Crc64::compute(right), right.len() as u64),
            hasher_1.value()
        );
    }

    #[test]
    fn state_cloning(left in any_buffer(), right in any_buffer()) {
        let mut hasher_1 = Crc64::new();
        hasher_1.update(&left);
        let mut hasher_2 = hasher_1.clone();
        hasher_1.update(&right);
        hasher_2.update(&right);
        prop_assert_eq!(hasher_1.value(), hasher_2.value());
    }
}
