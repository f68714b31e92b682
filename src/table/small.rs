//! Compressed tables: every 26th power of five plus `5^0..5^25`.
//!
//! An entry `5^i` with `i = 26k + r` is rebuilt as `5^(26k) * 5^r`, rescaled
//! to 125 bits. Truncation makes the result come out up to 3 too small, so a
//! 2-bit correction per index is stored in `POW5_OFFSETS` and
//! `POW5_INV_OFFSETS` (16 corrections per `u32`, lowest index first).

use super::{pow5_bits, Pow5Table, TableEntry, POW5_BASE, POW5_INV_MAX_INDEX, POW5_MAX_INDEX};
use mul::{shift_right_128, umul128};

/// Distance between two entries of the split tables.
const SPLIT_STEP: u32 = 26;

/// Power-of-five provider backed by compressed tables (~1 KB).
#[derive(Debug, Copy, Clone)]
pub struct SmallTable;

impl Pow5Table for SmallTable {
    fn pow5(i: u32) -> TableEntry {
        debug_assert!(i <= POW5_MAX_INDEX, "5^{} out of table range", i);

        let base = i / SPLIT_STEP;
        let base2 = base * SPLIT_STEP;
        let mul = TableEntry::from_pair(POW5_SPLIT[base as usize]);
        let offset = i - base2;
        if offset == 0 {
            return mul;
        }

        let m = POW5_BASE[offset as usize];
        let delta = pow5_bits(i) - pow5_bits(base2);
        mul_shift_192(mul, m, delta).add_low(correction(&POW5_OFFSETS, i))
    }

    fn pow5_inv(i: u32) -> TableEntry {
        debug_assert!(i <= POW5_INV_MAX_INDEX, "5^-{} out of table range", i);

        // Round the split index up: 5^-i = 5^-(26k) * 5^(26k - i)
        let base = (i + SPLIT_STEP - 1) / SPLIT_STEP;
        let base2 = base * SPLIT_STEP;
        let mul = TableEntry::from_pair(POW5_INV_SPLIT[base as usize]);
        let offset = base2 - i;
        if offset == 0 {
            return mul;
        }

        // The split entries are rounded up by one; undo that before scaling.
        let mul = TableEntry::new(mul.low.wrapping_sub(1), mul.high - (mul.low == 0) as u64);
        let m = POW5_BASE[offset as usize];
        let delta = pow5_bits(base2) - pow5_bits(i);
        mul_shift_192(mul, m, delta).add_low(1 + correction(&POW5_INV_OFFSETS, i))
    }
}

/// Computes `(mul * m) >> delta`, keeping the low 128 bits of the result.
///
/// The full product has up to 192 bits, held as `high1 | sum | low0`.
fn mul_shift_192(mul: TableEntry, m: u64, delta: u32) -> TableEntry {
    let (low0, high0) = umul128(m, mul.low);
    let (low1, mut high1) = umul128(m, mul.high);
    let sum = high0.wrapping_add(low1);
    if sum < high0 {
        high1 += 1;
    }

    TableEntry::new(shift_right_128(low0, sum, delta), shift_right_128(sum, high1, delta))
}

fn correction(offsets: &[u32], i: u32) -> u64 {
    u64::from((offsets[(i / 16) as usize] >> ((i % 16) << 1)) & 3)
}

/// `5^(26k)` for `k` in `0..13`.
static POW5_SPLIT: [(u64, u64); 13] = [
    (0, 1152921504606846976),
    (0, 1490116119384765625),
    (1032610780636961552, 1925929944387235853),
    (7910200175544436838, 1244603055572228341),
    (16941905809032713930, 1608611746708759036),
    (13024893955298202172, 2079081953128979843),
    (6607496772837067824, 1343575221513417750),
    (17332926989895652603, 1736530273035216783),
    (13037379183483547984, 2244412773384604712),
    (1605989338741628675, 1450417759929778918),
    (9630225068416591280, 1874621017369538693),
    (665883850346957067, 1211445438634777304),
    (14931890668723713708, 1565756531257009982),
];

/// `5^-(26k)` for `k` in `0..15`.
static POW5_INV_SPLIT: [(u64, u64); 15] = [
    (1, 2305843009213693952),
    (5955668970331000884, 1784059615882449851),
    (8982663654677661702, 1380349269358112757),
    (7286864317269821294, 2135987035920910082),
    (7005857020398200553, 1652639921975621497),
    (17965325103354776697, 1278668206209430417),
    (8928596168509315048, 1978643211784836272),
    (10075671573058298858, 1530901034580419511),
    (597001226353042382, 1184477304306571148),
    (1527430471115325346, 1832889850782397517),
    (12533209867169019542, 1418129833677084982),
    (5577825024675947042, 2194449627517475473),
    (11006974540203867551, 1697873161311732311),
    (10313493231639821582, 1313665730009899186),
    (12701016819766672773, 2032799256770390445),
];

static POW5_OFFSETS: [u32; 21] = [
    0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x40000000, 0x59695995, 0x55545555, 0x56555515,
    0x41150504, 0x40555410, 0x44555145, 0x44504540, 0x45555550, 0x40004000, 0x96440440, 0x55565565,
    0x54454045, 0x40154151, 0x55559155, 0x51405555, 0x00000105,
];

static POW5_INV_OFFSETS: [u32; 22] = [
    0x54544554, 0x04055545, 0x10041000, 0x00400414, 0x40010000, 0x41155555, 0x00000454, 0x00010044,
    0x40000000, 0x44000041, 0x50454450, 0x55550054, 0x51655554, 0x40004000, 0x01000001, 0x00010500,
    0x51515411, 0x05555554, 0x50411500, 0x40040000, 0x05040110, 0x00000000,
];
