//! Magic-bitboard sliding attack lookup.
//!
//! For each square and slider family a perfect-hash `magic` constant maps
//! every relevant occupancy subset to a unique slot in a flat attack table,
//! replacing ray walking with one multiply and one load. The tables are
//! generated on first use from a randomized search seeded deterministically,
//! then shared read-only for the life of the process.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::board::bitboard::{
    sliding_attacks, Bitboard, BISHOP_DIRECTIONS, FILE_MASKS, RANK_MASKS, ROOK_DIRECTIONS,
};
use crate::board::chess_types::{file_of, rank_of, Square};

/// Table sizes are fixed by board geometry: the sum over all squares of
/// `2^popcount(premask)` for each slider family.
const BISHOP_TABLE_SIZE: usize = 5_248;
const ROOK_TABLE_SIZE: usize = 102_400;

/// Largest per-square subset count (rook on a corner: 12 relevant bits).
const MAX_OCCUPANCIES: usize = 4_096;

/// Per-rank PRNG seeds known to converge quickly.
const MAGIC_SEEDS: [u64; 8] = [728, 10_316, 55_013, 32_803, 12_281, 15_100, 16_645, 255];

#[derive(Debug, Clone, Copy, Default)]
struct MagicEntry {
    magic: u64,
    premask: Bitboard,
    shift: u32,
    offset: usize,
}

impl MagicEntry {
    #[inline]
    fn index(&self, occupancy: Bitboard) -> usize {
        (((occupancy & self.premask).wrapping_mul(self.magic)) >> self.shift) as usize
    }
}

#[derive(Debug)]
struct MagicTables {
    bishop_entries: [MagicEntry; 64],
    rook_entries: [MagicEntry; 64],
    bishop_table: Vec<Bitboard>,
    rook_table: Vec<Bitboard>,
}

static TABLES: OnceLock<MagicTables> = OnceLock::new();

#[inline]
fn tables() -> &'static MagicTables {
    TABLES.get_or_init(build_tables)
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    let tables = tables();
    let entry = &tables.bishop_entries[square as usize];
    tables.bishop_table[entry.offset + entry.index(occupancy)]
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    let tables = tables();
    let entry = &tables.rook_entries[square as usize];
    tables.rook_table[entry.offset + entry.index(occupancy)]
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn build_tables() -> MagicTables {
    let mut bishop_table = vec![0u64; BISHOP_TABLE_SIZE];
    let mut rook_table = vec![0u64; ROOK_TABLE_SIZE];

    let bishop_entries = generate(&BISHOP_DIRECTIONS, false, &mut bishop_table);
    let rook_entries = generate(&ROOK_DIRECTIONS, true, &mut rook_table);

    MagicTables {
        bishop_entries,
        rook_entries,
        bishop_table,
        rook_table,
    }
}

/// Relevant occupancy bits for a slider on `square`. Edge squares never
/// change the attack set, except along a rook's own rank and file.
fn premask(square: Square, directions: &[(i32, i32)], is_rook: bool) -> Bitboard {
    let edges = if is_rook {
        ((RANK_MASKS[0] | RANK_MASKS[7]) & !RANK_MASKS[rank_of(square) as usize])
            | ((FILE_MASKS[0] | FILE_MASKS[7]) & !FILE_MASKS[file_of(square) as usize])
    } else {
        RANK_MASKS[0] | RANK_MASKS[7] | FILE_MASKS[0] | FILE_MASKS[7]
    };

    sliding_attacks(square, directions, 0) & !edges
}

fn generate(
    directions: &[(i32, i32)],
    is_rook: bool,
    table: &mut [Bitboard],
) -> [MagicEntry; 64] {
    let mut entries = [MagicEntry::default(); 64];
    let mut offset = 0usize;

    for square in 0..64u8 {
        let mut entry = MagicEntry {
            magic: 0,
            premask: premask(square, directions, is_rook),
            shift: 0,
            offset,
        };
        entry.shift = 64 - entry.premask.count_ones();

        // Enumerate every occupancy subset of the premask (Carry-Rippler)
        // together with its reference attack set.
        let mut occupancies = [0u64; MAX_OCCUPANCIES];
        let mut reference = [0u64; MAX_OCCUPANCIES];
        let mut size = 0usize;

        let mut occupancy: Bitboard = 0;
        loop {
            occupancies[size] = occupancy;
            reference[size] = sliding_attacks(square, directions, occupancy);
            size += 1;

            occupancy = occupancy.wrapping_sub(entry.premask) & entry.premask;
            if occupancy == 0 {
                break;
            }
        }

        // Draw sparse candidates until one maps all subsets collision-free.
        // The epoch stamps make stale table slots from failed candidates
        // distinguishable without re-zeroing.
        let mut rng = StdRng::seed_from_u64(MAGIC_SEEDS[rank_of(square) as usize]);
        let mut epoch = [0i32; MAX_OCCUPANCIES];
        let mut attempt = 0i32;

        let mut verified = 0usize;
        while verified < size {
            entry.magic = 0;
            while (entry.magic.wrapping_mul(entry.premask) >> 56).count_ones() < 6 {
                entry.magic = sparse_random(&mut rng);
            }

            attempt += 1;
            verified = 0;
            while verified < size {
                let index = entry.index(occupancies[verified]);

                if epoch[index] < attempt {
                    epoch[index] = attempt;
                    table[offset + index] = reference[verified];
                } else if table[offset + index] != reference[verified] {
                    break;
                }

                verified += 1;
            }
        }

        entries[square as usize] = entry;
        offset += 1usize << entry.premask.count_ones();
    }

    debug_assert_eq!(offset, table.len());
    entries
}

/// Few-set-bits candidate: three ANDed draws.
#[inline]
fn sparse_random(rng: &mut StdRng) -> u64 {
    rng.random::<u64>() & rng.random::<u64>() & rng.random::<u64>()
}
