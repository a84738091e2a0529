use crate::core::utils::geometry::kappa_angle;
use crate::engine::frame::{ChainSpan, ProteinFrame};
use crate::engine::hbond::HBondLookup;
use crate::engine::state::{HELIX_STRIDES, HelixFlag, SecondaryStructure, SecondaryStructureMap};
use tracing::{debug, instrument};

/// Bends are residues whose backbone turns by more than this many degrees.
const BEND_THRESHOLD: f64 = 70.0;

/// Assigns helices, turns and bends chain by chain. Runs after the beta sheet stage;
/// alpha helices overwrite strands, the other classes only fill what is still free.
#[instrument(skip_all, name = "helix_task")]
pub fn run<L: HBondLookup>(
    frame: &ProteinFrame,
    bonds: &L,
    prefer_pi_helices: bool,
    map: &mut SecondaryStructureMap,
) {
    for chain in frame.chains() {
        mark_turns(chain, bonds, map);
        mark_bends(frame, chain, map);
        assign_helices(chain, prefer_pi_helices, map);
        fill_turns_and_bends(chain, map);
    }

    debug!(
        helical = map.structures.iter().filter(|s| s.is_helix()).count(),
        "Assigned helices."
    );
}

/// Records Start/Middle/End flags of every `n`-turn, the bond from `i + n` to `i`.
fn mark_turns<L: HBondLookup>(chain: &ChainSpan, bonds: &L, map: &mut SecondaryStructureMap) {
    let flags = &mut map.helix_flags;
    for stride in HELIX_STRIDES {
        if chain.len < stride {
            break;
        }

        for local in 0..chain.protein_len.saturating_sub(stride) {
            let i = chain.start + local;
            if !bonds.is_bond(i + stride, i) {
                continue;
            }

            flags.set(stride, i + stride, HelixFlag::End);
            for middle in i + 1..i + stride {
                if flags.get(stride, middle).is_none() {
                    flags.set(stride, middle, HelixFlag::Middle);
                }
            }
            let start = if flags.get(stride, i) == Some(HelixFlag::End) {
                HelixFlag::StartAndEnd
            } else {
                HelixFlag::Start
            };
            flags.set(stride, i, start);
        }
    }
}

fn mark_bends(frame: &ProteinFrame, chain: &ChainSpan, map: &mut SecondaryStructureMap) {
    let ca = |i: usize| frame.residues()[i].backbone.ca;
    for local in 2..chain.protein_len.saturating_sub(2) {
        let i = chain.start + local;
        map.bends[i] = match (ca(i - 2), ca(i), ca(i + 2)) {
            (Some(prev), Some(center), Some(next)) => {
                kappa_angle(&prev, &center, &next).is_some_and(|kappa| kappa > BEND_THRESHOLD)
            }
            _ => false,
        };
    }
}

fn is_free(s: SecondaryStructure) -> bool {
    s == SecondaryStructure::Loop
}

/// Writes `class` over `len` residues from `first` when every one passes `allowed`.
fn place_if(
    map: &mut SecondaryStructureMap,
    first: usize,
    len: usize,
    class: SecondaryStructure,
    allowed: impl Fn(SecondaryStructure) -> bool,
) {
    let span = first..first + len;
    if map.structures[span.clone()].iter().all(|&s| allowed(s)) {
        map.structures[span].fill(class);
    }
}

fn assign_helices(chain: &ChainSpan, prefer_pi_helices: bool, map: &mut SecondaryStructureMap) {
    let n = chain.protein_len;
    // Two consecutive n-turn starts make a minimal helix of n residues from the second.
    let paired = |map: &SecondaryStructureMap, stride: usize, i: usize| {
        map.helix_flags.is_start(stride, i) && map.helix_flags.is_start(stride, i - 1)
    };

    for local in (1..n).take_while(|local| local + 4 < n) {
        let i = chain.start + local;
        if paired(map, 4, i) {
            map.structures[i..=i + 3].fill(SecondaryStructure::AlphaHelix);
        }
    }

    for local in (1..n).take_while(|local| local + 3 < n) {
        let i = chain.start + local;
        if paired(map, 3, i) {
            place_if(map, i, 3, SecondaryStructure::ThreeTenHelix, |s| {
                is_free(s) || s == SecondaryStructure::ThreeTenHelix
            });
        }
    }

    for local in (1..n).take_while(|local| local + 5 < n) {
        let i = chain.start + local;
        if paired(map, 5, i) {
            place_if(map, i, 5, SecondaryStructure::PiHelix, |s| {
                is_free(s)
                    || s == SecondaryStructure::PiHelix
                    || (prefer_pi_helices && s == SecondaryStructure::AlphaHelix)
            });
        }
    }
}

fn fill_turns_and_bends(chain: &ChainSpan, map: &mut SecondaryStructureMap) {
    for local in (1..chain.protein_len).take_while(|local| local + 1 < chain.protein_len) {
        let i = chain.start + local;
        if !is_free(map.structures[i]) {
            continue;
        }

        let in_turn = HELIX_STRIDES.iter().any(|&stride| {
            (1..stride).any(|k| local >= k && map.helix_flags.is_start(stride, i - k))
        });

        if in_turn {
            map.structures[i] = SecondaryStructure::Turn;
        } else if map.bends[i] {
            map.structures[i] = SecondaryStructure::Bend;
        }
    }
}
