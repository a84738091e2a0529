use crate::engine::frame::ProteinFrame;
use crate::engine::hbond::HBondLookup;
use crate::engine::state::{
    BetaPartner, Bridge, BridgeKind, SecondaryStructure, SecondaryStructureMap,
};
use itertools::Itertools;
use tracing::{debug, instrument, trace};

/// Chains need more protein residues than this to take part in bridges.
const MIN_BRIDGE_CHAIN_LEN: usize = 4;
/// Largest gap along `i` (and, with a bulge, along `j`) two ladders may be joined across.
const MAX_LADDER_GAP: isize = 6;
const MAX_BULGE_GAP: isize = 3;

/// Finds bridges, merges them into ladders, groups ladders into sheets and writes
/// strand and bridge codes with their beta partners into `map`.
#[instrument(skip_all, name = "beta_sheet_task")]
pub fn run<L: HBondLookup>(frame: &ProteinFrame, bonds: &L, map: &mut SecondaryStructureMap) {
    let bridges = find_bridges(frame, bonds);
    let found = bridges.len();

    let mut ladders = merge_ladders(frame, bridges);
    let sheets = group_sheets(&mut ladders);
    debug!(
        bridges = found,
        ladders = ladders.len(),
        sheets,
        "Assigned beta ladders."
    );

    assign(&ladders, map);

    ladders.sort_by_key(|ladder| ladder.ladder);
    map.ladders = ladders;
}

/// Bridge type between residues `i` and `j`, both with in-chain neighbors on either side.
pub(crate) fn test_bridge<L: HBondLookup>(bonds: &L, i: usize, j: usize) -> Option<BridgeKind> {
    let (a, b, c) = (i - 1, i, i + 1);
    let (d, e, f) = (j - 1, j, j + 1);

    if (bonds.is_bond(c, e) && bonds.is_bond(e, a)) || (bonds.is_bond(f, b) && bonds.is_bond(b, d))
    {
        Some(BridgeKind::Parallel)
    } else if (bonds.is_bond(c, d) && bonds.is_bond(f, a))
        || (bonds.is_bond(e, b) && bonds.is_bond(b, e))
    {
        Some(BridgeKind::Antiparallel)
    } else {
        None
    }
}

/// Scans every chain against itself and every later chain, growing runs of adjacent
/// bridges as they are found.
pub(crate) fn find_bridges<L: HBondLookup>(frame: &ProteinFrame, bonds: &L) -> Vec<Bridge> {
    let eligible = frame
        .chains()
        .iter()
        .filter(|chain| chain.protein_len > MIN_BRIDGE_CHAIN_LEN)
        .collect_vec();

    let mut bridges: Vec<Bridge> = Vec::new();
    for pair in eligible.iter().combinations_with_replacement(2) {
        let (chain_a, chain_b) = (pair[0], pair[1]);
        let same_chain = chain_a.start == chain_b.start;

        for li in 1..chain_a.protein_len - 1 {
            let ri = chain_a.start + li;
            // Within one chain only look forward, past the tightest possible hairpin.
            let first_j = if same_chain { li + 3 } else { 1 };

            for lj in first_j..chain_b.protein_len - 1 {
                let rj = chain_b.start + lj;
                let Some(kind) = test_bridge(bonds, ri, rj) else {
                    continue;
                };
                trace!(i = ri, j = rj, ?kind, "Found bridge.");

                let extends = |bridge: &&mut Bridge| {
                    bridge.kind == kind
                        && bridge.i.last().is_some_and(|&last| last + 1 == ri)
                        && match kind {
                            BridgeKind::Parallel => {
                                bridge.j.last().is_some_and(|&last| last + 1 == rj)
                            }
                            BridgeKind::Antiparallel => {
                                bridge.j.first().is_some_and(|&first| first == rj + 1)
                            }
                        }
                };

                if let Some(bridge) = bridges.iter_mut().find(extends) {
                    bridge.i.push(ri);
                    match kind {
                        BridgeKind::Parallel => bridge.j.push(rj),
                        BridgeKind::Antiparallel => bridge.j.insert(0, rj),
                    }
                } else {
                    bridges.push(Bridge {
                        kind,
                        i: vec![ri],
                        j: vec![rj],
                        chain_i: frame.residues()[ri].chain,
                        chain_j: frame.residues()[rj].chain,
                        ladder: 0,
                        sheet: 0,
                    });
                }
            }
        }
    }

    bridges
}

fn ends(indices: &[usize]) -> (usize, usize) {
    (
        indices.first().copied().unwrap_or_default(),
        indices.last().copied().unwrap_or_default(),
    )
}

/// Whether `later` continues `earlier` across at most a small bulge.
fn can_merge(frame: &ProteinFrame, earlier: &Bridge, later: &Bridge) -> bool {
    if earlier.kind != later.kind {
        return false;
    }

    let (ibi, iei) = ends(&earlier.i);
    let (jbi, jei) = ends(&earlier.j);
    let (ibj, iej) = ends(&later.i);
    let (jbj, jej) = ends(&later.j);

    if frame.has_chain_break(ibi.min(ibj), iei.max(iej))
        || frame.has_chain_break(jbi.min(jbj), jei.max(jej))
    {
        return false;
    }

    let [ibi, iei, jbi, jei, ibj, iej, jbj, jej] =
        [ibi, iei, jbi, jei, ibj, iej, jbj, jej].map(|v| v as isize);

    if ibj - iei >= MAX_LADDER_GAP || (iei >= ibj && ibi <= iej) {
        return false;
    }

    match earlier.kind {
        BridgeKind::Parallel => {
            (jbj - jei < MAX_LADDER_GAP && ibj - iei < MAX_BULGE_GAP) || jbj - jei < MAX_BULGE_GAP
        }
        BridgeKind::Antiparallel => {
            (jbi - jej < MAX_LADDER_GAP && ibj - iei < MAX_BULGE_GAP) || jbi - jej < MAX_BULGE_GAP
        }
    }
}

/// Joins bridges separated by bulges into ladders.
///
/// Bridges are ordered by `(chain_i, first i)`; each one then absorbs every later bridge
/// it can be merged with, re-evaluating its extent after each absorption. Absorbed bridges
/// are tombstoned and dropped at the end.
pub(crate) fn merge_ladders(frame: &ProteinFrame, mut bridges: Vec<Bridge>) -> Vec<Bridge> {
    bridges.sort_by_key(|bridge| (bridge.chain_i, bridge.i.first().copied()));
    let mut slots: Vec<Option<Bridge>> = bridges.into_iter().map(Some).collect();

    for a in 0..slots.len() {
        for b in a + 1..slots.len() {
            let (head, tail) = slots.split_at_mut(b);
            let (Some(earlier), Some(later)) = (head[a].as_mut(), tail[0].as_ref()) else {
                continue;
            };
            if !can_merge(frame, earlier, later) {
                continue;
            }

            if let Some(absorbed) = tail[0].take() {
                trace!(into = ?earlier.i, from = ?absorbed.i, "Merged ladders across bulge.");
                earlier.i.extend(absorbed.i);
                match earlier.kind {
                    BridgeKind::Parallel => earlier.j.extend(absorbed.j),
                    BridgeKind::Antiparallel => {
                        let mut j = absorbed.j;
                        j.append(&mut earlier.j);
                        earlier.j = j;
                    }
                }
            }
        }
    }

    slots.into_iter().flatten().collect()
}

fn linked(a: &Bridge, b: &Bridge) -> bool {
    b.i.iter()
        .chain(&b.j)
        .any(|r| a.i.contains(r) || a.j.contains(r))
}

/// Labels ladders: sheets are the connected components of the "shares a residue"
/// relation. Sheet ids count from 1 and ladder ids from 0, in discovery order.
///
/// Returns the number of sheets.
pub(crate) fn group_sheets(ladders: &mut [Bridge]) -> usize {
    let mut remaining: Vec<usize> = (0..ladders.len()).collect();
    let mut sheet = 0;
    let mut ladder = 0;

    while !remaining.is_empty() {
        sheet += 1;
        let mut component = vec![remaining.remove(0)];

        loop {
            let mut to_move: Vec<usize> = Vec::new();
            for &a in &component {
                for &b in &remaining {
                    if !to_move.contains(&b) && linked(&ladders[a], &ladders[b]) {
                        to_move.push(b);
                    }
                }
            }
            if to_move.is_empty() {
                break;
            }
            remaining.retain(|b| !to_move.contains(b));
            component.extend(to_move);
        }

        for member in component {
            ladders[member].ladder = ladder;
            ladders[member].sheet = sheet;
            ladder += 1;
        }
    }

    sheet
}

/// Partner of `side[k]` on the opposite strand.
fn facing(other: &[usize], k: usize, parallel: bool) -> Option<usize> {
    let idx = if parallel {
        Some(k)
    } else {
        other.len().checked_sub(k + 1)
    };
    idx.and_then(|idx| other.get(idx)).copied()
}

fn assign(ladders: &[Bridge], map: &mut SecondaryStructureMap) {
    for bridge in ladders {
        let parallel = bridge.is_parallel();
        let code = if bridge.i.len() > 1 {
            SecondaryStructure::Strand
        } else {
            SecondaryStructure::Bridge
        };

        // A side already paired elsewhere takes the second partner slot.
        let slot_i = usize::from(bridge.i.iter().any(|&r| map.beta_partners[r][0].is_some()));
        let slot_j = usize::from(bridge.j.iter().any(|&r| map.beta_partners[r][0].is_some()));

        for (side, other, slot) in [(&bridge.i, &bridge.j, slot_i), (&bridge.j, &bridge.i, slot_j)]
        {
            for (k, &residue) in side.iter().enumerate() {
                map.beta_partners[residue][slot] =
                    facing(other, k, parallel).map(|partner| BetaPartner {
                        partner,
                        ladder: bridge.ladder,
                        parallel,
                    });
            }
        }

        for side in [&bridge.i, &bridge.j] {
            let (first, last) = ends(side);
            for residue in first..=last {
                if map.structures[residue] != SecondaryStructure::Strand {
                    map.structures[residue] = code;
                    map.sheets[residue] = Some(bridge.sheet);
                }
            }
        }
    }
}
