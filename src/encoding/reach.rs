use itertools::Itertools;
use varisat::Lit;

use crate::encoding::Connectivity;
use crate::logic::Session;
use crate::puzzle::{IslandId, Puzzle};

/// Require the built bridges to connect every island.
///
/// Connectivity needs an iteration bound to be expressible at all, so it is unrolled: `reach[d][k]` holds when `d`
/// can be reached from the source in at most `k` steps, for `k` in `1..=n-1`. A path visiting every island once is
/// at most `n - 1` steps long, so forcing `reach[d][n - 1]` for every `d` forces connectivity.
///
/// `built[b]` must hold exactly when candidate bridge `b` is built.
pub(crate) fn connect(puzzle: &Puzzle, session: &mut Session, built: &[Lit], connectivity: Connectivity) {
    let islands = puzzle.islands().len();
    if islands < 2 {
        return;
    }

    match connectivity {
        Connectivity::Rooted => unroll_from(puzzle, session, built, 0),
        Connectivity::AllPairs => (0..islands).for_each(|source| unroll_from(puzzle, session, built, source)),
    }
}

fn unroll_from(puzzle: &Puzzle, session: &mut Session, built: &[Lit], source: IslandId) {
    let islands = puzzle.islands().len();
    let steps = islands - 1;

    // reach[d][k - 1] for step bound k
    let reach = (0..islands)
        .map(|dest| {
            if dest == source {
                vec![session.constant(true); steps]
            } else {
                (1..=steps).map(|k| session.declare_bool(format!("reach_{source}_{dest}_{k}"))).collect_vec()
            }
        })
        .collect_vec();

    for dest in (0..islands).filter(|dest| *dest != source) {
        // one step: exactly the direct bridge, if there is one
        match puzzle.bridge_between(source, dest) {
            Some(bridge) => session.iff(reach[dest][0], built[bridge]),
            None => session.assert(!reach[dest][0]),
        }

        for k in 2..=steps {
            let mut ways = Vec::with_capacity(5);
            ways.push(reach[dest][k - 2]);
            // reach a neighbour in k - 1 steps, then cross the bridge
            let neighbors = puzzle.candidate_bridges_from(dest)
                .filter_map(|(index, bridge)| Some((index, bridge.other(dest)?)))
                .collect_vec();
            for (index, neighbor) in neighbors {
                ways.push(session.and(&[built[index], reach[neighbor][k - 2]]));
            }

            let any = session.or(&ways);
            session.iff(reach[dest][k - 1], any);
        }

        session.assert(reach[dest][steps - 1]);
    }
}
