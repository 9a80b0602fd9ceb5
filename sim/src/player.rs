use blastgrid_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Action {
    Reveal(Coord2),
    Flag(Coord2),
    Defuse,
}

/// Plays from snapshots only: single-cell deductions first, then the defuse assist, then a guess.
#[derive(Clone, Debug)]
pub struct AutoPlayer {
    rng: SmallRng,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_action(&mut self, snapshot: &Snapshot) -> Option<Action> {
        if snapshot.is_finished() {
            return None;
        }
        if !snapshot.layout_finalized {
            let (rows, cols) = snapshot.size;
            return Some(Action::Reveal((rows / 2, cols / 2)));
        }

        if let Some(action) = deduce(snapshot) {
            return Some(action);
        }

        if !snapshot.defuse_used {
            return Some(Action::Defuse);
        }

        let hidden: Vec<Coord2> = iter_coords(snapshot.size)
            .filter(|&coords| is_unknown(snapshot, coords))
            .collect();
        let guess = hidden.choose(&mut self.rng).copied()?;
        log::debug!("No safe move, guessing {:?}", guess);
        Some(Action::Reveal(guess))
    }
}

fn is_unknown(snapshot: &Snapshot, coords: Coord2) -> bool {
    snapshot
        .cell_at(coords)
        .is_some_and(|view| !view.is_revealed && !view.is_flagged)
}

/// Finds a clue whose count is already satisfied by flags, or whose unknown neighbours must all be mines.
fn deduce(snapshot: &Snapshot) -> Option<Action> {
    for coords in iter_coords(snapshot.size) {
        let Some(count) = snapshot.cell_at(coords).and_then(|view| view.adjacent_mines) else {
            continue;
        };

        let mut unknown = None;
        let mut unknown_count = 0;
        let mut flagged_count = 0;
        for pos in NeighborIter::new(coords, snapshot.size) {
            let Some(view) = snapshot.cell_at(pos) else {
                continue;
            };
            if view.is_flagged {
                flagged_count += 1;
            } else if !view.is_revealed {
                unknown_count += 1;
                unknown.get_or_insert(pos);
            }
        }

        let Some(target) = unknown else {
            continue;
        };
        if flagged_count == count {
            return Some(Action::Reveal(target));
        }
        if flagged_count + unknown_count == count {
            return Some(Action::Flag(target));
        }
    }
    None
}

/// Steers the cursor onto `target` with move inputs, the way a keyboard player would.
pub fn move_cursor(session: &mut Session, target: Coord2) {
    while session.cursor().0 != target.0 {
        session.handle(Input::Move(Direction::Down));
    }
    while session.cursor().1 != target.1 {
        session.handle(Input::Move(Direction::Right));
    }
}

pub fn apply(session: &mut Session, action: Action) -> bool {
    match action {
        Action::Reveal(coords) => {
            move_cursor(session, coords);
            session.handle(Input::Reveal)
        }
        Action::Flag(coords) => {
            move_cursor(session, coords);
            session.handle(Input::ToggleFlag)
        }
        Action::Defuse => session.handle(Input::Defuse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, mines: &[Coord2]) -> Session {
        let layout = MineLayout::from_mine_coords(size, mines).unwrap();
        Session::with_engine(GridEngine::with_layout(layout).unwrap())
    }

    #[test]
    fn opens_in_the_middle() {
        let session = session((5, 5), &[(0, 0)]);
        let mut player = AutoPlayer::new(0);

        assert_eq!(
            player.next_action(&session.snapshot()),
            Some(Action::Reveal((2, 2)))
        );
    }

    #[test]
    fn flags_forced_mine() {
        // opening the right end leaves `# # 1 .`, so the 1 points at its only unknown neighbour
        let mut session = session((1, 4), &[(0, 1)]);
        apply(&mut session, Action::Reveal((0, 3)));
        assert!(!session.engine().is_finished());

        let mut player = AutoPlayer::new(0);
        assert_eq!(
            player.next_action(&session.snapshot()),
            Some(Action::Flag((0, 1)))
        );
    }

    #[test]
    fn reveals_when_flags_satisfy_clue() {
        let mut session = session((2, 2), &[(0, 0)]);
        apply(&mut session, Action::Reveal((1, 1)));
        apply(&mut session, Action::Flag((0, 0)));

        let mut player = AutoPlayer::new(0);
        assert_eq!(
            player.next_action(&session.snapshot()),
            Some(Action::Reveal((0, 1))),
            "{}",
            session.snapshot()
        );
    }

    #[test]
    fn move_cursor_reaches_target_with_wraparound() {
        let mut session = session((4, 4), &[(0, 0)]);
        move_cursor(&mut session, (3, 2));
        assert_eq!(session.cursor(), (3, 2));
        move_cursor(&mut session, (1, 0));
        assert_eq!(session.cursor(), (1, 0));
    }

    #[test]
    fn plays_preset_games_to_the_end() {
        for seed in 0..8 {
            let mut session = Session::from_level(Level::Easy, seed).unwrap();
            let mut player = AutoPlayer::new(seed);
            let mut moves = 0;
            while let Some(action) = player.next_action(&session.snapshot()) {
                apply(&mut session, action);
                moves += 1;
                assert!(moves < 500, "player stuck on seed {seed}");
            }
            assert!(session.engine().is_finished());
        }
    }
}
