use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything the rendering side can ask of a [`Game`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Start or restart a mission on a fresh board.
    StartMission,
    /// Close the briefing and start a mission.
    AcceptMission,
    RevealCell(Coord2),
    ShowBriefing,
    DismissBriefing,
    /// Delivered by the caller once a [`FollowUp::RevealBombs`] is due.
    RevealBombs { mission: MissionId },
}

/// Result of [`Game::dispatch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dispatched {
    changed: bool,
    pub follow_up: Option<FollowUp>,
}

impl Dispatched {
    const fn changed(changed: bool) -> Self {
        Self {
            changed,
            follow_up: None,
        }
    }

    /// Whether the intent could have changed what is on screen
    pub const fn has_update(self) -> bool {
        self.changed
    }
}

impl From<Transition> for Dispatched {
    fn from(transition: Transition) -> Self {
        Self {
            changed: transition.outcome.has_update(),
            follow_up: transition.follow_up,
        }
    }
}

/// Single-threaded reducer over the current mission plus the briefing panel toggle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: MissionConfig,
    session: Option<GameSession>,
    briefing_visible: bool,
    last_mission: MissionId,
}

impl Game {
    pub fn new(config: MissionConfig) -> Self {
        Self {
            config,
            session: None,
            briefing_visible: true,
            last_mission: 0,
        }
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.session
            .as_ref()
            .map_or(Phase::Briefing, GameSession::phase)
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn is_briefing_visible(&self) -> bool {
        self.briefing_visible
    }

    pub fn dispatch<R: Rng + ?Sized>(&mut self, intent: Intent, rng: &mut R) -> Dispatched {
        use Intent::*;

        log::trace!("dispatch: {:?}", intent);
        match intent {
            StartMission => {
                self.start_mission(rng);
                Dispatched::changed(true)
            }
            AcceptMission => {
                self.dismiss_briefing();
                self.start_mission(rng);
                Dispatched::changed(true)
            }
            RevealCell(coords) => self.reveal_cell(coords, rng).into(),
            ShowBriefing => Dispatched::changed(self.show_briefing()),
            DismissBriefing => Dispatched::changed(self.dismiss_briefing()),
            RevealBombs { mission } => Dispatched::changed(self.reveal_bombs(mission)),
        }
    }

    pub fn start_mission<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MissionId {
        let board = generate_board(rng, &self.config);
        self.start_mission_with(board)
    }

    /// Replaces whatever mission was running with one on `board`.
    pub fn start_mission_with(&mut self, board: Board) -> MissionId {
        self.last_mission = self.last_mission.wrapping_add(1);
        let mission = self.last_mission;
        log::debug!(
            "mission {} started: {} flags, {} bombs",
            mission,
            board.flag_count(),
            board.bomb_count()
        );
        self.session = Some(GameSession::new(board, self.config, mission));
        mission
    }

    pub fn reveal_cell<R: Rng + ?Sized>(&mut self, coords: Coord2, rng: &mut R) -> Transition {
        match self.session.as_mut() {
            Some(session) => session.reveal(coords, rng),
            None => {
                log::trace!("reveal {:?} ignored, no mission", coords);
                Transition {
                    outcome: RevealOutcome::NoChange,
                    follow_up: None,
                }
            }
        }
    }

    /// Applies a due bomb reveal. Follow-ups from a mission that has since been replaced are dropped.
    pub fn reveal_bombs(&mut self, mission: MissionId) -> bool {
        match self.session.as_mut() {
            Some(session) if session.mission() == mission => session.reveal_bombs(),
            _ => {
                log::debug!("stale bomb reveal for mission {} dropped", mission);
                false
            }
        }
    }

    /// Returns whether the panel was hidden before.
    pub fn show_briefing(&mut self) -> bool {
        !core::mem::replace(&mut self.briefing_visible, true)
    }

    /// Returns whether the panel was shown before.
    pub fn dismiss_briefing(&mut self) -> bool {
        core::mem::replace(&mut self.briefing_visible, false)
    }

    pub fn view(&self) -> SessionView {
        SessionView::new(self)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(MissionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::prelude::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(11)
    }

    fn board(bombs: &[Coord2]) -> Board {
        Board::from_bomb_coords((6, 6), bombs).unwrap()
    }

    #[test]
    fn starts_in_briefing_with_panel_shown() {
        let game = Game::default();

        assert_eq!(game.phase(), Phase::Briefing);
        assert!(game.is_briefing_visible());
        assert!(game.session().is_none());
    }

    #[test]
    fn reveal_before_any_mission_is_ignored() {
        let mut game = Game::default();

        let dispatched = game.dispatch(Intent::RevealCell((0, 0)), &mut rng());

        assert!(!dispatched.has_update());
        assert_eq!(dispatched.follow_up, None);
        assert_eq!(game, Game::default());
    }

    #[test]
    fn accept_mission_hides_briefing_and_starts_playing() {
        let mut game = Game::default();

        game.dispatch(Intent::AcceptMission, &mut rng());

        assert!(!game.is_briefing_visible());
        assert_eq!(game.phase(), Phase::Playing);
        let session = game.session().unwrap();
        assert_eq!(session.board().total_cells(), 36);
        assert_eq!(session.board().revealed_count(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.saved_flags(), 0);
        assert_eq!(session.consecutive_safe(), 0);
    }

    #[test]
    fn briefing_toggle_does_not_touch_the_mission() {
        let mut game = Game::default();
        let mut rng = rng();
        game.start_mission_with(board(&[(5, 5)]));
        game.dispatch(Intent::RevealCell((0, 0)), &mut rng);
        let session = game.session().cloned();

        game.dispatch(Intent::ShowBriefing, &mut rng);
        assert!(game.is_briefing_visible());
        game.dispatch(Intent::DismissBriefing, &mut rng);
        assert!(!game.is_briefing_visible());

        assert_eq!(game.session().cloned(), session);
    }

    #[test]
    fn bomb_hit_emits_follow_up_for_current_mission() {
        let mut game = Game::default();
        let mut rng = rng();
        let mission = game.start_mission_with(board(&[(0, 0), (3, 3)]));

        let dispatched = game.dispatch(Intent::RevealCell((0, 0)), &mut rng);

        assert!(dispatched.has_update());
        assert_eq!(
            dispatched.follow_up,
            Some(FollowUp::RevealBombs {
                mission,
                delay_ms: 500
            })
        );
        assert_eq!(game.phase(), Phase::Ended);

        assert!(game.dispatch(Intent::RevealBombs { mission }, &mut rng).has_update());
        assert!(game.session().unwrap().board().all_bombs_revealed());
        assert!(!game.dispatch(Intent::RevealBombs { mission }, &mut rng).has_update());
    }

    #[test]
    fn restart_resets_counters_and_skips_briefing() {
        let mut game = Game::default();
        let mut rng = rng();
        game.dispatch(Intent::AcceptMission, &mut rng);
        let first = game.session().unwrap().mission();
        for coords in iter_coords((6, 6)) {
            game.dispatch(Intent::RevealCell(coords), &mut rng);
        }
        assert_eq!(game.phase(), Phase::Ended);

        game.dispatch(Intent::StartMission, &mut rng);

        let session = game.session().unwrap();
        assert_ne!(session.mission(), first);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.saved_flags(), 0);
        assert_eq!(session.consecutive_safe(), 0);
        assert_eq!(session.end_reason(), None);
        assert!(!game.is_briefing_visible());
    }

    #[test]
    fn stale_bomb_reveal_does_not_touch_new_mission() {
        let mut game = Game::default();
        let mut rng = rng();
        let old = game.start_mission_with(board(&[(0, 0)]));
        game.dispatch(Intent::RevealCell((0, 0)), &mut rng);

        game.start_mission_with(board(&[(1, 1), (2, 2)]));
        let fresh = game.session().cloned();

        assert!(!game.reveal_bombs(old));
        assert_eq!(game.session().cloned(), fresh);
    }

    #[test]
    fn scenario_two_flags_then_bomb() {
        let mut game = Game::default();
        let mut rng = rng();
        game.start_mission_with(board(&[(0, 2)]));

        game.dispatch(Intent::RevealCell((0, 0)), &mut rng);
        game.dispatch(Intent::RevealCell((0, 1)), &mut rng);
        game.dispatch(Intent::RevealCell((0, 2)), &mut rng);

        let session = game.session().unwrap();
        assert_eq!(session.score(), 65);
        assert_eq!(session.saved_flags(), 2);
        assert!(matches!(session.end_reason(), Some(EndReason::BombHit(_))));
    }

    #[test]
    fn single_flag_board_is_won_in_one_move() {
        let mut game = Game::default();
        let bombs: Vec<Coord2> = iter_coords((6, 6)).filter(|&c| c != (5, 0)).collect();
        game.start_mission_with(board(&bombs));

        let dispatched = game.dispatch(Intent::RevealCell((5, 0)), &mut rng());

        assert!(dispatched.has_update());
        assert_eq!(dispatched.follow_up, None);
        let session = game.session().unwrap();
        assert_eq!(session.end_reason(), Some(EndReason::Won));
        assert_eq!(session.score(), 525);
        assert_eq!(session.board().revealed_count(), 36);
    }

    #[test]
    fn has_update_reports_only_real_changes() {
        let mut game = Game::default();
        let mut rng = rng();

        assert!(!game.dispatch(Intent::ShowBriefing, &mut rng).has_update());
        assert!(game.dispatch(Intent::DismissBriefing, &mut rng).has_update());
        assert!(!game.dispatch(Intent::DismissBriefing, &mut rng).has_update());
        assert!(game.dispatch(Intent::ShowBriefing, &mut rng).has_update());

        game.start_mission_with(board(&[(5, 5)]));
        assert!(game.dispatch(Intent::RevealCell((0, 0)), &mut rng).has_update());
        assert!(!game.dispatch(Intent::RevealCell((0, 0)), &mut rng).has_update());
        assert!(!game.dispatch(Intent::RevealCell((9, 9)), &mut rng).has_update());
        assert!(game.dispatch(Intent::StartMission, &mut rng).has_update());
    }
}
