use crate::player::PlayerRef;
use thiserror::Error;

/// Rejection reasons for session mutations. The `#[error]` strings are the
/// exact texts shown to players, so they are load-bearing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("Game code must be provided")]
    EmptyCode,
    #[error("You are already in this game")]
    AlreadyJoined,
    #[error("This game is already in progress!")]
    GameInProgress,
    #[error("You are not in the game")]
    NotAPlayer,
    #[error("You are already dead")]
    AlreadyDead,
    #[error("This game hasn't started yet")]
    RoundNotStarted,
    #[error("The host can't leave the game")]
    HostCannotLeave,
}

/// One game of Among Us: who is playing, who is hosting, and the life/death
/// partition of the current round.
///
/// Fields stay private so every mutation goes through a checked operation.
/// After each of those, `host` is in `roster`, `alive` and `dead` are
/// disjoint subsets of `roster`, and both are empty while no round is
/// active.
#[derive(Debug, Clone)]
pub struct Session {
    code: String,
    host: PlayerRef,
    roster: Vec<PlayerRef>,
    alive: Vec<PlayerRef>,
    dead: Vec<PlayerRef>,
    active: bool,
}

impl Session {
    pub fn new(host: PlayerRef, code: String) -> Result<Self, SessionError> {
        if code.is_empty() {
            return Err(SessionError::EmptyCode);
        }

        Ok(Self {
            code,
            roster: vec![host.clone()],
            host,
            alive: Vec::new(),
            dead: Vec::new(),
            active: false,
        })
    }

    /// Appends to the roster. Joining is only possible between rounds.
    pub fn add_player(&mut self, player: PlayerRef) -> Result<(), SessionError> {
        if self.roster.contains(&player) {
            return Err(SessionError::AlreadyJoined);
        }
        if self.active {
            return Err(SessionError::GameInProgress);
        }

        self.roster.push(player);
        Ok(())
    }

    /// Starts a round: everyone currently on the roster is alive.
    ///
    /// `alive` is a copy of the roster, not a view of it. Players dying
    /// mid-round must not fall off the roster.
    pub fn begin_round(&mut self) {
        self.active = true;
        self.alive = self.roster.clone();
        self.dead.clear();
    }

    /// Moves the roster entry matching `player`'s identity from the alive
    /// list to the dead list.
    pub fn mark_dead(&mut self, player: &PlayerRef) -> Result<(), SessionError> {
        let entry = match self.roster.iter().find(|p| *p == player) {
            Some(entry) => entry.clone(),
            None => return Err(SessionError::NotAPlayer),
        };
        if self.dead.contains(&entry) {
            return Err(SessionError::AlreadyDead);
        }
        if !self.active {
            return Err(SessionError::RoundNotStarted);
        }

        self.alive.retain(|p| p != &entry);
        self.dead.push(entry);
        Ok(())
    }

    /// Drops `player` from the roster and from whichever life list holds
    /// them. The host is the one player who can never be removed.
    pub fn remove_player(&mut self, player: &PlayerRef) -> Result<(), SessionError> {
        if !self.roster.contains(player) {
            return Err(SessionError::NotAPlayer);
        }
        if *player == self.host {
            return Err(SessionError::HostCannotLeave);
        }

        self.alive.retain(|p| p != player);
        self.dead.retain(|p| p != player);
        self.roster.retain(|p| p != player);
        Ok(())
    }

    /// Clears the life/death partition for a fresh round. The round itself
    /// stays live; callers only invoke this while `active` is true.
    pub fn reset_round(&mut self) {
        self.alive.clear();
        self.dead.clear();
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn host(&self) -> &PlayerRef {
        &self.host
    }

    pub fn roster(&self) -> &[PlayerRef] {
        &self.roster
    }

    pub fn alive(&self) -> &[PlayerRef] {
        &self.alive
    }

    pub fn dead(&self) -> &[PlayerRef] {
        &self.dead
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_host(&self, player: &PlayerRef) -> bool {
        *player == self.host
    }

    pub fn contains(&self, player: &PlayerRef) -> bool {
        self.roster.contains(player)
    }

    pub fn is_alive(&self, player: &PlayerRef) -> bool {
        self.alive.contains(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u64, name: &str) -> PlayerRef {
        PlayerRef::new(id, name)
    }

    fn lobby() -> Session {
        let mut session = Session::new(player(1, "irene"), "skeld".to_string()).unwrap();
        session.add_player(player(2, "pat")).unwrap();
        session.add_player(player(3, "sam")).unwrap();
        session
    }

    fn assert_partition(session: &Session) {
        for p in session.alive() {
            assert!(!session.dead().contains(p));
            assert!(session.roster().contains(p));
        }
        for p in session.dead() {
            assert!(session.roster().contains(p));
        }
        assert!(session.roster().contains(session.host()));
    }

    #[test]
    fn empty_code_is_rejected() {
        let result = Session::new(player(1, "irene"), String::new());
        assert_eq!(result.unwrap_err(), SessionError::EmptyCode);
    }

    #[test]
    fn creator_becomes_host_and_first_member() {
        let session = Session::new(player(1, "irene"), "skeld".to_string()).unwrap();
        assert_eq!(session.roster(), [player(1, "irene")]);
        assert!(session.is_host(&player(1, "irene")));
        assert!(!session.is_active());
    }

    #[test]
    fn duplicate_join_is_rejected() {
        let mut session = lobby();
        assert_eq!(session.add_player(player(2, "pat")), Err(SessionError::AlreadyJoined));
        assert_eq!(session.roster().len(), 3);
    }

    #[test]
    fn join_mid_round_is_rejected() {
        let mut session = lobby();
        session.begin_round();
        assert_eq!(session.add_player(player(4, "new")), Err(SessionError::GameInProgress));
    }

    #[test]
    fn begin_round_copies_the_roster() {
        let mut session = lobby();
        session.begin_round();
        session.mark_dead(&player(2, "pat")).unwrap();

        // Dying removes from the alive list only.
        assert_eq!(session.roster().len(), 3);
        assert_eq!(session.alive().len(), 2);
        assert_eq!(session.dead(), [player(2, "pat")]);
        assert_partition(&session);
    }

    #[test]
    fn mark_dead_requires_membership() {
        let mut session = lobby();
        session.begin_round();
        assert_eq!(session.mark_dead(&player(9, "drifter")), Err(SessionError::NotAPlayer));
    }

    #[test]
    fn mark_dead_twice_is_rejected() {
        let mut session = lobby();
        session.begin_round();
        session.mark_dead(&player(2, "pat")).unwrap();
        assert_eq!(session.mark_dead(&player(2, "pat")), Err(SessionError::AlreadyDead));
        assert_eq!(session.dead().len(), 1);
    }

    #[test]
    fn mark_dead_before_a_round_is_rejected() {
        let mut session = lobby();
        assert_eq!(session.mark_dead(&player(2, "pat")), Err(SessionError::RoundNotStarted));
    }

    #[test]
    fn mark_dead_matches_identity_not_display_name() {
        let mut session = lobby();
        session.begin_round();

        // Same user, DM display name differs from the guild one.
        session.mark_dead(&player(2, "pat-from-dm")).unwrap();

        // The roster entry is what moves, so the guild name is kept.
        assert_eq!(session.dead().len(), 1);
        assert_eq!(session.dead()[0].name, "pat");
    }

    #[test]
    fn host_cannot_be_removed() {
        let mut session = lobby();
        assert_eq!(session.remove_player(&player(1, "irene")), Err(SessionError::HostCannotLeave));

        session.begin_round();
        assert_eq!(session.remove_player(&player(1, "irene")), Err(SessionError::HostCannotLeave));
    }

    #[test]
    fn removing_a_dead_player_clears_every_trace() {
        let mut session = lobby();
        session.begin_round();
        session.mark_dead(&player(3, "sam")).unwrap();
        session.remove_player(&player(3, "sam")).unwrap();

        assert!(!session.contains(&player(3, "sam")));
        assert!(session.dead().is_empty());
        assert_partition(&session);
    }

    #[test]
    fn removing_a_stranger_is_rejected() {
        let mut session = lobby();
        assert_eq!(session.remove_player(&player(9, "drifter")), Err(SessionError::NotAPlayer));
    }

    #[test]
    fn reset_round_keeps_the_round_live() {
        let mut session = lobby();
        session.begin_round();
        session.mark_dead(&player(2, "pat")).unwrap();
        session.reset_round();

        assert!(session.is_active());
        assert!(session.alive().is_empty());
        assert!(session.dead().is_empty());
        assert_eq!(session.roster().len(), 3);
    }

    #[test]
    fn life_partition_survives_a_full_round() {
        let mut session = lobby();
        session.begin_round();
        assert_partition(&session);
        session.mark_dead(&player(2, "pat")).unwrap();
        assert_partition(&session);
        session.remove_player(&player(2, "pat")).unwrap();
        assert_partition(&session);
        session.mark_dead(&player(3, "sam")).unwrap();
        assert_partition(&session);
        session.reset_round();
        assert_partition(&session);
    }
}
