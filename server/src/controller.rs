use crewbot_common::{
    network::{CommandOrigin, GameCommand, RolePacket},
    player::PlayerRef,
    session::Session,
    RoleKind,
};

const NO_ACTIVE_GAME: &str = "No game active. You can start a game with the create command";

/// Everything one command asks of the gateway: an optional reply, role
/// directives in the order they must be applied, and whether the invoking
/// message should be deleted.
#[derive(Debug, Default, PartialEq)]
pub struct CommandOutcome {
    pub reply: Option<String>,
    pub role_changes: Vec<RolePacket>,
    pub delete_invocation: bool,
}

impl CommandOutcome {
    fn text(text: impl Into<String>) -> Self {
        Self { reply: Some(text.into()), ..Self::default() }
    }
}

/// The session state machine. Owns the one session slot that exists
/// process-wide and turns each incoming command into session mutations
/// plus a `CommandOutcome` for the network layer to deliver.
///
/// Validation always runs before mutation, so a rejected command leaves
/// no trace.
pub struct Controller {
    current_session: Option<Session>,
}

impl Controller {
    pub fn new() -> Self {
        Self { current_session: None }
    }

    pub fn handle_command(
        &mut self,
        actor: &PlayerRef,
        origin: &CommandOrigin,
        command: &GameCommand,
    ) -> CommandOutcome {
        match command {
            GameCommand::Create { args } => self.create(actor, args),
            GameCommand::Join => self.join(actor),
            GameCommand::Start => self.start(actor),
            GameCommand::Dead => self.dead(actor, origin),
            GameCommand::Leave => self.leave(actor),
            GameCommand::End => self.end(actor),
            GameCommand::Round => self.round(actor),
            GameCommand::Info => self.info(),
            GameCommand::Code => self.code(),
        }
    }

    fn create(&mut self, actor: &PlayerRef, args: &[String]) -> CommandOutcome {
        if self.current_session.is_some() {
            return CommandOutcome::text("A game is already in progress");
        }

        match Session::new(actor.clone(), args.join(" ")) {
            Ok(session) => {
                let reply =
                    format!("Created new game: {}\nType \".join\" to join.", session.code());
                self.current_session = Some(session);
                CommandOutcome::text(reply)
            },
            Err(err) => CommandOutcome::text(err.to_string()),
        }
    }

    fn join(&mut self, actor: &PlayerRef) -> CommandOutcome {
        let session = match &mut self.current_session {
            Some(session) => session,
            None => return CommandOutcome::text(NO_ACTIVE_GAME),
        };

        match session.add_player(actor.clone()) {
            Ok(()) => CommandOutcome::text(format!("You have joined game {}", session.code())),
            Err(err) => CommandOutcome::text(err.to_string()),
        }
    }

    fn start(&mut self, actor: &PlayerRef) -> CommandOutcome {
        let session = match &mut self.current_session {
            Some(session) => session,
            None => return CommandOutcome::text(NO_ACTIVE_GAME),
        };

        if !session.is_host(actor) {
            return CommandOutcome::text("You are not the host");
        }

        // The round goes live before any grant is emitted; a grant that
        // fails gateway-side must land in an already-active round.
        session.begin_round();
        let role_changes = session
            .roster()
            .iter()
            .map(|player| RolePacket::grant(player.id, RoleKind::Alive))
            .collect();

        CommandOutcome {
            reply: Some("Game has started".to_string()),
            role_changes,
            delete_invocation: false,
        }
    }

    fn dead(&mut self, actor: &PlayerRef, origin: &CommandOrigin) -> CommandOutcome {
        let session = match &mut self.current_session {
            Some(session) => session,
            None => return CommandOutcome::text(NO_ACTIVE_GAME),
        };

        if !session.contains(actor) {
            return CommandOutcome::text("You are not in the game");
        }

        match session.mark_dead(actor) {
            Ok(()) => CommandOutcome {
                reply: None,
                role_changes: vec![
                    RolePacket::revoke(actor.id, RoleKind::Alive),
                    RolePacket::grant(actor.id, RoleKind::Dead),
                ],
                delete_invocation: matches!(origin, CommandOrigin::Channel { .. }),
            },
            Err(err) => CommandOutcome::text(err.to_string()),
        }
    }

    fn leave(&mut self, actor: &PlayerRef) -> CommandOutcome {
        let session = match &mut self.current_session {
            Some(session) => session,
            None => return CommandOutcome::text(NO_ACTIVE_GAME),
        };

        if !session.contains(actor) {
            return CommandOutcome::text("You are not in the game");
        }

        // Which role to strip depends on life state, so look before removing.
        let mut role_changes = Vec::new();
        if session.is_active() {
            let role = if session.is_alive(actor) { RoleKind::Alive } else { RoleKind::Dead };
            role_changes.push(RolePacket::revoke(actor.id, role));
        }

        match session.remove_player(actor) {
            Ok(()) => CommandOutcome { reply: None, role_changes, delete_invocation: false },
            Err(err) => CommandOutcome::text(err.to_string()),
        }
    }

    fn end(&mut self, actor: &PlayerRef) -> CommandOutcome {
        let session = match &mut self.current_session {
            Some(session) => session,
            None => return CommandOutcome::text(NO_ACTIVE_GAME),
        };

        if !session.is_host(actor) {
            return CommandOutcome::text("Only the host can end the game");
        }

        let role_changes = strip_all_roles(session);
        self.current_session = None;

        CommandOutcome {
            reply: Some("Game has been ended".to_string()),
            role_changes,
            delete_invocation: false,
        }
    }

    fn round(&mut self, actor: &PlayerRef) -> CommandOutcome {
        let session = match &mut self.current_session {
            Some(session) => session,
            None => return CommandOutcome::text(NO_ACTIVE_GAME),
        };

        if !session.is_host(actor) {
            return CommandOutcome::text("Only the host can start a new round");
        }

        if !session.is_active() {
            return CommandOutcome::text("This command can only be used when the game is in progress");
        }

        session.reset_round();
        let role_changes = strip_all_roles(session);

        CommandOutcome { reply: None, role_changes, delete_invocation: false }
    }

    fn info(&self) -> CommandOutcome {
        let session = match &self.current_session {
            Some(session) => session,
            None => return CommandOutcome::text(NO_ACTIVE_GAME),
        };

        let players =
            session.roster().iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join("\n\t");
        let status = if session.is_active() { "active" } else { "inactive" };

        CommandOutcome::text(format!(
            "**Game Code:** {}\n**Host:** {}\n**Players:**\n\t{}\nCurrently {}",
            session.code(),
            session.host().name,
            players,
            status
        ))
    }

    fn code(&self) -> CommandOutcome {
        match &self.current_session {
            Some(session) => CommandOutcome::text(session.code()),
            None => CommandOutcome::text(NO_ACTIVE_GAME),
        }
    }
}

/// Revocation of both roles for every roster member, in roster order.
/// Revoking a role a player doesn't carry is a no-op gateway-side.
fn strip_all_roles(session: &Session) -> Vec<RolePacket> {
    let mut role_changes = Vec::with_capacity(session.roster().len() * 2);
    for player in session.roster() {
        role_changes.push(RolePacket::revoke(player.id, RoleKind::Alive));
        role_changes.push(RolePacket::revoke(player.id, RoleKind::Dead));
    }
    role_changes
}
