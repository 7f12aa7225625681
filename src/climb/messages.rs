use bevy::prelude::*;

/// Climbing events worth telling the player about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClimbNotice {
    /// The climb committed; sent once per attempt
    ClimbingMode,
    LostGrip,
    RegainedGrip,
    /// A committed climb ended
    Released,
}

/// Fire-and-forget sink for climbing notices.
pub trait ClimbNotifier {
    fn notify(&mut self, notice: ClimbNotice);
}

impl ClimbNotifier for Vec<ClimbNotice> {
    fn notify(&mut self, notice: ClimbNotice) {
        self.push(notice);
    }
}

/// Climbing notice emitted for an agent.
///
/// Consumers subscribe with `MessageReader<ClimbMessage>` to drive HUD text,
/// sound effects or animation.
#[derive(Message, Clone, Copy, Debug)]
pub struct ClimbMessage {
    pub entity: Entity,
    pub notice: ClimbNotice,
}

/// Logs climbing notices the way the HUD would show them
pub fn log_climb_messages(mut reader: MessageReader<ClimbMessage>) {
    for message in reader.read() {
        match message.notice {
            ClimbNotice::ClimbingMode => info!("Climbing mode."),
            notice => debug!("{:?}: {notice:?}", message.entity),
        }
    }
}
