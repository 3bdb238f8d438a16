//! Match worker that owns the authoritative [`skirmish_core::MatchState`].
//!
//! Receives commands from [`crate::MatchHandle`], checks authority, runs
//! requests through [`skirmish_core::CombatEngine`] and publishes the
//! resulting notifications. Death-stage timer requests become sleeping tasks
//! that post the stage back once their delay elapses.

use std::time::Duration;

use skirmish_core::{ActorId, CombatConfig, CombatEngine, DeathStage, MatchState, Outbound};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::{debug, trace};

use crate::api::{Envelope, Inbound, Result};
use crate::events::{Event, EventBus};
use crate::router::AuthorityRouter;

/// Commands that can be sent to the match worker
pub enum Command {
    /// Authorize and run one request.
    Submit {
        envelope: Envelope,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current match state (read-only).
    QueryState { reply: oneshot::Sender<MatchState> },
}

/// A death stage whose delay has elapsed.
#[derive(Debug, Clone, Copy)]
struct StageDue {
    actor: ActorId,
    stage: DeathStage,
}

/// Background task that processes match commands.
pub struct MatchWorker {
    state: MatchState,
    config: CombatConfig,
    router: AuthorityRouter,
    command_rx: mpsc::Receiver<Command>,
    stage_tx: mpsc::UnboundedSender<StageDue>,
    stage_rx: mpsc::UnboundedReceiver<StageDue>,
    timers: JoinSet<()>,
    event_bus: EventBus,
}

impl MatchWorker {
    pub fn new(
        state: MatchState,
        config: CombatConfig,
        router: AuthorityRouter,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let (stage_tx, stage_rx) = mpsc::unbounded_channel();
        Self {
            state,
            config,
            router,
            command_rx,
            stage_tx,
            stage_rx,
            timers: JoinSet::new(),
            event_bus,
        }
    }

    /// Main worker loop. Ends once every [`crate::MatchHandle`] is dropped;
    /// pending death stages are cancelled.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(due) = self.stage_rx.recv() => self.fire_stage(due),
            }
        }

        if !self.timers.is_empty() {
            debug!(target: "runtime::worker", pending = self.timers.len(), "cancelling death timers");
        }
        self.timers.shutdown().await;
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Submit { envelope, reply } => {
                let result = self.submit(envelope);
                let _ = reply.send(result);
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
        }
    }

    fn submit(&mut self, envelope: Envelope) -> Result<()> {
        self.router.authorize(&envelope, &self.state)?;

        trace!(
            target: "runtime::worker",
            caller = %envelope.caller,
            command = envelope.command.label(),
            "running request"
        );
        let outbound = self.dispatch(envelope.command);
        self.route(outbound);
        Ok(())
    }

    fn dispatch(&mut self, command: Inbound) -> Vec<Outbound> {
        let mut engine = CombatEngine::new(&mut self.state, &self.config);

        match command {
            Inbound::SpawnActor(spec) => engine.spawn_actor(spec),
            Inbound::Despawn { actor } => engine.despawn(actor),
            Inbound::Mount { actor, mount } => engine.mount(actor, mount),
            Inbound::RegisterPlayer {
                player,
                name,
                session,
            } => engine.register_player(player, name, session),
            Inbound::Disconnect { session } => engine.disconnect(session),
            Inbound::BeginTurn { player } => engine.begin_turn(player),
            Inbound::ReportDamage {
                actor,
                info,
                immediate,
            } => engine.report_damage(actor, info, immediate),
            Inbound::FlushQueue { actor } => engine.flush_queue(actor),
            Inbound::Heal { actor, amount } => engine.heal(actor, amount),
            Inbound::InitializeInventory { player, templates } => {
                engine.initialize_inventory(player, &templates)
            }
            Inbound::EquipItem { player, item } => engine.equip_item(player, item),
            Inbound::CycleSlot { player, forward } => engine.cycle_slot(player, forward),
            Inbound::PollInput { player, frame } => engine.poll_input(player, frame),
            Inbound::RecordItemUse {
                player,
                slot,
                phase,
            } => engine.record_item_use(player, slot, phase),
            Inbound::Equip { player, slot } => engine.equip(player, slot),
            Inbound::Holster { player, slot } => engine.holster(player, slot),
            Inbound::HolsterActive { player } => engine.holster_active(player),
        }
    }

    fn fire_stage(&mut self, due: StageDue) {
        trace!(target: "runtime::worker", actor = %due.actor, stage = %due.stage, "death stage due");
        let outbound = CombatEngine::new(&mut self.state, &self.config).death_stage(due.actor, due.stage);
        self.route(outbound);
    }

    /// Publishes engine output in order, turning timer requests into tasks.
    fn route(&mut self, outbound: Vec<Outbound>) {
        for message in outbound {
            if let Outbound::ScheduleDeathStage {
                actor,
                stage,
                delay_ms,
            } = message
            {
                self.schedule(StageDue { actor, stage }, delay_ms);
                continue;
            }
            if let Some(event) = Event::route(message) {
                self.event_bus.publish(event);
            }
        }
    }

    fn schedule(&mut self, due: StageDue, delay_ms: u64) {
        while self.timers.try_join_next().is_some() {}

        debug!(
            target: "runtime::worker",
            actor = %due.actor,
            stage = %due.stage,
            delay_ms,
            "scheduling death stage"
        );
        let stage_tx = self.stage_tx.clone();
        self.timers.spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            let _ = stage_tx.send(due);
        });
    }
}
