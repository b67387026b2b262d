//! Concurrency behaviour of the driver: stale effects, racing dispatches
//! and usage errors.

use polybasic::builder::{goto, ActiveStateBuilder, BuildError, DefinitionBuilder};
use polybasic::core::Event;
use polybasic::effects::{DispatchOutcome, Driver, DriverError, StateHandler, Transition};
use polybasic::state_enum;
use polybasic::validation::DefinitionViolation;
use polybasic::StateMachineDefinition;
use std::sync::Arc;
use tokio::sync::Notify;

state_enum! {
    enum Fetch {
        Idle => "idle",
        Fetching => "fetching",
        Fetched => "fetched",
        Raced => "raced",
    }
}

#[derive(Clone, Debug)]
enum Command {
    Go,
    Poke,
    Slow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum CommandKind {
    Go,
    Poke,
    Slow,
}

impl Event for Command {
    type Kind = CommandKind;

    fn kind(&self) -> CommandKind {
        match self {
            Self::Go => CommandKind::Go,
            Self::Poke => CommandKind::Poke,
            Self::Slow => CommandKind::Slow,
        }
    }
}

type FetchActive = ActiveStateBuilder<Fetch, Command, u32>;
type FetchDriver = Driver<Fetch, Command, u32>;

/// Gates held by the test to release pending effects.
#[derive(Clone, Default)]
struct Gates {
    fetch: Arc<Notify>,
    slow_started: Arc<Notify>,
    slow: Arc<Notify>,
}

/// `idle --go--> fetching (waits on the fetch gate) --> fetched`
/// `idle --slow--> (waits on the slow gate) --> raced`
/// `idle --poke--> raced`
fn machine(gates: &Gates) -> Arc<StateMachineDefinition<Fetch, Command, u32>> {
    let fetch = Arc::clone(&gates.fetch);
    let slow_started = Arc::clone(&gates.slow_started);
    let slow = Arc::clone(&gates.slow);

    let definition = DefinitionBuilder::<Fetch, Command, u32>::new()
        .initial(Fetch::Idle)
        .context(0)
        .active(
            Fetch::Idle,
            FetchActive::new()
                .on_sync(CommandKind::Go, |count: u32, _| {
                    Transition::new(Fetch::Fetching, count + 1)
                })
                .on_sync(CommandKind::Poke, |count: u32, _| {
                    Transition::new(Fetch::Raced, count + 10)
                })
                .on(CommandKind::Slow, move |count: u32, _| {
                    let started = Arc::clone(&slow_started);
                    let gate = Arc::clone(&slow);
                    async move {
                        started.notify_one();
                        gate.notified().await;
                        Transition::new(Fetch::Raced, count + 1000)
                    }
                }),
        )
        .passive(Fetch::Fetching, move |count: u32| {
            let gate = Arc::clone(&fetch);
            async move {
                gate.notified().await;
                Transition::new(Fetch::Fetched, count + 100)
            }
        })
        .active(
            Fetch::Fetched,
            FetchActive::new().on_sync(CommandKind::Go, |count: u32, _| {
                Transition::new(Fetch::Idle, count)
            }),
        )
        .active(Fetch::Raced, FetchActive::new())
        .build()
        .unwrap();
    Arc::new(definition)
}

async fn wait_for(driver: &FetchDriver, state: Fetch) {
    let mut watch = driver.subscribe();
    while watch.current().state != state {
        assert!(watch.changed().await, "driver dropped");
    }
}

#[tokio::test]
async fn passive_effect_completes_when_undisturbed() {
    let gates = Gates::default();
    let driver = Driver::new(machine(&gates));

    let pending = tokio::spawn({
        let driver = driver.clone();
        async move { driver.dispatch(Command::Go).await }
    });
    wait_for(&driver, Fetch::Fetching).await;
    gates.fetch.notify_one();

    assert_eq!(pending.await.unwrap(), Ok(DispatchOutcome::Applied));
    assert_eq!(driver.current(), (Fetch::Fetched, 101));
}

#[tokio::test]
async fn passive_effect_resolving_after_restart_is_discarded() {
    let gates = Gates::default();
    let driver = Driver::new(machine(&gates));

    let pending = tokio::spawn({
        let driver = driver.clone();
        async move { driver.dispatch(Command::Go).await }
    });
    wait_for(&driver, Fetch::Fetching).await;

    driver.restart().await.unwrap();
    let after_restart = driver.run_state();
    gates.fetch.notify_one();

    assert_eq!(pending.await.unwrap(), Ok(DispatchOutcome::Applied));
    assert_eq!(driver.run_state(), after_restart);
    assert_eq!(driver.current(), (Fetch::Idle, 0));
    assert_eq!(
        driver.history().last().map(|transition| transition.to),
        Some(Fetch::Idle)
    );
}

#[tokio::test]
async fn first_resolving_dispatch_wins_the_epoch() {
    let gates = Gates::default();
    let driver = Driver::new(machine(&gates));

    let slow = tokio::spawn({
        let driver = driver.clone();
        async move { driver.dispatch(Command::Slow).await }
    });
    gates.slow_started.notified().await;

    let fast = driver.dispatch(Command::Poke).await;
    gates.slow.notify_one();

    assert_eq!(fast, Ok(DispatchOutcome::Applied));
    assert_eq!(slow.await.unwrap(), Ok(DispatchOutcome::Stale));
    assert_eq!(driver.current(), (Fetch::Raced, 10));
    assert_eq!(driver.epoch(), 1);
}

#[tokio::test]
async fn unregistered_event_leaves_run_state_untouched() {
    let gates = Gates::default();
    let driver = Driver::new(machine(&gates));
    driver.dispatch(Command::Poke).await.unwrap();
    let before = driver.run_state();
    let recorded = driver.history().transitions().len();

    let outcome = driver.dispatch(Command::Go).await;

    assert_eq!(outcome, Ok(DispatchOutcome::Ignored));
    assert_eq!(driver.run_state(), before);
    assert_eq!(driver.history().transitions().len(), recorded);
}

#[tokio::test]
async fn dispatch_while_passive_effect_pends_is_rejected() {
    let gates = Gates::default();
    let driver = Driver::new(machine(&gates));

    let pending = tokio::spawn({
        let driver = driver.clone();
        async move { driver.dispatch(Command::Go).await }
    });
    wait_for(&driver, Fetch::Fetching).await;

    let result = driver.dispatch(Command::Poke).await;
    assert_eq!(
        result,
        Err(DriverError::PassiveState {
            state: "fetching".to_string(),
            event: "Poke".to_string(),
        })
    );

    gates.fetch.notify_one();
    pending.await.unwrap().unwrap();
    assert_eq!(driver.state(), Fetch::Fetched);
}

#[tokio::test]
async fn drivers_of_one_definition_do_not_share_run_state() {
    let gates = Gates::default();
    let definition = machine(&gates);
    let first = Driver::new(Arc::clone(&definition));
    let second = Driver::new(definition);

    first.dispatch(Command::Poke).await.unwrap();

    assert_eq!(first.current(), (Fetch::Raced, 10));
    assert_eq!(second.current(), (Fetch::Idle, 0));
    assert_ne!(first.id(), second.id());
}

#[tokio::test]
async fn unvalidated_definition_reports_missing_handler() {
    let definition: StateMachineDefinition<Fetch, Command, u32> =
        StateMachineDefinition::from_parts(
            Fetch::Idle,
            0,
            vec![(Fetch::Idle, StateHandler::Passive(goto(Fetch::Fetched)))],
        );

    let result = Driver::launch(Arc::new(definition)).await;

    assert!(matches!(
        result,
        Err(DriverError::MissingHandler { state }) if state == "fetched"
    ));
}

#[test]
fn builder_lists_every_unhandled_state() {
    let result = DefinitionBuilder::<Fetch, Command, u32>::new()
        .initial(Fetch::Idle)
        .context(0)
        .active(Fetch::Idle, FetchActive::new())
        .build();

    match result {
        Err(BuildError::InvalidDefinition { violations }) => {
            assert_eq!(violations.len(), 3);
            assert!(violations.contains(&DefinitionViolation::UnhandledState {
                state: "fetching".to_string()
            }));
        }
        other => panic!("Expected invalid definition, got {:?}", other.map(|_| ())),
    }
}
