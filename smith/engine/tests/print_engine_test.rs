//! Full walk through the printer's state table on a simulated controller

use smith_core::{Event, StateId};
use smith_engine::{EngineConfig, EngineError, JobStatus, PrintEngine};
use smith_hal::recording::RecordingDevice;

fn ready_device() -> RecordingDevice {
    let device = RecordingDevice::new();
    device.set_register(smith_engine::hardware::registers::STATUS, 0x01);
    device
}

fn step(engine: &mut PrintEngine<RecordingDevice>, event: Event, expected: StateId) {
    engine.process(event);
    assert_eq!(
        engine.state(),
        expected,
        "after {} expected {} but was {}",
        event,
        expected,
        engine.state()
    );
}

#[test]
fn begin_requires_layer_count() {
    let mut engine = PrintEngine::new(ready_device());
    assert!(matches!(engine.begin(), Err(EngineError::InvalidConfig(_))));
    assert!(!engine.state_machine().is_started());

    engine.set_num_layers(3);
    engine.begin().unwrap();
    assert_eq!(engine.state(), StateId::Initializing);
    // A second begin neither fails nor restarts
    engine.begin().unwrap();
    assert_eq!(engine.state(), StateId::Initializing);
}

#[test]
fn two_layer_print_session() {
    let config = EngineConfig::builder().num_layers(2).build();
    let mut engine = PrintEngine::with_config(ready_device(), config);
    engine.begin().unwrap();
    assert_eq!(engine.state(), StateId::Initializing);

    // Reset and door handling while initializing
    step(&mut engine, Event::Reset, StateId::Initializing);
    step(&mut engine, Event::DoorOpened, StateId::DoorOpen);
    step(&mut engine, Event::DoorClosed, StateId::Initializing);
    step(&mut engine, Event::DoorOpened, StateId::DoorOpen);
    step(&mut engine, Event::Reset, StateId::Initializing);

    // Main path
    step(&mut engine, Event::Initialized, StateId::Homing);
    step(&mut engine, Event::AtHome, StateId::Home);
    step(&mut engine, Event::DoorOpened, StateId::DoorOpen);
    step(&mut engine, Event::DoorClosed, StateId::Home);
    step(&mut engine, Event::StartPrint, StateId::PrintSetup);
    assert_eq!(engine.job().status, JobStatus::InProgress);
    step(&mut engine, Event::GotSetting, StateId::PrintSetup);
    step(&mut engine, Event::GotSetting, StateId::MovingToStartPosition);

    step(&mut engine, Event::AtStartPosition, StateId::Exposing);
    step(&mut engine, Event::Pulse, StateId::Exposing);
    step(&mut engine, Event::Exposed, StateId::Separating);
    step(&mut engine, Event::Pulse, StateId::Separating);
    step(&mut engine, Event::DoorOpened, StateId::DoorOpen);
    step(&mut engine, Event::DoorClosed, StateId::Separating);
    step(&mut engine, Event::Separated, StateId::EndingPrint);
    assert_eq!(engine.job().current_layer, 1);
    step(&mut engine, Event::PrintEnded, StateId::Homing);
    assert!(engine.state_machine().print_pending());

    // Cancel keeps homing but drops the pending layer
    step(&mut engine, Event::Cancel, StateId::Homing);
    assert!(!engine.state_machine().print_pending());
    assert_eq!(engine.job().status, JobStatus::Cancelled);

    step(&mut engine, Event::Error, StateId::Idle);

    // Start again from Idle: homes first, then goes straight to setup
    step(&mut engine, Event::StartPrint, StateId::Homing);
    step(&mut engine, Event::AtHome, StateId::PrintSetup);
    step(&mut engine, Event::GotSetting, StateId::PrintSetup);
    step(&mut engine, Event::GotSetting, StateId::MovingToStartPosition);
    step(&mut engine, Event::AtStartPosition, StateId::Exposing);
    step(&mut engine, Event::Exposed, StateId::Separating);

    step(&mut engine, Event::Pause, StateId::Paused);
    step(&mut engine, Event::Resume, StateId::Separating);

    step(&mut engine, Event::Separated, StateId::EndingPrint);
    step(&mut engine, Event::PrintEnded, StateId::Homing);
    assert!(!engine.is_halted());
}

#[test]
fn last_layer_completes_job() {
    let mut engine = PrintEngine::new(ready_device());
    engine.set_num_layers(1);
    engine.begin().unwrap();

    step(&mut engine, Event::Initialized, StateId::Homing);
    step(&mut engine, Event::AtHome, StateId::Home);
    step(&mut engine, Event::StartPrint, StateId::PrintSetup);
    step(&mut engine, Event::GotSetting, StateId::PrintSetup);
    step(&mut engine, Event::GotSetting, StateId::MovingToStartPosition);
    step(&mut engine, Event::AtStartPosition, StateId::Exposing);
    step(&mut engine, Event::Exposed, StateId::Separating);
    step(&mut engine, Event::Separated, StateId::EndingPrint);

    assert_eq!(engine.job().status, JobStatus::Complete);
    assert!(!engine.state_machine().print_pending());

    step(&mut engine, Event::PrintEnded, StateId::Homing);
    step(&mut engine, Event::AtHome, StateId::Home);
}

#[test]
fn reset_with_door_open_abandons_job() {
    let mut engine = PrintEngine::new(ready_device());
    engine.set_num_layers(2);
    engine.begin().unwrap();

    step(&mut engine, Event::Initialized, StateId::Homing);
    step(&mut engine, Event::AtHome, StateId::Home);
    step(&mut engine, Event::StartPrint, StateId::PrintSetup);
    step(&mut engine, Event::GotSetting, StateId::PrintSetup);
    step(&mut engine, Event::GotSetting, StateId::MovingToStartPosition);
    step(&mut engine, Event::AtStartPosition, StateId::Exposing);
    step(&mut engine, Event::Exposed, StateId::Separating);
    step(&mut engine, Event::Separated, StateId::EndingPrint);
    step(&mut engine, Event::PrintEnded, StateId::Homing);
    step(&mut engine, Event::DoorOpened, StateId::DoorOpen);
    step(&mut engine, Event::Reset, StateId::Initializing);

    assert!(!engine.state_machine().print_pending());
    assert_eq!(engine.job().status, JobStatus::Cancelled);
    assert_eq!(engine.job().current_layer, 0);

    // Homing after re-initialization stops at Home without a new StartPrint
    step(&mut engine, Event::Initialized, StateId::Homing);
    step(&mut engine, Event::AtHome, StateId::Home);
}

#[test]
fn queued_events_dispatch_in_order() {
    let mut engine = PrintEngine::new(ready_device());
    engine.set_num_layers(2);
    engine.begin().unwrap();

    let poster = engine.poster();
    std::thread::spawn(move || {
        poster.post(Event::Initialized).unwrap();
        poster.post(Event::AtHome).unwrap();
        poster.post(Event::StartPrint).unwrap();
    })
    .join()
    .unwrap();

    assert_eq!(engine.dispatch_pending(), 3);
    assert_eq!(engine.state(), StateId::PrintSetup);
    assert_eq!(engine.dispatch_pending(), 0);
}

#[test]
fn queue_capacity_comes_from_config() {
    let config = EngineConfig::builder()
        .num_layers(1)
        .queue_capacity(2)
        .build();
    let engine = PrintEngine::with_config(ready_device(), config);
    let poster = engine.poster();

    poster.post(Event::Pulse).unwrap();
    poster.post(Event::Pulse).unwrap();
    assert!(matches!(
        poster.post(Event::Pulse),
        Err(EngineError::QueueFull(Event::Pulse))
    ));
}
