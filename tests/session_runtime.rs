//! Integration tests for the session worker running on tokio time.

use std::time::Duration;

use breaktime::{Notification, Phase, SessionCommand, SessionHandle, TimerSettings};
use tokio::sync::broadcast;
use tokio::time::{timeout, Instant};

async fn next_state_change(rx: &mut broadcast::Receiver<Notification>) -> (Phase, u64) {
    loop {
        match rx.recv().await.unwrap() {
            Notification::StateChanged {
                phase,
                remaining_seconds,
            } => return (phase, remaining_seconds),
            _ => continue,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn ticks_once_per_second_while_working() {
    let session = SessionHandle::spawn(TimerSettings::new(25, 5, false));
    let mut rx = session.subscribe();

    let start = Instant::now();
    session.execute(SessionCommand::StartWork).await.unwrap();
    assert_eq!(next_state_change(&mut rx).await, (Phase::Working, 1500));

    for expected in (1497..1500).rev() {
        match rx.recv().await.unwrap() {
            Notification::Tick { remaining_seconds } => assert_eq!(remaining_seconds, expected),
            other => panic!("expected tick, got {other:?}"),
        }
    }
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn work_rolls_over_into_break_and_back() {
    let session = SessionHandle::spawn(TimerSettings::new(1, 2, false));
    let mut rx = session.subscribe();

    session.execute(SessionCommand::StartWork).await.unwrap();
    assert_eq!(next_state_change(&mut rx).await, (Phase::Working, 60));
    assert_eq!(next_state_change(&mut rx).await, (Phase::Breaking, 120));
    assert_eq!(next_state_change(&mut rx).await, (Phase::Working, 60));
}

#[tokio::test(start_paused = true)]
async fn completion_comes_one_tick_after_zero() {
    let session = SessionHandle::spawn(TimerSettings::new(1, 1, false));
    let mut rx = session.subscribe();
    session.execute(SessionCommand::StartWork).await.unwrap();

    let mut seen = Vec::new();
    loop {
        let n = rx.recv().await.unwrap();
        seen.push(n);
        if n == Notification::Completed {
            break;
        }
    }
    let tail = &seen[seen.len() - 2..];
    assert_eq!(
        tail,
        &[Notification::Tick { remaining_seconds: 0 }, Notification::Completed]
    );
}

#[tokio::test(start_paused = true)]
async fn paused_session_stays_silent() {
    let session = SessionHandle::spawn(TimerSettings::new(25, 5, false));
    session.execute(SessionCommand::StartWork).await.unwrap();
    tokio::time::sleep(Duration::from_millis(7500)).await;

    let paused = session.execute(SessionCommand::Pause).await.unwrap();
    assert_eq!(paused.phase, Phase::Paused);
    assert_eq!(paused.remaining_seconds, 1493);

    let mut rx = session.subscribe();
    let waited = timeout(Duration::from_secs(30), rx.recv()).await;
    assert!(waited.is_err(), "no notifications while paused");

    let resumed = session.execute(SessionCommand::Resume).await.unwrap();
    assert_eq!(resumed.phase, Phase::Working);
    assert_eq!(resumed.remaining_seconds, 1493);
}

#[tokio::test(start_paused = true)]
async fn stopped_session_stays_silent() {
    let session = SessionHandle::spawn(TimerSettings::new(25, 5, false));
    session.execute(SessionCommand::StartWork).await.unwrap();
    let stopped = session.execute(SessionCommand::Stop).await.unwrap();
    assert_eq!(stopped.phase, Phase::Stopped);
    assert_eq!(stopped.remaining_seconds, 0);

    let mut rx = session.subscribe();
    assert!(timeout(Duration::from_secs(10), rx.recv()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn postpone_during_break_starts_short_work() {
    let session = SessionHandle::spawn(TimerSettings::new(25, 5, false));
    session.execute(SessionCommand::StartBreak).await.unwrap();
    tokio::time::sleep(Duration::from_millis(42_500)).await;

    let state = session
        .execute(SessionCommand::Postpone { minutes: 10 })
        .await
        .unwrap();
    assert_eq!(state.phase, Phase::Working);
    assert_eq!(state.remaining_seconds, 600);
}

#[tokio::test(start_paused = true)]
async fn published_state_follows_ticks() {
    let session = SessionHandle::spawn(TimerSettings::new(25, 5, false));
    let mut watch = session.watch();
    session.execute(SessionCommand::StartWork).await.unwrap();

    watch
        .wait_for(|state| state.remaining_seconds == 1495)
        .await
        .unwrap();
    assert_eq!(session.state().phase, Phase::Working);
}
