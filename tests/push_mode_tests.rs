//! Integration tests for push-mode driving: edge samples plus
//! host-scheduled tasks from next_wakeup, with stale-token protection

mod common;
use common::*;

use match_scorekeeper::{
    ButtonConfig, ScheduledTask, Scoreboard, ScoreboardConfig, ScoreboardEvent,
    Side, TimeDuration,
};

type TestBoard<'t> = Scoreboard<'t, TestInstant, MockDisplay, MockTimeSource>;

fn board(timer: &MockTimeSource) -> TestBoard<'_> {
    Scoreboard::new(ScoreboardConfig::default(), MockDisplay::new(), timer).unwrap()
}

/// Runs the host side of push mode once: schedule the advertised wake-up,
/// advance the clock to it, fire the task back.
fn fire_next_wakeup(board: &mut TestBoard<'_>, timer: &MockTimeSource) -> Vec<ScoreboardEvent> {
    let (delay, task) = board.next_wakeup().expect("a wake-up should be armed");
    timer.advance(delay.as_millis());
    board.handle_task(task).to_vec()
}

#[test]
fn idle_board_advertises_no_wakeup() {
    let timer = MockTimeSource::new();
    let board = board(&timer);
    assert!(board.next_wakeup().is_none());
}

#[test]
fn single_press_flows_through_a_scheduled_flush() {
    let timer = MockTimeSource::new();
    let mut board = board(&timer);

    board.sample(Side::One, true);
    timer.advance(80);
    board.sample(Side::One, false);

    let (delay, task) = board.next_wakeup().expect("click window armed");
    assert_eq!(delay, TestDuration(300));
    assert!(matches!(task, ScheduledTask::FlushClick { side: Side::One, .. }));

    timer.advance(300);
    let events = board.handle_task(task);
    assert_eq!(&events[..], &[ScoreboardEvent::PointScored { side: Side::One }]);
    assert_eq!(board.state().score(Side::One), 1);

    // A duplicate firing of the same task is a no-op.
    let events = board.handle_task(task);
    assert!(events.is_empty());
    assert_eq!(board.state().score(Side::One), 1);
}

#[test]
fn flush_scheduled_before_a_double_press_dies_silently() {
    let timer = MockTimeSource::new();
    let mut board = board(&timer);

    board.sample(Side::One, true);
    timer.advance(60);
    board.sample(Side::One, false);
    let (_, stale_flush) = board.next_wakeup().expect("click window armed");

    // Second click lands before the host timer fires.
    timer.advance(60);
    board.sample(Side::One, true);
    timer.advance(60);
    let events = board.sample(Side::One, false);
    assert_eq!(&events[..], &[ScoreboardEvent::ServeSwapped]);

    // The late flush must not add a point on top of the double press.
    timer.advance(300);
    let events = board.handle_task(stale_flush);
    assert!(events.is_empty());
    assert_eq!(board.state().score, [0, 0]);
    assert_eq!(board.state().serving, Side::Two);
}

#[test]
fn long_hold_flows_through_a_scheduled_check() {
    let timer = MockTimeSource::new();
    let mut board = board(&timer);

    board.sample(Side::Two, true);
    let (delay, task) = board.next_wakeup().expect("hold armed");
    assert_eq!(delay, TestDuration(3000));
    assert_eq!(task, ScheduledTask::CheckHold { side: Side::Two });

    timer.advance(3000);
    let events = board.handle_task(task);
    assert_eq!(&events[..], &[ScoreboardEvent::BoardReset]);
}

#[test]
fn hold_check_fired_after_an_early_release_is_harmless() {
    let timer = MockTimeSource::new();
    let mut board = board(&timer);

    board.sample(Side::One, true);
    let (_, hold_check) = board.next_wakeup().expect("hold armed");

    // Released long before the threshold; a click window is now open.
    timer.advance(100);
    board.sample(Side::One, false);

    timer.advance(2900);
    let events = board.handle_task(hold_check);
    // The stale hold check finds no hold, but does flush the long-expired
    // click window for this channel.
    assert_eq!(&events[..], &[ScoreboardEvent::PointScored { side: Side::One }]);
    assert_eq!(board.state().score(Side::One), 1);
}

#[test]
fn window_wakeup_preempts_a_longer_hold_wakeup() {
    let timer = MockTimeSource::new();
    let mut board = board(&timer);

    // Side one's window is pending while side two starts holding.
    board.sample(Side::One, true);
    timer.advance(60);
    board.sample(Side::One, false);
    board.sample(Side::Two, true);

    let (delay, task) = board.next_wakeup().expect("two deadlines armed");
    assert_eq!(delay, TestDuration(300));
    assert!(matches!(task, ScheduledTask::FlushClick { side: Side::One, .. }));
}

#[test]
fn win_reset_flows_through_a_scheduled_task() {
    let timer = MockTimeSource::new();
    let mut board = board(&timer);

    // Ten quick points, then the winning press, all in push mode.
    for point in 0..11 {
        if point > 0 {
            timer.advance(60);
        }
        board.sample(Side::One, true);
        timer.advance(60);
        board.sample(Side::One, false);
        let events = fire_next_wakeup(&mut board, &timer);
        assert!(!events.is_empty());
    }
    assert!(board.is_win_displayed());
    assert_eq!(board.state().games_won, [1, 0]);

    let (delay, task) = board.next_wakeup().expect("reset armed");
    assert_eq!(delay, TestDuration(2000));
    assert!(matches!(task, ScheduledTask::ExecuteReset { .. }));

    timer.advance(2000);
    let events = board.handle_task(task);
    assert_eq!(&events[..], &[ScoreboardEvent::BoardReset]);
    assert_eq!(board.state().score, [0, 0]);
    assert_eq!(board.state().games_won, [1, 0]);
}

#[test]
fn superseded_reset_task_is_a_noop() {
    let timer = MockTimeSource::new();
    // Short hold so the manual reset can land inside the win display.
    let config = ScoreboardConfig {
        buttons: ButtonConfig {
            long_hold: TestDuration(500),
            ..ButtonConfig::default()
        },
        ..ScoreboardConfig::default()
    };
    let mut board = Scoreboard::new(config, MockDisplay::new(), &timer).unwrap();

    for _ in 0..11 {
        board.sample(Side::One, true);
        timer.advance(60);
        board.sample(Side::One, false);
        timer.advance(310);
        board.service();
        timer.advance(60);
    }
    assert!(board.is_win_displayed());
    let (_, stale_reset) = board.next_wakeup().expect("reset armed");
    assert!(matches!(stale_reset, ScheduledTask::ExecuteReset { .. }));

    // A long hold lands first and clears the tally.
    board.sample(Side::Two, true);
    timer.advance(500);
    let events = board.service();
    assert_eq!(&events[..], &[ScoreboardEvent::BoardReset]);
    assert_eq!(board.state().games_won, [0, 0]);

    // The old reset task fires late and does nothing.
    timer.advance(2000);
    let events = board.handle_task(stale_reset);
    assert!(events.is_empty());
    assert_eq!(board.state().games_won, [0, 0]);
    assert_eq!(board.state().score, [0, 0]);
}
