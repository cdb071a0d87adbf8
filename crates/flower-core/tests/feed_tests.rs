// Host-side tests for change notification and the sequence clock.

use flower_core::*;
use std::cell::RefCell;
use std::rc::Rc;

fn ramp() -> Timeline {
    Timeline::new(ParameterSnapshot::default()).with_track(
        ParamPath::Progression,
        Track::from_keys([
            Keyframe::new(0.0, 0.0, Easing::Linear),
            Keyframe::new(10.0, 10.0, Easing::Linear),
        ]),
    )
}

#[test]
fn feed_notifies_only_when_values_change() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut feed = ParameterFeed::new(ramp());
    {
        let seen = seen.clone();
        feed.on_values_change(move |s| seen.borrow_mut().push(s.uniforms.progression));
    }
    assert!(feed.current().is_none());

    assert!(feed.advance(1.0));
    assert!(!feed.advance(1.0));
    assert!(feed.advance(2.0));
    // Both positions are past the last key, so the snapshot is the same.
    assert!(feed.advance(20.0));
    assert!(!feed.advance(30.0));

    assert_eq!(*seen.borrow(), vec![1.0, 2.0, 10.0]);
    assert_eq!(feed.current().map(|s| s.uniforms.progression), Some(10.0));
}

#[test]
fn static_source_notifies_once() {
    let count = Rc::new(RefCell::new(0));
    let mut feed = ParameterFeed::new(ParameterSnapshot::default());
    {
        let count = count.clone();
        feed.on_values_change(move |_| *count.borrow_mut() += 1);
    }
    for i in 0..10 {
        feed.advance(i as f32);
    }
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn feed_drives_field_through_subscriber() {
    let field = Rc::new(RefCell::new(PointField::new(8, PointLayout::Legacy)));
    let mut feed = ParameterFeed::new(ramp());
    {
        let field = field.clone();
        feed.on_values_change(move |s| {
            field.borrow_mut().apply(s);
        });
    }
    feed.advance(4.0);
    assert_eq!(field.borrow().uniforms().progression, 4.0);
    assert_eq!(feed.source().length(), 10.0);
}

#[test]
fn sequence_position_clamps_or_wraps() {
    assert_eq!(sequence_position(250.0, 240.0, Playback::Once), 240.0);
    assert_eq!(sequence_position(250.0, 240.0, Playback::Loop), 10.0);
    assert_eq!(sequence_position(-3.0, 240.0, Playback::Loop), 0.0);
    assert_eq!(sequence_position(-3.0, 240.0, Playback::Once), 0.0);
    assert_eq!(sequence_position(500.0, 0.0, Playback::Loop), 500.0);
    assert_eq!(sequence_position(500.0, 0.0, Playback::Once), 500.0);
}

#[test]
fn clock_follows_audio_when_reported() {
    let mut clock = SequenceClock::new(240.0, Playback::Once);
    let dt = clock.tick();
    assert!((0.0..=0.25).contains(&dt));
    assert!(!clock.is_audio_synced());

    clock.sync_to_audio(Some(12.5));
    assert!(clock.is_audio_synced());
    assert_eq!(clock.position(), 12.5);

    // Audio drops out: wall time carries on from the last audio position.
    clock.sync_to_audio(None);
    assert!(!clock.is_audio_synced());
    assert!(clock.position() >= 12.5);

    clock.sync_to_audio(Some(300.0));
    assert_eq!(clock.position(), 240.0);

    let mut looping = SequenceClock::new(240.0, Playback::Loop);
    looping.sync_to_audio(Some(300.0));
    assert_eq!(looping.position(), 60.0);
}

#[test]
fn held_clock_waits_then_hands_over_to_audio() {
    let mut clock = SequenceClock::new(240.0, Playback::Once);
    clock.set_held(true);
    for _ in 0..3 {
        std::thread::sleep(std::time::Duration::from_millis(5));
        let dt = clock.tick();
        assert!(dt > 0.0);
    }
    assert_eq!(clock.position(), 0.0);

    // Playback starts at zero: the sequence must not jump back.
    let before = clock.position();
    clock.set_held(false);
    clock.sync_to_audio(Some(0.0));
    assert!(clock.position() >= before);
    assert_eq!(clock.position(), 0.0);

    // Audio failed: released onto wall time and advancing.
    let mut unsynced = SequenceClock::new(240.0, Playback::Once);
    unsynced.set_held(true);
    unsynced.tick();
    unsynced.set_held(false);
    std::thread::sleep(std::time::Duration::from_millis(5));
    unsynced.tick();
    assert!(unsynced.position() > 0.0);
}
