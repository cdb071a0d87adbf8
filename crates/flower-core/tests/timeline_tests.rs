// Host-side tests for keyframe easing, track sampling and project-state loading.

use flower_core::*;

const EASINGS: [Easing; 5] = [
    Easing::Linear,
    Easing::EaseIn,
    Easing::EaseOut,
    Easing::EaseInOut,
    Easing::CubicBezier([0.25, 0.1, 0.25, 1.0]),
];

#[test]
fn easings_hit_both_endpoints() {
    for e in EASINGS {
        assert!(e.apply(0.0).abs() < 1e-5, "{e:?} at 0");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-5, "{e:?} at 1");
        // Progress outside [0, 1] is clamped.
        assert!(e.apply(-3.0).abs() < 1e-5);
        assert!((e.apply(7.0) - 1.0).abs() < 1e-5);
    }
    assert_eq!(Easing::Hold.apply(0.99), 0.0);
}

#[test]
fn bezier_easings_are_monotonic() {
    for e in EASINGS {
        let mut prev = e.apply(0.0);
        for i in 1..=200 {
            let v = e.apply(i as f32 / 200.0);
            assert!(v + 1e-5 >= prev, "{e:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn ease_in_out_is_symmetric_and_linear_handles_are_identity() {
    for i in 0..=20 {
        let x = i as f32 / 20.0;
        let a = Easing::EaseInOut.apply(x);
        let b = Easing::EaseInOut.apply(1.0 - x);
        assert!((a + b - 1.0).abs() < 1e-4);
        assert!((cubic_bezier([0.25, 0.25, 0.75, 0.75], x) - x).abs() < 1e-4);
    }
    assert!(Easing::EaseIn.apply(0.25) < 0.25);
    assert!(Easing::EaseOut.apply(0.25) > 0.25);
}

#[test]
fn track_interpolates_and_clamps_at_ends() {
    let track = Track::from_keys([
        Keyframe::new(10.0, 5.0, Easing::Linear),
        Keyframe::new(0.0, 1.0, Easing::Linear),
    ]);
    assert_eq!(track.keys()[0].position, 0.0);
    assert_eq!(track.sample(-5.0), Some(1.0));
    assert_eq!(track.sample(0.0), Some(1.0));
    assert_eq!(track.sample(5.0), Some(3.0));
    assert_eq!(track.sample(10.0), Some(5.0));
    assert_eq!(track.sample(99.0), Some(5.0));
    assert_eq!(Track::default().sample(1.0), None);
}

#[test]
fn hold_key_steps_at_next_key() {
    let track = Track::from_keys([
        Keyframe::new(0.0, 1.0, Easing::Hold),
        Keyframe::new(10.0, 5.0, Easing::Linear),
    ]);
    assert_eq!(track.sample(0.0), Some(1.0));
    assert_eq!(track.sample(9.99), Some(1.0));
    assert_eq!(track.sample(10.0), Some(5.0));
}

#[test]
fn later_key_wins_at_shared_position() {
    let track = Track::from_keys([
        Keyframe::new(5.0, 1.0, Easing::Linear),
        Keyframe::new(5.0, 2.0, Easing::Linear),
        Keyframe::new(10.0, 4.0, Easing::Linear),
    ]);
    assert_eq!(track.sample(5.0), Some(2.0));
    assert_eq!(track.sample(7.5), Some(3.0));
    assert_eq!(track.sample(4.0), Some(1.0));
}

#[test]
fn timeline_overlays_tracks_on_base() {
    let timeline = Timeline::new(ParameterSnapshot::default())
        .with_track(
            ParamPath::Progression,
            Track::from_keys([
                Keyframe::new(0.0, 0.0, Easing::Linear),
                Keyframe::new(4.0, 8.0, Easing::Linear),
            ]),
        )
        .with_track(
            ParamPath::Rotation(Axis::Z),
            Track::from_keys([Keyframe::new(0.0, 1.5, Easing::Linear)]),
        );
    assert_eq!(timeline.length(), 4.0);

    let snap = timeline.snapshot_at(1.0);
    assert_eq!(snap.uniforms.progression, 2.0);
    assert_eq!(snap.transforms.rotation.z, 1.5);
    assert_eq!(snap.uniforms.degree_c, 12.0);
    assert_eq!(snap.size, 1.0);

    let replaced = timeline.with_track(
        ParamPath::Progression,
        Track::from_keys([Keyframe::new(0.0, 9.0, Easing::Linear)]),
    );
    assert_eq!(replaced.snapshot_at(3.0).uniforms.progression, 9.0);
    assert_eq!(replaced.with_length(30.0).length(), 30.0);
}

#[test]
fn bundled_state_loads() {
    let timeline = Timeline::from_json(DEFAULT_STATE_JSON).unwrap();
    assert_eq!(timeline.length(), 240.0);
    assert_eq!(*timeline.base(), ParameterSnapshot::default());
    assert!(timeline.track(ParamPath::Progression).is_some());
    assert!(timeline.track(ParamPath::DegreeB).is_none());

    let start = timeline.snapshot_at(0.0);
    assert_eq!(start.uniforms.progression, 0.0);
    assert_eq!(start.uniforms.degree_b, 0.1);
    let end = timeline.snapshot_at(240.0);
    assert_eq!(end.size, 0.0);
    assert_eq!(timeline.snapshot_at(1000.0), end);
    for i in 0..=240 {
        assert!(timeline.snapshot_at(i as f32).is_finite());
    }
}

#[test]
fn empty_state_yields_defaults() {
    let timeline = Timeline::from_json("{}").unwrap();
    assert_eq!(timeline.length(), 0.0);
    assert_eq!(timeline.snapshot_at(12.0), ParameterSnapshot::default());

    let partial = Timeline::from_json(
        r#"{ "staticOverrides": { "uniforms": { "uDegreeC": 20.0 },
             "transforms": { "position": { "x": 0.5 } } } }"#,
    )
    .unwrap();
    let snap = partial.snapshot_at(0.0);
    assert_eq!(snap.uniforms.degree_c, 20.0);
    assert_eq!(snap.uniforms.degree_a, 0.3);
    assert_eq!(snap.transforms.position.x, 0.5);
    assert_eq!(snap.transforms.position.y, 0.0);
}

#[test]
fn unknown_track_path_is_rejected() {
    let err = Timeline::from_json(
        r#"{ "tracks": { "uniforms.uDegreeZ": [ { "position": 0.0, "value": 1.0 } ] } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, FlowerError::UnknownParameter(ref p) if p == "uniforms.uDegreeZ"));
}

#[test]
fn malformed_state_is_rejected() {
    assert!(matches!(
        Timeline::from_json("{ not json"),
        Err(FlowerError::StateParse(_))
    ));
    assert!(matches!(
        Timeline::from_json(r#"{ "length": -1.0 }"#),
        Err(FlowerError::NegativeLength(_))
    ));
}

#[test]
fn param_paths_resolve_by_name() {
    assert_eq!(ParamPath::parse("uniforms.uProgression"), Some(ParamPath::Progression));
    assert_eq!(ParamPath::parse("transforms.rotation.y"), Some(ParamPath::Rotation(Axis::Y)));
    assert_eq!(ParamPath::parse("size"), Some(ParamPath::Size));
    assert_eq!(ParamPath::parse("uniforms.progression"), None);

    let mut snap = ParameterSnapshot::default();
    for (i, path) in ParamPath::ALL.iter().enumerate() {
        path.set(&mut snap, i as f32);
    }
    for (i, path) in ParamPath::ALL.iter().enumerate() {
        assert_eq!(path.get(&snap), i as f32, "{}", path.as_str());
    }
}
